use log::{info, warn};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use vanishing_point::config::detect_lines;
use vanishing_point::diagnostics::TimingBreakdown;
use vanishing_point::image::io::{list_image_files, load_image, write_json_file};
use vanishing_point::image::ImageF32;
use vanishing_point::lines::HoughLineDetector;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = detect_lines::load_config(Path::new(&config_path))?;

    let images = if config.input.is_dir() {
        list_image_files(&config.input)?
    } else {
        vec![config.input.clone()]
    };
    let detector = HoughLineDetector::new(config.hough.clone());

    let mut summaries = Vec::with_capacity(images.len());
    for path in &images {
        let loaded = match load_image(path) {
            Ok(img) => img,
            Err(err) => {
                warn!("{err}");
                continue;
            }
        };
        let gray = ImageF32::from_u8(&loaded.gray.as_view());
        let detection = detector.detect_with_trace(&gray);

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let lines_json = config.output.lines_dir.join(format!("{stem}.json"));
        // An empty detection is stored as `null`, like a detector that found nothing.
        let lines = (!detection.lines.is_empty()).then_some(&detection.lines);
        write_json_file(&lines_json, &lines)?;

        info!(
            "{}: {} edge pixels, {} lines",
            path.display(),
            detection.edge_count(),
            detection.lines.len()
        );
        summaries.push(LineSummary {
            image: path.clone(),
            width: gray.w,
            height: gray.h,
            edge_pixels: detection.edge_count(),
            lines: detection.lines.len(),
            lines_json,
            timings: detection.timings,
        });
    }

    if let Some(summary_path) = &config.output.summary_json {
        write_json_file(summary_path, &summaries)?;
    }
    println!(
        "Saved line lists for {} images to {}",
        summaries.len(),
        config.output.lines_dir.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: detect_lines <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LineSummary {
    image: PathBuf,
    width: usize,
    height: usize,
    edge_pixels: usize,
    lines: usize,
    lines_json: PathBuf,
    timings: TimingBreakdown,
}
