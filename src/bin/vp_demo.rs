use log::{info, warn};
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Instant;
use vanishing_point::annotate::{draw_lines, draw_vanishing_point, LINE_COLOR, POINT_COLOR};
use vanishing_point::config::demo::{self, DemoConfig};
use vanishing_point::diagnostics::elapsed_ms;
use vanishing_point::image::io::{
    list_image_files, load_image, read_json_file, save_rgb_image, save_vote_heatmap,
    write_json_file,
};
use vanishing_point::image::ImageF32;
use vanishing_point::lines::{HoughLineDetector, LineSource, PrecomputedLines};
use vanishing_point::{Estimate, LineSegment, VanishingPointEstimator};

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = demo::load_config(Path::new(&config_path))?;

    let images = input_images(&config.input)?;
    if images.is_empty() {
        return Err(format!("No images found in {}", config.input.display()));
    }

    let estimator = VanishingPointEstimator::new(config.estimator.clone());
    let detector = HoughLineDetector::new(config.hough.clone());

    let mut reports = Vec::with_capacity(images.len());
    for path in &images {
        let report = process_image(path, &config, &estimator, &detector).unwrap_or_else(|err| {
            warn!("{}: {err}", path.display());
            ImageReport::failed(path, err)
        });
        reports.push(report);
    }

    let found = reports.iter().filter(|r| r.estimate.is_some()).count();
    let summary = DemoReport {
        images: reports.len(),
        found,
        results: reports,
    };
    write_json_file(&config.output.result_json, &summary)?;

    info!(
        "Processed {} images, vanishing point found in {}",
        summary.images, summary.found
    );
    println!(
        "Saved report for {} images ({} with a vanishing point) to {}",
        summary.images,
        summary.found,
        config.output.result_json.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: vp_demo <config.json>".to_string()
}

fn input_images(input: &Path) -> Result<Vec<PathBuf>, String> {
    if input.is_dir() {
        list_image_files(input)
    } else {
        Ok(vec![input.to_path_buf()])
    }
}

fn image_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

/// Line list for `image` when the config points at precomputed lines.
fn precomputed_lines(lines: &Path, image: &Path) -> Result<Option<Vec<LineSegment>>, String> {
    let file = if lines.is_dir() {
        lines.join(format!("{}.json", image_stem(image)))
    } else {
        lines.to_path_buf()
    };
    read_json_file(&file)
}

fn process_image(
    path: &Path,
    config: &DemoConfig,
    estimator: &VanishingPointEstimator,
    detector: &HoughLineDetector,
) -> Result<ImageReport, String> {
    let loaded = load_image(path)?;
    let gray = ImageF32::from_u8(&loaded.gray.as_view());
    let (width, height) = (gray.w, gray.h);

    let detect_start = Instant::now();
    let raw = match &config.lines {
        Some(lines) => PrecomputedLines::new(precomputed_lines(lines, path)?).detect_lines(&gray),
        None => detector.detect_lines(&gray),
    };
    let detect_ms = elapsed_ms(detect_start);
    let raw_lines = raw.as_ref().map_or(0, |l| l.len());

    let mut canvas = loaded.rgb;
    let stem = image_stem(path);
    let (estimate, error) = match estimator.estimate_with_surface(raw.as_deref(), width, height) {
        Ok((estimate, surface)) => {
            if config.output.draw_lines {
                draw_lines(
                    &mut canvas,
                    &estimate.selection.accepted,
                    LINE_COLOR,
                    config.output.line_thickness,
                );
            }
            draw_vanishing_point(
                &mut canvas,
                estimate.point,
                config.output.circle_radius,
                POINT_COLOR,
            );
            if let Some(dir) = &config.output.votes_dir {
                save_vote_heatmap(&surface, &dir.join(format!("{stem}_votes.png")))?;
            }
            let (x, y) = estimate.point.as_xy();
            info!(
                "{}: vanishing point at x={} y={} ({:?}, {} of {} lines)",
                path.display(),
                x,
                y,
                estimate.selection.status,
                estimate.selection.accepted_count(),
                raw_lines
            );
            (Some(estimate), None)
        }
        Err(err) => {
            warn!("{}: {err}", path.display());
            (None, Some(err.to_string()))
        }
    };

    let annotated = config.output.annotated_dir.join(format!("{stem}.png"));
    save_rgb_image(&canvas, &annotated)?;

    Ok(ImageReport {
        image: path.to_path_buf(),
        width,
        height,
        raw_lines,
        line_detection_ms: detect_ms,
        estimate,
        error,
        annotated: Some(annotated),
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DemoReport {
    images: usize,
    found: usize,
    results: Vec<ImageReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ImageReport {
    image: PathBuf,
    width: usize,
    height: usize,
    raw_lines: usize,
    line_detection_ms: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimate: Option<Estimate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotated: Option<PathBuf>,
}

impl ImageReport {
    fn failed(path: &Path, error: String) -> Self {
        Self {
            image: path.to_path_buf(),
            width: 0,
            height: 0,
            raw_lines: 0,
            line_detection_ms: 0.0,
            estimate: None,
            error: Some(error),
            annotated: None,
        }
    }
}
