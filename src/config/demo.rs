use crate::estimator::EstimatorParams;
use crate::lines::HoughParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoConfig {
    /// Image file or directory of images.
    pub input: PathBuf,
    /// Precomputed line lists used instead of the Hough detector: a JSON file
    /// when `input` is a file, otherwise a directory of `<image stem>.json`.
    #[serde(default)]
    pub lines: Option<PathBuf>,
    #[serde(default)]
    pub hough: HoughParams,
    /// `selection` and `accumulator` sections.
    #[serde(flatten)]
    pub estimator: EstimatorParams,
    #[serde(default)]
    pub output: DemoOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DemoOutputConfig {
    pub annotated_dir: PathBuf,
    pub result_json: PathBuf,
    pub circle_radius: u32,
    /// Overlay the accepted segments.
    pub draw_lines: bool,
    pub line_thickness: u32,
    /// Save each vote surface as a grayscale heatmap here.
    pub votes_dir: Option<PathBuf>,
}

impl Default for DemoOutputConfig {
    fn default() -> Self {
        Self {
            annotated_dir: PathBuf::from("out"),
            result_json: PathBuf::from("out/report.json"),
            circle_radius: 5,
            draw_lines: true,
            line_thickness: 2,
            votes_dir: None,
        }
    }
}

pub fn load_config(path: &Path) -> Result<DemoConfig, String> {
    let config: DemoConfig = super::load_json(path)?;
    config
        .estimator
        .validate()
        .map_err(|e| format!("Invalid config {}: {e}", path.display()))?;
    Ok(config)
}
