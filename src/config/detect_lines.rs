use crate::lines::HoughParams;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectLinesConfig {
    /// Image file or directory of images.
    pub input: PathBuf,
    #[serde(default)]
    pub hough: HoughParams,
    pub output: DetectLinesOutputConfig,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectLinesOutputConfig {
    /// One `<image stem>.json` line list per input image.
    pub lines_dir: PathBuf,
    /// Optional per-image summary (edge count, line count, timings).
    #[serde(default)]
    pub summary_json: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<DetectLinesConfig, String> {
    super::load_json(path)
}
