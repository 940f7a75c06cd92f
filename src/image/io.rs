//! I/O helpers for images and JSON.
//!
//! - `load_image`: read a PNG/JPEG/etc. into an RGB copy (for annotation) and
//!   an owned 8-bit gray buffer (for line detection).
//! - `save_rgb_image`: write an annotated RGB image.
//! - `save_vote_heatmap`: write a vote surface as a normalized grayscale PNG.
//! - `write_json_file` / `read_json_file`: pretty JSON to and from disk.
//! - `list_image_files`: sorted image files of a directory.
use super::{ImageU8, ImageView};
use image::{GrayImage, Luma, RgbImage};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "tif", "tiff"];

/// Owned 8-bit grayscale buffer with stride and borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        let stride = width;
        Self {
            width,
            height,
            stride,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.stride,
            data: &self.data,
        }
    }
}

/// Decoded input image: color copy for drawing, gray copy for detection.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub rgb: RgbImage,
    pub gray: GrayImageU8,
}

/// Load an image from disk as RGB and 8-bit grayscale.
pub fn load_image(path: &Path) -> Result<LoadedImage, String> {
    let img = image::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
    let rgb = img.to_rgb8();
    let luma = img.into_luma8();
    let width = luma.width() as usize;
    let height = luma.height() as usize;
    let gray = GrayImageU8::new(width, height, luma.into_raw());
    Ok(LoadedImage { rgb, gray })
}

/// Save an RGB image, creating parent directories.
pub fn save_rgb_image(image: &RgbImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a vote surface as grayscale, scaling its maximum to 255.
pub fn save_vote_heatmap<V>(surface: &V, path: &Path) -> Result<(), String>
where
    V: ImageView<Pixel = f32>,
{
    ensure_parent_dir(path)?;
    let peak = surface
        .rows()
        .flat_map(|row| row.iter().copied())
        .fold(0.0f32, f32::max);
    let scale = if peak > 0.0 { 255.0 / peak } else { 0.0 };
    let mut out = GrayImage::new(surface.width() as u32, surface.height() as u32);
    for (y, row) in surface.rows().enumerate() {
        for (x, &v) in row.iter().enumerate() {
            let level = (v * scale).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([level as u8]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    serde_json::from_str(&data).map_err(|e| format!("Failed to parse {}: {e}", path.display()))
}

/// Image files directly inside `dir`, sorted by file name.
pub fn list_image_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries =
        fs::read_dir(dir).map_err(|e| format!("Failed to read directory {}: {e}", dir.display()))?;
    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|e| format!("Failed to read directory {}: {e}", dir.display()))?
            .path();
        if path.is_file() && has_image_extension(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_image_extensions() {
        assert!(has_image_extension(Path::new("a/b/scene.JPG")));
        assert!(has_image_extension(Path::new("scene.png")));
        assert!(!has_image_extension(Path::new("lines.json")));
        assert!(!has_image_extension(Path::new("README")));
    }

    #[test]
    fn gray_buffer_view_matches_dimensions() {
        let buf = GrayImageU8::new(3, 2, vec![1, 2, 3, 4, 5, 6]);
        let view = buf.as_view();
        assert_eq!((view.w, view.h, view.stride), (3, 2, 3));
        assert_eq!(view.get(2, 1), 6);
    }
}
