//! PNG output

use image::RgbaImage;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Error type for output operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Save a panel image, replacing any existing file at `path`.
///
/// Missing parent directories are created. The format follows the file
/// extension, which is PNG for the default output name.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    log::info!("Wrote {}x{} panel to {}", image.width(), image.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::TempDir;

    #[test]
    fn test_save_creates_parents_and_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/panel.png");

        save_png(&RgbaImage::from_pixel(4, 2, Rgba([1, 2, 3, 255])), &path).unwrap();
        assert_eq!(image::open(&path).unwrap().to_rgba8().dimensions(), (4, 2));

        save_png(&RgbaImage::from_pixel(8, 8, Rgba([9, 9, 9, 255])), &path).unwrap();
        let reloaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(reloaded.dimensions(), (8, 8));
        assert_eq!(*reloaded.get_pixel(0, 0), Rgba([9, 9, 9, 255]));
    }

    #[test]
    fn test_save_into_file_parent_fails() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, b"not a dir").unwrap();

        let result = save_png(&RgbaImage::new(1, 1), &blocker.join("panel.png"));
        assert!(result.is_err());
    }
}
