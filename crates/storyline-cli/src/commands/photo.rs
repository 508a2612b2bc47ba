//! Reads a photo from disk for upload.
//!
//! Resizing and compression are left to whoever produced the file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};

use storyline_core::story::PhotoPayload;

pub fn read_photo(path: &Path) -> Result<PhotoPayload> {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    if mime.type_() != mime_guess::mime::IMAGE {
        bail!("{} does not look like an image ({})", path.display(), mime);
    }

    let bytes =
        fs::read(path).with_context(|| format!("Failed to read photo {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "photo".to_string());

    Ok(PhotoPayload {
        bytes,
        file_name,
        content_type: mime.essence_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_reads_jpeg() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sunset.jpg");
        fs::write(&path, [0xFF, 0xD8, 0xFF]).unwrap();

        let photo = read_photo(&path).unwrap();
        assert_eq!(photo.content_type, "image/jpeg");
        assert_eq!(photo.file_name, "sunset.jpg");
        assert_eq!(photo.bytes, vec![0xFF, 0xD8, 0xFF]);
    }

    #[test]
    fn test_rejects_non_image() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "hello").unwrap();

        assert!(read_photo(&path).is_err());
    }
}
