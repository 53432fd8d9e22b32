//! Uploaded photo gallery backed by a single directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::filenames::sanitize_filename;

const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Directory of uploaded images. Uploads with the same sanitized name replace
/// each other; nothing is ever deleted.
#[derive(Debug, Clone)]
pub struct GalleryStore {
    dir: PathBuf,
}

impl GalleryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Image filenames in the gallery, sorted. A missing directory is empty.
    pub fn list_images(&self) -> Result<Vec<String>, GalleryError> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(GalleryError::Io {
                    path: self.dir.clone(),
                    source,
                })
            }
        };

        let mut images = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| GalleryError::Io {
                path: self.dir.clone(),
                source,
            })?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if is_image(&name) {
                images.push(name);
            }
        }
        images.sort();
        Ok(images)
    }

    /// Write an upload under its sanitized name and return that name.
    pub fn store(&self, filename: &str, contents: &[u8]) -> Result<String, GalleryError> {
        let safe_name = sanitize_filename(filename);
        if safe_name.is_empty() {
            return Err(GalleryError::InvalidFilename(filename.to_string()));
        }

        fs::create_dir_all(&self.dir).map_err(|source| GalleryError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let target = self.dir.join(&safe_name);
        fs::write(&target, contents).map_err(|source| GalleryError::Io {
            path: target.clone(),
            source,
        })?;

        tracing::info!(file = %safe_name, bytes = contents.len(), "gallery image stored");
        Ok(safe_name)
    }
}

fn is_image(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    #[error("filename '{0}' has no usable characters")]
    InvalidFilename(String),
    #[error("gallery storage failure at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_image_extensions_case_insensitively() {
        assert!(is_image("olympus.PNG"));
        assert!(is_image("valles.jpeg"));
        assert!(is_image("rover.Jpg"));
        assert!(!is_image("notes.txt"));
        assert!(!is_image("png"));
        assert!(!is_image("archive.png.zip"));
    }
}
