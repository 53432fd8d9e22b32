use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Photo written to the temp directory for the length of one send attempt.
///
/// Each submission gets its own slot directory under the temp dir, so two
/// applicants uploading the same file name never see each other's bytes.
/// The file and its slot are removed when the value is dropped.
#[derive(Debug)]
pub struct StagedPhoto {
    slot: PathBuf,
    path: PathBuf,
    filename: String,
}

impl StagedPhoto {
    /// `filename` must already be sanitized.
    pub fn write(dir: &Path, filename: &str, contents: &[u8]) -> std::io::Result<Self> {
        fs::create_dir_all(dir)?;
        let slot = dir.join(format!("{:016x}", rand::random::<u64>()));
        fs::create_dir(&slot)?;

        let path = slot.join(filename);
        if let Err(err) = fs::write(&path, contents) {
            fs::remove_dir(&slot).ok();
            return Err(err);
        }

        Ok(Self {
            slot,
            path,
            filename: filename.to_string(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn read(&self) -> std::io::Result<Vec<u8>> {
        fs::read(&self.path)
    }
}

impl Drop for StagedPhoto {
    fn drop(&mut self) {
        let removed = fs::remove_file(&self.path).and_then(|()| fs::remove_dir(&self.slot));
        match removed {
            Ok(()) => tracing::debug!(path = %self.path.display(), "staged photo removed"),
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to remove staged photo")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!(
            "mars-staging-{:016x}",
            rand::random::<u64>()
        ))
    }

    #[test]
    fn same_name_uploads_do_not_collide() {
        let dir = scratch_dir();

        let first = StagedPhoto::write(&dir, "photo.jpg", b"first").expect("first staged");
        let second = StagedPhoto::write(&dir, "photo.jpg", b"second").expect("second staged");

        assert_ne!(first.path(), second.path());
        assert_eq!(first.filename(), "photo.jpg");
        assert_eq!(second.filename(), "photo.jpg");
        assert_eq!(first.read().expect("first readable"), b"first");
        assert_eq!(second.read().expect("second readable"), b"second");

        drop(first);
        assert_eq!(second.read().expect("second survives"), b"second");

        drop(second);
        let leftovers = fs::read_dir(&dir).expect("temp dir exists").count();
        assert_eq!(leftovers, 0, "slots are removed with their photos");

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn drop_tolerates_already_removed_file() {
        let dir = scratch_dir();
        let staged = StagedPhoto::write(&dir, "lewis.jpg", b"\xff\xd8").expect("staged");
        fs::remove_file(staged.path()).expect("removed early");

        drop(staged);

        fs::remove_dir_all(&dir).ok();
    }
}
