use std::fs;
use std::path::{Path, PathBuf};

use super::domain::CrewMember;

/// Source of the crew roster; re-read on every call, never cached.
pub trait CrewSource: Send + Sync {
    fn load_crew(&self) -> Result<Vec<CrewMember>, CrewError>;
}

/// Roster stored as a JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonCrewFile {
    path: PathBuf,
}

impl JsonCrewFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CrewSource for JsonCrewFile {
    fn load_crew(&self) -> Result<Vec<CrewMember>, CrewError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| CrewError::Read {
            path: self.path.clone(),
            source,
        })?;
        let crew: Vec<CrewMember> =
            serde_json::from_str(&raw).map_err(|source| CrewError::Parse {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), members = crew.len(), "crew roster loaded");
        Ok(crew)
    }
}

/// Roster load failure.
#[derive(Debug, thiserror::Error)]
pub enum CrewError {
    #[error("unable to read crew roster {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed crew roster {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
