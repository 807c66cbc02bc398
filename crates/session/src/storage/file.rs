use crate::abstract_trait::StorageAdapter;
use anyhow::{Context, Result};
use serde::{Serialize, de::DeserializeOwned};
use std::{
    fs, io,
    marker::PhantomData,
    path::{Path, PathBuf},
};
use tracing::{debug, warn};

/// JSON blob stored as `<profile_dir>/<namespace>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage<S> {
    path: PathBuf,
    _state: PhantomData<fn() -> S>,
}

impl<S> FileStorage<S> {
    pub fn new(profile_dir: impl AsRef<Path>, namespace: &str) -> Self {
        Self {
            path: profile_dir.as_ref().join(format!("{namespace}.json")),
            _state: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl<S> StorageAdapter<S> for FileStorage<S>
where
    S: Serialize + DeserializeOwned,
{
    fn load(&self) -> Option<S> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No persisted state at {}", self.path.display());
                return None;
            }
            Err(e) => {
                warn!("Failed to read {}: {e}", self.path.display());
                return None;
            }
        };

        match serde_json::from_slice(&data) {
            Ok(state) => Some(state),
            Err(e) => {
                warn!("Discarding unreadable state at {}: {e}", self.path.display());
                None
            }
        }
    }

    fn save(&self, state: &S) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let json = serde_json::to_vec(state).context("Failed to serialize state")?;

        // Readers see either the previous blob or the new one, never a partial write.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}
