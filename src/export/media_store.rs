use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::{ExportReceipt, ExportSink, Permission, SinkKind, encode_png};
use crate::capture::CapturedImage;
use crate::config::ScreenConfig;
use crate::error::ExportError;
use crate::util::time::timestamp_millis;

/// Writes PNG captures into an album folder under the user's pictures directory
#[derive(Debug)]
pub struct MediaStoreSink {
    album_dir: Option<PathBuf>,
    permission: Mutex<Permission>,
}

impl MediaStoreSink {
    pub fn new(root: impl Into<PathBuf>, album: &str) -> Self {
        Self {
            album_dir: Some(root.into().join(album)),
            permission: Mutex::new(Permission::Undetermined),
        }
    }

    /// Uses the configured export directory, else the platform pictures directory.
    pub fn from_config(config: &ScreenConfig) -> Self {
        let root = config.export_dir.clone().or_else(default_root);
        match root {
            Some(root) => Self::new(root, &config.album),
            None => {
                log::warn!("No pictures directory on this platform; saving will be refused");
                Self {
                    album_dir: None,
                    permission: Mutex::new(Permission::Undetermined),
                }
            }
        }
    }

    fn next_file_path(dir: &Path) -> PathBuf {
        let stamp = timestamp_millis();
        let mut path = dir.join(format!("sticker-{stamp}.png"));
        let mut n = 1;
        while path.exists() {
            path = dir.join(format!("sticker-{stamp}-{n}.png"));
            n += 1;
        }
        path
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn default_root() -> Option<PathBuf> {
    dirs::picture_dir().or_else(dirs::home_dir)
}

#[cfg(target_arch = "wasm32")]
fn default_root() -> Option<PathBuf> {
    None
}

impl ExportSink for MediaStoreSink {
    fn kind(&self) -> SinkKind {
        SinkKind::MediaStore
    }

    fn permission(&self) -> Permission {
        *self.permission.lock()
    }

    fn request_permission(&self) -> Permission {
        let mut permission = self.permission.lock();
        if *permission != Permission::Undetermined {
            return *permission;
        }

        *permission = match &self.album_dir {
            Some(dir) => match std::fs::create_dir_all(dir) {
                Ok(()) => {
                    log::info!("Media store ready at {}", dir.display());
                    Permission::Granted
                }
                Err(err) => {
                    log::warn!("Media store unavailable at {}: {}", dir.display(), err);
                    Permission::Denied
                }
            },
            None => Permission::Denied,
        };
        *permission
    }

    fn export(&self, capture: &CapturedImage) -> Result<ExportReceipt, ExportError> {
        if self.permission() != Permission::Granted {
            return Err(ExportError::PermissionDenied);
        }
        let dir = self.album_dir.as_deref().ok_or(ExportError::PermissionDenied)?;

        let bytes = encode_png(capture)?;
        let path = Self::next_file_path(dir);
        std::fs::write(&path, &bytes).map_err(|source| ExportError::Io {
            path: path.display().to_string(),
            source,
        })?;

        log::info!("Saved {}x{} capture to {}", capture.width(), capture.height(), path.display());
        Ok(ExportReceipt {
            location: path.display().to_string(),
            bytes_written: bytes.len(),
        })
    }
}
