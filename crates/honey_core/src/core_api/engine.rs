use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::backup;
use crate::codec;
use crate::layout::{FieldLayout, HONEY_FIELD};

use super::error::{CoreError, CoreErrorCode};
use super::types::{SaveReport, Snapshot, StagedValue};

#[derive(Debug, Clone, Copy)]
pub struct Engine {
    layout: FieldLayout,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self {
            layout: HONEY_FIELD,
        }
    }

    /// Override the field layout. The honey layout is the default; this
    /// exists so sessions over small synthetic files can be constructed.
    pub fn with_layout(layout: FieldLayout) -> Self {
        Self { layout }
    }

    /// Read the whole file and decode the honey field. On failure nothing is
    /// constructed, so a caller holding a previously loaded session keeps it.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Session, CoreError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to read {}: {e}", path.display()),
            )
        })?;
        let value = codec::decode(&bytes, self.layout).map_err(|e| {
            CoreError::new(CoreErrorCode::Format, format!("{}: {e}", path.display()))
        })?;

        Ok(Session {
            path: path.to_path_buf(),
            bytes,
            layout: self.layout,
            value,
            staged: value,
            backup_taken: false,
        })
    }
}

/// One loaded save file. Holds the complete byte image plus the decoded
/// honey value; the staged value starts equal to the loaded one, so an
/// immediate save rewrites the field unchanged.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    bytes: Vec<u8>,
    layout: FieldLayout,
    value: u32,
    staged: u32,
    backup_taken: bool,
}

impl Session {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn staged(&self) -> u32 {
        self.staged
    }

    pub fn is_dirty(&self) -> bool {
        self.staged != self.value
    }

    /// True once this session has confirmed a backup on disk.
    pub fn backup_taken(&self) -> bool {
        self.backup_taken
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            file_name: self
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            file_len: self.bytes.len(),
            honey: self.value,
        }
    }

    /// Stage a user-supplied textual value for the next save. Negative input
    /// is normalized to zero and flagged rather than rejected; unparseable or
    /// too-large input fails without changing the staged value.
    pub fn stage_text(&mut self, candidate: &str) -> Result<StagedValue, CoreError> {
        let trimmed = candidate.trim();
        let parsed: i128 = trimmed.parse().map_err(|_| {
            CoreError::new(
                CoreErrorCode::Validation,
                format!("'{trimmed}' is not a whole number"),
            )
        })?;

        let staged = if parsed < 0 {
            warn!("negative honey value {parsed} clamped to 0");
            StagedValue {
                value: 0,
                clamped: true,
            }
        } else if parsed > i128::from(self.layout.max_value()) {
            return Err(CoreError::new(
                CoreErrorCode::Validation,
                format!(
                    "{parsed} exceeds the maximum honey value {}",
                    self.layout.max_value()
                ),
            ));
        } else {
            StagedValue {
                value: parsed as u32,
                clamped: false,
            }
        };

        self.staged = staged.value;
        Ok(staged)
    }

    /// Stage an already-validated value (the presets path).
    pub fn stage(&mut self, value: u32) {
        self.staged = value;
    }

    /// Commit the staged value: confirm the backup, patch a working copy of
    /// the bytes, write it back atomically, and only then promote the new
    /// state. A failure at any step leaves the session at its pre-save state.
    pub fn save(&mut self) -> Result<SaveReport, CoreError> {
        let backup = backup::ensure_backup(&self.path).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to back up {}: {e}", self.path.display()),
            )
        })?;

        let mut working = self.bytes.clone();
        codec::patch(&mut working, self.layout, self.staged).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Format,
                format!("failed to encode honey field: {e}"),
            )
        })?;

        write_atomic(&self.path, &working).map_err(|e| {
            CoreError::new(
                CoreErrorCode::Io,
                format!("failed to write {}: {e}", self.path.display()),
            )
        })?;

        let previous = self.value;
        self.bytes = working;
        self.value = self.staged;
        self.backup_taken = true;
        info!("updated honey value to {}", self.value);

        Ok(SaveReport {
            previous,
            new: self.value,
            backup_path: backup.path,
            backup_created: backup.created,
        })
    }
}

/// Replace the file contents in full via a sibling temp file and a rename,
/// so a failed write cannot leave the save half-patched.
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from("save"));
    name.push(".tmp");
    let tmp = dir.join(name);

    if let Err(e) = fs::write(&tmp, bytes) {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    match fs::rename(&tmp, path) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            Err(e)
        }
    }
}
