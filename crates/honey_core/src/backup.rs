use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::info;

pub const BACKUP_SUFFIX: &str = ".backup";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupOutcome {
    pub path: PathBuf,
    /// False when a backup from an earlier edit was already on disk.
    pub created: bool,
}

/// Sibling backup path: the full file name, existing extension included,
/// with `.backup` appended. `save.BMGSave` backs up to `save.BMGSave.backup`.
pub fn backup_path(original: &Path) -> PathBuf {
    let mut name = original
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(BACKUP_SUFFIX);
    original.with_file_name(name)
}

/// Copy the on-disk bytes of `original` to the sibling backup path exactly
/// once. An existing backup is never overwritten, so the pre-edit bytes
/// survive any number of later saves and later sessions.
pub fn ensure_backup(original: &Path) -> io::Result<BackupOutcome> {
    let path = backup_path(original);
    if path.try_exists()? {
        return Ok(BackupOutcome {
            path,
            created: false,
        });
    }

    fs::copy(original, &path)?;
    info!("created backup at {}", path.display());
    Ok(BackupOutcome {
        path,
        created: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_path_keeps_original_extension() {
        let path = backup_path(Path::new("/saves/slot1.BMGSave"));
        assert_eq!(path, Path::new("/saves/slot1.BMGSave.backup"));
    }

    #[test]
    fn backup_path_handles_extensionless_names() {
        let path = backup_path(Path::new("SAVEDATA"));
        assert_eq!(path, Path::new("SAVEDATA.backup"));
    }
}
