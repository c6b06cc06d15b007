use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Quick-set honey values offered by editor surfaces.
pub const PRESET_VALUES: [u32; 5] = [10_000, 50_000, 100_000, 999_999, 9_999_999];

/// Display view of a loaded save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snapshot {
    pub file_name: String,
    pub file_len: usize,
    pub honey: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StagedValue {
    pub value: u32,
    /// True when negative input was normalized to zero.
    pub clamped: bool,
}

/// Outcome of a committed save, for user-facing confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SaveReport {
    pub previous: u32,
    pub new: u32,
    pub backup_path: PathBuf,
    pub backup_created: bool,
}
