use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use rowsmith_core::{CSV_FILENAME, SAMPLING_THRESHOLD};
use rowsmith_export::write_bytes_atomic;

use super::{WorkspacePaths, WorkspaceResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceSettings {
    pub database_path: PathBuf,
    pub export_path: PathBuf,
    pub sampling_threshold: usize,
    pub strict_generation: bool,
    /// TOML integers are signed 64-bit, so seeds above `i64::MAX` cannot be saved.
    pub seed: Option<u64>,
    pub max_connections: u32,
    pub insert_chunk_size: usize,
}

impl Default for WorkspaceSettings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("data").join("database.sqlite"),
            export_path: PathBuf::from("outputs").join(CSV_FILENAME),
            sampling_threshold: SAMPLING_THRESHOLD,
            strict_generation: false,
            seed: None,
            max_connections: 5,
            insert_chunk_size: 150,
        }
    }
}

pub fn load_or_create_settings(paths: &WorkspacePaths) -> WorkspaceResult<WorkspaceSettings> {
    let path = paths.settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path)?;
        let settings: WorkspaceSettings = toml::from_str(&content)?;
        return Ok(settings);
    }

    let settings = WorkspaceSettings::default();
    save_settings(paths, &settings)?;
    Ok(settings)
}

pub fn save_settings(paths: &WorkspacePaths, settings: &WorkspaceSettings) -> WorkspaceResult<()> {
    let path = paths.settings_path();
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(&path, encoded.as_bytes())?;
    Ok(())
}
