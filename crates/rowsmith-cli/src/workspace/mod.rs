mod paths;
mod settings;

pub use paths::WorkspacePaths;
pub use settings::{WorkspaceSettings, load_or_create_settings};

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
    #[error("toml encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
    #[error("write error: {0}")]
    Write(#[from] rowsmith_export::ExportError),
}

pub type WorkspaceResult<T> = Result<T, WorkspaceError>;
