//! CLI failures and their exit codes.
//!
//! | code | meaning                                              |
//! |------|------------------------------------------------------|
//! | 0    | success                                              |
//! | 2    | clap rejected the arguments                          |
//! | 10   | the scene itself is invalid (preset, theme, config)  |
//! | 11   | a scene file could not be read or a PNG written      |
//! | 12   | malformed user input (scene JSON, params, pointer)   |
//! | 13   | stdout JSON could not be produced                    |

use plexus_core::FieldError;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum CliError {
    /// The scene was well-formed but rejected by the core.
    Field(FieldError),
    ReadScene { path: PathBuf, message: String },
    WritePng { path: PathBuf, message: String },
    /// A scene file that is not a valid scene document.
    BadScene { path: PathBuf, message: String },
    /// `--params` is not valid JSON.
    BadParams(String),
    /// `--pointer` is not `x,y` with two finite numbers.
    BadPointer(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Field(_) => 10,
            CliError::ReadScene { .. } | CliError::WritePng { .. } => 11,
            CliError::BadScene { .. } | CliError::BadParams(_) | CliError::BadPointer(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }

    /// Attributes a snapshot failure to `path`. Only I/O failures become
    /// `WritePng`; size errors stay field errors.
    pub fn write_png(path: &Path, err: FieldError) -> Self {
        match err {
            FieldError::Io(message) => CliError::WritePng {
                path: path.to_path_buf(),
                message,
            },
            other => CliError::Field(other),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Field(e) => write!(f, "{e}"),
            CliError::ReadScene { path, message } => {
                write!(f, "cannot read scene {}: {message}", path.display())
            }
            CliError::WritePng { path, message } => {
                write!(f, "cannot write {}: {message}", path.display())
            }
            CliError::BadScene { path, message } => {
                write!(f, "invalid scene file {}: {message}", path.display())
            }
            CliError::BadParams(msg) => write!(f, "invalid --params JSON: {msg}"),
            CliError::BadPointer(text) => {
                write!(f, "invalid --pointer '{text}': expected \"x,y\"")
            }
            CliError::Serialization(msg) => write!(f, "cannot encode output: {msg}"),
        }
    }
}

impl From<FieldError> for CliError {
    fn from(e: FieldError) -> Self {
        CliError::Field(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
