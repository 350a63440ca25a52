use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read settings from {path}")]
    SettingsRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write settings to {path}")]
    SettingsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings in {path}")]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("audio backend unavailable: {0}")]
    AudioBackend(String),
    #[error("failed to load sound {name}: {message}")]
    SoundLoad { name: String, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
