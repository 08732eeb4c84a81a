use std::path::PathBuf;

/// Errors raised by board access and session preconditions.
///
/// Illegal placements are not errors: `place_token` reports them as `Ok(false)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("coordinate out of range: row {row}, col {col}")]
    OutOfRange { row: i32, col: i32 },

    #[error("unknown game mode: {0}")]
    InvalidMode(String),

    #[error("computer move requested in a player-vs-player game")]
    NotComputerGame,

    #[error("no empty cell left for the computer to play")]
    NoEmptyCell,
}

/// Errors raised when a snapshot cannot be decoded into session state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("expected {expected} snapshot fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    #[error("snapshot field #{index} ({name}) has the wrong type")]
    FieldType { index: usize, name: &'static str },

    #[error("score {value} for {name} exceeds the board size")]
    ScoreOutOfRange { name: &'static str, value: u8 },

    #[error("snapshot data too short: expected {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },

    #[error("invalid snapshot magic (expected RVSS)")]
    BadMagic,

    #[error("unsupported snapshot version: expected {expected}, got {actual}")]
    UnsupportedVersion { expected: u32, actual: u32 },

    #[error("CRC32 mismatch: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    #[error("invalid cell code {code} at index {index}")]
    InvalidCell { index: usize, code: u8 },

    #[error("invalid flag byte {value} for {name}")]
    InvalidFlag { name: &'static str, value: u8 },

    #[error("snapshot payload has trailing bytes")]
    TrailingBytes,
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),
}
