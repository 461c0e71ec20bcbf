use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColorbotError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("Calibration missing: {missing}")]
    CalibrationMissing { missing: String },

    #[error("Invalid calibration: {details}")]
    InvalidCalibration { details: String },

    #[error("Invalid color range: {details}")]
    InvalidColorRange { details: String },

    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Memory error: {0}")]
    Memory(#[from] MemoryError),

    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

/// Screen capture failures
#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("No frames available in {path}")]
    NoFrames { path: String },

    #[error("Failed to decode {path}: {details}")]
    Decode { path: String, details: String },

    #[error("Frame {width}x{height} does not cover region {region}")]
    RegionOutOfBounds {
        width: u32,
        height: u32,
        region: String,
    },
}

/// Process memory failures
#[derive(Error, Debug)]
pub enum MemoryError {
    #[error("Process not found: {0}")]
    ProcessNotFound(String),

    #[error("Failed to read {len} bytes at {address:#x}: {details}")]
    Read {
        address: u64,
        len: usize,
        details: String,
    },
}

/// Synthetic input failures
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Input device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Failed to emit key event: {0}")]
    Emit(String),
}

impl ColorbotError {
    pub fn calibration_missing<S: Into<String>>(missing: S) -> Self {
        Self::CalibrationMissing {
            missing: missing.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ColorbotError>;
