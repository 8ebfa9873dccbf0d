use thiserror::Error;

#[derive(Error, Debug)]
pub enum SonarError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Audio device error: {0}")]
    AudioDevice(String),

    #[error("Audio stream error: {0}")]
    AudioStream(String),
}

pub type Result<T> = std::result::Result<T, SonarError>;
