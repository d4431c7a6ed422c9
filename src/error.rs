use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuartoHeaderError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {response}")]
    InvalidResponse { response: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Malformed notebook {path}: {message}")]
    Notebook { path: String, message: String },

    #[error("Asset folder not found: {path}")]
    AssetSourceMissing { path: String },

    #[error("No scripted answer left for prompt: {prompt}")]
    PromptExhausted { prompt: String },

    #[error("Input closed while waiting for an answer")]
    InputClosed,

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for QuartoHeaderError {
    fn user_message(&self) -> String {
        match self {
            QuartoHeaderError::InvalidResponse { response } => {
                format!("Invalid input: {:?} (expected yes or no)", response)
            }
            QuartoHeaderError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            QuartoHeaderError::Notebook { path, message } => {
                format!("Could not read notebook {}: {}", path, message)
            }
            QuartoHeaderError::AssetSourceMissing { path } => {
                format!("Asset folder not found: {}", path)
            }
            QuartoHeaderError::InputClosed => {
                "Input closed before the prompt was answered".to_string()
            }
            QuartoHeaderError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            QuartoHeaderError::InvalidResponse { .. } => Some(
                "Answer with yes/y or no/n. Press Enter to accept the default shown in parentheses.".to_string()
            ),
            QuartoHeaderError::Config { .. } => Some(
                "Check your configuration file syntax or regenerate one with --generate-config.".to_string()
            ),
            QuartoHeaderError::Notebook { .. } => Some(
                "Make sure the file is a valid Jupyter notebook (nbformat 4).".to_string()
            ),
            QuartoHeaderError::AssetSourceMissing { .. } => Some(
                "Point --assets-dir (or assets.source_dir in the config file) at the directory holding the style and _extensions folders.".to_string()
            ),
            QuartoHeaderError::InputClosed => Some(
                "Run interactively, or answer every prompt with --yes or --no.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for QuartoHeaderError {
    fn from(error: toml::de::Error) -> Self {
        QuartoHeaderError::Config {
            message: error.to_string(),
        }
    }
}

impl From<walkdir::Error> for QuartoHeaderError {
    fn from(error: walkdir::Error) -> Self {
        let message = error.to_string();
        match error.into_io_error() {
            Some(io) => QuartoHeaderError::Io(io),
            None => QuartoHeaderError::InvalidPath { path: message },
        }
    }
}

pub type Result<T> = std::result::Result<T, QuartoHeaderError>;
