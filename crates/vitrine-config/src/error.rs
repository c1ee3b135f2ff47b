//! Errors from loading and saving the viewer configuration.

use std::path::PathBuf;

/// Why a `config.ron` could not be loaded or saved.
///
/// Every variant that touches the filesystem carries the offending path,
/// since the config directory is resolved at runtime and the user needs to
/// know which file to look at.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    #[error("could not read viewer config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid RON for the expected sections.
    #[error("viewer config at {} is not valid RON", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// The config directory or file could not be written.
    #[error("could not write viewer config at {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The in-memory config could not be rendered as RON.
    #[error("could not encode viewer config as RON")]
    Encode(#[source] ron::Error),
}
