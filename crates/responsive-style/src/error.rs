//! Error types for style-class maps.

use std::io;
use std::path::PathBuf;

use responsive_props::Breakpoint;

/// Errors that can occur while loading a style-class map.
#[derive(Debug, thiserror::Error)]
pub enum StyleMapError {
    /// The document is not valid YAML or doesn't have the shape of a class map.
    #[error("Invalid style class map: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A breakpoint key holds a class instead of a map of properties.
    #[error("Invalid style class map: '{breakpoint}' must map properties to classes.")]
    InvalidBreakpointMap { breakpoint: Breakpoint },

    /// The file could not be read.
    #[error("Failed to read style class map {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
