//! Error type for component definitions.

use responsive_props::{DefinitionError, ValueError};
use responsive_style::StyleMapError;

/// Errors produced while loading or applying a component definition.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// The property schema is invalid.
    #[error(transparent)]
    Definition(#[from] DefinitionError),

    /// The style-class map is invalid.
    #[error(transparent)]
    StyleMap(#[from] StyleMapError),

    /// The supplied values don't satisfy the schema.
    #[error("{component}: {source}")]
    Value {
        component: String,
        #[source]
        source: ValueError,
    },
}
