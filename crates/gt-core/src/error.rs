use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Invalid configuration value. Rejected before any rendering happens.
    #[error("Configuration invalide : {0}")]
    InvalidConfig(String),

    /// The source image or the resized output has a zero dimension.
    #[error("Sortie vide : {width}×{height}")]
    EmptyOutput {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// No palette is registered under this name.
    #[error("Palette inconnue : {name}")]
    UnknownPalette {
        /// The requested name.
        name: String,
    },

    /// Built-in palettes cannot be redefined or removed.
    #[error("Palette réservée : {name}")]
    ReservedPalette {
        /// The built-in name.
        name: String,
    },

    /// The resampler refused the source or destination buffers.
    #[error("Redimensionnement impossible : {0}")]
    Resize(String),
}
