/// Configuration, types, and shared structures for glyphtone.
///
/// This crate contains all shared types and configuration logic used
/// across the glyphtone workspace.

pub mod config;
pub mod error;
pub mod frame;
pub mod palette;

pub use config::{RenderConfig, Settings};
pub use error::CoreError;
pub use frame::{AsciiCell, AsciiGrid, FrameBuffer};
pub use palette::{Palette, PaletteRegistry};
