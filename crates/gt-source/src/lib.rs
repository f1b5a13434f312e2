/// Image loading and resampling for glyphtone.

pub mod image;
pub mod resize;
