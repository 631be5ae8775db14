pub mod collection;
pub mod editor;
pub mod events;
pub mod pal_gpl;
pub mod palette;

/// Placeholder for palettes and colors without a name.
pub const UNNAMED: &str = "Unnamed";

pub const GPL_EXTENSION: &str = "gpl";
