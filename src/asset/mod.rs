/// Image asset module
///
/// This module handles:
/// - Resolving the configured asset on disk
/// - Decoding it into RGBA8 pixels ready for GPU upload

pub mod loader;

pub use loader::{load_image, LoadedImage};
