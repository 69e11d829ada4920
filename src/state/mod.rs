/// State management module
///
/// This module handles all session state:
/// - Application configuration and its JSON file (config.rs)
/// - Which image asset to show (view.rs)
/// - The hue shift chosen with the slider (hue.rs)

pub mod config;
pub mod hue;
pub mod view;
