/// The view configuration: which image asset this session shows

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Number of x variants in an image set
const X_VARIANTS: u32 = 7;
/// Number of y variants in an image set
const Y_VARIANTS: u32 = 17;

/// Selects a single image asset. Immutable for the session.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ViewConfig {
    /// Image set name, also the asset directory (e.g., "T2202-03")
    pub name: String,
    /// Horizontal variant index (wraps at 7)
    pub x: u32,
    /// Vertical variant index (wraps at 17)
    pub y: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            name: "T2202-03".to_string(),
            x: 0,
            y: 0,
        }
    }
}

impl ViewConfig {
    /// Relative path of the asset: `<name>/x-<x mod 7>_<name>_1.<y mod 17 + 1>.png`
    pub fn asset_path(&self) -> PathBuf {
        let file = format!(
            "x-{}_{}_1.{}.png",
            self.x % X_VARIANTS,
            self.name,
            self.y % Y_VARIANTS + 1
        );
        PathBuf::from(&self.name).join(file)
    }
}
