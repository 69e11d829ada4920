/// GPU-accelerated hue rotation module
///
/// This module draws the loaded image through a wgpu pipeline whose
/// fragment stage rotates the hue of every pixel in real-time.
///
/// Architecture:
/// - `shaders.rs` - WGSL vertex and fragment shader sources
/// - `pipeline.rs` - wgpu render pipeline management and readback

pub mod shaders;
pub mod pipeline;

pub use pipeline::RenderPipeline;
