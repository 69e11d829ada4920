/// User interface helpers
///
/// - Caption text shown next to the slider (caption.rs)
/// - Size of the displayed draw area (surface.rs)

pub mod caption;
pub mod surface;
