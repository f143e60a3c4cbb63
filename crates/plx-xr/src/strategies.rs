//! Concrete cascade steps, one module per platform family.

pub mod ar;
pub mod vr;
pub mod webxr;

pub use ar::{QuickLookStep, SceneViewerStep};
pub use vr::Vr360Step;
pub use webxr::WebXrStep;
