//! Rendering Adapter: renderer-agnostic description of a frame.
//!
//! # Invariants
//! - Renderers read the camera through a [`RenderView`]; they never mutate it.
//! - The scene layout is fixed at startup; only the flashlight follows the
//!   camera each frame.

mod renderer;
mod scene;
mod view;

pub use renderer::{DebugTextRenderer, Renderer};
pub use scene::{CUBE_POSITIONS, CubeInstance, Material, ROTATION_AXIS, Scene, SpotLight};
pub use view::RenderView;

pub fn crate_info() -> &'static str {
    "cubeview-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
