//! wgpu render backend for the cube viewer.
//!
//! Draws the demo scene as instanced, textured cubes lit by a spotlight
//! that follows the camera.
//!
//! # Invariants
//! - The renderer never mutates the camera or the scene.
//! - Projections arrive in OpenGL clip convention and are remapped to wgpu's
//!   [0, 1] depth range here, nowhere else.

mod error;
mod gpu;
mod mesh;
mod shaders;
mod texture;

pub use error::RenderError;
pub use gpu::{WgpuRenderer, compile_shader};
pub use shaders::{FS_ENTRY, LIGHTING_SHADER, VS_ENTRY, builtin_shader};
pub use texture::GpuTexture;
