//! Asset loading: textures and shader sources.
//!
//! Loaders only touch the filesystem and CPU memory. Uploading to the GPU
//! is the render backend's job, so everything here is testable headless.

mod error;
mod shader;
mod texture;

pub use error::AssetError;
pub use shader::{ShaderSource, ShaderStage, strip_bom};
pub use texture::{TextureData, TextureOptions, mip_level_count};

pub fn crate_info() -> &'static str {
    "cubeview-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("assets"));
    }
}
