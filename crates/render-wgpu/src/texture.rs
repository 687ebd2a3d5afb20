use cubeview_assets::TextureData;

/// A sampled 2D texture with its full mip chain uploaded.
pub struct GpuTexture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
}

impl GpuTexture {
    /// Upload `data` and every level of its mip chain.
    ///
    /// Colour maps should use an sRGB `format`; data maps such as specular
    /// intensity should not.
    pub fn upload(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &TextureData,
        format: wgpu::TextureFormat,
    ) -> Self {
        let levels = data.mip_chain();
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some(data.label()),
            size: wgpu::Extent3d {
                width: data.width(),
                height: data.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: levels.len() as u32,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        for (level, image) in levels.iter().enumerate() {
            let (width, height) = image.dimensions();
            queue.write_texture(
                wgpu::TexelCopyTextureInfo {
                    texture: &texture,
                    mip_level: level as u32,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                image.as_raw(),
                wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(4 * width),
                    rows_per_image: Some(height),
                },
                wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
            );
        }

        tracing::debug!(
            "uploaded texture {} ({}x{}, {} mip levels)",
            data.label(),
            data.width(),
            data.height(),
            levels.len()
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        Self { texture, view }
    }
}

/// Repeat wrapping with trilinear filtering.
pub(crate) fn material_sampler(device: &wgpu::Device) -> wgpu::Sampler {
    device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("material_sampler"),
        address_mode_u: wgpu::AddressMode::Repeat,
        address_mode_v: wgpu::AddressMode::Repeat,
        address_mode_w: wgpu::AddressMode::Repeat,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Linear,
        ..Default::default()
    })
}
