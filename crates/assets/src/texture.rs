use std::path::Path;

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};

use crate::error::{AssetError, read_file};

/// How a texture is prepared after decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureOptions {
    /// Put the bottom image row first so `v = 0` samples the bottom edge.
    pub flip_vertically: bool,
}

impl Default for TextureOptions {
    fn default() -> Self {
        Self {
            flip_vertically: true,
        }
    }
}

/// Decoded texture pixels, always stored as RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureData {
    label: String,
    pixels: RgbaImage,
    source_channels: u8,
}

impl TextureData {
    /// Read and decode an image file.
    pub fn load(path: impl AsRef<Path>, options: &TextureOptions) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = read_file(path)?;
        let texture = Self::from_bytes(path.display().to_string(), &bytes, options)?;
        tracing::debug!(
            "loaded texture {} ({}x{}, {} channels)",
            texture.label,
            texture.width(),
            texture.height(),
            texture.source_channels
        );
        Ok(texture)
    }

    /// Decode an in-memory image. The format is guessed from the content.
    pub fn from_bytes(
        label: impl Into<String>,
        bytes: &[u8],
        options: &TextureOptions,
    ) -> Result<Self, AssetError> {
        let label = label.into();
        match image::load_from_memory(bytes) {
            Ok(image) => Self::from_image(label, image, options),
            Err(source) => Err(AssetError::Decode { label, source }),
        }
    }

    /// Accepts non-empty grey, RGB and RGBA images; anything else (e.g.
    /// grey+alpha) is rejected.
    pub fn from_image(
        label: impl Into<String>,
        image: DynamicImage,
        options: &TextureOptions,
    ) -> Result<Self, AssetError> {
        let label = label.into();
        let channels = image.color().channel_count();
        if !matches!(channels, 1 | 3 | 4) {
            return Err(AssetError::UnsupportedChannels { label, channels });
        }
        let (width, height) = (image.width(), image.height());
        if width == 0 || height == 0 {
            return Err(AssetError::EmptyImage {
                label,
                width,
                height,
            });
        }
        let image = if options.flip_vertically {
            image.flipv()
        } else {
            image
        };
        Ok(Self {
            label,
            pixels: image.to_rgba8(),
            source_channels: channels,
        })
    }

    /// A 1x1 texture of a single colour, used when a file fails to load.
    pub fn placeholder(label: impl Into<String>, rgba: [u8; 4]) -> Self {
        Self {
            label: label.into(),
            pixels: RgbaImage::from_pixel(1, 1, image::Rgba(rgba)),
            source_channels: 4,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Channel count of the decoded file before RGBA conversion.
    pub fn source_channels(&self) -> u8 {
        self.source_channels
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Tightly packed RGBA8 rows.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn mip_level_count(&self) -> u32 {
        mip_level_count(self.width(), self.height())
    }

    /// Full mip chain starting with the base level, each level half the
    /// previous size (never below 1) down to 1x1.
    pub fn mip_chain(&self) -> Vec<RgbaImage> {
        let mut levels = Vec::with_capacity(self.mip_level_count() as usize);
        levels.push(self.pixels.clone());
        loop {
            let Some(prev) = levels.last() else { break };
            let (w, h) = prev.dimensions();
            if w == 1 && h == 1 {
                break;
            }
            let (nw, nh) = ((w / 2).max(1), (h / 2).max(1));
            let next = image::imageops::resize(prev, nw, nh, FilterType::Triangle);
            levels.push(next);
        }
        levels
    }
}

/// Number of levels in a full mip chain for a `width` x `height` image.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    32 - width.max(height).max(1).leading_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayAlphaImage, GrayImage, Rgb, RgbImage};

    #[test]
    fn mip_counts() {
        assert_eq!(mip_level_count(1, 1), 1);
        assert_eq!(mip_level_count(2, 1), 2);
        assert_eq!(mip_level_count(512, 512), 10);
        assert_eq!(mip_level_count(500, 300), 9);
        assert_eq!(mip_level_count(0, 0), 1);
    }

    #[test]
    fn load_rgb_png_with_flip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("two_rows.png");
        let mut img = RgbImage::new(1, 2);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(0, 1, Rgb([0, 0, 255]));
        img.save(&path).unwrap();

        let tex = TextureData::load(&path, &TextureOptions::default()).unwrap();
        assert_eq!((tex.width(), tex.height()), (1, 2));
        assert_eq!(tex.source_channels(), 3);
        // Bottom row (blue) comes first after flipping.
        assert_eq!(tex.pixels().get_pixel(0, 0).0, [0, 0, 255, 255]);
        assert_eq!(tex.as_bytes().len(), 8);

        let unflipped = TextureData::load(
            &path,
            &TextureOptions {
                flip_vertically: false,
            },
        )
        .unwrap();
        assert_eq!(unflipped.pixels().get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn grey_expands_to_rgba() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grey.png");
        GrayImage::from_pixel(2, 2, image::Luma([128])).save(&path).unwrap();

        let tex = TextureData::load(&path, &TextureOptions::default()).unwrap();
        assert_eq!(tex.source_channels(), 1);
        assert_eq!(tex.pixels().get_pixel(1, 1).0, [128, 128, 128, 255]);
    }

    #[test]
    fn grey_alpha_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("la.png");
        GrayAlphaImage::new(2, 2).save(&path).unwrap();

        let err = TextureData::load(&path, &TextureOptions::default()).unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedChannels { channels: 2, .. }));
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let options = TextureOptions::default();
        let empty = DynamicImage::ImageRgba8(RgbaImage::new(0, 0));
        let err = TextureData::from_image("empty", empty, &options).unwrap_err();
        assert!(matches!(
            err,
            AssetError::EmptyImage {
                width: 0,
                height: 0,
                ..
            }
        ));

        let strip = DynamicImage::ImageRgb8(RgbImage::new(4, 0));
        assert!(matches!(
            TextureData::from_image("strip", strip, &options),
            Err(AssetError::EmptyImage { width: 4, .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let options = TextureOptions::default();
        let err = TextureData::load("does/not/exist.png", &options).unwrap_err();
        match err {
            AssetError::Io { path, .. } => assert!(path.ends_with("exist.png")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn garbage_is_decode_error() {
        let options = TextureOptions::default();
        let err = TextureData::from_bytes("junk", b"definitely not an image", &options).unwrap_err();
        assert!(matches!(err, AssetError::Decode { ref label, .. } if label == "junk"));
        assert!(err.to_string().contains("junk"));
    }

    #[test]
    fn placeholder_is_single_pixel() {
        let tex = TextureData::placeholder("fallback", [255, 255, 255, 255]);
        assert_eq!((tex.width(), tex.height()), (1, 1));
        assert_eq!(tex.mip_chain().len(), 1);
        assert_eq!(tex.label(), "fallback");
    }

    #[test]
    fn mip_chain_halves_to_one() {
        let img = RgbImage::from_pixel(8, 2, Rgb([10, 20, 30]));
        let options = TextureOptions::default();
        let tex = TextureData::from_image("strip", DynamicImage::ImageRgb8(img), &options).unwrap();
        let chain = tex.mip_chain();
        let dims: Vec<_> = chain.iter().map(|l| l.dimensions()).collect();
        assert_eq!(dims, vec![(8, 2), (4, 1), (2, 1), (1, 1)]);
        assert_eq!(chain.len() as u32, tex.mip_level_count());
        // Uniform colour survives filtering.
        assert_eq!(chain[3].get_pixel(0, 0).0, [10, 20, 30, 255]);
    }
}
