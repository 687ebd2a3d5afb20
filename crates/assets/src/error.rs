use std::path::PathBuf;

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode image {label}: {source}")]
    Decode {
        label: String,
        #[source]
        source: image::ImageError,
    },
    #[error("unsupported texture format in {label}: {channels} channels")]
    UnsupportedChannels { label: String, channels: u8 },
    #[error("texture {label} is empty ({width}x{height})")]
    EmptyImage { label: String, width: u32, height: u32 },
    #[error("shader source {label} is not valid UTF-8")]
    InvalidUtf8 {
        label: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

pub(crate) fn read_file(path: &std::path::Path) -> Result<Vec<u8>, AssetError> {
    std::fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })
}
