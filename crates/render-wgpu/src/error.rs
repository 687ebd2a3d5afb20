/// Errors from GPU resource creation.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("shader {label} is missing entry point `{entry}`")]
    MissingEntryPoint { label: String, entry: &'static str },
    #[error("shader {label} failed to compile:\n{message}")]
    ShaderCompilation { label: String, message: String },
    #[error("failed to create render pipeline: {0}")]
    Pipeline(String),
}
