use std::path::Path;

use crate::error::{AssetError, read_file};

/// Pipeline stage an entry point belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
    Compute,
}

impl ShaderStage {
    fn from_attribute(token: &str) -> Option<Self> {
        match token {
            "@vertex" => Some(Self::Vertex),
            "@fragment" => Some(Self::Fragment),
            "@compute" => Some(Self::Compute),
            _ => None,
        }
    }
}

/// WGSL source text with a label for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    label: String,
    code: String,
}

impl ShaderSource {
    pub fn new(label: impl Into<String>, code: impl Into<String>) -> Self {
        let code: String = code.into();
        Self {
            label: label.into(),
            code: strip_bom(&code).to_string(),
        }
    }

    /// Read a shader file. A leading UTF-8 byte order mark is removed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let bytes = read_file(path)?;
        let code = String::from_utf8(bytes).map_err(|source| AssetError::InvalidUtf8 {
            label: label.clone(),
            source,
        })?;
        tracing::debug!("loaded shader source {label} ({} bytes)", code.len());
        Ok(Self::new(label, code))
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    /// Entry points declared with `@vertex`, `@fragment` or `@compute`.
    ///
    /// This is a token scan, not a parse; it is only used to report missing
    /// entry points before handing the source to the GPU compiler.
    pub fn entry_points(&self) -> Vec<(ShaderStage, String)> {
        let mut found = Vec::new();
        let mut tokens = self.code.split_whitespace();
        while let Some(token) = tokens.next() {
            let Some(stage) = ShaderStage::from_attribute(token) else {
                continue;
            };
            // Skip further attributes such as @workgroup_size(..) up to `fn`.
            if tokens.by_ref().any(|t| t == "fn") {
                if let Some(name) = tokens.next() {
                    let name = name.split('(').next().unwrap_or(name);
                    found.push((stage, name.to_string()));
                }
            }
        }
        found
    }

    pub fn has_entry_point(&self, stage: ShaderStage, name: &str) -> bool {
        self.entry_points()
            .iter()
            .any(|(s, n)| *s == stage && n == name)
    }
}

/// Remove a leading UTF-8 byte order mark, if present.
pub fn strip_bom(source: &str) -> &str {
    source.strip_prefix('\u{feff}').unwrap_or(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return vec4<f32>(position, 1.0);
}

@fragment fn fs_main() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0);
}
"#;

    #[test]
    fn strip_bom_only_at_start() {
        assert_eq!(strip_bom("\u{feff}fn main"), "fn main");
        assert_eq!(strip_bom("fn main"), "fn main");
        assert_eq!(strip_bom("a\u{feff}"), "a\u{feff}");
        assert_eq!(strip_bom(""), "");
    }

    #[test]
    fn load_strips_bom_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let source = ShaderSource::load(file.path()).unwrap();
        assert_eq!(source.code(), SAMPLE);
        assert_eq!(source.label(), file.path().display().to_string());
    }

    #[test]
    fn invalid_utf8_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00]).unwrap();
        let err = ShaderSource::load(file.path()).unwrap_err();
        assert!(matches!(err, AssetError::InvalidUtf8 { .. }));
    }

    #[test]
    fn missing_file() {
        let err = ShaderSource::load("no_such_shader.wgsl").unwrap_err();
        assert!(matches!(err, AssetError::Io { .. }));
        assert!(err.to_string().contains("no_such_shader.wgsl"));
    }

    #[test]
    fn finds_entry_points() {
        let source = ShaderSource::new("sample", SAMPLE);
        assert_eq!(
            source.entry_points(),
            vec![
                (ShaderStage::Vertex, "vs_main".to_string()),
                (ShaderStage::Fragment, "fs_main".to_string()),
            ]
        );
        assert!(source.has_entry_point(ShaderStage::Vertex, "vs_main"));
        assert!(!source.has_entry_point(ShaderStage::Vertex, "fs_main"));
    }

    #[test]
    fn compute_with_extra_attribute() {
        let source = ShaderSource::new("cs", "@compute @workgroup_size(64) fn cs_main() {}");
        assert_eq!(
            source.entry_points(),
            vec![(ShaderStage::Compute, "cs_main".to_string())]
        );
    }
}
