use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Component,
    Stylesheet,
    Index,
}

/// One output file, with a path relative to the output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
    pub kind: FileKind,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>, kind: FileKind) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            kind,
        }
    }

    pub fn component(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileKind::Component)
    }

    pub fn stylesheet(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileKind::Stylesheet)
    }

    pub fn index(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self::new(path, content, FileKind::Index)
    }

    /// File name without directories or extension (`Card` for
    /// `components/Card.tsx`, `styles` for `styles.module.css`)
    pub fn stem(&self) -> &str {
        let name = self.path.rsplit('/').next().unwrap_or(&self.path);
        name.split('.').next().unwrap_or(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_and_kind() {
        let file = GeneratedFile::component("components/Card.tsx", "");
        assert_eq!(file.stem(), "Card");
        assert_eq!(file.kind, FileKind::Component);
        assert_eq!(GeneratedFile::stylesheet("styles.module.css", "").stem(), "styles");

        let json = serde_json::to_string(&GeneratedFile::index("index.ts", "x")).unwrap();
        assert_eq!(json, r#"{"path":"index.ts","content":"x","kind":"index"}"#);
    }
}
