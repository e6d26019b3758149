use crate::error::CommonError;
use crate::generated::GeneratedFile;
use crate::result::CommonResult;
use indexmap::IndexMap;
use std::path::{Component, Path, PathBuf};

/// Destination for generated files, so conversion output can be written to
/// disk or captured in memory for tests
pub trait OutputSink {
    /// Check if a file exists
    fn exists(&self, path: &Path) -> bool;

    /// Write a file, creating parent directories as needed
    fn write_file(&mut self, path: &Path, content: &str) -> CommonResult<()>;
}

/// Writes below a root directory on the real file system
pub struct RealFileSystem {
    root: PathBuf,
}

impl RealFileSystem {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for RealFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.root.join(path).exists()
    }

    fn write_file(&mut self, path: &Path, content: &str) -> CommonResult<()> {
        let target = self.root.join(path);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, content)?;
        tracing::debug!(path = %target.display(), bytes = content.len(), "wrote file");
        Ok(())
    }
}

/// In-memory sink for testing
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    pub files: IndexMap<PathBuf, String>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(|s| s.as_str())
    }
}

impl OutputSink for MemoryFileSystem {
    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }

    fn write_file(&mut self, path: &Path, content: &str) -> CommonResult<()> {
        self.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

/// Reject absolute paths and `..` segments; generated paths are always
/// relative to the output directory
pub fn validate_relative_path(path: &str) -> CommonResult<PathBuf> {
    let candidate = Path::new(path);
    let escapes = candidate.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    if path.is_empty() || escapes {
        return Err(CommonError::invalid_path(path));
    }
    Ok(candidate.to_path_buf())
}

/// Write every file to the sink, stopping at the first failure
pub fn write_files<S: OutputSink + ?Sized>(sink: &mut S, files: &[GeneratedFile]) -> CommonResult<usize> {
    for file in files {
        let path = validate_relative_path(&file.path)?;
        sink.write_file(&path, &file.content)?;
    }
    Ok(files.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_files_to_memory() {
        let mut sink = MemoryFileSystem::new();
        let files = vec![
            GeneratedFile::component("components/Card.jsx", "export default Card;"),
            GeneratedFile::stylesheet("styles.css", ".a {}"),
        ];
        assert_eq!(write_files(&mut sink, &files).unwrap(), 2);
        assert!(sink.exists(Path::new("components/Card.jsx")));
        assert_eq!(sink.read("styles.css"), Some(".a {}"));
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let mut sink = MemoryFileSystem::new();
        for path in ["../evil.js", "/etc/passwd", ""] {
            let files = vec![GeneratedFile::component(path, "")];
            assert!(matches!(
                write_files(&mut sink, &files),
                Err(CommonError::InvalidPath { .. })
            ));
        }
        assert!(sink.files.is_empty());
    }
}
