use crate::domain::ports::SourceReader;
use anyhow::{Context, Result};
use std::path::Path;

/// File system source reader implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSourceReader;

impl FileSourceReader {
    pub fn new() -> Self {
        Self
    }
}

impl SourceReader for FileSourceReader {
    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read source file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_reports_path_on_failure() {
        let err = FileSourceReader::new()
            .read(Path::new("/no/such/dir/main.go"))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("/no/such/dir/main.go"));
    }
}
