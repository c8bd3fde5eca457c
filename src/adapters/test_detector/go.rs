use super::TestDetector;
use std::path::Path;

/// Go test code detector
///
/// Conventions:
/// - *_test.go files
#[derive(Debug, Clone, Copy, Default)]
pub struct GoTestDetector;

impl TestDetector for GoTestDetector {
    fn is_test_file(&self, file_path: &Path) -> bool {
        file_path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with("_test.go"))
    }

    fn language(&self) -> &str {
        "go"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_go_test_file() {
        let detector = GoTestDetector;
        assert!(detector.is_test_file(Path::new("pkg/foo_test.go")));
        assert!(detector.is_test_file(Path::new("foo_test.go")));
        assert!(!detector.is_test_file(Path::new("pkg/foo.go")));
        assert!(!detector.is_test_file(Path::new("main.go")));
        assert!(!detector.is_test_file(Path::new("pkg_test.go/main.go")));
    }

    #[test]
    fn test_language_returns_go() {
        let detector = GoTestDetector;
        assert_eq!(detector.language(), "go");
    }
}
