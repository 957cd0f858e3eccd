use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Discovers Java sources under a project root. Test directories are
/// skipped; production interfaces are what the metrics are about.
pub struct FileWalker {
    root: PathBuf,
    ignore_patterns: Vec<String>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            ignore_patterns: vec![],
        }
    }

    pub fn with_ignore_patterns(mut self, patterns: Vec<String>) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && self.should_process(path) {
                files.push(path.to_path_buf());
            }
        }

        // Walk order is filesystem-dependent; sort so identical trees
        // always produce the identical model.
        files.sort();
        Ok(files)
    }

    fn should_process(&self, path: &Path) -> bool {
        let is_java = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("java"))
            .unwrap_or(false);
        if !is_java {
            return false;
        }

        if self.in_test_directory(path) {
            return false;
        }

        let path_str = path.to_string_lossy();
        for pattern in &self.ignore_patterns {
            if glob::Pattern::new(pattern)
                .map(|p| p.matches(&path_str))
                .unwrap_or(false)
            {
                return false;
            }
        }

        true
    }

    /// A directory component below the root containing "test" marks test
    /// sources (src/test/java, tests/, IntegrationTests/ and the like).
    fn in_test_directory(&self, path: &Path) -> bool {
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        relative
            .parent()
            .map(|parent| {
                parent.components().any(|component| {
                    component
                        .as_os_str()
                        .to_string_lossy()
                        .to_lowercase()
                        .contains("test")
                })
            })
            .unwrap_or(false)
    }
}

pub fn find_java_files(root: &Path, ignore_patterns: Vec<String>) -> Result<Vec<PathBuf>> {
    FileWalker::new(root.to_path_buf())
        .with_ignore_patterns(ignore_patterns)
        .walk()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "class X { }").unwrap();
    }

    #[test]
    fn finds_java_files_and_skips_tests() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("src/main/java/Handler.java"));
        touch(&root.join("src/test/java/HandlerTest.java"));
        touch(&root.join("src/main/java/notes.txt"));

        let files = find_java_files(root, vec![]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("Handler.java"));
    }

    #[test]
    fn ignore_patterns_filter_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        touch(&root.join("core/Handler.java"));
        touch(&root.join("generated/Stub.java"));

        let files = find_java_files(root, vec!["**/generated/**".to_string()]).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("Handler.java"));
    }

    #[test]
    fn test_named_root_is_not_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("contest-project");
        touch(&root.join("Handler.java"));

        let files = find_java_files(&root, vec![]).unwrap();
        assert_eq!(files.len(), 1);
    }
}
