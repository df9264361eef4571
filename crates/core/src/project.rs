use std::path::{Path, PathBuf};

/// Descriptor of the project being compiled.
///
/// Supplies the defaults the [`Config`](crate::Config) falls back to: the
/// build directory, the artifact id used as the executable base name and
/// the compile source roots.
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub build_dir: PathBuf,
    pub artifact_id: String,
    pub compile_source_roots: Vec<String>,
}

impl Project {
    /// Builds a descriptor with conventional defaults rooted at `root`.
    pub fn discover(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let artifact_id = root
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("app")
            .to_string();
        let build_dir = root.join("target");

        Self {
            root,
            build_dir,
            artifact_id,
            compile_source_roots: vec!["src/main/kotlin".to_string()],
        }
    }

    pub fn with_build_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.build_dir = dir.into();
        self
    }

    pub fn with_artifact_id(mut self, id: impl Into<String>) -> Self {
        self.artifact_id = id.into();
        self
    }

    pub fn with_compile_source_roots(mut self, roots: Vec<String>) -> Self {
        self.compile_source_roots = roots;
        self
    }

    /// Resolves a possibly-relative directory against the project root.
    pub fn resolve(&self, dir: &str) -> PathBuf {
        let path = Path::new(dir);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_defaults() {
        let project = Project::discover("/work/sample-app");
        assert_eq!(project.artifact_id, "sample-app");
        assert_eq!(project.build_dir, PathBuf::from("/work/sample-app/target"));
        assert_eq!(
            project.compile_source_roots,
            vec!["src/main/kotlin".to_string()]
        );
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let project = Project::discover("/work/sample-app");
        assert_eq!(
            project.resolve("src/main/kotlin"),
            PathBuf::from("/work/sample-app/src/main/kotlin")
        );
        assert_eq!(project.resolve("/elsewhere"), PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_overrides() {
        let project = Project::discover("/work/sample-app")
            .with_artifact_id("renamed")
            .with_build_dir("/work/out")
            .with_compile_source_roots(vec!["kotlin".to_string()]);
        assert_eq!(project.artifact_id, "renamed");
        assert_eq!(project.build_dir, PathBuf::from("/work/out"));
        assert_eq!(project.compile_source_roots, vec!["kotlin".to_string()]);
    }
}
