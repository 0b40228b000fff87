//! Source file discovery.

use std::io;
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;

/// Walks a directory tree for source files with a given extension.
#[derive(Debug, Clone)]
pub struct SourceFileFinder {
    extensions: Vec<String>,
    exclude_globs: Vec<glob::Pattern>,
    /// Each pattern with `**/` and `/**` trimmed, one glob per path
    /// component. Lets `.venv` or `**/build` match relative to any directory.
    exclude_segments: Vec<Vec<glob::Pattern>>,
}

impl SourceFileFinder {
    /// Creates a finder for `extensions` (without the dot).
    ///
    /// # Errors
    ///
    /// Returns an error if an exclude pattern is not a valid glob.
    pub fn new<E, X>(extensions: E, exclude: X) -> Result<Self, glob::PatternError>
    where
        E: IntoIterator,
        E::Item: Into<String>,
        X: IntoIterator,
        X::Item: Into<String>,
    {
        let exclude_patterns: Vec<String> = exclude.into_iter().map(Into::into).collect();
        let exclude_globs = exclude_patterns
            .iter()
            .map(|p| glob::Pattern::new(p))
            .collect::<Result<_, _>>()?;
        let mut exclude_segments: Vec<Vec<glob::Pattern>> = exclude_patterns
            .iter()
            .map(String::as_str)
            .map(segments)
            .collect::<Result<_, _>>()?;
        exclude_segments.retain(|s| !s.is_empty());

        Ok(Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            exclude_globs,
            exclude_segments,
        })
    }

    /// Returns true if `path` has one of the configured extensions.
    #[must_use]
    pub fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|x| x == ext))
    }

    /// Checks if a path should be excluded.
    #[must_use]
    pub fn should_exclude(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        if self.exclude_globs.iter().any(|g| g.matches(&path_str)) {
            return true;
        }

        let components: Vec<_> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(name) => Some(name.to_string_lossy()),
                _ => None,
            })
            .collect();

        self.exclude_segments.iter().any(|segments| {
            components.windows(segments.len()).any(|window| {
                window
                    .iter()
                    .zip(segments)
                    .all(|(component, glob)| glob.matches(component))
            })
        })
    }

    /// Lists every matching file under `dir`, sorted by path.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory cannot be read.
    pub fn discover(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if !self.has_source_extension(path) {
                continue;
            }
            if self.should_exclude(path) {
                debug!("Excluding: {}", path.display());
                continue;
            }

            files.push(path.to_path_buf());
        }

        info!("Found {} files to analyze", files.len());
        Ok(files)
    }
}

/// Component globs of `pattern` without leading and trailing `**`.
fn segments(pattern: &str) -> Result<Vec<glob::Pattern>, glob::PatternError> {
    let parts: Vec<&str> = pattern.split('/').collect();
    let wildcard = |s: &&str| s.is_empty() || *s == "**";
    let start = parts
        .iter()
        .position(|s| !wildcard(s))
        .unwrap_or(parts.len());
    let end = parts.iter().rposition(|s| !wildcard(s)).map_or(start, |i| i + 1);
    parts[start..end]
        .iter()
        .map(|s| glob::Pattern::new(s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn finder() -> SourceFileFinder {
        SourceFileFinder::new(["py"], ["**/.venv/**", "**/__pycache__/**"]).unwrap()
    }

    #[test]
    fn test_discovers_python_files_in_order() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("week2")).unwrap();
        fs::write(dir.path().join("week2/b.py"), "").unwrap();
        fs::write(dir.path().join("a.py"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = finder().discover(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("a.py"), PathBuf::from("week2/b.py")]
        );
    }

    #[test]
    fn test_exclude_patterns() {
        let finder = finder();
        assert!(finder.should_exclude(Path::new("/home/ann/.venv/lib/site.py")));
        assert!(finder.should_exclude(Path::new("/home/ann/__pycache__/x.py")));
        assert!(!finder.should_exclude(Path::new("/home/ann/week1/box.py")));
    }

    #[test]
    fn test_exclude_matches_whole_components() {
        let finder = SourceFileFinder::new(["py"], ["**/build", "week*/drafts/**"]).unwrap();
        assert!(finder.should_exclude(Path::new("/course/build/gen.py")));
        assert!(!finder.should_exclude(Path::new("/course/buildings/plan.py")));
        assert!(!finder.should_exclude(Path::new("/course/rebuild/gen.py")));
        assert!(finder.should_exclude(Path::new("/course/week3/drafts/a.py")));
        assert!(!finder.should_exclude(Path::new("/course/week3/drafts_old/a.py")));
    }

    #[test]
    fn test_bare_name_excludes_anywhere() {
        let finder = SourceFileFinder::new(["py"], ["conftest.py"]).unwrap();
        assert!(finder.should_exclude(Path::new("/course/tests/conftest.py")));
        assert!(!finder.should_exclude(Path::new("/course/tests/my_conftest.py")));
    }

    #[test]
    fn test_excluded_directories_are_skipped() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join(".venv/lib")).unwrap();
        fs::write(dir.path().join(".venv/lib/site.py"), "").unwrap();
        fs::write(dir.path().join("main.py"), "").unwrap();

        let files = finder().discover(dir.path()).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("main.py"));
    }

    #[test]
    fn test_invalid_glob_is_rejected() {
        assert!(SourceFileFinder::new(["py"], ["[unclosed"]).is_err());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(finder().discover(&dir.path().join("absent")).is_err());
    }
}
