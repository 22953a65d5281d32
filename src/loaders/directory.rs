use std::path::{Path, PathBuf};

use glob::Pattern;
use ragprep_core::ConfigError;
use walkdir::WalkDir;

/// Include/exclude glob filter for directory inputs.
///
/// A pattern matches if it matches either the full path or the file name.
/// Exclusion wins over inclusion, and an empty include list admits
/// everything.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl PathFilter {
    /// Compile include and exclude patterns.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidPattern`] for a malformed glob.
    pub fn new<I, E>(include: I, exclude: E) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        E: IntoIterator,
        E::Item: AsRef<str>,
    {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// Whether `path` passes the filter.
    #[must_use]
    pub fn allows(&self, path: &Path) -> bool {
        let full = path.to_string_lossy();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        let matches = |pattern: &Pattern| pattern.matches(&full) || pattern.matches(&name);

        if self.exclude.iter().any(matches) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(matches)
    }
}

fn compile<P>(patterns: P) -> Result<Vec<Pattern>, ConfigError>
where
    P: IntoIterator,
    P::Item: AsRef<str>,
{
    patterns
        .into_iter()
        .map(|pattern| {
            let pattern = pattern.as_ref();
            Pattern::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Every regular file under `root` that passes `filter`, in file-name order
/// at each directory level.
pub(crate) fn walk_files(root: &Path, filter: &PathFilter) -> Vec<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(walkdir::DirEntry::into_path)
        .filter(|path| filter.allows(path))
        .collect()
}
