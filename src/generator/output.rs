use anyhow::Context;
use std::fs;
use std::path::Path;

/// What happened to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Written,
    /// The file existed and `force` was not set
    SkippedExisting,
    /// Nothing was written (`--dry-run`)
    DryRun,
}

/// Write `contents` to `path`, creating parent directories.
///
/// An existing file is left untouched unless `force` is set.
pub fn write_output(path: &Path, contents: &str, force: bool) -> anyhow::Result<WriteOutcome> {
    if path.exists() && !force {
        tracing::warn!(path = %path.display(), "output exists; use --force to overwrite");
        return Ok(WriteOutcome::SkippedExisting);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote generated code");
    Ok(WriteOutcome::Written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_file_needs_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dispatch.rs");

        assert_eq!(write_output(&path, "first", false).unwrap(), WriteOutcome::Written);
        assert_eq!(
            write_output(&path, "second", false).unwrap(),
            WriteOutcome::SkippedExisting
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");

        assert_eq!(write_output(&path, "third", true).unwrap(), WriteOutcome::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "third");
    }
}
