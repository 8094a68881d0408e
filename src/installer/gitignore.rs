//! Keeping docs caches out of version control.

use anyhow::Result;
use std::path::Path;

use crate::constants::GITIGNORE;
use crate::utils::fs::{read_to_string_or_empty, safe_write};

/// Ensure `.gitignore` in `project_dir` ignores `entry` (e.g. `.rails-docs/`).
///
/// The file is created when missing. Existing content is kept as is and the
/// entry appended on its own line. Returns whether the file changed.
pub fn update_gitignore(project_dir: &Path, entry: &str) -> Result<bool> {
    let path = project_dir.join(GITIGNORE);
    let content = read_to_string_or_empty(&path)?;

    if is_ignored(&content, entry) {
        tracing::debug!("{} already lists {}", path.display(), entry);
        return Ok(false);
    }

    let trimmed = content.trim_end();
    let updated = if trimmed.is_empty() {
        format!("{entry}\n")
    } else {
        format!("{trimmed}\n{entry}\n")
    };

    safe_write(&path, &updated)?;
    Ok(true)
}

/// Whether any line already names `entry`, with or without a leading or
/// trailing slash.
fn is_ignored(content: &str, entry: &str) -> bool {
    let wanted = entry.trim_matches('/');
    content.lines().map(str::trim).any(|line| !line.starts_with('#') && line.trim_matches('/') == wanted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_creates_gitignore() {
        let temp = TempDir::new().unwrap();
        assert!(update_gitignore(temp.path(), ".rails-docs/").unwrap());
        assert_eq!(fs::read_to_string(temp.path().join(".gitignore")).unwrap(), ".rails-docs/\n");
    }

    #[test]
    fn test_appends_once() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".gitignore");
        fs::write(&path, "/tmp\nnode_modules/\n\n").unwrap();

        assert!(update_gitignore(temp.path(), ".turbo-docs/").unwrap());
        assert!(!update_gitignore(temp.path(), ".turbo-docs/").unwrap());

        assert_eq!(fs::read_to_string(&path).unwrap(), "/tmp\nnode_modules/\n.turbo-docs/\n");
    }

    #[test]
    fn test_equivalent_entry_counts_as_present() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".gitignore");
        fs::write(&path, "/.rails-docs\n").unwrap();

        assert!(!update_gitignore(temp.path(), ".rails-docs/").unwrap());
    }

    #[test]
    fn test_commented_entry_is_not_present() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".gitignore");
        fs::write(&path, "# .alpine-docs/\n").unwrap();

        assert!(update_gitignore(temp.path(), ".alpine-docs/").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# .alpine-docs/\n.alpine-docs/\n");
    }

    #[test]
    fn test_entries_for_several_sources_coexist() {
        let temp = TempDir::new().unwrap();
        update_gitignore(temp.path(), ".rails-docs/").unwrap();
        update_gitignore(temp.path(), ".stimulus-docs/").unwrap();

        assert_eq!(
            fs::read_to_string(temp.path().join(".gitignore")).unwrap(),
            ".rails-docs/\n.stimulus-docs/\n"
        );
    }
}
