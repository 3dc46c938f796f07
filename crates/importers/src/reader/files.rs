//! Async filesystem helpers

use std::path::{Path, PathBuf};

use dialogue_data_core::{DataLoadError, Result};

pub(crate) async fn read_file(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DataLoadError::NotFound(path.display().to_string())
        } else {
            DataLoadError::io(path.display(), e)
        }
    })
}

pub(crate) async fn is_file(path: &Path) -> bool {
    tokio::fs::metadata(path).await.map_or(false, |m| m.is_file())
}

pub(crate) async fn is_dir(path: &Path) -> bool {
    tokio::fs::metadata(path).await.map_or(false, |m| m.is_dir())
}

pub(crate) async fn exists(path: &Path) -> bool {
    tokio::fs::metadata(path).await.is_ok()
}

/// Absolute form of `path`, or `path` itself when it cannot be resolved
pub(crate) async fn canonical(path: &Path) -> PathBuf {
    tokio::fs::canonicalize(path)
        .await
        .unwrap_or_else(|_| path.to_path_buf())
}

/// All files below `path`, hidden entries excluded, sorted
///
/// A file path yields itself. A missing path is `NotFound`.
pub(crate) async fn list_files(path: &Path) -> Result<Vec<PathBuf>> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|_| DataLoadError::NotFound(path.display().to_string()))?;
    if metadata.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    let mut pending = vec![path.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|e| DataLoadError::io(dir.display(), e))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| DataLoadError::io(dir.display(), e))?
        {
            let path = entry.path();
            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .map_or(false, |n| n.starts_with('.'));
            if hidden {
                continue;
            }

            match tokio::fs::metadata(&path).await {
                Ok(m) if m.is_dir() => pending.push(path),
                Ok(m) if m.is_file() => files.push(path),
                _ => {}
            }
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_list_files_skips_hidden_and_sorts() {
        let dir = tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("nested")).unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join("b.yml"), "").unwrap();
        std::fs::write(dir.path().join("a.yml"), "").unwrap();
        std::fs::write(dir.path().join(".hidden.yml"), "").unwrap();
        std::fs::write(dir.path().join(".git/config"), "").unwrap();
        std::fs::write(dir.path().join("nested/c.yaml"), "").unwrap();

        let files = list_files(dir.path()).await.unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.yml", "b.yml", "nested/c.yaml"]);
    }

    #[tokio::test]
    async fn test_list_files_single_file_and_missing() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("nlu.yml");
        std::fs::write(&file, "").unwrap();

        assert_eq!(list_files(&file).await.unwrap(), vec![file.clone()]);
        assert!(matches!(
            list_files(&dir.path().join("nope")).await,
            Err(DataLoadError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_path_checks() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("config.yml");
        std::fs::write(&file, "").unwrap();

        assert!(is_file(&file).await);
        assert!(!is_dir(&file).await);
        assert!(is_dir(dir.path()).await);
        assert!(!exists(&dir.path().join("nope")).await);
        assert!(canonical(&file).await.is_absolute());
    }
}
