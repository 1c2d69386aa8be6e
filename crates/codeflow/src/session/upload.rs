//! Reading uploaded files
//!
//! Files picked together are read concurrently, but results come back in
//! the order they were picked. One unreadable file does not stop the rest.

use futures::future::join_all;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::Action;
use crate::core::{is_accepted_upload, FlowError};

/// A file that was read successfully, not yet given an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub content: String,
}

impl FileUpload {
    /// The action that adds this file to the session
    pub fn into_action(self) -> Action {
        Action::FileUploaded {
            name: self.name,
            content: self.content,
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read one file, checking its extension first
pub async fn read_upload(path: &Path) -> Result<FileUpload, FlowError> {
    let name = display_name(path);
    if !is_accepted_upload(&name) {
        return Err(FlowError::unsupported_upload(name));
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| FlowError::file_read(name.as_str(), e))?;
    debug!(file_name = %name, content_len = content.len(), "Read upload");
    Ok(FileUpload { name, content })
}

/// Read every path concurrently; the result at index `i` belongs to `paths[i]`
pub async fn read_uploads(paths: &[PathBuf]) -> Vec<Result<FileUpload, FlowError>> {
    let results = join_all(paths.iter().map(|path| read_upload(path))).await;
    for (path, result) in paths.iter().zip(&results) {
        if let Err(e) = result {
            warn!(path = %path.display(), error = %e, "Upload failed");
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_selection_order_and_partial_failure() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first.py");
        let second = dir.path().join("second.txt");
        fs::write(&first, "print(1)").unwrap();
        fs::write(&second, "notes").unwrap();

        let paths = vec![
            second.clone(),
            dir.path().join("missing.js"),
            first.clone(),
            dir.path().join("image.png"),
        ];
        let results = read_uploads(&paths).await;

        assert_eq!(results.len(), 4);
        assert_eq!(results[0].as_ref().unwrap().name, "second.txt");
        assert!(matches!(results[1], Err(FlowError::FileRead { .. })));
        assert_eq!(results[2].as_ref().unwrap().content, "print(1)");
        assert!(matches!(results[3], Err(FlowError::UnsupportedUpload { .. })));
    }

    #[test]
    fn test_into_action() {
        let upload = FileUpload {
            name: "a.txt".into(),
            content: "x".into(),
        };
        assert_eq!(
            upload.into_action(),
            Action::FileUploaded {
                name: "a.txt".into(),
                content: "x".into()
            }
        );
    }
}
