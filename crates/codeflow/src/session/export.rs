//! Downloading the flow as a single file

use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::SessionState;
use crate::core::{ExportFormat, FlowError};

/// Base name of every exported file
pub const EXPORT_BASENAME: &str = "flow-diagram";

/// `flow-diagram<ext>` for the given format
pub fn export_file_name(format: ExportFormat) -> String {
    format!("{}{}", EXPORT_BASENAME, format.extension())
}

/// A ready-to-write export: file name and exact content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    pub file_name: String,
    pub content: String,
}

impl Export {
    pub fn new(format: ExportFormat, content: impl Into<String>) -> Self {
        Self {
            file_name: export_file_name(format),
            content: content.into(),
        }
    }

    /// Write the export into `dir`, returning the full path
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, FlowError> {
        let path = dir.join(&self.file_name);
        fs::write(&path, &self.content)?;
        info!(path = %path.display(), bytes = self.content.len(), "Exported flow");
        Ok(path)
    }
}

impl SessionState {
    /// The preview, packaged under the selected format's file name
    pub fn export(&self) -> Export {
        Export::new(self.selected_format(), self.preview())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_export_file_names() {
        assert_eq!(export_file_name(ExportFormat::Python), "flow-diagram.py");
        assert_eq!(export_file_name(ExportFormat::Tsx), "flow-diagram.tsx");
        assert_eq!(export_file_name(ExportFormat::C), "flow-diagram.c");
    }

    #[test]
    fn test_write_to() {
        let dir = tempdir().unwrap();
        let export = Export::new(ExportFormat::Java, "class A {}");
        let path = export.write_to(dir.path()).unwrap();
        assert_eq!(path, dir.path().join("flow-diagram.java"));
        assert_eq!(fs::read_to_string(path).unwrap(), "class A {}");
    }

    #[test]
    fn test_empty_session_exports_empty_file() {
        let export = SessionState::new().export();
        assert_eq!(export.file_name, "flow-diagram.py");
        assert_eq!(export.content, "");
    }
}
