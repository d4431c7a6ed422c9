use crate::error::{QuartoHeaderError, Result};
use crate::scanner::file_filter::DocumentKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    pub path: PathBuf,
    pub kind: DocumentKind,
}

impl DocumentFile {
    pub fn new(path: PathBuf, kind: DocumentKind) -> Self {
        Self { path, kind }
    }

    /// A document for `path` if it names an existing file with a supported
    /// extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return None;
        }
        DocumentKind::from_path(path).map(|kind| Self::new(path.to_path_buf(), kind))
    }

    pub fn display_path(&self) -> String {
        self.path.display().to_string()
    }
}

/// Lists the documents directly inside a directory.
pub struct DocumentScanner;

impl DocumentScanner {
    /// Immediate children of `root` with a supported extension, in the
    /// order the directory listing returns them. Subdirectories are not
    /// searched and entries are not sorted.
    pub fn scan_directory<P: AsRef<Path>>(root: P) -> Result<Vec<DocumentFile>> {
        let root_path = root.as_ref();

        if !root_path.is_dir() {
            return Err(QuartoHeaderError::InvalidPath {
                path: format!("{} is not a directory", root_path.display()),
            });
        }

        let walker = WalkDir::new(root_path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true);

        let mut documents = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy();
            if let Some(kind) = DocumentKind::from_name(&name) {
                documents.push(DocumentFile::new(entry.path().to_path_buf(), kind));
            }
        }

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_only_supported_files_are_listed() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::write(root.join("a.qmd"), "").unwrap();
        fs::write(root.join("b.ipynb"), "{}").unwrap();
        fs::write(root.join("c.md"), "").unwrap();
        fs::write(root.join("d.py"), "").unwrap();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("nested").join("e.qmd"), "").unwrap();
        fs::create_dir(root.join("dir.qmd")).unwrap();

        let mut names: Vec<String> = DocumentScanner::scan_directory(root)
            .unwrap()
            .iter()
            .map(|d| d.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();

        assert_eq!(names, vec!["a.qmd", "b.ipynb"]);
    }

    #[test]
    fn test_kinds_are_assigned() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("lab.ipynb"), "{}").unwrap();

        let documents = DocumentScanner::scan_directory(temp_dir.path()).unwrap();
        assert_eq!(documents.len(), 1);
        assert_eq!(documents[0].kind, DocumentKind::Notebook);
    }

    #[test]
    fn test_scan_rejects_files() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("a.qmd");
        fs::write(&file, "").unwrap();

        assert!(DocumentScanner::scan_directory(&file).is_err());
    }

    #[test]
    fn test_document_from_path() {
        let temp_dir = TempDir::new().unwrap();
        let qmd = temp_dir.path().join("a.qmd");
        let txt = temp_dir.path().join("a.txt");
        fs::write(&qmd, "").unwrap();
        fs::write(&txt, "").unwrap();

        assert_eq!(DocumentFile::from_path(&qmd).unwrap().kind, DocumentKind::Markup);
        assert!(DocumentFile::from_path(&txt).is_none());
        assert!(DocumentFile::from_path(temp_dir.path().join("missing.qmd")).is_none());
    }
}
