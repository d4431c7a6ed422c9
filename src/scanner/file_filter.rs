use serde::Serialize;
use std::path::Path;

/// The two document formats that can carry a header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// Jupyter notebook (`.ipynb`).
    Notebook,
    /// Quarto markup document (`.qmd`).
    Markup,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 2] = [DocumentKind::Notebook, DocumentKind::Markup];

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Notebook => ".ipynb",
            DocumentKind::Markup => ".qmd",
        }
    }

    /// Classify a file name by its suffix. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| name.ends_with(kind.extension()))
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.file_name()
            .and_then(|name| name.to_str())
            .and_then(Self::from_name)
    }
}

pub fn supported_extensions() -> Vec<&'static str> {
    DocumentKind::ALL.iter().map(DocumentKind::extension).collect()
}
