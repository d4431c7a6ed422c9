pub mod markup;
pub mod notebook;
pub mod template;

pub use notebook::{Cell, CellSource, Notebook};
pub use template::HeaderTemplate;

use crate::error::Result;
use crate::scanner::DocumentKind;
use crate::ui::confirm::Confirmer;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HeaderOutcome {
    Inserted,
    Replaced,
    Kept,
}

impl HeaderOutcome {
    pub fn describe(&self) -> &'static str {
        match self {
            HeaderOutcome::Inserted => "Inserted header",
            HeaderOutcome::Replaced => "Replaced existing header",
            HeaderOutcome::Kept => "Kept existing header",
        }
    }
}

/// Write `template` into the document at `path`.
pub fn inject(
    path: &Path,
    kind: DocumentKind,
    template: &HeaderTemplate,
    confirmer: &mut dyn Confirmer,
) -> Result<HeaderOutcome> {
    match kind {
        DocumentKind::Notebook => notebook::process_notebook(path, &template.render(), confirmer),
        DocumentKind::Markup => markup::process_markup(path, &template.render_preamble(), confirmer),
    }
}
