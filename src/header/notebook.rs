use crate::error::{QuartoHeaderError, Result};
use crate::header::template::DELIMITER;
use crate::header::HeaderOutcome;
use crate::ui::confirm::{is_affirmative, Confirmer};
use serde::ser::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// A Jupyter notebook. Only the cell list is modelled; every other field
/// is carried through untouched.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Notebook {
    #[serde(default)]
    pub cells: Vec<Cell>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Cell {
    pub cell_type: String,
    #[serde(default)]
    pub source: CellSource,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Cell source is stored either as one string or as a list of lines.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CellSource {
    Text(String),
    Lines(Vec<String>),
}

impl Default for CellSource {
    fn default() -> Self {
        CellSource::Text(String::new())
    }
}

impl CellSource {
    pub fn text(&self) -> String {
        match self {
            CellSource::Text(text) => text.clone(),
            CellSource::Lines(lines) => lines.concat(),
        }
    }

    /// Split into the line-list form notebooks use on disk.
    pub fn to_lines(&self) -> Self {
        let text = self.text();
        CellSource::Lines(text.split_inclusive('\n').map(str::to_string).collect())
    }
}

impl Cell {
    pub fn markdown(source: &str, with_id: bool) -> Self {
        let mut other = Map::new();
        other.insert("metadata".to_string(), Value::Object(Map::new()));
        if with_id {
            other.insert("id".to_string(), Value::String(new_cell_id()));
        }

        Self {
            cell_type: "markdown".to_string(),
            source: CellSource::Text(source.to_string()),
            other,
        }
    }

    /// Markdown or raw cell whose text starts with the header delimiter.
    pub fn is_header(&self) -> bool {
        matches!(self.cell_type.as_str(), "markdown" | "raw")
            && self.source.text().starts_with(DELIMITER)
    }
}

impl Notebook {
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| notebook_error(path, e))
    }

    pub fn read(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, path)
    }

    /// Cell ids are part of the format from version 4.5 on.
    pub fn supports_cell_ids(&self) -> bool {
        let major = self.other.get("nbformat").and_then(Value::as_u64).unwrap_or(4);
        let minor = self
            .other
            .get("nbformat_minor")
            .and_then(Value::as_u64)
            .unwrap_or(0);
        major > 4 || (major == 4 && minor >= 5)
    }

    /// Serialize the way Jupyter writes notebooks: sorted keys, one-space
    /// indent, sources as line lists, trailing newline.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        let mut normalized = self.clone();
        for cell in &mut normalized.cells {
            cell.source = cell.source.to_lines();
        }

        // Round-trip through Value so object keys come out sorted.
        let value = serde_json::to_value(&normalized)?;

        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b" ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer)?;

        let mut out = String::from_utf8(buf).map_err(serde_json::Error::custom)?;
        out.push('\n');
        Ok(out)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let content = self.to_json_string().map_err(|e| notebook_error(path, e))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// Put `header` at the top of `notebook`, asking before replacing an
/// existing header cell.
pub fn inject_header(
    notebook: &mut Notebook,
    header: &str,
    confirmer: &mut dyn Confirmer,
) -> Result<HeaderOutcome> {
    if let Some(first) = notebook.cells.first_mut() {
        if first.is_header() {
            let question = format!(
                "Existing header found:\n{}\nOverwrite? (yes/no(default)): ",
                first.source.text()
            );
            if !is_affirmative(&confirmer.ask(&question)?) {
                return Ok(HeaderOutcome::Kept);
            }
            first.source = CellSource::Text(header.to_string());
            return Ok(HeaderOutcome::Replaced);
        }
    }

    let cell = Cell::markdown(header, notebook.supports_cell_ids());
    notebook.cells.insert(0, cell);
    Ok(HeaderOutcome::Inserted)
}

/// Read, update and rewrite the notebook at `path`. The file is only
/// written when the notebook changed.
pub fn process_notebook(
    path: &Path,
    header: &str,
    confirmer: &mut dyn Confirmer,
) -> Result<HeaderOutcome> {
    let mut notebook = Notebook::read(path)?;
    let outcome = inject_header(&mut notebook, header, confirmer)?;

    if outcome != HeaderOutcome::Kept {
        notebook.write(path)?;
    }

    Ok(outcome)
}

fn new_cell_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

fn notebook_error(path: &Path, error: serde_json::Error) -> QuartoHeaderError {
    QuartoHeaderError::Notebook {
        path: path.display().to_string(),
        message: error.to_string(),
    }
}
