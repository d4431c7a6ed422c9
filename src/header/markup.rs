use crate::error::Result;
use crate::header::template::DELIMITER;
use crate::header::HeaderOutcome;
use crate::ui::confirm::{is_affirmative, Confirmer};
use std::fs;
use std::path::Path;

/// Location of a header block at the top of a markup document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderSpan {
    /// Byte offset just past the closing delimiter line.
    pub end: usize,
}

/// Find a complete header block at the very start of `content`.
///
/// The first line must start with `---`; the block ends at the next line
/// that is exactly `---`. Without a closing line there is no header.
pub fn find_header(content: &str) -> Option<HeaderSpan> {
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if !first.starts_with(DELIMITER) {
        return None;
    }

    let mut offset = first.len();
    for line in lines {
        offset += line.len();
        if line.trim_end_matches(['\n', '\r']) == DELIMITER {
            return Some(HeaderSpan { end: offset });
        }
    }

    None
}

/// Return the new content for a markup document, or `None` when an existing
/// header was kept.
pub fn inject_header(
    content: &str,
    preamble: &str,
    confirmer: &mut dyn Confirmer,
) -> Result<Option<(String, HeaderOutcome)>> {
    let Some(span) = find_header(content) else {
        return Ok(Some((format!("{}{}", preamble, content), HeaderOutcome::Inserted)));
    };

    let existing = &content[..span.end];
    let question = format!("Existing header found:\n{}\nOverwrite? (yes/no(default)): ", existing);
    if !is_affirmative(&confirmer.ask(&question)?) {
        return Ok(None);
    }

    Ok(Some((
        format!("{}{}", preamble, &content[span.end..]),
        HeaderOutcome::Replaced,
    )))
}

/// Read, update and rewrite the markup document at `path`.
pub fn process_markup(
    path: &Path,
    preamble: &str,
    confirmer: &mut dyn Confirmer,
) -> Result<HeaderOutcome> {
    let content = fs::read_to_string(path)?;

    match inject_header(&content, preamble, confirmer)? {
        Some((updated, outcome)) => {
            fs::write(path, updated)?;
            Ok(outcome)
        }
        None => Ok(HeaderOutcome::Kept),
    }
}
