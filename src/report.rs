use crate::assets::AssetOutcome;
use crate::header::HeaderOutcome;
use crate::scanner::{DocumentFile, DocumentKind};
use serde::Serialize;
use std::time::{Duration, Instant};

/// What happened to one processed document.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    pub path: String,
    pub kind: DocumentKind,
    pub header: HeaderOutcome,
    pub assets: Vec<AssetRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssetRecord {
    pub folder: String,
    pub outcome: AssetOutcome,
}

/// Tally of a whole run, printed as the closing summary.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub files_found: usize,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub headers_inserted: usize,
    pub headers_replaced: usize,
    pub headers_kept: usize,
    pub assets_copied: usize,
    pub assets_skipped: usize,
    pub unsupported_path: Option<String>,
    pub documents: Vec<DocumentRecord>,
    pub duration_ms: u128,
    #[serde(skip)]
    started: Instant,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            files_found: 0,
            files_processed: 0,
            files_skipped: 0,
            headers_inserted: 0,
            headers_replaced: 0,
            headers_kept: 0,
            assets_copied: 0,
            assets_skipped: 0,
            unsupported_path: None,
            documents: Vec::new(),
            duration_ms: 0,
            started: Instant::now(),
        }
    }

    pub fn record_skipped(&mut self) {
        self.files_skipped += 1;
    }

    pub fn record_document(&mut self, document: &DocumentFile, header: HeaderOutcome) {
        self.files_processed += 1;
        match header {
            HeaderOutcome::Inserted => self.headers_inserted += 1,
            HeaderOutcome::Replaced => self.headers_replaced += 1,
            HeaderOutcome::Kept => self.headers_kept += 1,
        }

        self.documents.push(DocumentRecord {
            path: document.display_path(),
            kind: document.kind,
            header,
            assets: Vec::new(),
        });
    }

    pub fn record_asset(&mut self, folder: &str, outcome: AssetOutcome) {
        match outcome {
            AssetOutcome::Copied | AssetOutcome::Replaced => self.assets_copied += 1,
            AssetOutcome::Skipped | AssetOutcome::AlreadyInPlace => self.assets_skipped += 1,
        }

        if let Some(record) = self.documents.last_mut() {
            record.assets.push(AssetRecord {
                folder: folder.to_string(),
                outcome,
            });
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn finish(&mut self) {
        self.duration_ms = self.elapsed().as_millis();
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}
