use crate::error::{QuartoHeaderError, Result};
use crate::ui::confirm::{is_affirmative, Confirmer};
use crate::ui::ProgressManager;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetOutcome {
    /// Destination did not exist and was created.
    Copied,
    /// Destination existed and was replaced after confirmation.
    Replaced,
    /// Destination existed and the overwrite was declined.
    Skipped,
    /// Source and destination are the same directory.
    AlreadyInPlace,
}

/// Copies bundled asset folders next to documents.
pub struct AssetCopier {
    source_dir: PathBuf,
    progress: ProgressManager,
}

impl AssetCopier {
    pub fn new<P: Into<PathBuf>>(source_dir: P) -> Self {
        Self {
            source_dir: source_dir.into(),
            progress: ProgressManager::new(false),
        }
    }

    pub fn with_progress(mut self, progress: ProgressManager) -> Self {
        self.progress = progress;
        self
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Folder `name` from the source directory, copied into the directory
    /// containing `document`.
    pub fn destination_for(&self, document: &Path, name: &str) -> PathBuf {
        parent_dir(document).join(name)
    }

    pub fn copy_beside(
        &self,
        document: &Path,
        name: &str,
        confirmer: &mut dyn Confirmer,
    ) -> Result<AssetOutcome> {
        let source = self.source_dir.join(name);
        let dest = self.destination_for(document, name);
        copy_folder_with_progress(&source, &dest, confirmer, &self.progress)
    }
}

/// Copy the `source` tree to `dest`.
///
/// An existing `dest` is only replaced when the confirmer agrees. The copy is
/// staged in a temporary sibling of `dest` and moved into place once it is
/// complete, so `dest` is never left half written.
pub fn copy_folder(
    source: &Path,
    dest: &Path,
    confirmer: &mut dyn Confirmer,
) -> Result<AssetOutcome> {
    copy_folder_with_progress(source, dest, confirmer, &ProgressManager::new(false))
}

/// [`copy_folder`] with a spinner shown while files are copied. Prompts are
/// asked before the spinner starts.
pub fn copy_folder_with_progress(
    source: &Path,
    dest: &Path,
    confirmer: &mut dyn Confirmer,
    progress: &ProgressManager,
) -> Result<AssetOutcome> {
    if !source.is_dir() {
        return Err(QuartoHeaderError::AssetSourceMissing {
            path: source.display().to_string(),
        });
    }

    let existed = dest.exists();
    if existed {
        if same_directory(source, dest) {
            return Ok(AssetOutcome::AlreadyInPlace);
        }

        let question = format!(
            "The folder {} already exists. Overwrite? (yes/no(default)): ",
            dest.display()
        );
        if !is_affirmative(&confirmer.ask(&question)?) {
            return Ok(AssetOutcome::Skipped);
        }
    }

    let parent = parent_dir(dest);
    fs::create_dir_all(&parent)?;

    let staging = tempfile::Builder::new()
        .prefix(".quarto-header-")
        .tempdir_in(&parent)?;
    let staged = staging.path().join("tree");
    progress.with_spinner(&format!("Copying {}", source.display()), || {
        copy_tree(source, &staged)
    })?;

    if existed {
        if dest.is_dir() {
            fs::remove_dir_all(dest)?;
        } else {
            fs::remove_file(dest)?;
        }
    }
    fs::rename(&staged, dest)?;

    Ok(if existed {
        AssetOutcome::Replaced
    } else {
        AssetOutcome::Copied
    })
}

/// Recursively copy `source` into `dest`, which must not exist yet.
/// File modification times are carried over.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(source).follow_links(true) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|_| QuartoHeaderError::InvalidPath {
                path: entry.path().display().to_string(),
            })?;
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }

        fs::copy(entry.path(), &target)?;

        let metadata = entry.metadata()?;
        let mtime = filetime::FileTime::from_last_modification_time(&metadata);
        filetime::set_file_mtime(&target, mtime)?;
    }

    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
