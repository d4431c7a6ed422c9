pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod header;
pub mod report;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, Invocation, OutputFormat, PromptPolicy};
pub use config::{AssetConfig, CliOverrides, Config, ExecuteConfig, HeaderConfig};
pub use error::{QuartoHeaderError, Result, UserFriendlyError};

// Core functionality re-exports
pub use assets::{AssetCopier, AssetOutcome};
pub use header::{HeaderOutcome, HeaderTemplate};
pub use report::RunReport;
pub use scanner::{DocumentFile, DocumentKind, DocumentScanner};
pub use ui::{
    AutoNo, AutoYes, Confirmer, ConsoleConfirmer, LineConfirmer, OutputFormatter, OutputMode,
    ProgressManager, ScriptedConfirmer,
};

use std::path::Path;
use ui::confirm::parse_process_answer;

/// Main library interface: puts headers on documents and copies the asset
/// folders next to them.
pub struct QuartoHeader {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl QuartoHeader {
    /// Create a new QuartoHeader instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let progress_enabled = !quiet && output_mode == OutputMode::Human;

        Self {
            config,
            output_formatter: OutputFormatter::new(output_mode, verbose, quiet),
            progress_manager: ProgressManager::new(progress_enabled),
        }
    }

    /// Create QuartoHeader instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            crate::cli::OutputFormat::Human => OutputMode::Human,
            crate::cli::OutputFormat::Json => OutputMode::Json,
            crate::cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(config, output_mode, cli_args.verbose, cli_args.quiet))
    }

    /// Process `invocation.path`: every document directly inside it when it is
    /// a directory, or the document itself when it is a supported file.
    ///
    /// Any other path is reported and left alone. An invalid answer to a
    /// per-file prompt aborts the whole run; documents already processed keep
    /// their changes.
    pub fn run(&self, invocation: &Invocation, confirmer: &mut dyn Confirmer) -> Result<RunReport> {
        let mut report = RunReport::new();
        let template = self.header_template(invocation);
        let path = invocation.path.as_path();

        if path.is_dir() {
            self.output_formatter
                .start_operation(&format!("Scanning {}", path.display()));
            let documents = DocumentScanner::scan_directory(path)?;
            report.files_found = documents.len();
            self.output_formatter
                .debug(&format!("Found {} documents", documents.len()));

            for document in &documents {
                self.confirm_and_process(document, &template, confirmer, &mut report)?;
            }
        } else if let Some(document) = DocumentFile::from_path(path) {
            report.files_found = 1;
            self.confirm_and_process(&document, &template, confirmer, &mut report)?;
        } else {
            // Reported even in quiet mode
            self.output_formatter.warning(&format!(
                "The provided path is neither a directory nor a supported file type ({}): {}",
                scanner::supported_extensions().join(" or "),
                path.display()
            ));
            report.unsupported_path = Some(path.display().to_string());
        }

        report.finish();
        Ok(report)
    }

    /// Header for this run, built from the configured fields.
    pub fn header_template(&self, invocation: &Invocation) -> HeaderTemplate {
        HeaderTemplate::new(
            invocation.title.clone(),
            invocation.subtitle.clone(),
            invocation.self_contained,
            self.config.header.clone(),
        )
    }

    fn confirm_and_process(
        &self,
        document: &DocumentFile,
        template: &HeaderTemplate,
        confirmer: &mut dyn Confirmer,
        report: &mut RunReport,
    ) -> Result<()> {
        let question = format!(
            "Do you want to process the file {}? (yes(default)/no): ",
            document.display_path()
        );
        let answer = confirmer.ask(&question)?;

        if !parse_process_answer(&answer)? {
            self.output_formatter
                .info(&format!("Skipping {}", document.display_path()));
            report.record_skipped();
            return Ok(());
        }

        self.output_formatter
            .start_operation(&format!("Processing {}", document.display_path()));
        self.process_document(document, template, confirmer, report)
    }

    /// Write the header into `document`, then copy each asset folder next to it.
    pub fn process_document(
        &self,
        document: &DocumentFile,
        template: &HeaderTemplate,
        confirmer: &mut dyn Confirmer,
        report: &mut RunReport,
    ) -> Result<()> {
        let outcome = header::inject(&document.path, document.kind, template, confirmer)?;
        self.output_formatter.debug(outcome.describe());
        report.record_document(document, outcome);

        let copier = AssetCopier::new(self.config.assets.resolve_source_dir()?)
            .with_progress(self.progress_manager);

        for folder in &self.config.assets.folders {
            let outcome = copier.copy_beside(&document.path, folder, confirmer)?;
            self.report_asset(&copier, document, folder, outcome);
            report.record_asset(folder, outcome);
        }

        Ok(())
    }

    fn report_asset(
        &self,
        copier: &AssetCopier,
        document: &DocumentFile,
        folder: &str,
        outcome: AssetOutcome,
    ) {
        let source = copier.source_dir().join(folder);
        let dest = copier.destination_for(&document.path, folder);

        match outcome {
            AssetOutcome::Copied | AssetOutcome::Replaced => self.output_formatter.success(
                &format!("Copied {} to {}", source.display(), dest.display()),
            ),
            AssetOutcome::Skipped => self
                .output_formatter
                .info(&format!("Skipping copying {}", source.display())),
            AssetOutcome::AlreadyInPlace => self.output_formatter.debug(&format!(
                "{} is already the asset source, nothing to copy",
                dest.display()
            )),
        }
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &QuartoHeaderError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    struct Fixture {
        _assets: TempDir,
        docs: TempDir,
        app: QuartoHeader,
    }

    fn fixture() -> Fixture {
        let assets = TempDir::new().unwrap();
        for folder in ["style", "_extensions"] {
            fs::create_dir(assets.path().join(folder)).unwrap();
            fs::write(assets.path().join(folder).join("marker.txt"), folder).unwrap();
        }

        let mut config = Config::default();
        config.assets.source_dir = Some(assets.path().to_path_buf());

        Fixture {
            _assets: assets,
            docs: TempDir::new().unwrap(),
            app: QuartoHeader::new(config, OutputMode::Plain, 0, true),
        }
    }

    fn invocation(path: PathBuf) -> Invocation {
        Invocation {
            title: "Lab".to_string(),
            subtitle: "One".to_string(),
            self_contained: true,
            path,
        }
    }

    #[test]
    fn test_single_markup_file() {
        let f = fixture();
        let doc = f.docs.path().join("lab.qmd");
        fs::write(&doc, "# Body\n").unwrap();

        let mut confirmer = ScriptedConfirmer::new([""]);
        let report = f.app.run(&invocation(doc.clone()), &mut confirmer).unwrap();

        let content = fs::read_to_string(&doc).unwrap();
        assert!(content.starts_with("---\ntitle: \"Lab\"\nsubtitle: \"One\"\n"));
        assert!(content.contains("self-contained: true"));
        assert!(content.ends_with("---\n# Body\n"));
        assert!(f.docs.path().join("style").join("marker.txt").exists());
        assert!(f.docs.path().join("_extensions").join("marker.txt").exists());
        assert_eq!(report.files_processed, 1);
        assert_eq!(report.assets_copied, 2);
    }

    #[test]
    fn test_directory_only_touches_supported_files() {
        let f = fixture();
        let other = f.docs.path().join("notes.md");
        fs::write(&other, "---\nuntouched\n").unwrap();
        fs::write(f.docs.path().join("a.qmd"), "a\n").unwrap();

        let mut confirmer = AutoYes;
        let report = f
            .app
            .run(&invocation(f.docs.path().to_path_buf()), &mut confirmer)
            .unwrap();

        assert_eq!(report.files_found, 1);
        assert_eq!(fs::read_to_string(&other).unwrap(), "---\nuntouched\n");
    }

    #[test]
    fn test_declined_file_is_skipped() {
        let f = fixture();
        let doc = f.docs.path().join("lab.qmd");
        fs::write(&doc, "body\n").unwrap();

        let report = f.app.run(&invocation(doc.clone()), &mut AutoNo).unwrap();

        assert_eq!(fs::read_to_string(&doc).unwrap(), "body\n");
        assert!(!f.docs.path().join("style").exists());
        assert_eq!(report.files_skipped, 1);
    }

    #[test]
    fn test_invalid_answer_aborts() {
        let f = fixture();
        let doc = f.docs.path().join("lab.qmd");
        fs::write(&doc, "body\n").unwrap();

        let mut confirmer = ScriptedConfirmer::new(["sure"]);
        let err = f.app.run(&invocation(doc.clone()), &mut confirmer).unwrap_err();

        assert!(matches!(err, QuartoHeaderError::InvalidResponse { .. }));
        assert_eq!(fs::read_to_string(&doc).unwrap(), "body\n");
    }

    #[test]
    fn test_invalid_answer_stops_the_directory_run() {
        let f = fixture();
        for name in ["a.qmd", "b.qmd", "c.qmd"] {
            fs::write(f.docs.path().join(name), "body\n").unwrap();
        }

        let mut confirmer = ScriptedConfirmer::new(["y", "bogus"]);
        let err = f
            .app
            .run(&invocation(f.docs.path().to_path_buf()), &mut confirmer)
            .unwrap_err();
        assert!(matches!(err, QuartoHeaderError::InvalidResponse { ref response } if response == "bogus"));

        // Listing order is up to the filesystem, so read it back from the prompts.
        let asked = confirmer.asked();
        assert_eq!(asked.len(), 2);
        let processed = ["a.qmd", "b.qmd", "c.qmd"]
            .into_iter()
            .find(|name| asked[0].contains(name))
            .unwrap();

        for name in ["a.qmd", "b.qmd", "c.qmd"] {
            let content = fs::read_to_string(f.docs.path().join(name)).unwrap();
            if name == processed {
                assert!(content.starts_with("---\ntitle: \"Lab\""), "{}", name);
                assert!(content.ends_with("---\nbody\n"), "{}", name);
            } else {
                assert_eq!(content, "body\n", "{}", name);
            }
        }
    }

    #[test]
    fn test_unsupported_path_is_not_an_error() {
        let f = fixture();
        let doc = f.docs.path().join("notes.txt");
        fs::write(&doc, "text").unwrap();

        let mut confirmer = ScriptedConfirmer::new(Vec::<String>::new());
        let report = f.app.run(&invocation(doc.clone()), &mut confirmer).unwrap();

        assert_eq!(report.files_found, 0);
        assert!(report.unsupported_path.is_some());
        assert!(confirmer.asked().is_empty());
        assert_eq!(fs::read_to_string(&doc).unwrap(), "text");
    }

    #[test]
    fn test_missing_path_is_unsupported() {
        let f = fixture();
        let report = f
            .app
            .run(&invocation(f.docs.path().join("gone.qmd")), &mut AutoYes)
            .unwrap();
        assert!(report.unsupported_path.is_some());
    }

    #[test]
    fn test_sample_config_generation() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("sample.toml");

        QuartoHeader::generate_sample_config(&config_path).unwrap();

        let content = fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[header]"));
        assert!(content.contains("[assets]"));
    }
}
