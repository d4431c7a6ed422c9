use crate::error::{QuartoHeaderError, UserFriendlyError};
use crate::report::RunReport;
use console::{style, Emoji, StyledObject, Term};
use serde_json::json;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Success,
    Error,
    Warning,
    Info,
    Step,
    Debug,
}

impl Level {
    fn name(self) -> &'static str {
        match self {
            Level::Success => "success",
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Step => "step",
            Level::Debug => "debug",
        }
    }

    fn marker(self) -> Emoji<'static, 'static> {
        match self {
            Level::Success => Emoji("✅ ", "+ "),
            Level::Error => Emoji("❌ ", "x "),
            Level::Warning => Emoji("⚠️  ", "! "),
            Level::Info => Emoji("ℹ️  ", "i "),
            Level::Step => Emoji("📄 ", "> "),
            Level::Debug => Emoji("   ", "   "),
        }
    }

    /// Prefix used when colors are off.
    fn symbol(self) -> &'static str {
        match self {
            Level::Success => "✓",
            Level::Error => "✗",
            Level::Warning => "!",
            Level::Info => "i",
            Level::Step => ">",
            Level::Debug => " ",
        }
    }

    fn paint(self, message: &str) -> StyledObject<&str> {
        let styled = style(message);
        match self {
            Level::Success => styled.green(),
            Level::Error => styled.red().bold(),
            Level::Warning => styled.yellow().bold(),
            Level::Info => styled.cyan(),
            Level::Step => styled.bold(),
            Level::Debug => styled.dim(),
        }
    }
}

/// Prints run messages in the selected mode.
///
/// JSON mode writes one object per line on stdout. Human and plain modes send
/// errors to stderr and everything else to stdout. Quiet mode keeps errors and
/// warnings.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors =
            mode == OutputMode::Human && !quiet && Term::stdout().features().colors_supported();

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn success(&self, message: &str) {
        self.emit(Level::Success, message);
    }

    pub fn error(&self, message: &str) {
        self.emit(Level::Error, message);
    }

    pub fn warning(&self, message: &str) {
        self.emit(Level::Warning, message);
    }

    pub fn info(&self, message: &str) {
        self.emit(Level::Info, message);
    }

    pub fn debug(&self, message: &str) {
        self.emit(Level::Debug, message);
    }

    pub fn start_operation(&self, operation: &str) {
        self.emit(Level::Step, operation);
    }

    pub fn print_user_friendly_error(&self, error: &QuartoHeaderError) {
        self.error(&error.user_message());

        let Some(suggestion) = error.suggestion() else {
            return;
        };
        match self.mode {
            OutputMode::Json => println!("{}", json!({ "type": "suggestion", "message": suggestion })),
            OutputMode::Human if self.use_colors => {
                eprintln!("   {}", style(format!("Suggestion: {}", suggestion)).cyan())
            }
            _ => eprintln!("Suggestion: {}", suggestion),
        }
    }

    pub fn print_run_summary(&self, report: &RunReport) {
        for line in self.summary_lines(report) {
            println!("{}", line);
        }
    }

    fn shows(&self, level: Level) -> bool {
        match level {
            Level::Error | Level::Warning => true,
            Level::Debug => !self.quiet && self.verbose_level >= 1,
            _ => !self.quiet,
        }
    }

    fn emit(&self, level: Level, message: &str) {
        if !self.shows(level) {
            return;
        }

        let line = self.render(level, message);
        if level == Level::Error && self.mode != OutputMode::Json {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    fn render(&self, level: Level, message: &str) -> String {
        match self.mode {
            OutputMode::Json => json!({
                "type": "message",
                "level": level.name(),
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })
            .to_string(),
            OutputMode::Plain => format!("{}: {}", level.name().to_uppercase(), message),
            OutputMode::Human if self.use_colors => {
                format!("{}{}", level.marker(), level.paint(message))
            }
            OutputMode::Human => format!("{} {}", level.symbol(), message),
        }
    }

    fn summary_lines(&self, report: &RunReport) -> Vec<String> {
        if self.mode == OutputMode::Json {
            let line = serde_json::to_string(report).unwrap_or_else(|_| "{}".to_string());
            return vec![line];
        }
        if self.quiet {
            return Vec::new();
        }

        let rows = [
            ("Files found", report.files_found.to_string()),
            ("Files processed", report.files_processed.to_string()),
            ("Files skipped", report.files_skipped.to_string()),
            (
                "Headers",
                format!(
                    "{} inserted, {} replaced, {} kept",
                    report.headers_inserted, report.headers_replaced, report.headers_kept
                ),
            ),
            (
                "Asset folders",
                format!("{} copied, {} skipped", report.assets_copied, report.assets_skipped),
            ),
            ("Time taken", format_duration(report.elapsed())),
        ];

        match self.mode {
            OutputMode::Plain => {
                let mut lines = vec!["COMPLETED: Header run".to_string()];
                lines.extend(rows.iter().map(|(label, value)| format!("{}: {}", label, value)));
                lines
            }
            _ => {
                let rule = "─".repeat(48);
                let title = if self.use_colors {
                    style("Header run finished").green().bold().to_string()
                } else {
                    "Header run finished".to_string()
                };

                let mut lines = vec![String::new(), rule.clone(), title];
                lines.extend(rows.iter().map(|(label, value)| {
                    let value = if self.use_colors {
                        style(value).cyan().to_string()
                    } else {
                        value.clone()
                    };
                    format!("  {:<16} {}", format!("{}:", label), value)
                }));
                lines.push(rule);
                lines
            }
        }
    }
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_mode() {
        let formatter = OutputFormatter::new(OutputMode::Human, 2, true);
        assert_eq!(formatter.verbose_level, 0);
        assert!(!formatter.use_colors);
        assert!(!formatter.shows(Level::Info));
        assert!(!formatter.shows(Level::Step));
        assert!(formatter.shows(Level::Warning));
        assert!(formatter.shows(Level::Error));
    }

    #[test]
    fn test_debug_needs_verbose() {
        assert!(!OutputFormatter::new(OutputMode::Plain, 0, false).shows(Level::Debug));
        assert!(OutputFormatter::new(OutputMode::Plain, 1, false).shows(Level::Debug));
    }

    #[test]
    fn test_plain_rendering() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 0, false);
        assert_eq!(formatter.render(Level::Step, "Processing a.qmd"), "STEP: Processing a.qmd");
        assert_eq!(formatter.render(Level::Warning, "odd path"), "WARNING: odd path");
    }

    #[test]
    fn test_json_message_is_one_line() {
        let formatter = OutputFormatter::new(OutputMode::Json, 0, false);
        let line = formatter.render(Level::Success, "Copied style");

        assert!(!line.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["level"], "success");
        assert_eq!(value["message"], "Copied style");
    }

    #[test]
    fn test_json_summary_is_one_line() {
        let formatter = OutputFormatter::new(OutputMode::Json, 0, true);
        let mut report = RunReport::new();
        report.files_found = 3;
        report.finish();

        let lines = formatter.summary_lines(&report);
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["files_found"], 3);
    }

    #[test]
    fn test_plain_summary() {
        let formatter = OutputFormatter::new(OutputMode::Plain, 0, false);
        let mut report = RunReport::new();
        report.files_processed = 2;

        let lines = formatter.summary_lines(&report);
        assert_eq!(lines[0], "COMPLETED: Header run");
        assert!(lines.contains(&"Files processed: 2".to_string()));
        assert!(OutputFormatter::new(OutputMode::Plain, 0, true)
            .summary_lines(&report)
            .is_empty());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
    }
}
