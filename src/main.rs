use clap::Parser;
use quarto_header::{
    AutoNo, AutoYes, Cli, Confirmer, ConsoleConfirmer, LineConfirmer, OutputFormatter, OutputMode,
    PromptPolicy, QuartoHeader, QuartoHeaderError, UserFriendlyError,
};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    // Parse CLI arguments; malformed ones exit here with clap's usage error
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let app = match QuartoHeader::from_cli(&cli) {
        Ok(app) => app,
        Err(e) => {
            print_startup_error(&e);
            return exit_code_for(&e);
        }
    };

    let invocation = match cli.invocation() {
        Ok(invocation) => invocation,
        Err(e) => {
            app.handle_error(&e);
            return exit_code_for(&e);
        }
    };

    let mut confirmer: Box<dyn Confirmer> = match cli.prompt_policy() {
        PromptPolicy::AlwaysYes => Box::new(AutoYes),
        PromptPolicy::AlwaysNo => Box::new(AutoNo),
        PromptPolicy::Interactive if ConsoleConfirmer::is_available() => {
            Box::new(ConsoleConfirmer::new())
        }
        // Answers piped in from a script or test harness
        PromptPolicy::Interactive => Box::new(LineConfirmer::stdio()),
    };

    match app.run(&invocation, confirmer.as_mut()) {
        Ok(report) => {
            if report.unsupported_path.is_none() {
                app.output_formatter().print_run_summary(&report);
            }
            0
        }
        Err(e) => {
            app.handle_error(&e);
            exit_code_for(&e)
        }
    }
}

fn exit_code_for(error: &QuartoHeaderError) -> i32 {
    match error {
        QuartoHeaderError::InvalidResponse { .. } => 3,
        QuartoHeaderError::PromptExhausted { .. } => 3,
        QuartoHeaderError::InputClosed => 3,
        QuartoHeaderError::Config { .. } => 4,
        QuartoHeaderError::AssetSourceMissing { .. } => 5,
        QuartoHeaderError::Notebook { .. } => 6,
        _ => 1,
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "quarto-header.toml".to_string());

    match QuartoHeader::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nEdit the file to change the author, themes, filters or asset folders.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &QuartoHeaderError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
