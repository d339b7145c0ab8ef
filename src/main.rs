//! Command-line interface for the redirgen binary.
//!
//! Invoked without arguments the CLI generates the rule file and the landing
//! page from `redirects.yaml` in the current directory. The `inspect`
//! subcommand prints the normalized configuration as JSON instead.

use std::{io, path::PathBuf, process};

use clap::{ArgAction, Args, Parser, Subcommand};
use redirgen::{
    DEFAULT_CONFIG_PATH, DEFAULT_DOMAIN, Error, GenerateOptions, GenerationSummary,
    NormalizedConfig, generate, load_config, logging
};

/// Command line interface for generating redirect artifacts.
#[derive(Debug, Parser)]
#[command(
    name = "redirgen",
    version,
    about = "Generate edge-router redirect rules and a short link landing page"
)]
/// Top-level CLI options parsed from user input.
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Arguments used when no subcommand is given.
    #[command(flatten)]
    default: GenerateArgs,

    /// Log pipeline steps to stderr.
    #[arg(long = "verbose", short = 'v', global = true, action = ArgAction::SetTrue)]
    verbose: bool
}

#[derive(Debug, Subcommand)]
/// Supported commands exposed by the CLI.
enum Command {
    /// Generate the rule file and the landing page.
    Generate(GenerateArgs),
    /// Print the normalized redirect configuration as JSON.
    Inspect(InspectArgs)
}

#[derive(Debug, Args, Clone)]
/// Arguments accepted by the `generate` subcommand.
struct GenerateArgs {
    /// Path to the YAML file describing the redirects.
    #[arg(long = "config", value_name = "PATH", env = "REDIRGEN_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Directory receiving the generated artifacts.
    #[arg(long = "output-dir", value_name = "DIR", env = "REDIRGEN_OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Domain serving the short links.
    #[arg(long = "domain", value_name = "DOMAIN", env = "REDIRGEN_DOMAIN", default_value = DEFAULT_DOMAIN)]
    domain: String,

    /// Skip the HTML landing page and the rule serving it.
    #[arg(long = "no-html", action = ArgAction::SetTrue)]
    no_html: bool
}

#[derive(Debug, Args)]
/// Arguments accepted by the `inspect` subcommand.
struct InspectArgs {
    /// Path to the YAML file describing the redirects.
    #[arg(long = "config", value_name = "PATH", env = "REDIRGEN_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Output formatted JSON for easier inspection.
    #[arg(long = "pretty", action = ArgAction::SetTrue)]
    pretty: bool
}

impl GenerateArgs {
    fn to_options(&self) -> GenerateOptions {
        GenerateOptions {
            config_path: self.config.clone(),
            output_dir: self.output_dir.clone(),
            domain: self.domain.clone(),
            emit_html: !self.no_html,
            ..GenerateOptions::default()
        }
    }
}

/// Entry point that reports errors and sets the appropriate exit status.
fn main() {
    if let Err(error) = run() {
        eprintln!("{}", error.to_display_string());
        process::exit(1);
    }
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates errors originating from configuration loading, normalization
/// and artifact writing.
fn run() -> Result<(), Error> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    match cli.command {
        Some(Command::Generate(args)) => run_generate(&args),
        Some(Command::Inspect(args)) => run_inspect(&args),
        None => run_generate(&cli.default)
    }
}

fn run_generate(args: &GenerateArgs) -> Result<(), Error> {
    let options = args.to_options();
    let summary = generate(&options)?;
    print!("{}", format_summary(&options, &summary));
    Ok(())
}

fn format_summary(options: &GenerateOptions, summary: &GenerationSummary) -> String {
    let mut output = format!(
        "✅ Generated {} file successfully!\n📝 Total redirects: {}\n🔗 Root redirect: {}\n",
        options.rules_file,
        summary.total_redirects,
        if summary.has_root { "Yes" } else { "No" }
    );
    if let Some(path) = summary.html_path.as_ref() {
        output.push_str(&format!("🌐 Landing page: {}\n", path.display()));
    }
    output
}

fn run_inspect(args: &InspectArgs) -> Result<(), Error> {
    let config = load_config(&args.config)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    write_config(&mut handle, &config, args.pretty)
}

fn write_config<W: io::Write>(
    writer: &mut W,
    config: &NormalizedConfig,
    pretty: bool
) -> Result<(), Error> {
    if pretty {
        serde_json::to_writer_pretty(writer, config)?;
    } else {
        serde_json::to_writer(writer, config)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor, path::Path};

    use clap::Parser;
    use redirgen::{GenerateOptions, GenerationSummary, NormalizedConfig};
    use tempfile::tempdir;

    use super::{Cli, Command, format_summary, run_generate, write_config};

    #[test]
    fn cli_accepts_zero_argument_invocation() {
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME")]).expect("failed to parse CLI");

        assert!(cli.command.is_none());
        assert!(!cli.verbose);
        assert!(!cli.default.no_html);
        let options = cli.default.to_options();
        assert!(options.emit_html);
        assert_eq!(options.rules_file, "_redirects");
    }

    #[test]
    fn generate_subcommand_accepts_overrides() {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "generate",
            "--config",
            "links.yaml",
            "--output-dir",
            "public",
            "--domain",
            "go.example",
            "--no-html",
        ])
        .expect("failed to parse CLI");

        let args = match cli.command.expect("missing generate command") {
            Command::Generate(args) => args,
            other => panic!("unexpected command variant: {other:?}")
        };
        let options = args.to_options();
        assert_eq!(options.config_path, Path::new("links.yaml"));
        assert_eq!(options.output_dir, Path::new("public"));
        assert_eq!(options.domain, "go.example");
        assert!(!options.emit_html);
    }

    #[test]
    fn summary_lists_counts_and_landing_page() {
        let options = GenerateOptions::default();
        let summary = GenerationSummary {
            total_redirects: 3,
            has_root:        true,
            rules_path:      options.rules_path(),
            html_path:       Some(options.html_path())
        };

        let output = format_summary(&options, &summary);
        assert!(output.starts_with("✅ Generated _redirects file successfully!\n"));
        assert!(output.contains("📝 Total redirects: 3\n"));
        assert!(output.contains("🔗 Root redirect: Yes\n"));
        assert!(output.contains("🌐 Landing page: "));
    }

    #[test]
    fn summary_omits_landing_page_when_skipped() {
        let options = GenerateOptions::default();
        let summary = GenerationSummary {
            total_redirects: 0,
            has_root:        false,
            rules_path:      options.rules_path(),
            html_path:       None
        };

        let output = format_summary(&options, &summary);
        assert!(output.contains("🔗 Root redirect: No\n"));
        assert!(!output.contains("Landing page"));
    }

    #[test]
    fn run_generate_reports_missing_config() {
        let temp = tempdir().expect("failed to create tempdir");
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "--config",
            temp.path().join("absent.yaml").to_str().expect("utf8"),
            "--output-dir",
            temp.path().join("out").to_str().expect("utf8"),
        ])
        .expect("failed to parse CLI");

        let error = run_generate(&cli.default).expect_err("expected missing config error");
        assert!(matches!(error, redirgen::Error::ConfigNotFound { .. }));
        assert!(error.to_display_string().ends_with("not found!"));
        assert!(!temp.path().join("out").exists());
    }

    #[test]
    fn run_generate_writes_artifacts() {
        let temp = tempdir().expect("failed to create tempdir");
        let config_path = temp.path().join("redirects.yaml");
        fs::write(&config_path, "redirects:\n  - path: test\n    url: https://test.com\n")
            .expect("failed to write config");

        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "--config",
            config_path.to_str().expect("utf8"),
            "--output-dir",
            temp.path().to_str().expect("utf8"),
        ])
        .expect("failed to parse CLI");

        run_generate(&cli.default).expect("generation failed");
        assert!(temp.path().join("_redirects").exists());
        assert!(temp.path().join("links.html").exists());
    }

    #[test]
    fn inspect_writes_compact_json() {
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME"), "inspect", "--config", "x.yaml"])
            .expect("failed to parse CLI");
        let args = match cli.command.expect("missing inspect command") {
            Command::Inspect(args) => args,
            other => panic!("unexpected command variant: {other:?}")
        };
        assert!(!args.pretty);

        let mut buffer = Cursor::new(Vec::new());
        write_config(&mut buffer, &NormalizedConfig::default(), args.pretty)
            .expect("failed to serialize configuration");

        let output = String::from_utf8(buffer.into_inner()).expect("invalid UTF-8");
        assert_eq!(output, "{\"root\":null,\"categories\":[]}");
    }
}
