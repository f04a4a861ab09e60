//! `lakehouse-ctl`: write the Spark session scaffolding a JupyterHub notebook
//! user imports (`spark_init.py`) and reads (`README.md`).
//!
//! Running with no subcommand is the same as `lakehouse-ctl generate`.

mod cli_config;
mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "lakehouse-ctl",
    version,
    about = "Generate Spark session scaffolding for JupyterHub notebooks",
    styles = output::clap_styles()
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve the driver host and write spark_init.py and README.md
    Generate(GenerateArgs),

    /// Print one artifact to stdout without writing anything
    Render {
        #[arg(value_enum)]
        artifact: RenderTarget,
    },

    /// Show the settings the generated session would apply in this environment
    Settings(SettingsArgs),
}

#[derive(Debug, Default, Args)]
pub(crate) struct GenerateArgs {
    /// Directory to write into (must already exist)
    #[arg(short, long, env = "LAKEHOUSE_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Also print shell `export` lines for the launch environment
    #[arg(long)]
    pub print_env: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum RenderTarget {
    /// The spark_init.py module
    Init,
    /// The usage README
    Readme,
}

#[derive(Debug, Args)]
pub(crate) struct SettingsArgs {
    /// Application name passed to the session factory
    #[arg(long)]
    pub app_name: Option<String>,

    /// Evaluate with enable_hive=False
    #[arg(long)]
    pub no_hive: bool,

    /// Evaluate with enable_delta=False
    #[arg(long)]
    pub no_delta: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("lakehouse_ctl=warn,lakehouse_sdk=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Current-thread runtime: the launch variables are exported with
// `std::env::set_var`, which must not race other threads.
#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let config = cli_config::load_cli_config();

    let result = match cli
        .command
        .unwrap_or_else(|| Commands::Generate(GenerateArgs::default()))
    {
        Commands::Generate(args) => commands::handle_generate_command(args, &config).await,
        Commands::Render { artifact } => commands::handle_render_command(artifact, &config),
        Commands::Settings(args) => commands::handle_settings_command(args, &config).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            output::error(&e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["lakehouse-ctl"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_generate_flags() {
        let cli =
            Cli::try_parse_from(["lakehouse-ctl", "generate", "-o", "/tmp/out", "--print-env"])
                .unwrap();
        match cli.command {
            Some(Commands::Generate(args)) => {
                assert_eq!(args.output_dir, Some(PathBuf::from("/tmp/out")));
                assert!(args.print_env);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_render_rejects_unknown_artifact() {
        assert!(Cli::try_parse_from(["lakehouse-ctl", "render", "notebook"]).is_err());
    }
}
