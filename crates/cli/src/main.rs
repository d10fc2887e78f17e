mod cmd;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cmd::{BuildArgs, CodegenCommands};
use output::OutputFormat;

/// gdbuild - engine library build pipeline driver
#[derive(Parser)]
#[command(name = "gdbuild")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Build the engine library, dump its API and build the C++ bindings
  Build(BuildArgs),

  /// Show the detected host and the resolved project directories
  Info {
    /// Base directory containing the sibling projects (default: $GDBUILD_ROOT or the directory holding gdbuild)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
  },

  /// Generate build-time C++ sources
  Codegen {
    #[command(subcommand)]
    command: CodegenCommands,
  },
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_logging(cli.verbose);

  let result: Result<()> = match cli.command {
    Commands::Build(args) => cmd::cmd_build(args),
    Commands::Info { root, output } => cmd::cmd_info(root, output),
    Commands::Codegen { command } => cmd::cmd_codegen(command),
  };

  match result {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      output::print_error(&format!("{:#}", e));
      ExitCode::FAILURE
    }
  }
}

/// `RUST_LOG` wins; otherwise `info`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
  let default_level = if verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .without_time()
    .init();
}
