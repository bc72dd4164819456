use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use seedsaver::cli::{
    handle_config_command, handle_inspect_command, handle_open_command, handle_seal_command,
    handle_template_command, InspectArgs, OpenArgs, SealArgs,
};
use seedsaver::config::{SeedsaverPaths, Settings};

#[derive(Parser)]
#[command(
    name = "seedsaver",
    author = "SeedSaver Contributors",
    version,
    about = "Seal an image into a password-protected, self-contained HTML file",
    long_about = "SeedSaver encrypts an image with a password and wraps it in a single \
                  HTML file. Open the file in any browser, offline, and enter the \
                  password to view the image again."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt an image into an archive
    Seal(SealArgs),

    /// Decrypt an archive back into an image
    Open(OpenArgs),

    /// Show the format and parameters of an archive
    Inspect(InspectArgs),

    /// Write out the built-in viewer template
    Template {
        /// Destination file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show configuration
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "seedsaver=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Initialize paths and settings
    let paths = SeedsaverPaths::new()?;
    paths.ensure_directories()?;
    let settings = Settings::load_or_create(&paths)?;
    if !paths.is_initialized() {
        // First run: write the defaults so they can be edited
        settings.save(&paths)?;
    }

    match cli.command {
        Some(Commands::Seal(args)) => {
            handle_seal_command(&paths, &settings, args)?;
        }
        Some(Commands::Open(args)) => {
            handle_open_command(&paths, &settings, args)?;
        }
        Some(Commands::Inspect(args)) => handle_inspect_command(args)?,
        Some(Commands::Template { output }) => handle_template_command(output)?,
        Some(Commands::Config) => handle_config_command(&paths, &settings)?,
        None => {
            println!("SeedSaver - password-protected image archives");
            println!();
            println!("Run 'seedsaver --help' for usage information.");
            println!("Run 'seedsaver seal <IMAGE>' to create an archive.");
        }
    }

    Ok(())
}
