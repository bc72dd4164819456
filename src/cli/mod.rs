//! CLI command handlers
//!
//! Stands in for the capture UI: reads the image, collects and validates the
//! password, and hands both to the archive codec.

pub mod open;
pub mod prompt;
pub mod seal;

pub use open::{handle_inspect_command, handle_open_command, InspectArgs, OpenArgs};
pub use seal::{handle_seal_command, SealArgs};

use std::path::PathBuf;

use crate::archive::DEFAULT_TEMPLATE;
use crate::config::{SeedsaverPaths, Settings};
use crate::error::SeedsaverResult;
use crate::storage::write_atomic;

/// Write the built-in viewer template to `output`, or print it
pub fn handle_template_command(output: Option<PathBuf>) -> SeedsaverResult<()> {
    match output {
        Some(path) => {
            write_atomic(&path, DEFAULT_TEMPLATE.as_bytes())?;
            println!("Template written to {}", path.display());
        }
        None => print!("{}", DEFAULT_TEMPLATE),
    }
    Ok(())
}

/// Print paths and settings
pub fn handle_config_command(paths: &SeedsaverPaths, settings: &Settings) -> SeedsaverResult<()> {
    println!("SeedSaver Configuration");
    println!("=======================");
    println!("Config directory: {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Audit log:        {}", paths.audit_log().display());
    println!("Output directory: {}", settings.output_dir(paths).display());
    println!();
    println!("Settings:");
    println!("  Envelope format:     {}", settings.format_version);
    println!("  Minimum password:    {} characters", settings.min_password_len);
    println!("  Audit log enabled:   {}", settings.audit_enabled);
    match &settings.template_path {
        Some(path) => println!("  Template:            {}", path.display()),
        None => println!("  Template:            built-in"),
    }
    Ok(())
}
