//! `seedsaver seal`: encrypt an image into a self-contained HTML archive

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::Utc;
use clap::Args;

use crate::archive::{self, Encoder, FormatVersion};
use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{SeedsaverPaths, Settings};
use crate::crypto::SecureBytes;
use crate::error::{SeedsaverError, SeedsaverResult};
use crate::storage::{write_atomic, ArtifactStore};

use super::prompt::{prompt_new_password, PasswordReader};

/// Arguments for `seal`
#[derive(Args, Debug)]
pub struct SealArgs {
    /// Image file to encrypt
    pub image: PathBuf,

    /// Write the archive to this exact path instead of the output directory
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Add an HMAC tag so a wrong password can never yield a garbled image
    #[arg(long)]
    pub authenticated: bool,

    /// Read password and confirmation as two lines from stdin
    #[arg(long)]
    pub password_stdin: bool,
}

/// Handle the seal command, returning the artifact path
pub fn handle_seal_command(
    paths: &SeedsaverPaths,
    settings: &Settings,
    args: SealArgs,
) -> SeedsaverResult<PathBuf> {
    let payload = read_image_payload(&args.image)?;
    let template = settings.load_template()?;
    archive::template::validate(&template)?;

    if let Some(output) = &args.output {
        if output.exists() {
            return Err(SeedsaverError::Validation(format!(
                "{} already exists",
                output.display()
            )));
        }
    }

    let mut reader = PasswordReader::new(args.password_stdin);
    let password = prompt_new_password(&mut reader, settings.min_password_len)?;

    let version = if args.authenticated {
        FormatVersion::V2
    } else {
        settings.format_version
    };

    eprintln!("Please wait, encrypting...");
    let mut encoder = Encoder::new().format(version);
    let document = archive::seal_with(&mut encoder, &template, payload.as_bytes(), password.as_bytes())
        .map_err(|e| {
            tracing::error!(error = %e, "archive creation failed");
            SeedsaverError::Encryption("Failed to encrypt image".into())
        })?;
    drop(password);

    let path = match &args.output {
        Some(output) => {
            write_atomic(output, document.as_bytes())?;
            output.clone()
        }
        None => ArtifactStore::new(settings.output_dir(paths)).write(&document, Utc::now())?,
    };

    tracing::info!(artifact = %path.display(), version = %version, "archive written");
    if settings.audit_enabled {
        AuditLogger::new(paths.audit_log()).record(&AuditEntry::seal(
            path.display().to_string(),
            version,
            payload.len(),
        ));
    }

    println!("Encrypted archive written to {}", path.display());
    println!("Open it in any browser and enter the password to view the image.");
    Ok(path)
}

/// Read the image and encode it as base64 text, the payload format the
/// viewer expects
fn read_image_payload(path: &Path) -> SeedsaverResult<SecureBytes> {
    let image = SecureBytes::from(
        std::fs::read(path)
            .map_err(|e| SeedsaverError::Io(format!("Failed to read {}: {}", path.display(), e)))?,
    );
    if image.is_empty() {
        return Err(SeedsaverError::Validation(format!(
            "{} is empty",
            path.display()
        )));
    }
    Ok(SecureBytes::from(STANDARD.encode(image.as_bytes()).into_bytes()))
}
