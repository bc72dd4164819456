//! `seedsaver open` and `seedsaver inspect`: read archives without a browser

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine};
use clap::Args;

use crate::archive::{extract, DecoderSession, SealedArchive, SessionState};
use crate::audit::{AuditEntry, AuditLogger};
use crate::config::{SeedsaverPaths, Settings};
use crate::crypto::SecureBytes;
use crate::error::{SeedsaverError, SeedsaverResult};
use crate::storage::{write_atomic, ArtifactStore};

use super::prompt::PasswordReader;

/// Arguments for `open`
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Archive (.html) to decrypt
    pub archive: PathBuf,

    /// Where to write the decrypted image (default: next to the archive)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read password attempts from stdin, one per line
    #[arg(long)]
    pub password_stdin: bool,
}

/// Arguments for `inspect`
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Archive (.html) to describe
    pub archive: PathBuf,
}

/// Load and parse an archive file
///
/// A broken archive is reported once; retrying with another password can't
/// fix it.
fn load_archive(path: &Path) -> SeedsaverResult<SealedArchive> {
    let document = ArtifactStore::read(path)?;
    let contents = extract(&document)?;
    SealedArchive::try_from(&contents)
}

/// Handle the open command, returning the path of the decrypted image
///
/// Returns `Ok(None)` when the user cancels with an empty password.
pub fn handle_open_command(
    paths: &SeedsaverPaths,
    settings: &Settings,
    args: OpenArgs,
) -> SeedsaverResult<Option<PathBuf>> {
    let sealed = load_archive(&args.archive)?;
    let version = sealed.envelope().version();
    let audit = settings
        .audit_enabled
        .then(|| AuditLogger::new(paths.audit_log()));
    let artifact = args.archive.display().to_string();

    let mut reader = PasswordReader::new(args.password_stdin);
    let mut session = DecoderSession::new(sealed);

    let payload = loop {
        let attempt = match reader.read("Password (empty to cancel): ")? {
            Some(attempt) if !attempt.is_empty() => attempt,
            _ => {
                println!("Cancelled.");
                return Ok(None);
            }
        };

        eprintln!("Deriving key...");
        let decoded = matches!(session.submit(attempt.as_bytes()), SessionState::Decoded(_));
        if decoded {
            if let Some(payload) = session.take_plaintext() {
                break payload;
            }
        }

        eprintln!("Wrong password or corrupted archive. Try again.");
        if let Some(logger) = &audit {
            logger.record(&AuditEntry::open_failed(artifact.clone()));
        }
    };

    // The payload is base64 text. A v1 archive opened with a wrong password
    // whose garbage happened to unpad cleanly lands here too; it is written
    // as-is rather than guessed at.
    let (image, extension) = decode_image(&payload);

    let output = args
        .output
        .unwrap_or_else(|| args.archive.with_extension(extension));
    if output.exists() {
        return Err(SeedsaverError::Validation(format!(
            "{} already exists",
            output.display()
        )));
    }
    write_atomic(&output, image.as_bytes())?;

    if let Some(logger) = &audit {
        logger.record(&AuditEntry::open(artifact, version, payload.len()));
    }
    tracing::info!(output = %output.display(), "archive decoded");
    println!("Decrypted image written to {}", output.display());
    Ok(Some(output))
}

/// Describe an archive without decrypting it
pub fn handle_inspect_command(args: InspectArgs) -> SeedsaverResult<()> {
    let sealed = load_archive(&args.archive)?;
    let envelope = sealed.envelope();

    println!("Archive: {}", args.archive.display());
    println!("  Format:          {}", envelope.version());
    println!("  Authenticated:   {}", if envelope.tag().is_some() { "yes" } else { "no" });
    println!("  Key derivation:  PBKDF2-HMAC-SHA256, {} iterations", crate::crypto::ITERATIONS);
    println!("  Cipher:          AES-256-CBC, PKCS#7 padding");
    println!("  Salt:            {} bits", sealed.salt().len() * 8);
    println!("  Ciphertext:      {} bytes", envelope.ciphertext().len());
    Ok(())
}

/// Turn the base64 payload back into image bytes and pick an extension
///
/// Anything that isn't base64 is returned unchanged as `bin`.
fn decode_image(payload: &SecureBytes) -> (SecureBytes, &'static str) {
    match STANDARD.decode(payload.as_bytes()) {
        Ok(bytes) => {
            let image = SecureBytes::from(bytes);
            let extension = image_extension(&image);
            (image, extension)
        }
        Err(_) => {
            tracing::warn!("decrypted payload is not base64 image data");
            eprintln!("Warning: decrypted data is not an image; writing it unchanged.");
            (SecureBytes::from(payload.as_bytes()), "bin")
        }
    }
}

/// File extension matching the image's magic bytes
fn image_extension(bytes: &[u8]) -> &'static str {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => "png",
        [0xFF, 0xD8, 0xFF, ..] => "jpg",
        [b'G', b'I', b'F', b'8', ..] => "gif",
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'E', b'B', b'P', ..] => "webp",
        [b'B', b'M', ..] => "bmp",
        _ => "bin",
    }
}
