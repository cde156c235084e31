use std::io::{BufRead, Read, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use keyward_auth::{Authenticator, HashingPolicy, Verification};
use keyward_crypto_core::{calibrate, digest, ContentDigest, Prf};
use zeroize::Zeroizing;

/// Exit code for a match, or any command that completed.
pub const EXIT_SUCCESS: u8 = 0;

/// Exit code for a wrong password.
pub const EXIT_MISMATCH: u8 = 1;

/// Exit code for a malformed record or any other failure.
pub const EXIT_ERROR: u8 = 2;

/// Read one password line, stripping the trailing `\n` or `\r\n`.
pub fn read_password(mut input: impl BufRead) -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    let read = input.read_line(&mut line).context("failed to read password from stdin")?;
    if read == 0 {
        bail!("no password on stdin");
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

fn authenticator(config_dir: &Path) -> Result<Authenticator> {
    let policy = HashingPolicy::load(config_dir)
        .with_context(|| format!("loading policy from {}", config_dir.display()))?;
    Ok(Authenticator::new(&policy)?)
}

pub fn cmd_hash(config_dir: &Path, input: impl BufRead, out: &mut impl Write) -> Result<u8> {
    let auth = authenticator(config_dir)?;
    let password = read_password(input)?;
    let record = auth.enroll(&password)?;
    writeln!(out, "{record}")?;
    Ok(EXIT_SUCCESS)
}

pub fn cmd_verify(
    config_dir: &Path,
    record: &str,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<u8> {
    let auth = authenticator(config_dir)?;
    let password = read_password(input)?;
    match auth.verify(&password, record) {
        Ok(Verification::Match) => Ok(EXIT_SUCCESS),
        Ok(Verification::MatchRehashed { record }) => {
            // The caller stores this in place of the verified record.
            writeln!(out, "{record}")?;
            Ok(EXIT_SUCCESS)
        }
        Ok(Verification::Mismatch) => {
            eprintln!("password does not match");
            Ok(EXIT_MISMATCH)
        }
        Err(e) if e.is_malformed_record() => {
            eprintln!("error: {e}");
            Ok(EXIT_ERROR)
        }
        Err(e) => Err(e.into()),
    }
}

/// Digest `text`, or the raw bytes of `input` when no text is given.
pub fn cmd_digest(text: Option<&str>, mut input: impl Read, out: &mut impl Write) -> Result<u8> {
    let hex = if let Some(text) = text {
        digest(text)
    } else {
        let mut buf = Vec::new();
        input.read_to_end(&mut buf).context("failed to read stdin")?;
        ContentDigest::of_bytes(&buf).to_hex()
    };
    writeln!(out, "{hex}")?;
    Ok(EXIT_SUCCESS)
}

pub fn cmd_calibrate(prf: Prf, target_ms: u64, out: &mut impl Write) -> Result<u8> {
    let iterations = calibrate(prf, Duration::from_millis(target_ms))?;
    tracing::info!(%prf, target_ms, iterations, "calibration finished");
    writeln!(out, "{iterations}")?;
    Ok(EXIT_SUCCESS)
}

pub fn cmd_policy_show(config_dir: &Path, out: &mut impl Write) -> Result<u8> {
    let policy = HashingPolicy::load(config_dir)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&policy)?)?;
    Ok(EXIT_SUCCESS)
}

pub fn cmd_policy_init(config_dir: &Path, force: bool) -> Result<u8> {
    let path = config_dir.join(keyward_auth::policy::POLICY_FILE);
    if path.exists() && !force {
        bail!("{} already exists (use --force to replace it)", path.display());
    }
    HashingPolicy::default()
        .save(config_dir)
        .with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), "default hashing policy written");
    Ok(EXIT_SUCCESS)
}
