use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use keyward_crypto_core::Prf;

#[derive(Debug, Parser)]
#[command(name = "keyward")]
#[command(about = "Salted PBKDF2 password records: hash, verify, fingerprint.")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Directory holding hashing-policy.json
    #[arg(long, global = true, env = "KEYWARD_CONFIG_DIR", default_value = ".")]
    pub config_dir: PathBuf,

    /// Raise log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Hash the password read from stdin and print the record
    Hash,
    /// Check the password read from stdin against RECORD (exit 0 match, 1 mismatch, 2 error)
    Verify {
        /// Stored record: iterations:base64(salt):base64(key)
        record: String,
    },
    /// Print the content digest of TEXT, or of stdin. Not for passwords.
    Digest {
        text: Option<String>,
    },
    /// Measure this machine and suggest an iteration count
    Calibrate {
        /// Target time per derivation in milliseconds
        #[arg(long, default_value_t = 250)]
        target_ms: u64,
        #[arg(long, value_enum, default_value_t = PrfArg::HmacSha256)]
        prf: PrfArg,
    },
    /// Inspect or create the hashing policy
    Policy {
        #[command(subcommand)]
        action: PolicyAction,
    },
}

#[derive(Debug, Subcommand)]
pub enum PolicyAction {
    /// Print the effective policy as JSON
    Show,
    /// Write the default policy to the config directory
    Init {
        /// Replace an existing policy file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrfArg {
    HmacSha1,
    HmacSha256,
    HmacSha512,
}

impl From<PrfArg> for Prf {
    fn from(p: PrfArg) -> Self {
        match p {
            PrfArg::HmacSha1 => Self::HmacSha1,
            PrfArg::HmacSha256 => Self::HmacSha256,
            PrfArg::HmacSha512 => Self::HmacSha512,
        }
    }
}
