//! Nonces Noticed command-line tool.
//!
//! # Usage
//!
//! ```bash
//! # Encrypt (key may also come from NONCES_NOTICED_KEY)
//! nonces-noticed encrypt --scheme hn4 --key <hex> --nonce <hex> --ad <hex> --plaintext <hex>
//!
//! # Decrypt
//! nonces-noticed decrypt --scheme hn4 --key <hex> --ad <hex> --ciphertext <hex>
//!
//! # Check the build against the known-answer vectors
//! nonces-noticed self-test
//! ```

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use nonces_noticed::SchemeId;
use nonces_noticed_cli::{CliError, commands};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Nonce-hiding AEAD tool
#[derive(Parser, Debug)]
#[command(name = "nonces-noticed")]
#[command(about = "Encrypt and decrypt with the HN1-HN4 nonce-hiding AEAD schemes")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt a hex plaintext, printing the hex ciphertext
    Encrypt {
        /// Scheme to use (hn1, hn2, hn3, hn4)
        #[arg(long)]
        scheme: SchemeId,

        /// Master key, hex
        #[arg(long, env = "NONCES_NOTICED_KEY", hide_env_values = true)]
        key: String,

        /// Nonce, hex
        #[arg(long)]
        nonce: String,

        /// Associated data, hex
        #[arg(long, default_value = "")]
        ad: String,

        /// Plaintext, hex
        #[arg(long)]
        plaintext: String,
    },

    /// Decrypt a hex ciphertext, printing the hex plaintext
    Decrypt {
        /// Scheme to use (hn1, hn2, hn3, hn4)
        #[arg(long)]
        scheme: SchemeId,

        /// Master key, hex
        #[arg(long, env = "NONCES_NOTICED_KEY", hide_env_values = true)]
        key: String,

        /// Associated data, hex
        #[arg(long, default_value = "")]
        ad: String,

        /// Ciphertext, hex
        #[arg(long)]
        ciphertext: String,
    },

    /// Run the known-answer and tamper checks
    SelfTest {
        /// Only test this scheme
        #[arg(long)]
        scheme: Option<SchemeId>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    if let Err(err) = run(args.command) {
        if err.is_self_test_failure() {
            tracing::error!("self-test failed: {err}");
        }
        return Err(err.into());
    }

    Ok(())
}

fn run(command: Command) -> Result<(), CliError> {
    let mut out = io::stdout().lock();

    match command {
        Command::Encrypt { scheme, key, nonce, ad, plaintext } => {
            let ciphertext = commands::encrypt(scheme, &key, &nonce, &ad, &plaintext)?;
            writeln!(out, "{ciphertext}")?;
        },
        Command::Decrypt { scheme, key, ad, ciphertext } => {
            let plaintext = commands::decrypt(scheme, &key, &ad, &ciphertext)?;
            writeln!(out, "{}", plaintext.as_str())?;
        },
        Command::SelfTest { scheme } => {
            let schemes = scheme.map_or_else(|| SchemeId::ALL.to_vec(), |id| vec![id]);
            for report in commands::self_test(&schemes)? {
                writeln!(out, "{}: ok ({} byte ciphertext)", report.scheme, report.ciphertext_len)?;
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn scheme_flag_parses_case_insensitively() {
        let args =
            Args::try_parse_from(["nonces-noticed", "self-test", "--scheme", "HN2"]).unwrap();

        assert!(matches!(args.command, Command::SelfTest { scheme: Some(SchemeId::Hn2) }));
    }

    #[test]
    fn unknown_scheme_is_rejected() {
        let result = Args::try_parse_from(["nonces-noticed", "self-test", "--scheme", "hn9"]);

        assert!(result.is_err());
    }

    #[test]
    fn associated_data_defaults_to_empty() {
        let args = Args::try_parse_from([
            "nonces-noticed",
            "decrypt",
            "--scheme",
            "hn1",
            "--key",
            "00",
            "--ciphertext",
            "00",
        ])
        .unwrap();

        assert!(matches!(args.command, Command::Decrypt { ad, .. } if ad.is_empty()));
    }
}
