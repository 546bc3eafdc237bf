//! Print an Argon2 PHC digest for a user seed file.
//!
//! ```text
//! echo -n 'correct horse' | hash-password
//! hash-password --email ada@example.com --id 1 < secret.txt
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Read};

use clap::Parser;
use serde_json::json;
use signin::domain::{EmailAddress, PasswordDigest, UserId};
use zeroize::Zeroizing;

/// `hash-password` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hash-password",
    about = "Hash a password read from stdin into an Argon2 PHC string",
    version
)]
struct CliArgs {
    /// Emit a complete seed record with this email instead of the bare digest.
    #[arg(long, value_name = "email", requires = "id")]
    email: Option<String>,
    /// Principal id for the seed record.
    #[arg(long, value_name = "id", requires = "email")]
    id: Option<i64>,
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;

    let mut secret = Zeroizing::new(String::new());
    io::stdin().read_to_string(&mut secret)?;
    let secret = secret.trim_end_matches(['\r', '\n']);
    if secret.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "password on stdin must not be empty",
        ));
    }

    let digest = PasswordDigest::hash(secret).map_err(io::Error::other)?;
    match (args.email, args.id) {
        (Some(email), Some(id)) => {
            let email = EmailAddress::new(email).map_err(invalid_input)?;
            let id = UserId::new(id).map_err(invalid_input)?;
            let record = json!({
                "id": id.get(),
                "email": email.as_ref(),
                "passwordDigest": digest.as_phc(),
            });
            println!("{record}");
        }
        _ => println!("{}", digest.as_phc()),
    }
    Ok(())
}

fn invalid_input(error: impl std::error::Error + Send + Sync + 'static) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, error)
}
