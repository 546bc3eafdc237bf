//! Listener address parsing.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

const UNIX_SCHEME: &str = "unix://";
const TCP_SCHEME: &str = "tcp://";

/// Errors raised while parsing a bind address.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    /// The address is blank.
    #[error("bind address must not be empty")]
    Empty,
    /// `unix://` with no path.
    #[error("unix bind address must name a socket path")]
    EmptySocketPath,
    /// A scheme other than `unix://` or `tcp://`.
    #[error("unsupported bind scheme in '{value}'; expected unix:// or tcp://")]
    UnsupportedScheme { value: String },
    /// A TCP address without a usable `host:port` pair.
    #[error("invalid TCP bind address '{value}'; expected host:port")]
    InvalidTcp { value: String },
}

/// Where the HTTP server listens.
///
/// Parsed from `unix://<path>`, `tcp://<host>:<port>`, or a bare
/// `<host>:<port>`.
///
/// # Examples
/// ```
/// use signin::launch::BindTarget;
///
/// let target: BindTarget = "unix:///var/run/signin/signin.sock".parse().unwrap();
/// assert!(matches!(target, BindTarget::Unix(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindTarget {
    /// Unix domain socket at this path.
    Unix(PathBuf),
    /// TCP listener; `host` may be a name, IPv4, or bracketed IPv6 literal.
    Tcp { host: String, port: u16 },
}

impl FromStr for BindTarget {
    type Err = BindError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(BindError::Empty);
        }
        if let Some(path) = value.strip_prefix(UNIX_SCHEME) {
            if path.is_empty() {
                return Err(BindError::EmptySocketPath);
            }
            return Ok(Self::Unix(PathBuf::from(path)));
        }
        let address = value.strip_prefix(TCP_SCHEME).unwrap_or(value);
        if address.contains("://") {
            return Err(BindError::UnsupportedScheme {
                value: value.to_owned(),
            });
        }
        parse_host_port(address).ok_or_else(|| BindError::InvalidTcp {
            value: value.to_owned(),
        })
    }
}

fn parse_host_port(address: &str) -> Option<BindTarget> {
    let (host, port) = address.rsplit_once(':')?;
    if host.is_empty() || (host.contains(':') && !(host.starts_with('[') && host.ends_with(']'))) {
        return None;
    }
    let port = port.parse::<u16>().ok()?;
    Some(BindTarget::Tcp {
        host: host.to_owned(),
        port,
    })
}

impl fmt::Display for BindTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unix(path) => write!(f, "{UNIX_SCHEME}{}", path.display()),
            Self::Tcp { host, port } => write!(f, "{TCP_SCHEME}{host}:{port}"),
        }
    }
}
