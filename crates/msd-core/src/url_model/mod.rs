//! URL and local path derivation.
//!
//! The preview server is laid out as one subfolder per uppercase first
//! letter (`<base>/A/` … `<base>/Z/`), and manifest paths are relative to the
//! same base. These helpers build remote URLs and local targets from those
//! pieces without touching the network.

mod letters;
mod path;

pub use letters::{subfolder_letter, subfolder_letters, subfolder_url};
pub use path::local_target;

use url::Url;

/// Schemes the mirror tool and the fetcher are expected to reach.
const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

#[derive(Debug, thiserror::Error)]
pub enum BaseUrlError {
    #[error("invalid base URL {url:?}: {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported scheme {scheme:?} in base URL (expected http, https or ftp)")]
    Scheme { scheme: String },
}

/// Checks that `base` parses as an absolute URL with a supported scheme.
pub fn validate_base_url(base: &str) -> Result<Url, BaseUrlError> {
    let parsed = Url::parse(base).map_err(|source| BaseUrlError::Parse {
        url: base.to_string(),
        source,
    })?;
    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(BaseUrlError::Scheme {
            scheme: parsed.scheme().to_string(),
        });
    }
    Ok(parsed)
}

/// Appends `suffix` to `base` with exactly one `/` between them.
///
/// `join_url("http://h/msd", "A/")` and `join_url("http://h/msd/", "A/")` both
/// give `"http://h/msd/A/"`.
pub fn join_url(base: &str, suffix: &str) -> String {
    let suffix = suffix.trim_start_matches('/');
    if base.ends_with('/') {
        format!("{}{}", base, suffix)
    } else {
        format!("{}/{}", base, suffix)
    }
}
