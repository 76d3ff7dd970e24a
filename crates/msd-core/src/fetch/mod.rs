//! Single-file HTTP(S) fetch.
//!
//! A [`Fetcher`] downloads one URL to one local path. The manifest runner only
//! sees the trait, so tests can swap in a recording fetcher; production uses
//! [`CurlFetcher`].

mod single;

pub use single::{CurlFetcher, FetchOptions};

use std::io;
use std::path::{Path, PathBuf};

/// Failure of a single fetch. Nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("GET {url} failed: {source}")]
    Curl {
        url: String,
        #[source]
        source: curl::Error,
    },
    #[error("GET {url} returned HTTP {code}")]
    Http { url: String, code: u32 },
    #[error("writing {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Downloads `url` into `dest`, returning the number of bytes written.
///
/// `dest`'s parent directory must exist. On error `dest` is left untouched.
pub trait Fetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError>;
}
