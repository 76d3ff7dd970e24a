//! Single-stream HTTP GET via libcurl.

use std::io;
use std::path::Path;
use std::time::Duration;

use super::{FetchError, Fetcher};
use crate::storage::{temp_path, PartFile};

const MAX_REDIRECTIONS: u32 = 10;

/// Transfer settings. The default has no timeouts at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub connect_timeout: Option<Duration>,
    pub follow_redirects: bool,
    pub user_agent: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            connect_timeout: None,
            follow_redirects: true,
            user_agent: None,
        }
    }
}

/// Blocking fetcher: one `curl::easy::Easy` per call, body streamed to `<dest>.part`.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    opts: FetchOptions,
}

impl CurlFetcher {
    pub fn new(opts: FetchOptions) -> Self {
        Self { opts }
    }

    fn configure(&self, url: &str) -> Result<curl::easy::Easy, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(self.opts.follow_redirects)?;
        if self.opts.follow_redirects {
            easy.max_redirections(MAX_REDIRECTIONS)?;
        }
        if let Some(timeout) = self.opts.connect_timeout {
            easy.connect_timeout(timeout)?;
        }
        if let Some(ref agent) = self.opts.user_agent {
            easy.useragent(agent)?;
        }
        Ok(easy)
    }

    fn transfer(&self, url: &str, part: &mut PartFile) -> Result<(), FetchError> {
        let curl_err = |source| FetchError::Curl {
            url: url.to_string(),
            source,
        };
        let mut easy = self.configure(url).map_err(curl_err)?;

        let mut write_err: Option<io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| match part.write(data) {
                    Ok(()) => Ok(data.len()),
                    Err(e) => {
                        write_err = Some(e);
                        Ok(0) // abort transfer
                    }
                })
                .map_err(curl_err)?;
            transfer.perform()
        };

        if let Some(source) = write_err {
            return Err(FetchError::Storage {
                path: part.temp_path().to_path_buf(),
                source,
            });
        }
        performed.map_err(curl_err)?;

        let code = easy.response_code().map_err(curl_err)?;
        if is_http(url) && !(200..300).contains(&code) {
            return Err(FetchError::Http {
                url: url.to_string(),
                code,
            });
        }
        Ok(())
    }
}

impl Fetcher for CurlFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        let mut part = PartFile::create(dest).map_err(|source| FetchError::Storage {
            path: temp_path(dest),
            source,
        })?;

        match self.transfer(url, &mut part) {
            Ok(()) => {
                let temp = part.temp_path().to_path_buf();
                part.finalize()
                    .map_err(|source| FetchError::Storage { path: temp, source })
            }
            Err(e) => {
                part.discard();
                Err(e)
            }
        }
    }
}

fn is_http(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
