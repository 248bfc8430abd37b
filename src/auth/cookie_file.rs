//! Netscape cookie file loading.
//!
//! The group gallery only answers logged-in sessions, so the operator exports
//! the browser's cookies to a Netscape-format file (7 TAB-separated fields per
//! line) and hands it to the tool. The file is parsed into [`SessionCookie`]s
//! and loaded into the `reqwest` jar shared by every request of the run.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, UNIX_EPOCH};

use reqwest::cookie::Jar;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Prefix curl and some exporters put in front of HttpOnly cookie lines.
const HTTP_ONLY_PREFIX: &str = "#HttpOnly_";

/// Errors loading a cookie file.
#[derive(Debug, Error)]
pub enum CookieError {
    /// The file could not be opened or read.
    #[error("cannot read cookie file {path}: {source}")]
    Read {
        /// Cookie file path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file has content but not a single usable cookie.
    #[error("no usable cookies in {path} ({rejected} lines rejected)")]
    NoCookies {
        /// Cookie file path.
        path: PathBuf,
        /// Number of malformed lines.
        rejected: usize,
    },
}

/// One cookie from the file. The value is never shown by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCookie {
    /// Cookie domain, possibly with a leading dot.
    pub domain: String,
    /// Path scope.
    pub path: String,
    /// Only sent over HTTPS.
    pub secure: bool,
    /// Unix expiry time; `0` marks a session cookie.
    pub expires: u64,
    /// Cookie name.
    pub name: String,
    value: String,
}

impl SessionCookie {
    /// Cookie value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    fn set_cookie_header(&self) -> String {
        let mut header = format!(
            "{}={}; Domain={}; Path={}",
            self.name, self.value, self.domain, self.path
        );
        if self.secure {
            header.push_str("; Secure");
        }
        if self.expires > 0 {
            match UNIX_EPOCH.checked_add(Duration::from_secs(self.expires)) {
                Some(at) => {
                    header.push_str("; Expires=");
                    header.push_str(&httpdate::fmt_http_date(at));
                }
                None => warn!(name = %self.name, "expiry out of range, keeping as session cookie"),
            }
        }
        header
    }

    fn origin(&self) -> Result<url::Url, url::ParseError> {
        let scheme = if self.secure { "https" } else { "http" };
        let host = self.domain.trim_start_matches('.');
        url::Url::parse(&format!("{scheme}://{host}{}", self.path))
    }
}

impl fmt::Debug for SessionCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCookie")
            .field("domain", &self.domain)
            .field("path", &self.path)
            .field("secure", &self.secure)
            .field("expires", &self.expires)
            .field("name", &self.name)
            .field("value", &"[REDACTED]")
            .finish()
    }
}

/// A line that did not parse as a cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    /// 1-based line number.
    pub line_number: usize,
    /// What was wrong with it.
    pub reason: String,
}

/// Everything read from a cookie file.
#[derive(Debug, Default)]
pub struct CookieFile {
    /// Parsed cookies, in file order.
    pub cookies: Vec<SessionCookie>,
    /// Malformed lines that were skipped.
    pub rejected: Vec<RejectedLine>,
}

impl CookieFile {
    /// Parses Netscape cookie lines. Blank lines and `#` comments are ignored;
    /// `#HttpOnly_` lines are treated as ordinary cookies.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if reading fails part-way.
    pub fn parse(reader: impl BufRead) -> std::io::Result<Self> {
        let mut parsed = Self::default();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches(['\r', '\n']);
            let line = line.strip_prefix(HTTP_ONLY_PREFIX).unwrap_or(line);
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_line(line) {
                Ok(cookie) => parsed.cookies.push(cookie),
                Err(reason) => {
                    warn!(line = index + 1, %reason, "skipping malformed cookie line");
                    parsed.rejected.push(RejectedLine {
                        line_number: index + 1,
                        reason,
                    });
                }
            }
        }
        Ok(parsed)
    }

    /// Loads the cookies into a fresh jar for the HTTP client.
    #[must_use]
    pub fn into_jar(self) -> Arc<Jar> {
        let jar = Arc::new(Jar::default());
        for cookie in &self.cookies {
            match cookie.origin() {
                Ok(origin) => {
                    jar.add_cookie_str(&cookie.set_cookie_header(), &origin);
                    debug!(domain = %cookie.domain, name = %cookie.name, "cookie loaded");
                }
                Err(error) => {
                    warn!(domain = %cookie.domain, name = %cookie.name, %error, "cookie domain is not a valid host");
                }
            }
        }
        jar
    }
}

/// Reads `path` and returns a jar holding its cookies.
///
/// # Errors
///
/// Returns [`CookieError::Read`] if the file cannot be read, and
/// [`CookieError::NoCookies`] if it has data lines but none of them parse.
#[instrument(level = "debug", fields(path = %path.display()))]
pub fn load_cookie_file(path: &Path) -> Result<Arc<Jar>, CookieError> {
    let read_error = |source| CookieError::Read {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(read_error)?;
    let parsed = CookieFile::parse(BufReader::new(file)).map_err(read_error)?;
    if parsed.cookies.is_empty() && !parsed.rejected.is_empty() {
        return Err(CookieError::NoCookies {
            path: path.to_path_buf(),
            rejected: parsed.rejected.len(),
        });
    }
    info!(
        cookies = parsed.cookies.len(),
        rejected = parsed.rejected.len(),
        "cookie file loaded"
    );
    Ok(parsed.into_jar())
}

fn parse_line(line: &str) -> Result<SessionCookie, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [domain, _subdomains, path, secure, expires, name, value] = fields[..] else {
        return Err(format!("expected 7 TAB-separated fields, found {}", fields.len()));
    };
    if domain.is_empty() {
        return Err("empty domain".to_string());
    }
    if name.is_empty() {
        return Err("empty cookie name".to_string());
    }
    let secure = match secure {
        "TRUE" => true,
        "FALSE" => false,
        other => return Err(format!("secure flag must be TRUE or FALSE, got '{other}'")),
    };
    let expires = expires
        .parse::<u64>()
        .map_err(|_| format!("expiry must be a unix timestamp, got '{expires}'"))?;
    Ok(SessionCookie {
        domain: domain.to_string(),
        path: if path.is_empty() { "/" } else { path }.to_string(),
        secure,
        expires,
        name: name.to_string(),
        value: value.to_string(),
    })
}
