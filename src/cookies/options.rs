//! Cookie attribute formatting.
//!
//! Turns a [`CookieOptions`] bag into the attribute suffix of a
//! `document.cookie` write string:
//!
//! ```text
//! [domain=D;][path=P;][expires=<UTC>;][secure;][HttpOnly;][SameSite=S;]
//! ```

use std::fmt;
use std::str::FromStr;

use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime};

use crate::base::cookieerror::CookieError;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// `Date.prototype.toUTCString` layout.
const UTC_STRING: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// 9999-12-31T23:59:59Z, the latest instant the UTC format can express.
const MAX_EXPIRY_UNIX_SECS: i64 = 253_402_300_799;

/// Cross-site inclusion policy for a cookie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl SameSite {
    pub fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SameSite {
    type Err = CookieError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(SameSite::Strict),
            "lax" => Ok(SameSite::Lax),
            "none" => Ok(SameSite::None),
            _ => Err(CookieError::invalid_same_site(s)),
        }
    }
}

/// Cookie lifetime: a day count relative to the time of the write, or an
/// absolute instant. `Days(0)` means no lifetime at all (a session cookie)
/// and emits no `expires` directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expires {
    Days(i64),
    At(OffsetDateTime),
}

impl Expires {
    /// Resolve to an absolute instant. Out-of-range offsets saturate.
    pub fn resolve(&self, now: OffsetDateTime) -> OffsetDateTime {
        match *self {
            Expires::At(at) => at,
            Expires::Days(days) => {
                let offset = Duration::milliseconds(days.saturating_mul(MS_PER_DAY));
                match now.checked_add(offset) {
                    Some(at) => at.clamp(OffsetDateTime::UNIX_EPOCH, max_expiry()),
                    None if days < 0 => OffsetDateTime::UNIX_EPOCH,
                    None => max_expiry(),
                }
            }
        }
    }
}

impl From<i64> for Expires {
    fn from(days: i64) -> Self {
        Expires::Days(days)
    }
}

impl From<OffsetDateTime> for Expires {
    fn from(at: OffsetDateTime) -> Self {
        Expires::At(at)
    }
}

/// Attributes applied to a single cookie write.
///
/// `http_only` is accepted for interface parity only: a browser ignores
/// `HttpOnly` cookies written through `document.cookie`, so such cookies
/// must be issued by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieOptions {
    pub domain: Option<String>,
    pub path: Option<String>,
    pub expires: Option<Expires>,
    pub secure: bool,
    pub http_only: bool,
    pub same_site: Option<SameSite>,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn expires(mut self, expires: impl Into<Expires>) -> Self {
        self.expires = Some(expires.into());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    /// Append the attribute directives to `base`, resolving relative
    /// expiry against the current time.
    pub fn format(&self, base: &str) -> String {
        self.format_at(base, OffsetDateTime::now_utc())
    }

    /// Append the attribute directives to `base`, resolving relative
    /// expiry against `now`.
    pub fn format_at(&self, base: &str, now: OffsetDateTime) -> String {
        let mut out = String::with_capacity(base.len() + 64);
        out.push_str(base);

        if let Some(domain) = self.domain.as_deref().filter(|d| !d.is_empty()) {
            out.push_str("domain=");
            out.push_str(domain);
            out.push(';');
        }

        if let Some(path) = self.path.as_deref().filter(|p| !p.is_empty()) {
            out.push_str("path=");
            out.push_str(path);
            out.push(';');
        }

        if let Some(expires) = self.expires.filter(|e| *e != Expires::Days(0)) {
            out.push_str("expires=");
            out.push_str(&to_utc_string(expires.resolve(now)));
            out.push(';');
        }

        if self.secure {
            out.push_str("secure;");
        }

        if self.http_only {
            out.push_str("HttpOnly;");
        }

        if let Some(same_site) = self.same_site {
            out.push_str("SameSite=");
            out.push_str(same_site.as_str());
            out.push(';');
        }

        out
    }
}

/// Append the directives of `opts` to `base`; absent options leave `base`
/// unchanged.
pub fn format(base: &str, opts: Option<&CookieOptions>) -> String {
    match opts {
        Some(opts) => opts.format(base),
        None => base.to_string(),
    }
}

/// Render an instant the way browsers print `Date.prototype.toUTCString`,
/// e.g. `Fri, 03 Aug 2001 20:47:11 GMT`.
pub fn to_utc_string(at: OffsetDateTime) -> String {
    let at = OffsetDateTime::from_unix_timestamp(at.unix_timestamp())
        .unwrap_or_else(|_| max_expiry());
    // Infallible for a UTC instant within the four-digit year range.
    at.format(UTC_STRING).unwrap_or_default()
}

fn max_expiry() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(MAX_EXPIRY_UNIX_SECS)
        .unwrap_or(OffsetDateTime::UNIX_EPOCH)
}
