//! The host cookie store capability.
//!
//! [`CookieStore`] is the seam between the codec and whatever owns the
//! cookies: a browser's `document.cookie` when embedded, or
//! [`MemoryDocument`] when running without one.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use cookie::Cookie;
use time::OffsetDateTime;
use url::Url;

use crate::cookies::psl;

/// A `document.cookie`-shaped store: one read string, one directive per write.
pub trait CookieStore {
    /// Snapshot of all cookies visible to the document, `name=value; ...`.
    fn read(&self) -> String;

    /// Apply a single `name=value;attr;...` directive.
    fn write(&self, directive: &str);

    /// Whether the host context actually exposes a cookie surface.
    fn is_available(&self) -> bool {
        true
    }
}

impl<S: CookieStore + ?Sized> CookieStore for &S {
    fn read(&self) -> String {
        (**self).read()
    }

    fn write(&self, directive: &str) {
        (**self).write(directive)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

impl<S: CookieStore + ?Sized> CookieStore for Rc<S> {
    fn read(&self) -> String {
        (**self).read()
    }

    fn write(&self, directive: &str) {
        (**self).write(directive)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

impl<S: CookieStore + ?Sized> CookieStore for Box<S> {
    fn read(&self) -> String {
        (**self).read()
    }

    fn write(&self, directive: &str) {
        (**self).write(directive)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

#[derive(Debug, Clone)]
struct StoredCookie {
    name: String,
    value: String,
    domain: String,
    host_only: bool,
    path: String,
    expires: Option<OffsetDateTime>,
    secure: bool,
    /// Insertion sequence; survives overwrites like a browser's creation time.
    created: u64,
}

impl StoredCookie {
    fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires.is_some_and(|at| at <= now)
    }

    fn same_key(&self, other: &StoredCookie) -> bool {
        self.name == other.name && self.domain == other.domain && self.path == other.path
    }
}

/// In-memory stand-in for a browser document's cookie jar.
///
/// Applies the rules a browser applies to script-issued writes:
/// `HttpOnly` writes are dropped, `domain=` must be a non-public parent of
/// the document host, `Secure` needs an https document, a past expiry
/// evicts. Reads filter by the current document URL.
pub struct MemoryDocument {
    url: RefCell<Url>,
    cookies: RefCell<Vec<StoredCookie>>,
    next_seq: Cell<u64>,
}

impl MemoryDocument {
    pub fn new(url: Url) -> Self {
        Self {
            url: RefCell::new(url),
            cookies: RefCell::new(Vec::new()),
            next_seq: Cell::new(0),
        }
    }

    /// Move the document to another URL, keeping the jar.
    pub fn navigate(&self, url: Url) {
        *self.url.borrow_mut() = url;
    }

    /// Number of unexpired cookies held, visible to the current URL or not.
    pub fn len(&self) -> usize {
        let now = OffsetDateTime::now_utc();
        self.cookies
            .borrow()
            .iter()
            .filter(|c| !c.is_expired(now))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn parse_directive(&self, directive: &str, now: OffsetDateTime) -> Option<StoredCookie> {
        let parsed = match Cookie::parse(directive) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::debug!(directive = %directive, error = %e, "ignoring unparsable cookie");
                return None;
            }
        };

        if parsed.http_only().unwrap_or(false) {
            tracing::debug!(name = %parsed.name(), "ignoring HttpOnly cookie written from script");
            return None;
        }

        let url = self.url.borrow();
        let host = url.host_str().unwrap_or("").to_ascii_lowercase();
        let secure = parsed.secure().unwrap_or(false);

        if secure && url.scheme() != "https" {
            tracing::debug!(name = %parsed.name(), "ignoring Secure cookie on insecure document");
            return None;
        }

        let (domain, host_only) = match parsed.domain() {
            Some(d) => {
                let d = d.trim_start_matches('.').to_ascii_lowercase();
                if !psl::is_valid_cookie_domain(&d, &host) {
                    tracing::debug!(domain = %d, host = %host, "ignoring cookie for foreign domain");
                    return None;
                }
                (d, false)
            }
            None => (host, true),
        };

        let path = match parsed.path() {
            Some(p) if p.starts_with('/') => p.to_string(),
            _ => default_path(url.path()),
        };

        let expires = match parsed.max_age() {
            Some(age) => Some(now.checked_add(age).unwrap_or(OffsetDateTime::UNIX_EPOCH)),
            None => parsed.expires_datetime(),
        };

        Some(StoredCookie {
            name: parsed.name().to_string(),
            value: parsed.value().to_string(),
            domain,
            host_only,
            path,
            expires,
            secure,
            created: 0,
        })
    }

    fn is_visible(&self, cookie: &StoredCookie, url: &Url) -> bool {
        let host = url.host_str().unwrap_or("");
        domain_matches(&cookie.domain, host, cookie.host_only)
            && path_matches(&cookie.path, url.path())
            && (!cookie.secure || url.scheme() == "https")
    }
}

impl CookieStore for MemoryDocument {
    fn read(&self) -> String {
        let now = OffsetDateTime::now_utc();
        let url = self.url.borrow();
        let mut cookies = self.cookies.borrow_mut();
        cookies.retain(|c| !c.is_expired(now));

        let mut visible: Vec<&StoredCookie> =
            cookies.iter().filter(|c| self.is_visible(c, &url)).collect();

        // Longer paths first, then oldest first.
        visible.sort_by(|a, b| {
            b.path
                .len()
                .cmp(&a.path.len())
                .then_with(|| a.created.cmp(&b.created))
        });

        visible
            .iter()
            .map(|c| format!("{}={}", c.name, c.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, directive: &str) {
        let now = OffsetDateTime::now_utc();
        let Some(mut cookie) = self.parse_directive(directive, now) else {
            return;
        };

        let mut cookies = self.cookies.borrow_mut();
        let existing = cookies.iter().position(|c| c.same_key(&cookie));

        if cookie.is_expired(now) {
            if let Some(idx) = existing {
                cookies.remove(idx);
            }
            return;
        }

        match existing {
            Some(idx) => {
                cookie.created = cookies[idx].created;
                cookies[idx] = cookie;
            }
            None => {
                cookie.created = self.next_seq.get();
                self.next_seq.set(cookie.created + 1);
                cookies.push(cookie);
            }
        }
    }
}

/// RFC 6265 default-path: the request path up to its last `/`.
fn default_path(request_path: &str) -> String {
    if !request_path.starts_with('/') {
        return "/".to_string();
    }
    match request_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(idx) => request_path[..idx].to_string(),
    }
}

/// RFC 6265 domain-match.
fn domain_matches(cookie_domain: &str, host: &str, host_only: bool) -> bool {
    if host.eq_ignore_ascii_case(cookie_domain) {
        return true;
    }
    !host_only
        && host
            .to_ascii_lowercase()
            .ends_with(&format!(".{}", cookie_domain))
}

/// RFC 6265 path-match.
fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }
    match request_path.strip_prefix(cookie_path) {
        Some(rest) => cookie_path.ends_with('/') || rest.starts_with('/'),
        None => false,
    }
}
