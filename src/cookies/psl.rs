//! Public Suffix List (PSL) checks for `domain=` directives.
//!
//! A document may only widen a cookie to one of its own parent domains, and
//! never to a public suffix such as `com` or `co.uk`.

use psl::{List, Psl};

/// True if `domain` is itself a listed public suffix.
pub fn is_public_suffix(domain: &str) -> bool {
    let domain = domain.trim_start_matches('.').to_ascii_lowercase();
    List.suffix(domain.as_bytes())
        .is_some_and(|suffix| suffix.is_known() && suffix.as_bytes() == domain.as_bytes())
}

/// True if a document served from `host` may write a cookie with
/// `domain=<cookie_domain>`.
pub fn is_valid_cookie_domain(cookie_domain: &str, host: &str) -> bool {
    let cookie_domain = cookie_domain.trim_start_matches('.').to_ascii_lowercase();
    let host = host.to_ascii_lowercase();

    if cookie_domain.is_empty() || is_public_suffix(&cookie_domain) {
        return false;
    }

    host == cookie_domain || host.ends_with(&format!(".{}", cookie_domain))
}
