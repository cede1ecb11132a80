//! `document.cookie` string codec.
//!
//! Builds single-cookie write directives and parses the concatenated read
//! string (`name1=value1; name2=value2`) the platform exposes.

use std::collections::HashSet;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::base::context::JsonResultExt;
use crate::base::cookieerror::{CookieError, CookieResult};
use crate::cookies::options::{self, CookieOptions};

/// Characters left intact by `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Expiry written by removal directives: 1970-01-01T01:00:00Z, always in the past.
pub const REMOVAL_EXPIRES: &str = "Thu, 01 Jan 1970 01:00:00 GMT";

/// One `name=value` fragment of a snapshot.
///
/// `value` is `None` when the fragment carried no `=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookieEntry<'a> {
    pub name: &'a str,
    pub value: Option<&'a str>,
}

/// Check that `name` is an RFC 6265 token.
pub fn validate_name(name: &str) -> CookieResult<()> {
    if !name.is_empty() && name.bytes().all(is_tchar) {
        Ok(())
    } else {
        Err(CookieError::invalid_name(name))
    }
}

fn is_tchar(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(
            b,
            b'!' | b'#'
                | b'$'
                | b'%'
                | b'&'
                | b'\''
                | b'*'
                | b'+'
                | b'-'
                | b'.'
                | b'^'
                | b'_'
                | b'`'
                | b'|'
                | b'~'
        )
}

/// `name=value;` followed by the option directives.
///
/// `value` is written verbatim; structured values go through
/// [`encode_object`] first.
pub fn build_set_string(
    name: &str,
    value: &str,
    opts: Option<&CookieOptions>,
) -> CookieResult<String> {
    validate_name(name)?;
    let base = format!("{}={};", name, value);
    Ok(options::format(&base, opts))
}

/// JSON-serialize then percent-encode a value into an opaque cookie token.
pub fn encode_object<T: Serialize + ?Sized>(value: &T) -> CookieResult<String> {
    let json = serde_json::to_string(value).encode_context("object value")?;
    Ok(utf8_percent_encode(&json, URI_COMPONENT).to_string())
}

/// Percent-decode then JSON-parse a stored token.
///
/// A `%` not followed by two hex digits is a decode failure, as it is for
/// `decodeURIComponent`.
pub fn decode_object<T: DeserializeOwned>(raw: &str) -> CookieResult<T> {
    check_escapes(raw)?;
    let json = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|e| CookieError::decode_failure(e.to_string()))?;
    serde_json::from_str(&json).decode_context("object value")
}

fn check_escapes(raw: &str) -> CookieResult<()> {
    let bytes = raw.as_bytes();
    for (idx, _) in raw.match_indices('%') {
        let well_formed = bytes
            .get(idx + 1..idx + 3)
            .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
        if !well_formed {
            return Err(CookieError::decode_failure(format!(
                "malformed percent escape at offset {}",
                idx
            )));
        }
    }
    Ok(())
}

/// Split a snapshot into entries. Blank fragments are skipped.
pub fn parse_all(snapshot: &str) -> impl Iterator<Item = CookieEntry<'_>> {
    snapshot
        .split(';')
        .filter(|fragment| !fragment.trim().is_empty())
        .map(|fragment| match fragment.split_once('=') {
            Some((name, value)) => CookieEntry {
                name: name.trim(),
                value: Some(value.trim()),
            },
            None => CookieEntry {
                name: fragment.trim(),
                value: None,
            },
        })
}

/// Value of the first entry named `name`.
pub fn lookup<'a>(snapshot: &'a str, name: &str) -> Option<&'a str> {
    parse_all(snapshot)
        .find(|entry| entry.name == name)
        .map(|entry| entry.value.unwrap_or(""))
}

pub fn exists(snapshot: &str, name: &str) -> bool {
    parse_all(snapshot).any(|entry| entry.name == name)
}

/// `name=;expires=<past date>`, which makes the store evict the entry.
pub fn build_remove_string(name: &str) -> CookieResult<String> {
    validate_name(name)?;
    Ok(format!("{}=;expires={}", name, REMOVAL_EXPIRES))
}

/// One removal directive per distinct name in `snapshot`.
///
/// Names come from the store itself, so they are not held to the token
/// rule applied to caller-supplied names; a server may have set
/// `user[id]`. Only empty names are skipped.
pub fn build_remove_all(snapshot: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    parse_all(snapshot)
        .filter(|entry| !entry.name.is_empty() && seen.insert(entry.name))
        .map(|entry| format!("{}=;expires={}", entry.name, REMOVAL_EXPIRES))
        .collect()
}

/// `name=;`: clears the value but keeps the entry.
pub fn build_empty_string(name: &str) -> CookieResult<String> {
    validate_name(name)?;
    Ok(format!("{}=;", name))
}
