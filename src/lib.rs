//! # docjar
//!
//! A typed wrapper around a browser's `document.cookie` string.
//!
//! `docjar` serializes name/value pairs (plain strings or JSON values) into
//! the single-directive write strings a document cookie store accepts, and
//! parses the concatenated read string back into entries for lookup,
//! existence checks and removal.
//!
//! ## Features
//!
//! - **Attribute formatting**: domain, path, expiry, Secure, HttpOnly, SameSite
//! - **Object values**: JSON, percent-encoded into one opaque token
//! - **Injected store**: any [`CookieStore`](cookies::store::CookieStore), with an
//!   in-memory document for hosts without one
//! - **Graceful degradation**: without a store every operation is a no-op
//!
//! ## Quick Start
//!
//! ```rust
//! use docjar::cookies::service::{open, CookiesConfig};
//! use docjar::cookies::store::MemoryDocument;
//! use serde_json::json;
//! use url::Url;
//!
//! let doc = MemoryDocument::new(Url::parse("https://example.com/").unwrap());
//! let jar = open(Some(doc), CookiesConfig::default());
//!
//! jar.put_object("prefs", &json!({"lang": "hr"}), None)?;
//! assert_eq!(jar.get_object("prefs"), Some(json!({"lang": "hr"})));
//! # Ok::<(), docjar::base::cookieerror::CookieError>(())
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error types and context helpers
//! - [`cookies`] - Formatting, codec, store and service

pub mod base;
pub mod cookies;
