//! Document cookie string handling.
//!
//! This module provides everything between a caller and a browser-style
//! `document.cookie` surface:
//!
//! - **Formatting**: attribute directives from [`CookieOptions`](options::CookieOptions)
//! - **Codec**: write directives and snapshot parsing ([`codec`])
//! - **Store**: the injected [`CookieStore`](store::CookieStore) capability and an
//!   in-memory document ([`MemoryDocument`](store::MemoryDocument))
//! - **Service**: the public [`CookieJar`](service::CookieJar) operations
//!
//! # Architecture
//!
//! | Piece | Type | Responsibility |
//! |-------|------|----------------|
//! | Options formatter | [`options::format`] | `domain=..;path=..;expires=..;` suffix |
//! | Cookie codec | [`codec`] | `name=value;` directives, `a=1; b=2` parsing |
//! | Store | [`store::CookieStore`] | One read string, one directive per write |
//! | Service | [`service::open`] | Live or no-op jar, chosen once |
//!
//! # Example
//!
//! ```rust
//! use docjar::cookies::options::{CookieOptions, Expires, SameSite};
//! use docjar::cookies::service::{open, CookiesConfig};
//! use docjar::cookies::store::MemoryDocument;
//! use url::Url;
//!
//! let doc = MemoryDocument::new(Url::parse("https://example.com/").unwrap());
//! let jar = open(Some(doc), CookiesConfig::default());
//!
//! let opts = CookieOptions::new().path("/").expires(Expires::Days(7)).same_site(SameSite::Lax);
//! jar.put("theme", "dark", Some(&opts))?;
//! assert_eq!(jar.get("theme").as_deref(), Some("dark"));
//!
//! jar.remove("theme")?;
//! assert!(!jar.exists("theme"));
//! # Ok::<(), docjar::base::cookieerror::CookieError>(())
//! ```
//!
//! # Limitations
//!
//! - `HttpOnly` cannot be set from script; browsers drop such writes.
//! - No read-modify-write atomicity: other code sharing the document can
//!   write between a [`get`](service::CookieJar::get) and a
//!   [`put`](service::CookieJar::put).

pub mod codec;
pub mod options;
pub mod psl;
pub mod service;
pub mod store;

pub use codec::CookieEntry;
pub use options::{CookieOptions, Expires, SameSite};
pub use service::{open, CookieJar, CookiesConfig, DocumentCookies, NullCookies};
pub use store::{CookieStore, MemoryDocument};
