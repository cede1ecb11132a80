//! Base types and error handling.
//!
//! Provides foundational types shared by the cookie modules:
//! - [`CookieError`](cookieerror::CookieError): error taxonomy for codec and service
//! - [`context`]: extension traits attaching cookie context to serde errors

pub mod context;
pub mod cookieerror;
