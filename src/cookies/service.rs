//! Public cookie operations over a [`CookieStore`].
//!
//! [`open`] checks once whether the host exposes a cookie surface and hands
//! back either a live [`DocumentCookies`] or a [`NullCookies`] whose every
//! operation is a no-op. Callers only see `dyn CookieJar`.

use serde_json::Value;

use crate::base::cookieerror::{CookieError, CookieResult};
use crate::cookies::codec;
use crate::cookies::options::CookieOptions;
use crate::cookies::store::CookieStore;

/// Service configuration.
#[derive(Debug, Clone, Default)]
pub struct CookiesConfig {
    /// Emit diagnostics for every operation. Never changes behavior.
    pub debug: bool,
}

impl CookiesConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Cookie operations exposed to callers.
///
/// Writes fail only on precondition violations (names that are not
/// RFC 6265 tokens, values that cannot be serialized). Nothing else is
/// surfaced as an error.
///
/// Operations take no per-call debug flag. Diagnostics are switched on for
/// the whole jar with [`CookiesConfig::debug`] when it is built by [`open`],
/// and only affect `tracing` output.
pub trait CookieJar {
    /// Set a string value.
    fn put(&self, name: &str, value: &str, opts: Option<&CookieOptions>) -> CookieResult<()>;

    /// Set a JSON value, stored percent-encoded.
    fn put_object(&self, name: &str, value: &Value, opts: Option<&CookieOptions>)
        -> CookieResult<()>;

    fn get(&self, name: &str) -> Option<String>;

    /// Get a value stored with [`put_object`](CookieJar::put_object).
    /// Undecodable content is logged and reported as absent.
    fn get_object(&self, name: &str) -> Option<Value>;

    /// The raw snapshot, `name1=value1; name2=value2`.
    fn get_all(&self) -> Option<String>;

    fn exists(&self, name: &str) -> bool;

    fn remove(&self, name: &str) -> CookieResult<()>;

    /// Remove every cookie visible in the current snapshot.
    fn remove_all(&self);

    /// Clear a cookie's value without expiring it.
    fn empty(&self, name: &str) -> CookieResult<()>;

    /// False for the no-op variant.
    fn is_available(&self) -> bool;
}

/// Choose the live or no-op implementation once, up front.
pub fn open<S>(store: Option<S>, config: CookiesConfig) -> Box<dyn CookieJar>
where
    S: CookieStore + 'static,
{
    match store.filter(|s| s.is_available()) {
        Some(store) => Box::new(DocumentCookies::new(store, config)),
        None => {
            if config.debug {
                tracing::error!(error = %CookieError::EnvironmentUnavailable, "cookie operations disabled");
            }
            Box::new(NullCookies::new(config))
        }
    }
}

/// Cookie operations backed by a live store. Every read takes a fresh
/// snapshot; every write issues exactly one directive.
pub struct DocumentCookies<S> {
    store: S,
    config: CookiesConfig,
}

impl<S: CookieStore> DocumentCookies<S> {
    pub fn new(store: S, config: CookiesConfig) -> Self {
        Self { store, config }
    }

    fn write(&self, op: &'static str, directive: &str) {
        if self.config.debug {
            tracing::debug!(op, directive = %directive, "cookie write");
        }
        self.store.write(directive);
    }
}

impl<S: CookieStore> CookieJar for DocumentCookies<S> {
    fn put(&self, name: &str, value: &str, opts: Option<&CookieOptions>) -> CookieResult<()> {
        let directive = codec::build_set_string(name, value, opts)?;
        self.write("put", &directive);
        Ok(())
    }

    fn put_object(
        &self,
        name: &str,
        value: &Value,
        opts: Option<&CookieOptions>,
    ) -> CookieResult<()> {
        let encoded = codec::encode_object(value)?;
        let directive = codec::build_set_string(name, &encoded, opts)?;
        self.write("put_object", &directive);
        Ok(())
    }

    fn get(&self, name: &str) -> Option<String> {
        let snapshot = self.store.read();
        let value = codec::lookup(&snapshot, name).map(str::to_string);
        if self.config.debug {
            tracing::debug!(name = %name, value = ?value, "cookie get");
        }
        value
    }

    fn get_object(&self, name: &str) -> Option<Value> {
        let raw = self.get(name)?;
        match codec::decode_object(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "cookie value is not a decodable object");
                None
            }
        }
    }

    fn get_all(&self) -> Option<String> {
        let snapshot = self.store.read();
        if self.config.debug {
            tracing::debug!(snapshot = %snapshot, "cookie get_all");
        }
        Some(snapshot)
    }

    fn exists(&self, name: &str) -> bool {
        let found = codec::exists(&self.store.read(), name);
        if self.config.debug {
            tracing::debug!(name = %name, found, "cookie exists");
        }
        found
    }

    fn remove(&self, name: &str) -> CookieResult<()> {
        let directive = codec::build_remove_string(name)?;
        self.write("remove", &directive);
        Ok(())
    }

    fn remove_all(&self) {
        let snapshot = self.store.read();
        for directive in codec::build_remove_all(&snapshot) {
            self.write("remove_all", &directive);
        }
    }

    fn empty(&self, name: &str) -> CookieResult<()> {
        let directive = codec::build_empty_string(name)?;
        self.write("empty", &directive);
        Ok(())
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Stand-in used when the host has no cookie surface.
pub struct NullCookies {
    config: CookiesConfig,
}

impl NullCookies {
    pub fn new(config: CookiesConfig) -> Self {
        Self { config }
    }

    fn unavailable(&self, op: &'static str) {
        if self.config.debug {
            tracing::error!(op, error = %CookieError::EnvironmentUnavailable, "cookie operation skipped");
        }
    }
}

impl CookieJar for NullCookies {
    fn put(&self, _name: &str, _value: &str, _opts: Option<&CookieOptions>) -> CookieResult<()> {
        self.unavailable("put");
        Ok(())
    }

    fn put_object(
        &self,
        _name: &str,
        _value: &Value,
        _opts: Option<&CookieOptions>,
    ) -> CookieResult<()> {
        self.unavailable("put_object");
        Ok(())
    }

    fn get(&self, _name: &str) -> Option<String> {
        self.unavailable("get");
        None
    }

    fn get_object(&self, _name: &str) -> Option<Value> {
        self.unavailable("get_object");
        None
    }

    fn get_all(&self) -> Option<String> {
        self.unavailable("get_all");
        None
    }

    fn exists(&self, _name: &str) -> bool {
        self.unavailable("exists");
        false
    }

    fn remove(&self, _name: &str) -> CookieResult<()> {
        self.unavailable("remove");
        Ok(())
    }

    fn remove_all(&self) {
        self.unavailable("remove_all");
    }

    fn empty(&self, _name: &str) -> CookieResult<()> {
        self.unavailable("empty");
        Ok(())
    }

    fn is_available(&self) -> bool {
        false
    }
}
