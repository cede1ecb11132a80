use std::rc::Rc;

use docjar::cookies::codec;
use docjar::cookies::options::{CookieOptions, SameSite};
use docjar::cookies::service::{open, CookieJar, CookiesConfig, DocumentCookies, NullCookies};
use docjar::cookies::store::{CookieStore, MemoryDocument};
use serde_json::json;
use url::Url;

fn document(url: &str) -> Rc<MemoryDocument> {
    Rc::new(MemoryDocument::new(Url::parse(url).unwrap()))
}

#[test]
fn test_string_round_trip() {
    let doc = document("https://example.com/");
    for (name, value) in [("a", "1"), ("session_id", "abc123"), ("x-y", "hello world")] {
        doc.write(&codec::build_set_string(name, value, None).unwrap());
        assert_eq!(codec::lookup(&doc.read(), name), Some(value));
    }
}

#[test]
fn test_object_round_trip_through_store() {
    let doc = document("https://example.com/");
    let jar = open(Some(doc.clone()), CookiesConfig::default());
    let value = json!({
        "user": {"id": 7, "roles": ["admin", "dev"]},
        "note": "semi; colon = equals",
        "unicode": "čćž"
    });

    jar.put_object("state", &value, None).unwrap();
    assert_eq!(jar.get_object("state"), Some(value));

    let raw = jar.get("state").unwrap();
    assert!(!raw.contains(';'));
    assert!(!raw.contains('='));
}

#[test]
fn test_options_ordering() {
    let opts = CookieOptions::new()
        .domain("x.com")
        .secure(true)
        .same_site(SameSite::Lax);
    assert_eq!(
        codec::build_set_string("name", "value", Some(&opts)).unwrap(),
        "name=value;domain=x.com;secure;SameSite=Lax;"
    );
}

#[test]
fn test_removal_is_idempotent() {
    let doc = document("https://example.com/");
    let jar = open(Some(doc.clone()), CookiesConfig::default());

    jar.put("sid", "abc", None).unwrap();
    assert!(jar.exists("sid"));

    jar.remove("sid").unwrap();
    assert!(!jar.exists("sid"));

    jar.remove("sid").unwrap();
    assert!(!jar.exists("sid"));
    assert!(doc.is_empty());
}

#[test]
fn test_remove_all() {
    let doc = document("https://example.com/");
    let jar = open(Some(doc.clone()), CookiesConfig::default());

    jar.put("a", "1", None).unwrap();
    jar.put("b", "2", None).unwrap();
    jar.empty("c").unwrap();
    assert_eq!(jar.get_all().as_deref(), Some("a=1; b=2; c="));

    jar.remove_all();
    assert_eq!(jar.get_all().as_deref(), Some(""));
    assert!(doc.is_empty());
}

#[test]
fn test_empty_differs_from_remove() {
    let doc = document("https://example.com/");
    let jar = open(Some(doc.clone()), CookiesConfig::default());

    jar.put("a", "1", None).unwrap();
    jar.put("b", "2", None).unwrap();
    jar.empty("a").unwrap();
    jar.remove("b").unwrap();

    assert!(jar.exists("a"));
    assert!(!jar.exists("b"));
    assert_eq!(jar.get_all().as_deref(), Some("a="));
}

#[test]
fn test_http_only_has_no_effect_from_script() {
    let doc = document("https://example.com/");
    let jar = open(Some(doc.clone()), CookiesConfig::default());

    let opts = CookieOptions::new().http_only(true);
    jar.put("token", "secret", Some(&opts)).unwrap();
    assert!(!jar.exists("token"));
}

#[test]
fn test_past_expiry_option_removes() {
    let doc = document("https://example.com/");
    let jar = open(Some(doc.clone()), CookiesConfig::default());

    jar.put("a", "1", Some(&CookieOptions::new().expires(7i64)))
        .unwrap();
    assert!(jar.exists("a"));

    jar.put("a", "1", Some(&CookieOptions::new().expires(-1i64)))
        .unwrap();
    assert!(!jar.exists("a"));
}

#[test]
fn test_zero_day_expiry_keeps_session_cookie() {
    let doc = document("https://example.com/");
    let jar = open(Some(doc.clone()), CookiesConfig::default());

    jar.put("a", "1", Some(&CookieOptions::new().expires(0i64)))
        .unwrap();
    assert_eq!(jar.get("a").as_deref(), Some("1"));
}

#[test]
fn test_remove_all_clears_server_set_names() {
    let doc = document("https://example.com/");
    let jar = open(Some(doc.clone()), CookiesConfig::default());

    // Written as a server would, bypassing the name check on `put`.
    doc.write("user[id]=7;");
    jar.put("a", "1", None).unwrap();
    assert_eq!(jar.get_all().as_deref(), Some("user[id]=7; a=1"));

    jar.remove_all();
    assert_eq!(jar.get_all().as_deref(), Some(""));
    assert!(doc.is_empty());
}

#[test]
fn test_every_read_is_a_fresh_snapshot() {
    let doc = document("https://example.com/");
    let jar = DocumentCookies::new(doc.clone(), CookiesConfig::default());

    assert_eq!(jar.get("a"), None);
    // Another writer sharing the document.
    doc.write("a=external;");
    assert_eq!(jar.get("a").as_deref(), Some("external"));
}

#[test]
fn test_null_jar_is_inert() {
    let jar = NullCookies::new(CookiesConfig::new().debug(true));

    assert_eq!(jar.put("a", "1", None), Ok(()));
    assert_eq!(jar.put_object("o", &json!({"k": 1}), None), Ok(()));
    assert_eq!(jar.get("a"), None);
    assert_eq!(jar.get_object("o"), None);
    assert_eq!(jar.get_all(), None);
    assert!(!jar.exists("a"));
    assert_eq!(jar.remove("a"), Ok(()));
    jar.remove_all();
    assert_eq!(jar.empty("a"), Ok(()));
    assert!(!jar.is_available());
}

struct DetachedDocument {
    inner: MemoryDocument,
}

impl CookieStore for DetachedDocument {
    fn read(&self) -> String {
        self.inner.read()
    }

    fn write(&self, directive: &str) {
        self.inner.write(directive)
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[test]
fn test_unavailable_store_is_never_touched() {
    let detached = Rc::new(DetachedDocument {
        inner: MemoryDocument::new(Url::parse("https://example.com/").unwrap()),
    });
    let jar = open(Some(detached.clone()), CookiesConfig::default());

    assert!(!jar.is_available());
    jar.put("a", "1", None).unwrap();
    jar.empty("b").unwrap();
    assert_eq!(jar.get("a"), None);
    assert!(detached.inner.is_empty());
}
