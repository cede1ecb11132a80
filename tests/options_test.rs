use cookie::Cookie;
use docjar::cookies::options::{self, to_utc_string, CookieOptions, Expires, SameSite};
use time::{Duration, OffsetDateTime, UtcOffset};

/// Pull the `expires=` attribute back out with the `cookie` crate parser.
fn parsed_expiry(directive: &str) -> OffsetDateTime {
    Cookie::parse(directive.to_string())
        .unwrap()
        .expires_datetime()
        .expect("directive should carry an expiry")
}

#[test]
fn test_one_day_expiry() {
    let before = OffsetDateTime::now_utc();
    let directive = options::format("a=1;", Some(&CookieOptions::new().expires(Expires::Days(1))));
    let expected = before + Duration::milliseconds(86_400_000);

    let expiry = parsed_expiry(&directive);
    assert!((expiry - expected).abs() <= Duration::seconds(1));
}

#[test]
fn test_absolute_expiry_rendered_verbatim() {
    let at = OffsetDateTime::from_unix_timestamp(996_871_631).unwrap();
    let directive = CookieOptions::new().expires(at).format("a=1;");
    assert_eq!(directive, "a=1;expires=Fri, 03 Aug 2001 20:47:11 GMT;");
    assert_eq!(parsed_expiry(&directive), at);
}

#[test]
fn test_format_at_uses_given_clock() {
    let now = OffsetDateTime::from_unix_timestamp(0).unwrap();
    let directive = CookieOptions::new()
        .expires(Expires::Days(2))
        .format_at("a=1;", now);
    assert_eq!(directive, "a=1;expires=Sat, 03 Jan 1970 00:00:00 GMT;");
}

#[test]
fn test_same_site_variants() {
    for (policy, text) in [
        (SameSite::Strict, "SameSite=Strict;"),
        (SameSite::Lax, "SameSite=Lax;"),
        (SameSite::None, "SameSite=None;"),
    ] {
        let directive = CookieOptions::new().same_site(policy).format("");
        assert_eq!(directive, text);
    }
}

#[test]
fn test_flags_have_no_value() {
    let directive = CookieOptions::new()
        .secure(true)
        .http_only(true)
        .format("a=1;");
    assert_eq!(directive, "a=1;secure;HttpOnly;");
}

#[test]
fn test_unset_fields_emit_nothing() {
    let directive = CookieOptions::default().format("a=1;");
    assert_eq!(directive, "a=1;");
}

#[test]
fn test_utc_string_is_cookie_parsable() {
    let at = OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap();
    let rendered = to_utc_string(at);
    assert_eq!(rendered, "Tue, 14 Nov 2023 22:13:20 GMT");
    assert_eq!(parsed_expiry(&format!("a=1; expires={}", rendered)), at);
}

#[test]
fn test_absolute_expiry_in_local_offset_renders_utc() {
    // 2001-08-03T22:47:11+02:00 == 20:47:11Z
    let at = OffsetDateTime::from_unix_timestamp(996_871_631)
        .unwrap()
        .to_offset(UtcOffset::from_hms(2, 0, 0).unwrap());
    let directive = CookieOptions::new().expires(at).format("a=1;");
    assert_eq!(directive, "a=1;expires=Fri, 03 Aug 2001 20:47:11 GMT;");
}

#[test]
fn test_zero_day_expiry_emits_nothing() {
    let directive = options::format(
        "a=1;",
        Some(&CookieOptions::new().expires(Expires::Days(0)).path("/")),
    );
    assert_eq!(directive, "a=1;path=/;");
}
