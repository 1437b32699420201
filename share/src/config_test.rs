use std::collections::HashMap;

use super::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    assert_eq!(ShareConfig::from_lookup(lookup(&[])), ShareConfig::default());
}

#[test]
fn overrides_are_parsed() {
    let cfg = ShareConfig::from_lookup(lookup(&[
        ("SHARE_BASE_URL", "https://shapes.test/"),
        ("SHARE_REQUEST_TIMEOUT_SECS", "5"),
        ("SHARE_CONNECT_TIMEOUT_SECS", " 2 "),
    ]));
    assert_eq!(
        cfg,
        ShareConfig { base_url: "https://shapes.test".into(), request_timeout_secs: 5, connect_timeout_secs: 2 }
    );
}

#[test]
fn bad_numbers_fall_back() {
    let cfg = ShareConfig::from_lookup(lookup(&[
        ("SHARE_REQUEST_TIMEOUT_SECS", "soon"),
        ("SHARE_CONNECT_TIMEOUT_SECS", "-1"),
    ]));
    assert_eq!(cfg.request_timeout_secs, DEFAULT_SHARE_REQUEST_TIMEOUT_SECS);
    assert_eq!(cfg.connect_timeout_secs, DEFAULT_SHARE_CONNECT_TIMEOUT_SECS);
}

#[test]
fn blank_base_url_uses_default() {
    let cfg = ShareConfig::from_lookup(lookup(&[("SHARE_BASE_URL", "  ")]));
    assert_eq!(cfg.base_url, DEFAULT_SHARE_BASE_URL);
}
