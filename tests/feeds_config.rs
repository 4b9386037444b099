// tests/feeds_config.rs
use narasi_agent::config::{load_feeds_from, load_narratives_from, resolve_feeds, DEFAULT_FEEDS};
use std::{env, fs};

#[test]
fn toml_and_json_files_both_load() {
    let dir = tempfile::tempdir().unwrap();

    let p_toml = dir.path().join("feeds.toml");
    fs::write(&p_toml, r#"feeds = ["https://a/rss", " https://b/rss ", ""]"#).unwrap();
    let v = load_feeds_from(&p_toml).unwrap();
    assert_eq!(v, vec!["https://a/rss", "https://b/rss"]);

    let p_json = dir.path().join("feeds.json");
    fs::write(&p_json, r#"["https://c/rss"]"#).unwrap();
    let vj = load_feeds_from(&p_json).unwrap();
    assert_eq!(vj, vec!["https://c/rss"]);
}

#[test]
fn legacy_rss_key_still_works() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("feeds.toml");
    fs::write(&p, r#"rss = ["https://old/rss"]"#).unwrap();
    assert_eq!(load_feeds_from(&p).unwrap(), vec!["https://old/rss"]);
}

#[serial_test::serial]
#[test]
fn resolver_falls_back_to_defaults_without_config() {
    // Isolate CWD so a real config/ in the repo does not interfere.
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    env::remove_var("FEEDS_CONFIG_PATH");

    let v = resolve_feeds();
    let defaults: Vec<String> = DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect();
    assert_eq!(v, defaults);

    env::set_current_dir(&old).unwrap();
}

#[serial_test::serial]
#[test]
fn resolver_prefers_env_path_and_survives_malformed_config() {
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();

    // Malformed env-pointed file: silent fallback, never an error.
    let bad = tmp.path().join("feeds.toml");
    fs::write(&bad, "]][[ broken").unwrap();
    env::set_var("FEEDS_CONFIG_PATH", bad.display().to_string());
    let defaults: Vec<String> = DEFAULT_FEEDS.iter().map(|s| s.to_string()).collect();
    assert_eq!(resolve_feeds(), defaults);

    // A valid file wins over the compiled-in list.
    fs::write(&bad, r#"feeds = ["https://mine/rss"]"#).unwrap();
    assert_eq!(resolve_feeds(), vec!["https://mine/rss"]);

    env::remove_var("FEEDS_CONFIG_PATH");
    env::set_current_dir(&old).unwrap();
}

#[test]
fn narrative_rules_load_from_toml() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("narratives.toml");
    fs::write(
        &p,
        r#"
[[rules]]
label = "Bitcoin"
keywords = ["bitcoin", "btc"]

[[rules]]
label = ""
keywords = ["ignored"]
"#,
    )
    .unwrap();
    let rules = load_narratives_from(&p).unwrap();
    assert_eq!(rules.len(), 1);
    assert_eq!(rules[0].label, "Bitcoin");
    assert_eq!(rules[0].keywords, vec!["bitcoin", "btc"]);
}
