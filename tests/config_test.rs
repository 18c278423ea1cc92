use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use wena_bot::config::Config;

fn from_map(vars: &[(&str, &str)]) -> Config {
    let map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    Config::from_vars(|key| map.get(key).cloned())
}

#[test]
#[should_panic(expected = "DISCORD_TOKEN")]
fn test_config_missing_token_panics() {
    from_map(&[]);
}

#[test]
fn test_config_defaults() {
    let config = from_map(&[("DISCORD_TOKEN", "token")]);
    assert_eq!(config.discord_token, "token");
    assert!(config.application_id.is_none());
    assert!(config.spotify.is_none());
    assert_eq!(config.sounds_dir, PathBuf::from("sounds"));
    assert_eq!(config.soundboard_idle_timeout, Duration::from_secs(30));
    assert_eq!(config.empty_channel_timeout, Duration::from_secs(300));
}

#[test]
fn test_config_overrides() {
    let config = from_map(&[
        ("DISCORD_TOKEN", "token"),
        ("APPLICATION", "1234567890"),
        ("SPOTIFY_CLIENT_ID", "id"),
        ("SPOTIFY_CLIENT_SECRET", "secret"),
        ("SOUNDS_DIR", "/srv/sounds"),
        ("SOUNDBOARD_IDLE_TIMEOUT_SECS", "5"),
        ("EMPTY_CHANNEL_TIMEOUT_SECS", "not-a-number"),
    ]);
    assert_eq!(config.application_id, Some(1234567890));
    let spotify = config.spotify.unwrap();
    assert_eq!(spotify.client_id, "id");
    assert_eq!(spotify.client_secret, "secret");
    assert_eq!(config.sounds_dir, PathBuf::from("/srv/sounds"));
    assert_eq!(config.soundboard_idle_timeout, Duration::from_secs(5));
    assert_eq!(config.empty_channel_timeout, Duration::from_secs(300));
}

#[test]
fn test_spotify_needs_both_credentials() {
    let config = from_map(&[("DISCORD_TOKEN", "token"), ("SPOTIFY_CLIENT_ID", "id")]);
    assert!(config.spotify.is_none());
}
