use std::path::PathBuf;
use std::time::Duration;

pub struct SpotifyCredentials {
    pub client_id: String,
    pub client_secret: String,
}

pub struct Config {
    pub discord_token: String,
    /// Bot user id used to detect mentions; the cached current user otherwise.
    pub application_id: Option<u64>,
    pub spotify: Option<SpotifyCredentials>,
    pub sounds_dir: PathBuf,
    pub soundboard_idle_timeout: Duration,
    pub empty_channel_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let secs = |key: &str, default: u64| {
            Duration::from_secs(var(key).and_then(|v| v.parse().ok()).unwrap_or(default))
        };

        let spotify = match (var("SPOTIFY_CLIENT_ID"), var("SPOTIFY_CLIENT_SECRET")) {
            (Some(client_id), Some(client_secret)) => Some(SpotifyCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        Self {
            discord_token: var("DISCORD_TOKEN").expect("DISCORD_TOKEN must be set"),
            application_id: var("APPLICATION").and_then(|v| v.parse().ok()),
            spotify,
            sounds_dir: var("SOUNDS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("sounds")),
            soundboard_idle_timeout: secs("SOUNDBOARD_IDLE_TIMEOUT_SECS", 30),
            empty_channel_timeout: secs("EMPTY_CHANNEL_TIMEOUT_SECS", 300),
        }
    }
}
