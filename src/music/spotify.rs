use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tokio::sync::RwLock;

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const TRACKS_URL: &str = "https://api.spotify.com/v1/tracks";
/// Tokens are renewed this long before Spotify expires them.
const TOKEN_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug)]
pub enum SpotifyError {
    Network(reqwest::Error),
    /// Non-success status from the Web API.
    Api(u16),
    NoArtist,
}

impl std::fmt::Display for SpotifyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpotifyError::Network(e) => write!(f, "could not reach Spotify: {e}"),
            SpotifyError::Api(status) => write!(f, "Spotify answered with status {status}"),
            SpotifyError::NoArtist => write!(f, "the Spotify track has no artist"),
        }
    }
}

impl std::error::Error for SpotifyError {}

impl From<reqwest::Error> for SpotifyError {
    fn from(e: reqwest::Error) -> Self {
        SpotifyError::Network(e)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct SpotifyTrack {
    name: String,
    artists: Vec<SpotifyArtist>,
}

#[derive(Deserialize)]
struct SpotifyArtist {
    name: String,
}

/// Client-credentials Spotify lookup with a cached access token.
#[derive(Clone)]
pub struct SpotifyClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    token: Arc<RwLock<Option<(String, Instant)>>>,
}

impl SpotifyClient {
    pub fn new(http: reqwest::Client, client_id: String, client_secret: String) -> Self {
        Self {
            http,
            client_id,
            client_secret,
            token: Arc::new(RwLock::new(None)),
        }
    }

    async fn access_token(&self) -> Result<String, SpotifyError> {
        {
            let token = self.token.read().await;
            if let Some((value, expires_at)) = token.as_ref() {
                if Instant::now() < *expires_at {
                    return Ok(value.clone());
                }
            }
        }

        let response = self
            .http
            .post(TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SpotifyError::Api(response.status().as_u16()));
        }
        let grant: TokenResponse = response.json().await?;

        let lifetime = Duration::from_secs(grant.expires_in).saturating_sub(TOKEN_MARGIN);
        let mut token = self.token.write().await;
        *token = Some((grant.access_token.clone(), Instant::now() + lifetime));
        Ok(grant.access_token)
    }

    /// Looks up a track and returns the `"<name>-<artist>"` search text.
    pub async fn search_text(&self, track_id: &str) -> Result<String, SpotifyError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .get(format!("{TRACKS_URL}/{track_id}"))
            .bearer_auth(token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(SpotifyError::Api(response.status().as_u16()));
        }
        let track: SpotifyTrack = response.json().await?;

        search_text(&track)
    }
}

fn search_text(track: &SpotifyTrack) -> Result<String, SpotifyError> {
    let artist = track.artists.first().ok_or(SpotifyError::NoArtist)?;
    Ok(format!("{}-{}", track.name, artist.name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_text_uses_primary_artist() {
        let track: SpotifyTrack = serde_json::from_value(serde_json::json!({
            "name": "Levan Polka",
            "artists": [{"name": "Hatsune Miku"}, {"name": "Otomania"}]
        }))
        .unwrap();
        assert_eq!(search_text(&track).unwrap(), "Levan Polka-Hatsune Miku");
    }

    #[test]
    fn test_search_text_without_artist() {
        let track = SpotifyTrack {
            name: "Untitled".to_string(),
            artists: vec![],
        };
        assert!(matches!(search_text(&track), Err(SpotifyError::NoArtist)));
    }

    #[test]
    fn test_error_display() {
        assert!(SpotifyError::Api(401).to_string().contains("401"));
    }
}
