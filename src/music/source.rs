use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use super::spotify::{SpotifyClient, SpotifyError};
use super::Track;

#[derive(Debug)]
pub enum ResolveError {
    /// An `open.spotify.com` link that does not point at a track.
    InvalidSpotifyUrl,
    SpotifyNotConfigured,
    Spotify(SpotifyError),
    NoResults,
    /// yt-dlp exited unsuccessfully; carries its stderr.
    YtDlp(String),
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl std::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolveError::InvalidSpotifyUrl => {
                write!(f, "You need to provide a valid Spotify track URL.")
            }
            ResolveError::SpotifyNotConfigured => {
                write!(f, "Spotify links are not enabled on this bot.")
            }
            ResolveError::Spotify(e) => write!(f, "Spotify lookup failed: {e}"),
            ResolveError::NoResults => write!(f, "No results were found for that search."),
            ResolveError::YtDlp(stderr) => write!(f, "Could not load the song: {}", stderr.trim()),
            ResolveError::Io(e) => write!(f, "Could not run yt-dlp: {e}"),
            ResolveError::Parse(e) => write!(f, "Unexpected yt-dlp output: {e}"),
        }
    }
}

impl std::error::Error for ResolveError {}

impl From<SpotifyError> for ResolveError {
    fn from(e: SpotifyError) -> Self {
        ResolveError::Spotify(e)
    }
}

#[derive(Debug, PartialEq)]
pub enum Query {
    YouTube(String),
    /// Spotify track id.
    Spotify(String),
    Search(String),
}

impl Query {
    pub fn classify(query: &str) -> Result<Self, ResolveError> {
        let query = query.trim();

        if query.contains("www.youtube.com") || query.contains("youtu.be") {
            return Ok(Query::YouTube(query.to_string()));
        }

        if query.contains("open.spotify.com") {
            let id = query
                .split("track/")
                .nth(1)
                .and_then(|rest| rest.split('?').next())
                .filter(|id| !id.is_empty())
                .ok_or(ResolveError::InvalidSpotifyUrl)?;
            return Ok(Query::Spotify(id.to_string()));
        }

        Ok(Query::Search(query.to_string()))
    }

    /// The track url when it is known before resolving.
    pub fn known_url(&self) -> Option<&str> {
        match self {
            Query::YouTube(url) => Some(url.as_str()),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct YtDlpOutput {
    title: Option<String>,
    duration: Option<f64>,
    webpage_url: Option<String>,
    original_url: Option<String>,
}

/// Turns a classified query into a track.
pub async fn resolve(
    query: &Query,
    spotify: Option<&SpotifyClient>,
    requester: &str,
) -> Result<Track, ResolveError> {
    let (target, fixed_url) = match query {
        Query::YouTube(url) => (url.clone(), Some(url.clone())),
        Query::Spotify(id) => {
            let spotify = spotify.ok_or(ResolveError::SpotifyNotConfigured)?;
            let text = spotify.search_text(id).await?;
            debug!("Spotify track {id} resolved to search \"{text}\"");
            (format!("ytsearch1:{text}"), None)
        }
        Query::Search(text) => (format!("ytsearch1:{text}"), None),
    };

    let output = Command::new("yt-dlp")
        .args([
            "-j",
            "-f",
            "bestaudio",
            "--no-playlist",
            "--no-warnings",
            target.as_str(),
        ])
        .output()
        .await
        .map_err(ResolveError::Io)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        return Err(ResolveError::YtDlp(stderr));
    }

    let info = parse_output(&output.stdout)?;
    let url = fixed_url
        .or(info.webpage_url)
        .or(info.original_url)
        .ok_or(ResolveError::NoResults)?;

    Ok(Track {
        title: info.title.unwrap_or_else(|| "Unknown".to_string()),
        url,
        duration: info.duration.map_or(0, |d| d.max(0.0) as u64),
        requester: requester.to_string(),
    })
}

/// yt-dlp prints one JSON object per entry; a search without hits prints none.
fn parse_output(stdout: &[u8]) -> Result<YtDlpOutput, ResolveError> {
    let text = String::from_utf8_lossy(stdout);
    let first = text
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .ok_or(ResolveError::NoResults)?;
    serde_json::from_str(first).map_err(ResolveError::Parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_youtube() {
        let q = Query::classify("https://www.youtube.com/watch?v=abc").unwrap();
        assert_eq!(q, Query::YouTube("https://www.youtube.com/watch?v=abc".to_string()));
        assert_eq!(q.known_url(), Some("https://www.youtube.com/watch?v=abc"));

        let q = Query::classify("https://youtu.be/abc").unwrap();
        assert!(matches!(q, Query::YouTube(_)));
    }

    #[test]
    fn test_classify_spotify_strips_query_string() {
        let q = Query::classify("https://open.spotify.com/track/XYZ?si=1").unwrap();
        assert_eq!(q, Query::Spotify("XYZ".to_string()));
        assert_eq!(q.known_url(), None);
    }

    #[test]
    fn test_classify_spotify_requires_track() {
        let err = Query::classify("https://open.spotify.com/album/123").unwrap_err();
        assert!(matches!(err, ResolveError::InvalidSpotifyUrl));

        let err = Query::classify("https://open.spotify.com/track/").unwrap_err();
        assert!(matches!(err, ResolveError::InvalidSpotifyUrl));
    }

    #[test]
    fn test_classify_free_text() {
        let q = Query::classify("  never gonna give you up ").unwrap();
        assert_eq!(q, Query::Search("never gonna give you up".to_string()));
    }

    #[test]
    fn test_parse_output_empty_search() {
        assert!(matches!(parse_output(b""), Err(ResolveError::NoResults)));
        assert!(matches!(parse_output(b"\n  \n"), Err(ResolveError::NoResults)));
    }

    #[test]
    fn test_parse_output_takes_first_entry() {
        let stdout = br#"{"title": "First", "duration": 212.0, "webpage_url": "https://www.youtube.com/watch?v=1"}
{"title": "Second", "duration": 10.0, "webpage_url": "https://www.youtube.com/watch?v=2"}"#;
        let info = parse_output(stdout).unwrap();
        assert_eq!(info.title.as_deref(), Some("First"));
        assert_eq!(info.duration, Some(212.0));
        assert_eq!(info.webpage_url.as_deref(), Some("https://www.youtube.com/watch?v=1"));
        assert!(info.original_url.is_none());
    }

    #[tokio::test]
    async fn test_spotify_without_credentials() {
        let q = Query::Spotify("XYZ".to_string());
        let err = resolve(&q, None, "tester").await.unwrap_err();
        assert!(matches!(err, ResolveError::SpotifyNotConfigured));
    }
}
