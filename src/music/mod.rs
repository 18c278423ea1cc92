pub mod player;
pub mod playlist;
pub mod queue;
pub mod session;
pub mod source;
pub mod spotify;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serenity::model::id::GuildId;
use songbird::tracks::TrackHandle;
use tokio::sync::RwLock;

use playlist::Playlist;
use session::SessionState;

#[derive(Clone, Debug, PartialEq)]
pub struct Track {
    pub title: String,
    pub url: String,
    /// Seconds.
    pub duration: u64,
    pub requester: String,
}

impl Track {
    pub fn duration_label(&self) -> String {
        format!("{}:{:02}", self.duration / 60, self.duration % 60)
    }
}

#[derive(Default)]
pub struct GuildMusic {
    pub playlist: Playlist,
    pub state: SessionState,
    /// Urls of `play` requests still resolving.
    pub pending: HashSet<String>,
    /// Bumped on every stop; reservations from an older epoch are void.
    pub epoch: u64,
    pub track_handle: Option<TrackHandle>,
}

pub type MusicManager = Arc<RwLock<HashMap<GuildId, GuildMusic>>>;

pub fn new_music_manager() -> MusicManager {
    Arc::new(RwLock::new(HashMap::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_label() {
        let t = Track {
            title: "t".to_string(),
            url: "u".to_string(),
            duration: 185,
            requester: String::new(),
        };
        assert_eq!(t.duration_label(), "3:05");
    }

    #[test]
    fn test_guild_music_default() {
        let g = GuildMusic::default();
        assert!(g.playlist.is_empty());
        assert_eq!(g.state, SessionState::Idle);
        assert!(g.pending.is_empty());
        assert_eq!(g.epoch, 0);
        assert!(g.track_handle.is_none());
    }
}
