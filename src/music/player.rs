use std::sync::Arc;

use async_trait::async_trait;
use serenity::model::id::GuildId;
use songbird::events::{Event, EventContext, EventHandler, TrackEvent};
use songbird::input::YoutubeDl;
use songbird::{Call, Songbird};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::queue::{self, Finish};
use super::session::SessionState;
use super::{MusicManager, Track};

/// What a guild's playback needs to keep itself going from songbird callbacks.
#[derive(Clone)]
pub struct Playback {
    pub guild_id: GuildId,
    pub music: MusicManager,
    pub http_client: reqwest::Client,
    pub songbird: Arc<Songbird>,
    pub call: Arc<Mutex<Call>>,
}

struct TrackEndNotifier {
    playback: Playback,
    url: String,
}

#[async_trait]
impl EventHandler for TrackEndNotifier {
    async fn act(&self, _ctx: &EventContext<'_>) -> Option<Event> {
        let playback = self.playback.clone();
        let url = self.url.clone();

        tokio::spawn(async move {
            advance(playback, &url).await;
        });

        None
    }
}

pub async fn play_track(
    playback: &Playback,
    track: &Track,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let src = YoutubeDl::new(playback.http_client.clone(), track.url.clone());

    let handle = {
        let mut call = playback.call.lock().await;
        call.play_only_input(src.into())
    };

    let state =
        queue::attach_handle(&playback.music, playback.guild_id, &track.url, handle.clone()).await;
    match state {
        None => {
            // Stopped or skipped while the stream was being set up.
            let _ = handle.stop();
            return Ok(());
        }
        Some(SessionState::Paused) => {
            let _ = handle.pause();
        }
        Some(_) => {}
    }

    // A stream that fails to load is skipped the same way a finished one is.
    for event in [TrackEvent::End, TrackEvent::Error] {
        handle.add_event(
            Event::Track(event),
            TrackEndNotifier {
                playback: playback.clone(),
                url: track.url.clone(),
            },
        )?;
    }

    info!("Now playing: {} (guild: {})", track.title, playback.guild_id);
    Ok(())
}

async fn advance(playback: Playback, url: &str) {
    let guild_id = playback.guild_id;

    match queue::finish(&playback.music, guild_id, url).await {
        Finish::Ignored => {}
        Finish::Next(track) => {
            if let Err(e) = play_track(&playback, &track).await {
                error!("Failed to play next track (guild: {guild_id}): {e}");
                teardown(&playback.songbird, &playback.music, guild_id).await;
            }
        }
        Finish::Drained => {
            info!("Queue finished, leaving voice (guild: {guild_id})");
            // A `play` may have started a new session in the meantime.
            if !queue::state(&playback.music, guild_id).await.is_active() {
                if let Err(e) = playback.songbird.remove(guild_id).await {
                    warn!("Failed to leave voice (guild: {guild_id}): {e}");
                }
            }
        }
    }
}

/// Forgets the guild's session and leaves its voice channel.
pub async fn teardown(songbird: &Songbird, music: &MusicManager, guild_id: GuildId) {
    queue::clear(music, guild_id).await;
    if let Err(e) = songbird.remove(guild_id).await {
        warn!("Failed to leave voice (guild: {guild_id}): {e}");
    }
}
