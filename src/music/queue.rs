use std::collections::HashMap;

use serenity::model::id::GuildId;
use songbird::tracks::TrackHandle;

use super::playlist::QueueEntry;
use super::session::{Rejection, SessionState, SkipAction};
use super::{GuildMusic, MusicManager, Track};

/// A `play` request in flight. Holding one keeps its url out of reach of
/// concurrent requests until it is committed, released or dropped.
pub struct Reservation {
    manager: MusicManager,
    guild_id: GuildId,
    key: Option<String>,
    epoch: u64,
}

impl std::fmt::Debug for Reservation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reservation")
            .field("guild_id", &self.guild_id)
            .field("key", &self.key)
            .field("epoch", &self.epoch)
            .finish()
    }
}

fn release_key(
    guilds: &mut HashMap<GuildId, GuildMusic>,
    guild_id: GuildId,
    epoch: u64,
    key: &str,
) {
    if let Some(guild) = guilds.get_mut(&guild_id) {
        if guild.epoch == epoch {
            guild.pending.remove(key);
        }
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        let Some(key) = self.key.take() else {
            return;
        };
        let (guild_id, epoch) = (self.guild_id, self.epoch);

        if let Ok(mut guilds) = self.manager.try_write() {
            release_key(&mut guilds, guild_id, epoch, &key);
            return;
        }
        let manager = self.manager.clone();
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(async move {
                let mut guilds = manager.write().await;
                release_key(&mut guilds, guild_id, epoch, &key);
            });
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum Commit {
    /// `start` is set when the session was idle and playback must begin.
    Queued { position: usize, start: bool },
    Duplicate,
    /// The session was stopped while the request was resolving.
    Cancelled,
}

#[derive(Debug)]
pub enum Finish {
    /// The track was no longer queued (skipped into a stop, or cleared).
    Ignored,
    Next(Track),
    Drained,
}

#[derive(Debug)]
pub enum Skip {
    Stopped,
    /// Stop this handle; its end event moves the playlist on.
    Advance(TrackHandle),
}

#[derive(Debug)]
pub struct QueueView {
    pub entries: Vec<QueueEntry>,
    pub total_secs: u64,
}

impl QueueView {
    pub fn total_minutes(&self) -> String {
        format!("{:.2}", self.total_secs as f64 / 60.0)
    }
}

fn reset(guild: &mut GuildMusic) {
    guild.playlist.clear();
    guild.pending.clear();
    guild.epoch += 1;
    guild.state = SessionState::Idle;
    guild.track_handle = None;
}

/// Claims `key` (a url known before resolution) for this request.
pub async fn reserve(
    manager: &MusicManager,
    guild_id: GuildId,
    key: Option<&str>,
) -> Result<Reservation, Rejection> {
    let mut guilds = manager.write().await;
    let guild = guilds.entry(guild_id).or_default();

    if let Some(key) = key {
        if guild.playlist.has(key) || !guild.pending.insert(key.to_string()) {
            return Err(Rejection::AlreadyQueued);
        }
    }

    Ok(Reservation {
        manager: manager.clone(),
        guild_id,
        key: key.map(str::to_string),
        epoch: guild.epoch,
    })
}

/// Gives the url back after a failed resolution.
pub async fn release(manager: &MusicManager, mut reservation: Reservation) {
    if let Some(key) = reservation.key.take() {
        let mut guilds = manager.write().await;
        release_key(&mut guilds, reservation.guild_id, reservation.epoch, &key);
    }
}

pub async fn commit(manager: &MusicManager, mut reservation: Reservation, track: Track) -> Commit {
    let mut guilds = manager.write().await;
    let guild = guilds.entry(reservation.guild_id).or_default();
    let key = reservation.key.take();

    if guild.epoch != reservation.epoch {
        return Commit::Cancelled;
    }
    if let Some(key) = &key {
        guild.pending.remove(key);
    }

    // The url may only be known now (search results), so the duplicate
    // check is repeated under the same lock as the append.
    let Some(position) = guild.playlist.append(track) else {
        return Commit::Duplicate;
    };

    let (state, start) = guild.state.on_queued();
    guild.state = state;
    Commit::Queued { position, start }
}

/// Stores the handle of the track that just started. Returns the session
/// state to apply to it, or `None` when the track is stale and must be stopped.
pub async fn attach_handle(
    manager: &MusicManager,
    guild_id: GuildId,
    url: &str,
    handle: TrackHandle,
) -> Option<SessionState> {
    let mut guilds = manager.write().await;
    let guild = guilds.get_mut(&guild_id)?;

    let current = guild.playlist.front().is_some_and(|t| t.url == url);
    if !current || !guild.state.is_active() {
        return None;
    }
    guild.track_handle = Some(handle);
    Some(guild.state)
}

/// A track stopped playing (finished, skipped or failed).
pub async fn finish(manager: &MusicManager, guild_id: GuildId, url: &str) -> Finish {
    let mut guilds = manager.write().await;
    let Some(guild) = guilds.get_mut(&guild_id) else {
        return Finish::Ignored;
    };

    if guild.playlist.remove_by_url(url).is_none() {
        return Finish::Ignored;
    }
    guild.track_handle = None;

    match guild.playlist.front() {
        Some(next) => {
            guild.state = SessionState::Playing;
            Finish::Next(next.clone())
        }
        None => {
            guild.state = SessionState::Idle;
            Finish::Drained
        }
    }
}

async fn transition(
    manager: &MusicManager,
    guild_id: GuildId,
    apply: impl FnOnce(SessionState) -> Result<SessionState, Rejection>,
) -> Result<Option<TrackHandle>, Rejection> {
    let mut guilds = manager.write().await;
    let guild = guilds.entry(guild_id).or_default();
    guild.state = apply(guild.state)?;
    Ok(guild.track_handle.clone())
}

pub async fn pause(
    manager: &MusicManager,
    guild_id: GuildId,
) -> Result<Option<TrackHandle>, Rejection> {
    transition(manager, guild_id, SessionState::pause).await
}

pub async fn resume(
    manager: &MusicManager,
    guild_id: GuildId,
) -> Result<Option<TrackHandle>, Rejection> {
    transition(manager, guild_id, SessionState::resume).await
}

pub async fn skip(manager: &MusicManager, guild_id: GuildId) -> Result<Skip, Rejection> {
    let mut guilds = manager.write().await;
    let guild = guilds.entry(guild_id).or_default();

    match guild.state.skip(guild.playlist.len())? {
        SkipAction::Stop => {
            reset(guild);
            Ok(Skip::Stopped)
        }
        SkipAction::Advance => guild
            .track_handle
            .clone()
            .map(Skip::Advance)
            .ok_or(Rejection::NotStarted),
    }
}

pub async fn stop(manager: &MusicManager, guild_id: GuildId) -> Result<(), Rejection> {
    let mut guilds = manager.write().await;
    let guild = guilds.entry(guild_id).or_default();
    guild.state.stop()?;
    reset(guild);
    Ok(())
}

/// Drops the session whatever its state. Used when the voice side failed.
pub async fn clear(manager: &MusicManager, guild_id: GuildId) {
    let mut guilds = manager.write().await;
    if let Some(guild) = guilds.get_mut(&guild_id) {
        reset(guild);
    }
}

pub async fn snapshot(manager: &MusicManager, guild_id: GuildId) -> Result<QueueView, Rejection> {
    let guilds = manager.read().await;
    let Some(guild) = guilds.get(&guild_id) else {
        return Err(Rejection::NoSession);
    };
    guild.state.check_queue(guild.playlist.len())?;

    Ok(QueueView {
        entries: guild.playlist.render(),
        total_secs: guild.playlist.total_duration_secs(),
    })
}

pub async fn state(manager: &MusicManager, guild_id: GuildId) -> SessionState {
    let guilds = manager.read().await;
    guilds.get(&guild_id).map_or(SessionState::Idle, |g| g.state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_minutes_two_decimals() {
        let view = QueueView {
            entries: vec![],
            total_secs: 330,
        };
        assert_eq!(view.total_minutes(), "5.50");

        let view = QueueView {
            entries: vec![],
            total_secs: 100,
        };
        assert_eq!(view.total_minutes(), "1.67");
    }
}
