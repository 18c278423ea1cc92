use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;
use songbird::events::{Event, EventContext, EventHandler, TrackEvent};
use songbird::input::File;
use songbird::Songbird;
use tracing::{info, warn};

use crate::music::{queue, MusicManager};
use crate::sounds::{self, KeywordReply};
use crate::utils::idle::IdleTracker;
use crate::utils::voice;
use crate::{Data, Error};

/// Watches one soundboard clip. Once no clip has played for the idle
/// timeout, the bot leaves unless a music session took over.
#[derive(Clone)]
struct SoundboardLeaver {
    guild_id: serenity::GuildId,
    songbird: Arc<Songbird>,
    music: MusicManager,
    tracker: IdleTracker,
    timeout: Duration,
    /// End and Error may both fire for a clip; only the first counts.
    done: Arc<AtomicBool>,
}

impl SoundboardLeaver {
    async fn clip_ended(&self) {
        if self.done.swap(true, Ordering::SeqCst) {
            return;
        }
        let Some(ticket) = self.tracker.finish(self.guild_id).await else {
            return;
        };

        tokio::time::sleep(self.timeout).await;
        if !self.tracker.expire(self.guild_id, ticket).await {
            return;
        }
        if queue::state(&self.music, self.guild_id).await.is_active() {
            return;
        }
        if self.songbird.get(self.guild_id).is_none() {
            return;
        }

        info!("Soundboard idle, leaving voice (guild: {})", self.guild_id);
        self.tracker.forget(self.guild_id).await;
        if let Err(e) = self.songbird.remove(self.guild_id).await {
            warn!("Failed to leave voice (guild: {}): {e}", self.guild_id);
        }
    }
}

#[async_trait]
impl EventHandler for SoundboardLeaver {
    async fn act(&self, _ctx: &EventContext<'_>) -> Option<Event> {
        let leaver = self.clone();
        tokio::spawn(async move {
            leaver.clip_ended().await;
        });
        None
    }
}

pub async fn handle(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
) -> Result<(), Error> {
    if msg.author.bot {
        return Ok(());
    }

    let bot_id = data
        .config
        .application_id
        .map(serenity::UserId::new)
        .unwrap_or_else(|| ctx.cache.current_user().id);
    if !msg.mentions.iter().any(|u| u.id == bot_id) {
        return Ok(());
    }

    let reply = sounds::reply_for(&msg.content, &mut rand::thread_rng());

    match reply {
        KeywordReply::Text(text) => {
            msg.channel_id.say(&ctx.http, text).await?;
        }
        KeywordReply::Sound(clip) => play_clip(ctx, msg, data, clip).await?,
        KeywordReply::NotUnderstood => {
            msg.channel_id.say(&ctx.http, sounds::NOT_UNDERSTOOD).await?;
        }
    }

    Ok(())
}

async fn play_clip(
    ctx: &serenity::Context,
    msg: &serenity::Message,
    data: &Data,
    clip: &str,
) -> Result<(), Error> {
    let Some(guild_id) = msg.guild_id else {
        return Ok(());
    };

    let Some(channel_id) = voice::user_channel(&ctx.cache, guild_id, msg.author.id) else {
        msg.channel_id
            .say(&ctx.http, "> ⚠️ You need to be in a voice channel to hear that.")
            .await?;
        return Ok(());
    };

    let songbird = voice::songbird(ctx).await?;
    let music_active = queue::state(&data.music, guild_id).await.is_active();
    let path = data.config.sounds_dir.join(clip);

    // During a music session the clip is mixed into the running call.
    if music_active {
        if let Some(call) = songbird.get(guild_id) {
            call.lock().await.play_input(File::new(path).into());
            info!("Soundboard: {clip} (guild: {guild_id}, over music)");
            return Ok(());
        }
    }

    if songbird.get(guild_id).is_none() {
        data.soundboard.forget(guild_id).await;
    }
    let call = songbird.join(guild_id, channel_id).await?;

    data.soundboard.start(guild_id).await;
    let leaver = SoundboardLeaver {
        guild_id,
        songbird: songbird.clone(),
        music: data.music.clone(),
        tracker: data.soundboard.clone(),
        timeout: data.config.soundboard_idle_timeout,
        done: Arc::new(AtomicBool::new(false)),
    };

    let handle = call.lock().await.play_input(File::new(path).into());
    info!("Soundboard: {clip} (guild: {guild_id})");

    for event in [TrackEvent::End, TrackEvent::Error] {
        if let Err(e) = handle.add_event(Event::Track(event), leaver.clone()) {
            // The clip is already over, so no event will report it.
            tokio::spawn(async move {
                leaver.clip_ended().await;
            });
            return Err(e.into());
        }
    }

    Ok(())
}
