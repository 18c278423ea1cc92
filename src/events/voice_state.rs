use poise::serenity_prelude as serenity;
use songbird::Songbird;
use tracing::{info, warn};

use crate::music::{player, queue};
use crate::utils::voice;
use crate::{Data, Error};

async fn bot_channel(
    songbird: &Songbird,
    guild_id: serenity::GuildId,
) -> Option<serenity::ChannelId> {
    let call = songbird.get(guild_id)?;
    let call = call.lock().await;
    call.current_channel()
        .map(|ch| serenity::ChannelId::new(ch.0.get()))
}

fn is_alone(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
    channel_id: serenity::ChannelId,
) -> bool {
    voice::members_in(&ctx.cache, guild_id, channel_id).is_some_and(|n| n <= 1)
}

#[derive(Debug, PartialEq)]
enum Disconnect {
    /// We left on our own; the call is already gone.
    Ignore,
    /// Kicked during music: drop the session with the call.
    Teardown,
    /// Kicked while only the soundboard used the call.
    DropCall,
}

fn on_disconnected(has_call: bool, music_active: bool) -> Disconnect {
    match (has_call, music_active) {
        (false, _) => Disconnect::Ignore,
        (true, true) => Disconnect::Teardown,
        (true, false) => Disconnect::DropCall,
    }
}

pub async fn handle(
    ctx: &serenity::Context,
    new: &serenity::VoiceState,
    data: &Data,
) -> Result<(), Error> {
    let Some(guild_id) = new.guild_id else {
        return Ok(());
    };

    let songbird = voice::songbird(ctx).await?;

    if new.user_id == ctx.cache.current_user().id && new.channel_id.is_none() {
        // Our own leaves drop the call before this event arrives.
        let has_call = songbird.get(guild_id).is_some();
        let music_active = queue::state(&data.music, guild_id).await.is_active();

        let action = on_disconnected(has_call, music_active);
        if action == Disconnect::Ignore {
            return Ok(());
        }

        info!("Disconnected from voice externally (guild: {guild_id})");
        data.soundboard.forget(guild_id).await;
        data.empty_channel.forget(guild_id).await;
        if action == Disconnect::Teardown {
            player::teardown(&songbird, &data.music, guild_id).await;
        } else if let Err(e) = songbird.remove(guild_id).await {
            warn!("Failed to drop voice call (guild: {guild_id}): {e}");
        }
        return Ok(());
    }

    let Some(channel_id) = bot_channel(&songbird, guild_id).await else {
        data.empty_channel.forget(guild_id).await;
        return Ok(());
    };
    if !is_alone(ctx, guild_id, channel_id) {
        data.empty_channel.cancel(guild_id).await;
        return Ok(());
    }

    // Already counting since the bot was first left alone.
    let Some(ticket) = data.empty_channel.arm(guild_id).await else {
        return Ok(());
    };

    let ctx = ctx.clone();
    let music = data.music.clone();
    let tracker = data.empty_channel.clone();
    let timeout = data.config.empty_channel_timeout;

    tokio::spawn(async move {
        tokio::time::sleep(timeout).await;

        if !tracker.expire(guild_id, ticket).await {
            return;
        }
        if bot_channel(&songbird, guild_id).await != Some(channel_id)
            || !is_alone(&ctx, guild_id, channel_id)
        {
            return;
        }

        info!("Alone in voice for {}s, leaving (guild: {guild_id})", timeout.as_secs());
        tracker.forget(guild_id).await;
        player::teardown(&songbird, &music, guild_id).await;
    });

    Ok(())
}
