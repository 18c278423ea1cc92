use poise::CreateReply;
use tracing::{info, warn};

use crate::music::player::{self, Playback};
use crate::music::queue::{self, Commit};
use crate::music::session::Rejection;
use crate::music::source::{self, Query};
use crate::utils::{embed, voice};
use crate::{Context, Error};

async fn reply_error(ctx: Context<'_>, message: &str) -> Result<(), Error> {
    let reply = CreateReply::default().embed(embed::error(message));
    ctx.send(reply).await?;
    Ok(())
}

/// Play a song by name or link
#[poise::command(slash_command, guild_only)]
pub async fn play(
    ctx: Context<'_>,
    #[description = "The name of the song you want to play or the youtube/spotify link"]
    query: String,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;
    let data = ctx.data();

    let cache = &ctx.serenity_context().cache;
    let Some(channel_id) = voice::user_channel(cache, guild_id, ctx.author().id) else {
        return reply_error(ctx, &Rejection::NotInVoice.to_string()).await;
    };

    let query = match Query::classify(&query) {
        Ok(q) => q,
        Err(e) => return reply_error(ctx, &e.to_string()).await,
    };

    let reservation = match queue::reserve(&data.music, guild_id, query.known_url()).await {
        Ok(r) => r,
        Err(rejection) => return reply_error(ctx, &rejection.to_string()).await,
    };

    ctx.defer().await?;
    info!("Resolving {query:?} (guild: {guild_id})");

    let track = match source::resolve(&query, data.spotify.as_ref(), &ctx.author().name).await {
        Ok(t) => t,
        Err(e) => {
            warn!("Resolution failed for {query:?}: {e}");
            queue::release(&data.music, reservation).await;
            return reply_error(ctx, &e.to_string()).await;
        }
    };

    let (position, start) = match queue::commit(&data.music, reservation, track.clone()).await {
        Commit::Queued { position, start } => (position, start),
        Commit::Duplicate => return reply_error(ctx, &Rejection::AlreadyQueued.to_string()).await,
        Commit::Cancelled => {
            return reply_error(ctx, "The player was stopped before the song could be queued.")
                .await;
        }
    };

    if start {
        let songbird = voice::songbird(ctx.serenity_context()).await?;

        let started = match songbird.join(guild_id, channel_id).await {
            Ok(call) => {
                let playback = Playback {
                    guild_id,
                    music: data.music.clone(),
                    http_client: data.http_client.clone(),
                    songbird: songbird.clone(),
                    call,
                };
                player::play_track(&playback, &track).await
            }
            Err(e) => Err(e.into()),
        };

        if let Err(e) = started {
            warn!("Could not start playback (guild: {guild_id}): {e}");
            player::teardown(&songbird, &data.music, guild_id).await;
            return reply_error(ctx, "I could not join your voice channel.").await;
        }

        ctx.send(CreateReply::default().embed(embed::now_playing(&track)))
            .await?;
    } else {
        ctx.send(CreateReply::default().embed(embed::added_to_queue(&track, position)))
            .await?;
    }

    Ok(())
}
