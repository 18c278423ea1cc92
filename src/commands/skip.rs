use poise::CreateReply;
use tracing::{info, warn};

use crate::music::queue::{self, Skip};
use crate::utils::{embed, voice};
use crate::{Context, Error};

/// Skip the current song
#[poise::command(slash_command, guild_only)]
pub async fn skip(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    match queue::skip(&ctx.data().music, guild_id).await {
        Ok(Skip::Stopped) => {
            let songbird = voice::songbird(ctx.serenity_context()).await?;
            if let Err(e) = songbird.remove(guild_id).await {
                warn!("Failed to leave voice (guild: {guild_id}): {e}");
            }
            info!("Skipped the last track, session closed (guild: {guild_id})");
            ctx.say("> ⏹️ The queue has been stopped.").await?;
        }
        Ok(Skip::Advance(handle)) => {
            // The track-end callback moves the playlist forward.
            let _ = handle.stop();
            info!("Skipped (guild: {guild_id})");
            ctx.say("> ⏭️ The current song has been skipped.").await?;
        }
        Err(rejection) => {
            ctx.send(CreateReply::default().embed(embed::error(&rejection.to_string())))
                .await?;
        }
    }

    Ok(())
}
