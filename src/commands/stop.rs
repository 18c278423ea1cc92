use poise::CreateReply;
use tracing::{info, warn};

use crate::music::queue;
use crate::utils::{embed, voice};
use crate::{Context, Error};

/// Stop song and clear the queue
#[poise::command(slash_command, guild_only)]
pub async fn stop(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    if let Err(rejection) = queue::stop(&ctx.data().music, guild_id).await {
        ctx.send(CreateReply::default().embed(embed::error(&rejection.to_string())))
            .await?;
        return Ok(());
    }

    let songbird = voice::songbird(ctx.serenity_context()).await?;
    if let Err(e) = songbird.remove(guild_id).await {
        warn!("Failed to leave voice (guild: {guild_id}): {e}");
    }

    info!("Stopped (guild: {guild_id})");
    ctx.say("> ⏹️ The queue has been stopped.").await?;

    Ok(())
}
