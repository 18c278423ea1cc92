use poise::CreateReply;
use tracing::info;

use crate::music::queue;
use crate::utils::embed;
use crate::{Context, Error};

/// Resume the current song
#[poise::command(slash_command, guild_only)]
pub async fn resume(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    match queue::resume(&ctx.data().music, guild_id).await {
        Ok(handle) => {
            if let Some(h) = handle {
                let _ = h.play();
            }
            info!("Resumed (guild: {guild_id})");
            ctx.say("> ▶️ The player has been resumed!!").await?;
        }
        Err(rejection) => {
            ctx.send(CreateReply::default().embed(embed::error(&rejection.to_string())))
                .await?;
        }
    }

    Ok(())
}
