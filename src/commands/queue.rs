use poise::CreateReply;

use crate::music::queue as music_queue;
use crate::utils::embed;
use crate::{Context, Error};

/// See the queue
#[poise::command(slash_command, guild_only)]
pub async fn queue(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;

    let embed = match music_queue::snapshot(&ctx.data().music, guild_id).await {
        Ok(view) => embed::queue_list(&view),
        Err(rejection) => embed::error(&rejection.to_string()),
    };

    ctx.send(CreateReply::default().embed(embed)).await?;

    Ok(())
}
