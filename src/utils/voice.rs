use std::sync::Arc;

use poise::serenity_prelude as serenity;
use serenity::{ChannelId, GuildId, UserId};
use songbird::Songbird;

use crate::Error;

/// Voice channel the user currently sits in, from the guild cache.
pub fn user_channel(
    cache: &serenity::Cache,
    guild_id: GuildId,
    user_id: UserId,
) -> Option<ChannelId> {
    let guild = cache.guild(guild_id)?;
    guild.voice_states.get(&user_id).and_then(|vs| vs.channel_id)
}

/// Number of users (the bot included) connected to `channel_id`.
pub fn members_in(
    cache: &serenity::Cache,
    guild_id: GuildId,
    channel_id: ChannelId,
) -> Option<usize> {
    let guild = cache.guild(guild_id)?;
    let count = guild
        .voice_states
        .values()
        .filter(|vs| vs.channel_id == Some(channel_id))
        .count();
    Some(count)
}

pub async fn songbird(ctx: &serenity::Context) -> Result<Arc<Songbird>, Error> {
    songbird::get(ctx)
        .await
        .ok_or_else(|| "songbird voice client is not registered".into())
}
