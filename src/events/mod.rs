pub mod message;
pub mod voice_state;

use poise::serenity_prelude as serenity;

use crate::{Data, Error};

pub async fn handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Message { new_message } => {
            message::handle(ctx, new_message, data).await?;
        }
        serenity::FullEvent::VoiceStateUpdate { new, .. } => {
            voice_state::handle(ctx, new, data).await?;
        }
        _ => {}
    }
    Ok(())
}
