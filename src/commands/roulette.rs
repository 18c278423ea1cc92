use poise::CreateReply;
use rand::Rng;
use tracing::{info, warn};

use crate::music::session::Rejection;
use crate::utils::{embed, voice};
use crate::{Context, Error};

pub const CHAMBERS: i64 = 6;

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    OutOfRange,
    /// The guess matched the draw: the player gets kicked from voice.
    Shot,
    Lucky,
}

/// Plays one round. `draw` is only called for a valid guess.
pub fn spin(guess: i64, draw: impl FnOnce() -> i64) -> Outcome {
    if !(1..=CHAMBERS).contains(&guess) {
        return Outcome::OutOfRange;
    }
    if draw() == guess {
        Outcome::Shot
    } else {
        Outcome::Lucky
    }
}

/// Select a number from 1 to 6, if you lose you are kicked from the voice channel
#[poise::command(slash_command, guild_only)]
pub async fn roulette(
    ctx: Context<'_>,
    #[description = "Number from 1 to 6"] number: i64,
) -> Result<(), Error> {
    let guild_id = ctx.guild_id().ok_or("This command only works in a server")?;
    let user_id = ctx.author().id;

    if voice::user_channel(&ctx.serenity_context().cache, guild_id, user_id).is_none() {
        ctx.send(CreateReply::default().embed(embed::error(&Rejection::NotInVoice.to_string())))
            .await?;
        return Ok(());
    }

    match spin(number, || rand::thread_rng().gen_range(1..=CHAMBERS)) {
        Outcome::OutOfRange => {
            ctx.send(
                CreateReply::default()
                    .embed(embed::error("You need to select a number between 1 and 6.")),
            )
            .await?;
        }
        Outcome::Shot => {
            ctx.say(format!("> 👋 See you later <@{user_id}>.")).await?;
            info!("Roulette: disconnecting {user_id} (guild: {guild_id})");
            if let Err(e) = guild_id.disconnect_member(ctx.http(), user_id).await {
                warn!("Failed to disconnect {user_id}: {e}");
            }
        }
        Outcome::Lucky => {
            ctx.say("> 🍀 You have been lucky.").await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_guess_and_draw() {
        for guess in 1..=CHAMBERS {
            for draw in 1..=CHAMBERS {
                let expected = if guess == draw { Outcome::Shot } else { Outcome::Lucky };
                assert_eq!(spin(guess, || draw), expected, "guess {guess}, draw {draw}");
            }
        }
    }

    #[test]
    fn test_out_of_range_never_draws() {
        for guess in [-1, 0, 7, 100] {
            let outcome = spin(guess, || panic!("drew for guess {guess}"));
            assert_eq!(outcome, Outcome::OutOfRange);
        }
    }
}
