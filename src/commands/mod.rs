mod pause;
mod play;
mod queue;
mod resume;
pub mod roulette;
mod skip;
mod stop;

use crate::{Data, Error};

pub fn all() -> Vec<poise::Command<Data, Error>> {
    vec![
        play::play(),
        pause::pause(),
        resume::resume(),
        skip::skip(),
        stop::stop(),
        queue::queue(),
        roulette::roulette(),
    ]
}
