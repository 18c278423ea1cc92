pub mod commands;
pub mod config;
pub mod events;
pub mod music;
pub mod sounds;
pub mod utils;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Context<'a> = poise::Context<'a, Data, Error>;

pub struct Data {
    pub music: music::MusicManager,
    pub http_client: reqwest::Client,
    pub spotify: Option<music::spotify::SpotifyClient>,
    pub config: config::Config,
    /// Soundboard clips playing per guild, for the inactivity disconnect.
    pub soundboard: utils::idle::IdleTracker,
    /// Time the bot has spent alone in its channel.
    pub empty_channel: utils::idle::IdleTracker,
}
