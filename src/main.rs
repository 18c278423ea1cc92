use poise::serenity_prelude as serenity;
use poise::CreateReply;
use songbird::SerenityInit;
use tracing_subscriber::EnvFilter;

use wena_bot::music::spotify::SpotifyClient;
use wena_bot::utils::embed;
use wena_bot::utils::idle::IdleTracker;
use wena_bot::{commands, config, events, music, Data, Error};

async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Command { error, ctx, .. } => {
            tracing::error!("/{} failed: {error}", ctx.command().name);
            let reply = CreateReply::default()
                .embed(embed::error("Something went wrong, please try again."))
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                tracing::error!("Could not report command error: {e}");
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                tracing::error!("Error while handling error: {e}");
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;
    let token = config.discord_token.clone();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            event_handler: |ctx, event, framework, data| {
                Box::pin(events::handler(ctx, event, framework, data))
            },
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                match poise::builtins::register_globally(ctx, &framework.options().commands).await {
                    Ok(()) => tracing::info!("Global commands registered"),
                    Err(e) => tracing::error!("Registering global commands failed: {e}"),
                }

                let http_client = reqwest::Client::new();
                let spotify = config.spotify.as_ref().map(|creds| {
                    SpotifyClient::new(
                        http_client.clone(),
                        creds.client_id.clone(),
                        creds.client_secret.clone(),
                    )
                });
                if spotify.is_none() {
                    tracing::warn!("Spotify credentials missing, Spotify links are disabled");
                }

                tracing::info!("Logged in as {}", ready.user.name);
                Ok(Data {
                    music: music::new_music_manager(),
                    http_client,
                    spotify,
                    config,
                    soundboard: IdleTracker::new(),
                    empty_channel: IdleTracker::new(),
                })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .register_songbird()
        .await
        .expect("Failed to create the Discord client");

    if let Err(e) = client.start().await {
        tracing::error!("Client error: {e}");
    }
}
