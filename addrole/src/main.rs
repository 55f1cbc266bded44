#![deny(clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::non_ascii_literal
)]

mod commands;

use addrole_cache::Cache;
use addrole_framework::{
    context::BotContext, directory::TwilightDirectory, prelude::Configuration, Framework,
};
use addrole_models::member::tag;
use std::{env, error::Error, sync::Arc};
use tower::Service;
use tracing_subscriber::EnvFilter;
use twilight_gateway::{Intents, Shard, ShardId};
use twilight_http::Client as HttpClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let token = env::var("DISCORD_TOKEN")
        .map_err(|_| "Expected the DISCORD_TOKEN in the environment")?;
    let config = Configuration::from_env()?;
    let call_timeout = config.call_timeout;

    let http = Arc::new(HttpClient::new(token.clone()));
    let current_user = http.current_user().await?.model().await?;
    tracing::info!(
        "[BOT] Logged in as {}",
        tag(&current_user.name, current_user.discriminator)
    );

    let cache = Cache::new();
    let directory = TwilightDirectory::new(http.clone(), cache.clone(), call_timeout);
    let bot = BotContext::new(current_user.id, config, cache.clone(), Arc::new(directory));
    let mut framework = Framework::new(bot).configure(commands::addrole_config);

    let intents = Intents::GUILDS
        | Intents::GUILD_MESSAGES
        | Intents::MESSAGE_CONTENT
        | Intents::GUILD_MEMBERS;
    let mut shard = Shard::new(ShardId::ONE, token, intents);

    loop {
        let event = match shard.next_event().await {
            Ok(event) => event,
            Err(err) => {
                if err.is_fatal() {
                    return Err(err.into());
                }
                tracing::error!(err = ?err, "[ERROR] Failed to receive event");
                continue;
            }
        };
        tracing::trace!(event = ?event.kind());

        if let Err(err) = cache.update(&event) {
            tracing::error!(err = ?err, "[ERROR] Failed to update the cache");
        }

        let fut = framework.call(&event);
        tokio::spawn(async move {
            if let Err(err) = fut.await {
                tracing::debug!(err = ?err, "[ERROR] Command ended with an error");
            }
        });
    }
}
