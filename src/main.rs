use std::sync::Arc;

use anyhow::Context as AnyhowContext;
use serenity::{
    Client,
    all::{Context, EventHandler, Interaction, Ready},
    async_trait,
    model::prelude::GatewayIntents,
};
use tracing_subscriber::EnvFilter;

mod api;
mod components;
mod config;
mod constant;
mod listeners;
mod util;

use config::Configuration;

use crate::{
    api::HttpApplicationApi,
    listeners::{Listener, deny::DenyListener},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Configuration::load()?;
    let discord_token = config
        .authentication
        .discord_token
        .as_deref()
        .context("Expected authentication.discord_token to be filled in config or DISCORD_TOKEN")?;

    let api = Arc::new(HttpApplicationApi::new(
        reqwest::Client::new(),
        config.api.base_url(),
    ));
    tracing::info!(api_url = config.api.base_url(), "using application backend");

    let listeners: Vec<Arc<dyn Listener>> = vec![Arc::new(DenyListener::new(api, &config))];

    let mut client = Client::builder(
        discord_token,
        GatewayIntents::non_privileged(),
    )
    .event_handler(Handler { listeners })
    .await
    .context("Error creating client")?;

    client.start().await.context("Client error")?;

    Ok(())
}

pub struct Handler {
    listeners: Vec<Arc<dyn Listener>>,
}
#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!(
            "{} is connected with {} listener(s)",
            ready.user.name,
            self.listeners.len()
        );
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        for listener in &self.listeners {
            if let Err(err) = listener.run(&ctx, &interaction).await {
                tracing::error!(listener = listener.name(), "listener failed: {err:?}");
            }
        }
    }
}
