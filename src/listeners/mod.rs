use serenity::all::{Context, Interaction};

pub mod deny;

/// Receives every interaction the bot sees and decides for itself whether to act on it
#[serenity::async_trait]
pub trait Listener: Send + Sync {
    fn name(&self) -> &str;
    async fn run(&self, ctx: &Context, interaction: &Interaction) -> anyhow::Result<()>;
}
