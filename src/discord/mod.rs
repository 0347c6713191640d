// src/discord/mod.rs
use std::sync::Arc;
use anyhow::Result;

use crate::AppContext;
use crate::guard::ChannelGuard;
use crate::liveness;

use serenity::all::*;
use serenity::async_trait;

pub struct Handler {
    pub app: Arc<AppContext>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        let name = ready.user.tag();
        tracing::info!("connected as {} ({} servers)", name, ready.guilds.len());
        self.app.set_bot_name(name);

        // Self-ping + status – tylko przy pierwszym READY
        liveness::spawn_tasks(ctx, self.app.clone());
    }

    async fn resume(&self, _ctx: Context, _event: ResumedEvent) {
        tracing::info!("gateway session resumed");
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        ChannelGuard::on_message(&ctx, &self.app, &msg).await;
    }
}

fn intents_from_settings(names: &[String]) -> GatewayIntents {
    let mut i = GatewayIntents::empty();
    for n in names {
        match n.as_str() {
            "GUILDS" => i |= GatewayIntents::GUILDS,
            "GUILD_MESSAGES" => i |= GatewayIntents::GUILD_MESSAGES,
            "DIRECT_MESSAGES" => i |= GatewayIntents::DIRECT_MESSAGES,
            "MESSAGE_CONTENT" => i |= GatewayIntents::MESSAGE_CONTENT,
            "GUILD_MEMBERS" => i |= GatewayIntents::GUILD_MEMBERS,
            other => tracing::warn!(intent = other, "unknown intent in config, skipped"),
        }
    }
    if i.is_empty() {
        i = crate::default_gateway_intents();
    }
    i
}

pub async fn run_bot(ctx: Arc<AppContext>) -> Result<()> {
    // token sprawdzony już w Settings::validate (bootstrap)
    let token = &ctx.settings.discord.token;
    let intents = intents_from_settings(&ctx.settings.discord.intents);

    let handler = Handler { app: ctx.clone() };

    let mut client = serenity::Client::builder(token, intents)
        .event_handler(handler)
        .await?;

    tracing::info!("Discord client starting…");
    client.start().await?;
    Ok(())
}
