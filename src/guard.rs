//! Strażnik kanału komend.
//!
//! Decyzja zależy tylko od (kanał, prefiks, autor-bot) – brak stanu między wiadomościami.

use std::panic::AssertUnwindSafe;

use futures_util::FutureExt;
use serenity::all::{Context, Message};
use tracing::{debug, warn};

use crate::commands::{self, Invoker};
use crate::AppContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardAction {
    /// Boty i zwykły tekst poza kanałem komend.
    Ignore,
    /// Zwykły tekst na kanale komend.
    Delete,
    Dispatch,
    /// Komenda poza kanałem komend – jedno ostrzeżenie, bez wykonania.
    Warn,
}

pub fn route(
    channel_id: u64,
    allowed_channel_id: u64,
    author_is_bot: bool,
    content: &str,
    prefix: &str,
) -> GuardAction {
    if author_is_bot {
        return GuardAction::Ignore;
    }
    let is_command = content.starts_with(prefix);
    match (channel_id == allowed_channel_id, is_command) {
        (true, true) => GuardAction::Dispatch,
        (true, false) => GuardAction::Delete,
        (false, true) => GuardAction::Warn,
        (false, false) => GuardAction::Ignore,
    }
}

pub struct ChannelGuard;

impl ChannelGuard {
    /// Wywoływane z EventHandler::message. Nic stąd nie wycieka do pętli gatewaya.
    pub async fn on_message(ctx: &Context, app: &AppContext, msg: &Message) {
        let fut = Self::handle(ctx, app, msg);
        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(()) => {}
            Err(_) => warn!(msg_id = msg.id.get(), "message handler panicked"),
        }
    }

    async fn handle(ctx: &Context, app: &AppContext, msg: &Message) {
        let discord = &app.settings.discord;
        let action = route(
            msg.channel_id.get(),
            discord.allowed_channel_id,
            msg.author.bot,
            &msg.content,
            &discord.prefix,
        );

        match action {
            GuardAction::Ignore => {}
            GuardAction::Delete => {
                // best-effort; brak uprawnień tylko w logach
                if let Err(e) = msg.delete(&ctx.http).await {
                    warn!(error=?e, channel = msg.channel_id.get(), "delete non-command message failed");
                }
            }
            GuardAction::Warn => {
                let invoker = Invoker::from_message(msg);
                let lang = app.langs.get(invoker.user_id);
                let text = format!(
                    "{} {}",
                    invoker.mention(),
                    lang.wrong_channel(discord.allowed_channel_id)
                );
                if let Err(e) = msg.channel_id.say(&ctx.http, text).await {
                    warn!(error=?e, channel = msg.channel_id.get(), "wrong-channel warning failed");
                }
            }
            GuardAction::Dispatch => {
                let Some(cmd) = commands::parse(&msg.content, &discord.prefix) else {
                    return;
                };
                debug!(?cmd, uid = msg.author.id.get(), "dispatch");
                let invoker = Invoker::from_message(msg);
                if let Some(reply) = commands::execute(app, &invoker, cmd).await {
                    if let Err(e) = commands::send(ctx, msg.channel_id, reply).await {
                        warn!(error=?e, channel = msg.channel_id.get(), "sending reply failed");
                    }
                }
            }
        }
    }
}
