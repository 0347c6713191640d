use anyhow::Result;
use serenity::all::{
    ChannelId, Colour, Context, CreateEmbed, CreateEmbedFooter, CreateMessage, Message, Timestamp,
};
use tracing::{debug, info, warn};

use crate::bancheck::{is_valid_uid, BanRecord, LookupOutcome};
use crate::i18n::Lang;
use crate::AppContext;

/* =========================================
   Stałe karty wyniku
   ========================================= */

pub const BRAND_FOOTER: &str = "📌 Garena Free Fire";
pub const COLOUR_BANNED: u32 = 0xFF0000;
pub const COLOUR_CLEAN: u32 = 0x00FF00;
pub const IMAGE_BANNED: &str = "https://i.ibb.co/4gj5P7DH/banned.gif";
pub const IMAGE_CLEAN: &str = "https://i.ibb.co/SwKrD67z/notbanned.gif";

/* =========================================
   Parsowanie komend tekstowych
   ========================================= */

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `!lang <code>`; brak argumentu → `None`.
    Lang(Option<String>),
    /// `!ID <uid>` – reszta wiadomości, przycięta.
    CheckBan(String),
    Unknown(String),
}

/// Nazwy komend są case-sensitive (`!ID`, nie `!id`).
pub fn parse(content: &str, prefix: &str) -> Option<Command> {
    let body = content.strip_prefix(prefix)?;
    let (name, rest) = match body.find(char::is_whitespace) {
        Some(i) => (&body[..i], &body[i..]),
        None => (body, ""),
    };

    let cmd = match name {
        "lang" => Command::Lang(rest.split_whitespace().next().map(str::to_string)),
        "ID" => Command::CheckBan(rest.trim().to_string()),
        other => Command::Unknown(other.to_string()),
    };
    Some(cmd)
}

/* =========================================
   Odpowiedzi
   ========================================= */

/// Kto wywołał komendę – tylko to, czego potrzebują odpowiedzi.
#[derive(Debug, Clone)]
pub struct Invoker {
    pub user_id: u64,
    /// Avatar albo domyślny avatar Discorda.
    pub avatar_url: String,
    pub sent_at: Timestamp,
}

impl Invoker {
    pub fn from_message(msg: &Message) -> Self {
        Self {
            user_id: msg.author.id.get(),
            avatar_url: msg.author.face(),
            sent_at: msg.timestamp,
        }
    }

    pub fn mention(&self) -> String {
        format!("<@{}>", self.user_id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Text(String),
    Card(BanCard),
}

/// Model embeda z wynikiem (bez zależności od buildera serenity – łatwy w testach).
#[derive(Debug, Clone, PartialEq)]
pub struct BanCard {
    pub title: String,
    pub colour: u32,
    pub description: String,
    pub image_url: String,
    pub footer: String,
    pub thumbnail_url: String,
    pub timestamp: Timestamp,
}

impl BanCard {
    pub fn build(rec: &BanRecord, lang: Lang, invoker: &Invoker) -> Self {
        let l = lang.labels();
        let (title, colour, description, image) = if rec.is_banned {
            (
                lang.banned_title(),
                COLOUR_BANNED,
                format!(
                    "**• {}:** {}\n**• {}:** {}\n**• {}:** {}\n**• {}:** {}",
                    l.reason,
                    lang.banned_reason(),
                    l.duration,
                    rec.period,
                    l.nickname,
                    rec.nickname,
                    l.region,
                    rec.region
                ),
                IMAGE_BANNED,
            )
        } else {
            (
                lang.clean_title(),
                COLOUR_CLEAN,
                format!(
                    "**• {}:** {}\n**• {}:** {}\n**• {}:** {}",
                    l.status,
                    lang.clean_status(),
                    l.nickname,
                    rec.nickname,
                    l.region,
                    rec.region
                ),
                IMAGE_CLEAN,
            )
        };

        Self {
            title: title.to_string(),
            colour,
            description,
            image_url: image.to_string(),
            footer: BRAND_FOOTER.to_string(),
            thumbnail_url: invoker.avatar_url.clone(),
            timestamp: invoker.sent_at,
        }
    }

    pub fn to_embed(&self) -> CreateEmbed {
        CreateEmbed::new()
            .title(&self.title)
            .colour(Colour::new(self.colour))
            .description(&self.description)
            .image(&self.image_url)
            .thumbnail(&self.thumbnail_url)
            .footer(CreateEmbedFooter::new(&self.footer))
            .timestamp(self.timestamp)
    }
}

/* =========================================
   Handlery
   ========================================= */

/// `None` dla nieznanych komend – nic nie wysyłamy.
pub async fn execute(app: &AppContext, invoker: &Invoker, cmd: Command) -> Option<Reply> {
    match cmd {
        Command::Lang(code) => Some(set_language(app, invoker, code.as_deref())),
        Command::CheckBan(raw) => Some(check_ban(app, invoker, &raw).await),
        Command::Unknown(name) => {
            debug!(command = %name, uid = invoker.user_id, "unknown command ignored");
            None
        }
    }
}

pub fn set_language(app: &AppContext, invoker: &Invoker, code: Option<&str>) -> Reply {
    let mention = invoker.mention();
    match code.map(str::parse::<Lang>) {
        Some(Ok(lang)) => {
            app.langs.set(invoker.user_id, lang);
            info!(uid = invoker.user_id, lang = %lang, "language preference set");
            Reply::Text(format!("{mention} {}", lang.language_set()))
        }
        _ => {
            let current = app.langs.get(invoker.user_id);
            Reply::Text(format!("{mention} {}", current.invalid_language()))
        }
    }
}

pub async fn check_ban(app: &AppContext, invoker: &Invoker, raw: &str) -> Reply {
    let mention = invoker.mention();
    let lang = app.langs.get(invoker.user_id);
    let uid = raw.trim();

    if !is_valid_uid(uid) {
        return Reply::Text(format!("{mention} {}", lang.invalid_uid()));
    }

    match app.bancheck.lookup(uid).await {
        Err(e) => {
            warn!(error=?e, uid, "ban lookup failed");
            Reply::Text(format!("{mention} ⚠️ Error:\n```{e}```"))
        }
        Ok(LookupOutcome::Found(rec)) => {
            info!(uid, banned = rec.is_banned, "ban lookup ok");
            Reply::Card(BanCard::build(&rec, lang, invoker))
        }
        Ok(LookupOutcome::NotFound { .. } | LookupOutcome::Unavailable(_)) => {
            Reply::Text(format!("{mention} {}", lang.unavailable()))
        }
    }
}

/// Wysyła odpowiedź na kanał, z którego przyszła komenda.
pub async fn send(ctx: &Context, channel_id: ChannelId, reply: Reply) -> Result<()> {
    match reply {
        Reply::Text(text) => {
            channel_id.say(&ctx.http, text).await?;
        }
        Reply::Card(card) => {
            channel_id
                .send_message(&ctx.http, CreateMessage::new().embed(card.to_embed()))
                .await?;
        }
    }
    Ok(())
}
