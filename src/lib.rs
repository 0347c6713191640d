// src/lib.rs

pub mod bancheck;
pub mod commands;
pub mod config;
pub mod discord;
pub mod guard;
pub mod health;
pub mod i18n;
pub mod liveness;
pub mod logging;

use anyhow::Result;
use once_cell::sync::OnceCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bancheck::BanApi;
use config::Settings;
use i18n::LanguageStore;

use serenity::all::GatewayIntents;

const HTTP_USER_AGENT: &str = "FF-BanCheck/1.0";

/// Kontekst aplikacji przekazywany do każdego handlera.
/// Jedyny współdzielony stan: pula HTTP, preferencje językowe, nazwa bota.
pub struct AppContext {
    pub settings: Settings,
    /// Jedna pula połączeń dla API banów i self-pinga.
    pub http: reqwest::Client,
    pub bancheck: BanApi,
    pub langs: LanguageStore,
    bot_name: OnceCell<String>,
    tasks_started: AtomicBool,
}

impl AppContext {
    /// Kontekst bez logów i bez walidacji (testy, narzędzia).
    pub fn new(settings: Settings) -> Result<Arc<Self>> {
        let http = reqwest::Client::builder()
            .user_agent(HTTP_USER_AGENT)
            .build()?;
        let bancheck = BanApi::new(http.clone(), settings.bancheck.base_url.clone());

        Ok(Arc::new(Self {
            settings,
            http,
            bancheck,
            langs: LanguageStore::new(),
            bot_name: OnceCell::new(),
            tasks_started: AtomicBool::new(false),
        }))
    }

    /// Bootstrap całej aplikacji:
    /// - logi
    /// - walidacja (brak tokenu = koniec, bez częściowego startu)
    /// - klient HTTP + kontekst
    pub async fn bootstrap(settings: Settings) -> Result<Arc<Self>> {
        logging::init(&settings);
        settings.validate()?;

        let ctx = Self::new(settings)?;
        tracing::info!(
            env = %ctx.settings.env,
            base_url = %ctx.bancheck.base_url(),
            channel = ctx.settings.discord.allowed_channel_id,
            "bootstrap done"
        );
        Ok(ctx)
    }

    /// Nazwa bota dla endpointu liveness; „Loading...” do pierwszego READY.
    pub fn bot_name(&self) -> &str {
        self.bot_name.get().map(String::as_str).unwrap_or("Loading...")
    }

    pub fn set_bot_name(&self, name: String) {
        let _ = self.bot_name.set(name); // tylko pierwszy READY
    }

    /// `true` tylko przy pierwszym wywołaniu – READY przychodzi też po reconnectach.
    pub fn claim_background_tasks(&self) -> bool {
        !self.tasks_started.swap(true, Ordering::SeqCst)
    }
}

/// Gotowy zestaw intents:
/// - GUILDS (licznik serwerów w statusie),
/// - GUILD_MESSAGES, DIRECT_MESSAGES, MESSAGE_CONTENT (komendy tekstowe z prefiksem).
pub fn default_gateway_intents() -> GatewayIntents {
    GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT
}

/// Start: endpoint liveness w tle + klient Discorda (blokuje do końca procesu).
pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    if ctx.settings.health.enabled {
        let app = ctx.clone();
        tokio::spawn(async move {
            if let Err(e) = health::serve(app).await {
                tracing::error!(error=?e, "liveness endpoint stopped");
            }
        });
    }

    discord::run_bot(ctx).await
}
