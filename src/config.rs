use anyhow::Result;
use serde::{Deserialize, Serialize};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub env: String,
    pub app: App,
    pub discord: Discord,
    pub bancheck: BanCheck,
    pub liveness: Liveness,
    pub health: Health,
    pub logging: Logging,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct App {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Discord {
    pub token: String,
    /// Jedyny kanał, w którym komendy są obsługiwane.
    pub allowed_channel_id: u64,
    pub prefix: String,
    pub intents: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BanCheck {
    /// Baza API, np. `https://rawthug.onrender.com` (bez `/check_ban`).
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Liveness {
    /// Pusty string = self-ping wyłączony.
    pub self_ping_url: String,
    pub self_ping_interval_secs: u64,
    pub presence_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Health {
    pub enabled: bool,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Logging {
    pub json: Option<bool>,
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: "development".into(),
            app: App {
                name: "Free Fire BanCheck".into(),
            },
            discord: Discord {
                token: "".into(),
                allowed_channel_id: 0,
                prefix: "!".into(),
                intents: vec![
                    "GUILDS".into(),
                    "GUILD_MESSAGES".into(),
                    "MESSAGE_CONTENT".into(),
                    "DIRECT_MESSAGES".into(),
                ],
            },
            bancheck: BanCheck {
                base_url: "https://rawthug.onrender.com".into(),
            },
            liveness: Liveness {
                self_ping_url: "https://info-1-rngw.onrender.com".into(),
                self_ping_interval_secs: 300,
                presence_interval_secs: 300,
            },
            health: Health {
                enabled: true,
                host: "0.0.0.0".into(),
                port: 10_000,
            },
            logging: Logging {
                json: Some(false),
                level: Some("info".into()),
            },
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        // Które środowisko?
        let env = std::env::var("BANCHECK_ENV").unwrap_or_else(|_| "development".to_string());

        // Załaduj .env.<env> i .env (jeśli są)
        let _ = dotenvy::from_filename(format!(".env.{}", env));
        let _ = dotenvy::dotenv();

        let defaults = Settings {
            env: env.clone(),
            ..Settings::default()
        };

        // Warstwy: domyślne -> plik TOML -> BANCHECK_* -> zmienne z hostingu (TOKEN, PORT)
        let figment = Figment::from(Serialized::defaults(defaults))
            .merge(Toml::file(format!("config/{}.toml", env)))
            // BANCHECK_DISCORD__ALLOWED_CHANNEL_ID => discord.allowed_channel_id
            .merge(Env::prefixed("BANCHECK_").split("__"))
            // stare nazwy; TOKEN ma pierwszeństwo przed DISCORD_BOT_TOKEN
            .merge(Env::raw().only(&["DISCORD_BOT_TOKEN"]).map(|_| "discord.token".into()))
            .merge(Env::raw().only(&["TOKEN"]).map(|_| "discord.token".into()))
            .merge(Env::raw().only(&["PORT"]).map(|_| "health.port".into()));

        let mut s: Settings = figment.extract()?;
        s.env = env;

        if s.discord.prefix.is_empty() {
            s.discord.prefix = "!".into();
        }

        Ok(s)
    }

    /// Błędy krytyczne startu – brak częściowego uruchomienia.
    pub fn validate(&self) -> Result<()> {
        if self.discord.token.trim().is_empty() {
            anyhow::bail!("Brak tokenu Discord (TOKEN / DISCORD_BOT_TOKEN). Uzupełnij w .env.");
        }
        if self.discord.allowed_channel_id == 0 {
            anyhow::bail!(
                "Brak kanału komend (BANCHECK_DISCORD__ALLOWED_CHANNEL_ID). Uzupełnij w .env."
            );
        }
        Ok(())
    }
}
