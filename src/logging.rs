use crate::config::Settings;
use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::prelude::*;

/// Inicjalizacja logowania.
/// `RUST_LOG` ma pierwszeństwo przed `logging.level`.
pub fn init(settings: &Settings) {
    let level = settings
        .logging
        .level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // JSON dla hostingu (Render zbiera stdout), tekst lokalnie
    let json = settings.logging.json.unwrap_or(false);
    let (text_layer, json_layer) = if json {
        (None, Some(fmt::layer().json()))
    } else {
        (Some(fmt::layer()), None)
    };

    // try_init: drugi init (np. w testach) nie panikuje
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(text_layer)
        .with(json_layer)
        .try_init();
}
