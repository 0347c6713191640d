//! Zadania w tle: self-ping (hosting nie usypia procesu) i status bota.
//! Każde okrążenie ma własną granicę błędów – pętla nigdy się nie kończy.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serenity::all::{ActivityData, Context};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::AppContext;

/// Uruchom obie pętle raz na proces (kolejne READY po reconnectach są ignorowane).
pub fn spawn_tasks(ctx: Context, app: Arc<AppContext>) {
    if !app.claim_background_tasks() {
        debug!("background tasks already running");
        return;
    }

    let liveness = &app.settings.liveness;
    if liveness.self_ping_url.is_empty() {
        info!("self-ping disabled (empty URL)");
    } else {
        let http = app.http.clone();
        let url = liveness.self_ping_url.clone();
        let every = Duration::from_secs(liveness.self_ping_interval_secs.max(1));
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                self_ping(&http, &url).await;
            }
        });
    }

    let every = Duration::from_secs(liveness.presence_interval_secs.max(1));
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            update_presence(&ctx);
        }
    });
}

/// Jeden ping; zwraca status HTTP (albo `None` przy błędzie sieci). Nigdy nie panikuje.
pub async fn self_ping(http: &Client, url: &str) -> Option<u16> {
    match http.get(url).send().await {
        Ok(resp) => {
            let status = resp.status().as_u16();
            debug!(url, status, "self-ping");
            Some(status)
        }
        Err(e) => {
            warn!(error=%e, url, "self-ping failed");
            None
        }
    }
}

pub fn presence_text(guilds: usize) -> String {
    format!("{guilds} servers")
}

/// „Watching N servers” – N z cache gatewaya.
fn update_presence(ctx: &Context) {
    let guilds = ctx.cache.guild_count();
    ctx.set_activity(Some(ActivityData::watching(presence_text(guilds))));
    debug!(guilds, "presence updated");
}
