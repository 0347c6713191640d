#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{extract::Path, http::StatusCode, routing::get, Router};
use serenity::all::Timestamp;
use tokio::net::TcpListener;

use ff_bancheck::commands::Invoker;
use ff_bancheck::config::Settings;
use ff_bancheck::AppContext;

pub const USER: u64 = 77;

/// Udawane API banów: stała odpowiedź + licznik trafień.
pub struct Upstream {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
    uids: Arc<Mutex<Vec<String>>>,
}

impl Upstream {
    pub async fn start(status: StatusCode, body: &'static str) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let uids = Arc::new(Mutex::new(Vec::new()));

        let (h, u) = (hits.clone(), uids.clone());
        let router = Router::new().route(
            "/check_ban/{uid}",
            get(move |Path(uid): Path<String>| {
                let (h, u) = (h.clone(), u.clone());
                async move {
                    h.fetch_add(1, Ordering::SeqCst);
                    u.lock().unwrap().push(uid);
                    (status, body)
                }
            }),
        );

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Self { addr, hits, uids }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn uids(&self) -> Vec<String> {
        self.uids.lock().unwrap().clone()
    }
}

/// Adres, pod którym nikt nie słucha (connection refused).
pub async fn dead_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Serwer, który przyjmuje połączenie i zamyka je bez odpowiedzi.
pub async fn hangup_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else { return };
            drop(socket);
        }
    });
    addr
}

pub fn app_for(base_url: String) -> Arc<AppContext> {
    let mut settings = Settings::default();
    settings.bancheck.base_url = base_url;
    settings.discord.allowed_channel_id = 100;
    AppContext::new(settings).unwrap()
}

pub fn invoker() -> Invoker {
    Invoker {
        user_id: USER,
        avatar_url: "https://cdn.discordapp.com/avatars/77/abc.png".into(),
        sent_at: Timestamp::from_unix_timestamp(1_700_000_000).unwrap(),
    }
}
