use anyhow::Result;
use std::sync::Arc;
use ff_bancheck::{config::Settings, AppContext, run};

// Jeden wątek: gateway, obie pętle w tle i komendy na jednym schedulerze.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    let ctx: Arc<AppContext> = AppContext::bootstrap(settings).await?;
    run(ctx).await
}
