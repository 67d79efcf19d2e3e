use std::{sync::Arc, time::Duration};

use engine::{AlertWatcher, Store};
use server::ServerConfig;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;
    let mut tasks = tokio::task::JoinSet::new();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "mockbank={level},server={level},engine={level},tower_http={level}",
            level = settings.app.level
        ))
        .init();

    let store = Arc::new(Store::new());

    let addr = format!("{}:{}", settings.server.bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|err| {
        tracing::error!("failed to bind server listener on {addr}: {err}");
        err
    })?;

    let config = ServerConfig {
        allowed_origin: settings.server.allowed_origin,
        allow_reset: settings.server.allow_reset,
    };
    {
        let store = Arc::clone(&store);
        tasks.spawn(async move {
            if let Err(err) = server::run_with_listener(store, config, listener).await {
                tracing::error!("server failed: {err}");
            }
        });
    }

    if settings.watcher.enabled {
        let period = Duration::from_secs(settings.watcher.interval_secs.max(1));
        tasks.spawn(async move {
            tracing::info!("Starting alert watcher every {}s", period.as_secs());
            watch(store, period).await;
        });
    }

    while tasks.join_next().await.is_some() {
        tasks.shutdown().await;
    }

    Ok(())
}

async fn watch(store: Arc<Store>, period: Duration) {
    let mut watcher = AlertWatcher::new();
    let mut ticker = tokio::time::interval(period);

    loop {
        ticker.tick().await;
        match watcher.run_once(&store, chrono::Local::now().naive_local()) {
            Ok(alerts) => {
                for alert in alerts {
                    tracing::info!(kind = %alert.kind, "watcher posted alert: {}", alert.message);
                }
            }
            Err(err) => tracing::warn!("watcher run failed: {err}"),
        }
    }
}
