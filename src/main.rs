mod bot;
mod config;
mod controller;
mod error;
mod middleware;
mod model;
mod router;
mod service;
mod state;

use std::sync::Arc;

use serenity::http::Http;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::error::AppError;
use crate::service::admin::session::AdminSessionService;
use crate::service::discord::messenger::{DiscordMessenger, Messenger};
use crate::service::signup::coordinator::SignupCoordinator;
use crate::service::signup::registry::SignupRegistry;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // The bot client builds its own gateway connection; announcement posting
    // and DMs go through this REST client.
    let http = Arc::new(Http::new(&config.discord_bot_token));
    let messenger: Arc<dyn Messenger> = Arc::new(DiscordMessenger::new(http));

    let registry = SignupRegistry::default();
    let coordinator = Arc::new(SignupCoordinator::new(
        registry,
        messenger,
        config.signup_channel_id,
        config.notify_role_id,
    ));

    let admin_sessions = match &config.admin_password {
        Some(password) => AdminSessionService::new(password.clone()),
        None => {
            let (service, password) = AdminSessionService::with_generated_password();
            tracing::info!("Controller password: {}", password);
            service
        }
    };

    tracing::info!("Starting server");

    let addr = format!("{}:{}", config.host, config.port);

    // Start Discord bot in a separate task
    let bot_coordinator = coordinator.clone();
    tokio::spawn(async move {
        if let Err(e) = bot::start::start_bot(&config, bot_coordinator).await {
            tracing::error!("Discord bot error: {}", e);
        }
    });

    let app = router::router(AppState::new(coordinator, admin_sessions));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Controller dashboard available at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
