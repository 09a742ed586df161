use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::gate::AuthenticationGate;
use account_service::domain::account::gate::PasswordStrategy;
use account_service::domain::account::ports::ConfirmationNotifier;
use account_service::domain::account::service::AccountService;
use account_service::domain::item::service::ItemService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::notifiers::HttpEmailNotifier;
use account_service::outbound::notifiers::LogNotifier;
use account_service::outbound::repositories::PostgresAccountRepository;
use account_service::outbound::repositories::PostgresItemRepository;
use auth::JwtHandler;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        base_url = %config.app.base_url,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let tokens = Arc::new(JwtHandler::new(config.jwt.secret.as_bytes()));

    let account_repository = Arc::new(PostgresAccountRepository::new(pg_pool.clone()));
    let item_repository = Arc::new(PostgresItemRepository::new(pg_pool));

    // An empty API key means no real mail transport is configured; fall back
    // to logging the confirmation links
    let notifier: Arc<dyn ConfirmationNotifier> = if config.email.api_key.is_empty() {
        tracing::info!(transport = "log", "Confirmation notifier configured");
        Arc::new(LogNotifier::new(config.app.base_url.clone()))
    } else {
        tracing::info!(
            transport = "http",
            api_url = %config.email.api_url,
            "Confirmation notifier configured"
        );
        Arc::new(HttpEmailNotifier::new(
            config.email.api_url.clone(),
            config.email.api_key.clone(),
            config.email.from_address.clone(),
            config.app.base_url.clone(),
        ))
    };

    let account_service = Arc::new(AccountService::new(
        Arc::clone(&account_repository),
        notifier,
        Arc::clone(&tokens),
    ));
    let item_service = Arc::new(ItemService::new(item_repository));

    let credentials = PasswordStrategy::new(account_repository);
    let gate = Arc::new(AuthenticationGate::new(credentials, tokens));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, item_service, gate);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
