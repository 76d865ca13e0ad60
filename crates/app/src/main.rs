use std::{sync::Arc, time::Duration};

use engine::{Dispatcher, Disabled, EmailChannel, SmsChannel, TransactionHook};
use migration::{Migrator, MigratorTrait};
use notifier::{HttpMailer, TwilioSms};
use settings::Database;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "ledgerline={level},server={level},engine={level},notifier={level},migration={level}",
            level = settings.app.level
        ))
        .init();

    let db = parse_database(&settings.server.database).await?;
    let engine = engine::Engine::builder().database(db).build().await?;
    let hook = TransactionHook::new(dispatcher(&settings.notifications)?);

    let bind = settings
        .server
        .bind
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let addr = format!("{}:{}", bind, settings.server.port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::run_with_listener(engine, hook, listener).await?;

    Ok(())
}

/// Build the alert channels. A channel without settings stays disabled.
fn dispatcher(
    config: &settings::Notifications,
) -> Result<Dispatcher, Box<dyn std::error::Error + Send + Sync>> {
    let client = notifier::client(Duration::from_secs(config.timeout_secs))?;

    let email: Arc<dyn EmailChannel> = match &config.email {
        Some(email) => {
            tracing::info!("email notifications enabled");
            Arc::new(HttpMailer::new(client.clone(), email.clone()))
        }
        None => {
            tracing::info!("email notifications disabled: no settings");
            Arc::new(Disabled)
        }
    };
    let sms: Arc<dyn SmsChannel> = match &config.sms {
        Some(sms) => {
            tracing::info!("sms notifications enabled");
            Arc::new(TwilioSms::new(client, sms.clone()))
        }
        None => {
            tracing::info!("sms notifications disabled: no settings");
            Arc::new(Disabled)
        }
    };

    Ok(Dispatcher::new(email, sms))
}

async fn parse_database(
    config: &settings::Database,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let url = match config {
        Database::Memory => String::from("sqlite::memory:"),
        Database::Sqlite(path) => format!("sqlite:{}?mode=rwc", path),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    tracing::info!("database ready");
    Ok(database)
}
