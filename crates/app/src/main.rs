use settings::Settings;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = Settings::new()?;

    let level = settings
        .app
        .and_then(|app| app.level)
        .unwrap_or_else(|| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(format!("spese={level},server={level},engine={level}"))
        .init();

    let (bind, port) = match settings.server {
        Some(server) => (
            server.bind.unwrap_or_else(|| "127.0.0.1".to_string()),
            server.port.unwrap_or(8000),
        ),
        None => ("127.0.0.1".to_string(), 8000),
    };
    let listener = match tokio::net::TcpListener::bind(format!("{bind}:{port}")).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return Ok(());
        }
    };

    server::run_with_listener(engine::Engine::new(), listener).await?;

    Ok(())
}
