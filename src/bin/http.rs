#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use staff_scheduler::{RunContext, SchedulerConfig, http_api};
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let addr: SocketAddr = std::env::var("STAFF_SCHEDULER_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let config = SchedulerConfig::from_env()?;
    let context = RunContext::new(config)?;
    tracing::info!("staff-scheduler HTTP API on http://{addr}");
    http_api::serve(addr, context).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {}
