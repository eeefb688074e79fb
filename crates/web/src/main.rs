//! Upload server for turning line-per-slide text files into PPTX slideshows.

use anyhow::{Context, Result};
use clap::Parser;
use slidegen_web::{router, ServerConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let config = ServerConfig::parse();

    // Initialize logging
    if config.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    std::fs::create_dir_all(&config.upload_dir).with_context(|| {
        format!(
            "Failed to create upload directory: {}",
            config.upload_dir.display()
        )
    })?;

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    log::info!(
        "Listening on {}, uploads in {}",
        config.bind_addr,
        config.upload_dir.display()
    );

    axum::serve(listener, router(config)).await?;
    Ok(())
}
