use eyre::Report;
use hostadmin_core::{AdminClient, AdminSession};
use hostadmin_primitives::models::AppConfig;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

pub fn load_env() {
    if dotenvy::dotenv().is_ok() {
        info!("Loaded .env file");
    } else {
        info!("No .env file found, using system environment");
    }
}

pub async fn start_session(config: &AppConfig) -> Result<AdminSession, Report> {
    let client = AdminClient::from_config(&config.api_details)?;
    let session = client
        .login(
            &config.api_details.admin_email,
            &config.api_details.admin_password,
        )
        .await?;
    Ok(session)
}

/// Reads one line from stdin after printing `prompt` on stderr.
pub async fn prompt_line(prompt: &str) -> Result<String, Report> {
    let mut err = tokio::io::stderr();
    err.write_all(prompt.as_bytes()).await?;
    err.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
