use eyre::eyre;
use eyre::Report;
use secrecy::SecretString;
use std::env;

#[derive(Debug, Clone)]
pub struct ApiInfo {
    pub api_url: String,
    pub admin_email: String,
    pub admin_password: SecretString,
    pub http_timeout_secs: u64,
}

impl ApiInfo {
    pub fn new() -> Result<Self, Report> {
        Ok(Self {
            api_url: env::var("HOSTADMIN_API_URL")
                .unwrap_or_else(|_| "https://api.hostadmin.io/v1".into()),

            admin_email: env::var("HOSTADMIN_EMAIL")
                .map_err(|_| eyre!("HOSTADMIN_EMAIL must be set"))?,

            admin_password: SecretString::from(
                env::var("HOSTADMIN_PASSWORD")
                    .map_err(|_| eyre!("HOSTADMIN_PASSWORD must be set"))?,
            ),

            http_timeout_secs: env::var("HOSTADMIN_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".into())
                .parse()
                .map_err(|e| eyre!("HOSTADMIN_HTTP_TIMEOUT_SECS is not a number: {}", e))?,
        })
    }
}
