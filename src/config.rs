use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub admin_email: String,
    pub admin_password: String,
    pub media_upload_url: String,
    pub media_upload_preset: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let admin_email = env::var("ADMIN_EMAIL")?;
        let admin_password = env::var("ADMIN_PASSWORD")?;
        let media_upload_url = env::var("MEDIA_UPLOAD_URL")?;
        let media_upload_preset =
            env::var("MEDIA_UPLOAD_PRESET").unwrap_or_else(|_| "unsigned".to_string());
        Ok(Self {
            database_url,
            host,
            port,
            admin_email,
            admin_password,
            media_upload_url,
            media_upload_preset,
        })
    }
}
