use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};

use crate::{
    config::AppConfig,
    db::{DbPool, OrmConn},
    media::MediaClient,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub media: MediaClient,
    pub admin_email: String,
    /// Argon2 hash of the configured admin password; the plaintext is
    /// dropped after startup.
    pub admin_password_hash: String,
}

impl AppState {
    pub fn new(config: &AppConfig, pool: DbPool, orm: OrmConn) -> anyhow::Result<Self> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let admin_password_hash = argon2
            .hash_password(config.admin_password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();

        Ok(Self {
            pool,
            orm,
            media: MediaClient::new(&config.media_upload_url, &config.media_upload_preset),
            admin_email: config.admin_email.clone(),
            admin_password_hash,
        })
    }
}
