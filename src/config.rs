use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub access_code: Option<String>,
    pub s3: Option<S3Config>,
}

#[derive(Clone, Debug)]
pub struct S3Config {
    pub endpoint: String,
    pub region: String,
    pub bucket: String,
    pub access_key: String,
    pub secret_key: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://screendock.db?mode=rwc".to_string());

        let access_code = std::env::var("ACCESS_CODE").ok().filter(|s| !s.trim().is_empty());

        // Without S3_BUCKET the server falls back to an in-memory store,
        // suitable for local development only.
        let s3 = match std::env::var("S3_BUCKET") {
            Ok(bucket) => Some(S3Config {
                endpoint: std::env::var("S3_ENDPOINT").context("S3_ENDPOINT")?,
                region: std::env::var("S3_REGION").unwrap_or_else(|_| "auto".to_string()),
                bucket,
                access_key: std::env::var("S3_ACCESS_KEY").context("S3_ACCESS_KEY")?,
                secret_key: std::env::var("S3_SECRET_KEY").context("S3_SECRET_KEY")?,
            }),
            Err(_) => None,
        };

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            access_code,
            s3,
        })
    }
}
