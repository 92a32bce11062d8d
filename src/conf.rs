use config::{Config, ConfigError, Environment};
use lazy_static::lazy_static;
use serde::Deserialize;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub base_url: String,
    pub service_name: String,
    pub listen_port: String,
    pub database_url: String,
    pub database_pool_max_connections: u32,
    //email
    pub from_email: String,
    pub smtp_user: String,
    pub smtp_pass: String,
    pub smtp_server: String,
    pub smtp_port: u16,
    //auth
    pub session_ttl_hours: i64,
    //set to 0 to disable the self ping
    pub keepalive_interval_secs: u64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let conf = Config::builder()
            .set_default("service_name", "workstudy")?
            .set_default("listen_port", "8080")?
            .set_default("database_pool_max_connections", 5_i64)?
            .set_default("session_ttl_hours", 24_i64)?
            .set_default("keepalive_interval_secs", 0_i64)?
            .add_source(Environment::default())
            .build()?;
        let s: Settings = conf.try_deserialize()?;
        Ok(s)
    }
}

lazy_static! {
    pub static ref settings: Settings = Settings::new().expect("improperly configured");
}
