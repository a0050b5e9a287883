//! Runtime settings: defaults, then `community-board.toml`, then `CB__*`
//! environment variables (e.g. `CB__COMMUNITY__SHARE_URL`).

use anyhow::Context;
use cb_core::CommunityConfig;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Default filter when `RUST_LOG` is unset
    pub log_level: String,
    pub log_json: bool,
    pub community: CommunityConfig,
}

pub fn load() -> anyhow::Result<Settings> {
    Config::builder()
        .set_default("log_level", "info")?
        .set_default("log_json", false)?
        .set_default("community.share_url", CommunityConfig::default().share_url)?
        .add_source(File::with_name("community-board").required(false))
        .add_source(Environment::with_prefix("CB").separator("__"))
        .build()
        .context("failed to read settings")?
        .try_deserialize()
        .context("invalid settings")
}
