pub mod admin;
pub mod serve;

use anyhow::Context;

use crate::config::AppConfig;

pub(crate) fn load_config() -> anyhow::Result<AppConfig> {
    AppConfig::from_env().context("refusing to start with incomplete configuration")
}
