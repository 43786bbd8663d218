use std::path::PathBuf;

use reqwest::Url;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Адрес GraphQL API.
    pub api_url: String,

    /// Токен доступа к API.
    pub token: Option<String>,

    /// Таймаут запросов к API в секундах.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:4000/".to_owned(),
            token: None,
            timeout_secs: 5,
        }
    }
}

/// Загружает конфигурацию.
/// Если файла нет, он будет создан со значениями по-умолчанию.
pub fn load(path: PathBuf) -> anyhow::Result<Config> {
    let mut cfg: Config = confy::load_path(path)?;

    normalize(&mut cfg)?;

    Ok(cfg)
}

pub fn normalize(cfg: &mut Config) -> Result<(), Error> {
    cfg.api_url = cfg.api_url.trim().to_owned();

    let url = Url::parse(&cfg.api_url).map_err(|_| Error::InvalidUrl(cfg.api_url.clone()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::InvalidUrl(cfg.api_url.clone()));
    }

    // Пустой токен в файле то же самое что отсутствующий.
    cfg.token = cfg
        .token
        .take()
        .map(|t| t.trim().to_owned())
        .filter(|t| !t.is_empty());

    if cfg.timeout_secs == 0 {
        return Err(Error::ZeroTimeout);
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid api_url \"{0}\"")]
    InvalidUrl(String),

    #[error("timeout_secs should be positive")]
    ZeroTimeout,
}
