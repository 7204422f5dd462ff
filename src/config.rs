use std::path::PathBuf;

use anyhow::Context;
use derive_builder::Builder;

use crate::source::{AnySource, DirSource, HttpSource};

#[derive(Debug, Clone, Builder)]
pub struct Config {
    #[builder(setter(into), default = "String::from(\"127.0.0.1\")")]
    pub host: String,
    #[builder(default = "8080")]
    pub port: u16,
    /// Site root holding `data/restaurants/*.json`.
    #[builder(setter(into), default = "PathBuf::from(\".\")")]
    pub data_dir: PathBuf,
    /// When set, documents are fetched over HTTP instead of read from `data_dir`.
    #[builder(setter(into, strip_option), default)]
    pub data_url: Option<String>,
}

impl Config {
    /// Reads `PROFILE_*` variables, after loading a `.env` file if present.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut builder = ConfigBuilder::default();
        if let Some(host) = var("PROFILE_HOST") {
            builder.host(host);
        }
        if let Some(port) = var("PROFILE_PORT") {
            let port = port
                .parse::<u16>()
                .with_context(|| format!("PROFILE_PORT is not a port number: {port}"))?;
            builder.port(port);
        }
        if let Some(dir) = var("PROFILE_DATA_DIR") {
            builder.data_dir(dir);
        }
        if let Some(url) = var("PROFILE_DATA_URL").filter(|url| !url.is_empty()) {
            builder.data_url(url);
        }
        Ok(builder.build()?)
    }

    pub fn source(&self) -> AnySource {
        match &self.data_url {
            Some(url) => AnySource::Http(HttpSource::new(url.as_str())),
            None => AnySource::Dir(DirSource::new(&self.data_dir)),
        }
    }
}
