use std::path::PathBuf;

use anyhow::{bail, Context};
use serde_json::Value;

pub const DEFAULT_SLUG: &str = "restaurante-963";

/// Picks the restaurant slug out of a page path: the segment after `r`
/// when there is one, else the first segment, else [`DEFAULT_SLUG`].
pub fn resolve_slug(path: &str) -> String {
    let parts = path.split('/').filter(|p| !p.is_empty()).collect::<Vec<_>>();
    if let Some(slug) = parts
        .iter()
        .position(|p| *p == "r")
        .and_then(|i| parts.get(i + 1))
    {
        return slug.to_string();
    }
    parts.first().copied().unwrap_or(DEFAULT_SLUG).to_string()
}

/// Resource path of a restaurant document.
pub fn resource_path(slug: &str) -> String {
    format!("/data/restaurants/{slug}.json")
}

/// Somewhere restaurant documents can be read from. Every failure means the
/// same thing to callers: the data is unavailable.
#[allow(async_fn_in_trait)]
pub trait RestaurantSource {
    async fn fetch(&self, slug: &str) -> anyhow::Result<Value>;
}

/// Reads documents over HTTP from `<base_url>/data/restaurants/<slug>.json`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, slug: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), resource_path(slug))
    }
}

impl RestaurantSource for HttpSource {
    async fn fetch(&self, slug: &str) -> anyhow::Result<Value> {
        let url = self.url(slug);
        tracing::debug!("fetching {url}");
        let doc = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("fail to request {url}"))?
            .error_for_status()
            .with_context(|| format!("missing data for {slug}"))?
            .json::<Value>()
            .await
            .with_context(|| format!("fail to parse {url}"))?;
        Ok(doc)
    }
}

/// Reads documents from `<root>/data/restaurants/<slug>.json` on disk.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn file_path(&self, slug: &str) -> anyhow::Result<PathBuf> {
        if slug.is_empty() || slug == "." || slug == ".." || slug.contains(['/', '\\']) {
            bail!("invalid restaurant slug {slug:?}");
        }
        Ok(self
            .root
            .join("data")
            .join("restaurants")
            .join(format!("{slug}.json")))
    }
}

impl RestaurantSource for DirSource {
    async fn fetch(&self, slug: &str) -> anyhow::Result<Value> {
        let path = self.file_path(slug)?;
        tracing::debug!("reading {}", path.display());
        let raw = tokio::fs::read(&path)
            .await
            .with_context(|| format!("missing data for {slug}"))?;
        let doc = serde_json::from_slice(&raw)
            .with_context(|| format!("fail to parse {}", path.display()))?;
        Ok(doc)
    }
}

/// The source picked by configuration.
#[derive(Debug, Clone)]
pub enum AnySource {
    Http(HttpSource),
    Dir(DirSource),
}

impl RestaurantSource for AnySource {
    async fn fetch(&self, slug: &str) -> anyhow::Result<Value> {
        match self {
            Self::Http(source) => source.fetch(slug).await,
            Self::Dir(source) => source.fetch(slug).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_resolve_slug() {
        assert_eq!(resolve_slug("/r/la-casa"), "la-casa");
        assert_eq!(resolve_slug("/es/r/la-casa/menu"), "la-casa");
        assert_eq!(resolve_slug("//r//la-casa/"), "la-casa");
        assert_eq!(resolve_slug("/la-casa"), "la-casa");
        assert_eq!(resolve_slug("/la-casa/r"), "la-casa");
        assert_eq!(resolve_slug("/r"), "r");
        assert_eq!(resolve_slug("/"), DEFAULT_SLUG);
        assert_eq!(resolve_slug(""), DEFAULT_SLUG);
    }

    #[test]
    fn test_http_url() {
        let source = HttpSource::new("http://127.0.0.1:8080/");
        assert_eq!(
            source.url("la-casa"),
            "http://127.0.0.1:8080/data/restaurants/la-casa.json"
        );
    }

    #[test]
    fn test_dir_source_refuses_path_tricks() {
        let source = DirSource::new("/srv/site");
        for slug in ["", ".", "..", "../etc/passwd", "a\\b"] {
            assert!(source.file_path(slug).is_err(), "{slug:?} should be refused");
        }
        assert_eq!(
            source.file_path("la-casa").unwrap(),
            PathBuf::from("/srv/site/data/restaurants/la-casa.json")
        );
    }

    #[tokio::test]
    async fn test_dir_source_fetch() {
        let dir = tempfile::TempDir::new().unwrap();
        let restaurants = dir.path().join("data/restaurants");
        std::fs::create_dir_all(&restaurants).unwrap();
        std::fs::write(restaurants.join("la-casa.json"), r#"{"name":{"es":"La Casa"}}"#).unwrap();
        std::fs::write(restaurants.join("broken.json"), "{ not json").unwrap();

        let source = AnySource::Dir(DirSource::new(dir.path()));
        let doc = source.fetch("la-casa").await.unwrap();
        assert_eq!(doc, json!({ "name": { "es": "La Casa" } }));

        assert!(source.fetch("broken").await.is_err());
        assert!(source.fetch("missing").await.is_err());
    }
}
