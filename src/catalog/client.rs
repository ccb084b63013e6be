use anyhow::{Context, Result};

use super::CatalogSnapshot;

pub trait CatalogClient {
    fn fetch_snapshot(&self) -> Result<CatalogSnapshot>;
}

pub struct HttpCatalogClient {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpCatalogClient {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(format!("ncps/{}", crate::VERSION))
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl CatalogClient for HttpCatalogClient {
    fn fetch_snapshot(&self) -> Result<CatalogSnapshot> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .with_context(|| format!("GET {}", self.url))?;
        let resp = resp.error_for_status().context("catalog status")?;
        resp.json().context("parse catalog response")
    }
}
