//! Destinations for accepted defects

use crate::models::{DefectRecord, ManagerConfig};
use crate::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Receives every defect that passed validation
#[async_trait]
pub trait DefectManager: Send + Sync {
    async fn save(&self, record: &DefectRecord) -> Result<()>;
}

/// Prints each record as pretty JSON
pub struct StdoutManager;

#[async_trait]
impl DefectManager for StdoutManager {
    async fn save(&self, record: &DefectRecord) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(record)?);
        Ok(())
    }
}

/// Appends one JSON object per line to a file
pub struct JsonLinesManager {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonLinesManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line; the lock keeps concurrent saves from interleaving
    fn append_line(&self, line: &str) -> Result<()> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| anyhow::anyhow!("Writer lock for {} is poisoned", self.path.display()))?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open {}", self.path.display()))?;
        file.write_all(line.as_bytes())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[async_trait]
impl DefectManager for JsonLinesManager {
    async fn save(&self, record: &DefectRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');
        self.append_line(&line)
    }
}

/// POSTs each record as JSON to an HTTP endpoint
#[cfg(feature = "http-forward")]
pub struct HttpManager {
    client: reqwest::Client,
    endpoint: String,
}

#[cfg(feature = "http-forward")]
impl HttpManager {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[cfg(feature = "http-forward")]
#[async_trait]
impl DefectManager for HttpManager {
    async fn save(&self, record: &DefectRecord) -> Result<()> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(record)
            .send()
            .await
            .with_context(|| format!("Failed to forward defect to {}", self.endpoint))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Defect endpoint returned {}: {}", status, body);
        }
        Ok(())
    }
}

/// Pick a manager from config: endpoint, then output file, then stdout
pub fn build_manager(config: &ManagerConfig) -> Result<Box<dyn DefectManager>> {
    if let Some(endpoint) = &config.endpoint {
        #[cfg(feature = "http-forward")]
        {
            return Ok(Box::new(HttpManager::new(endpoint.clone())?));
        }
        #[cfg(not(feature = "http-forward"))]
        {
            anyhow::bail!(
                "manager.endpoint is set to {} but defectd was built without the http-forward feature",
                endpoint
            );
        }
    }

    if let Some(output) = &config.output {
        return Ok(Box::new(JsonLinesManager::new(output.clone())));
    }

    Ok(Box::new(StdoutManager))
}
