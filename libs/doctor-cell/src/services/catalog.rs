// libs/doctor-cell/src/services/catalog.rs
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use shared_config::AppConfig;

use crate::models::{Doctor, DoctorError};

/// Where the doctor collection comes from.
#[async_trait]
pub trait DoctorSource: Send + Sync {
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, DoctorError>;
}

/// Fetches the collection with a single GET against the configured endpoint.
pub struct HttpDoctorSource {
    client: Client,
    url: String,
}

impl HttpDoctorSource {
    pub fn new(config: &AppConfig) -> Self {
        let client = Client::builder()
            .timeout(config.fetch_timeout())
            .build()
            .unwrap_or_else(|e| {
                error!("Failed to build HTTP client with timeout, using defaults: {}", e);
                Client::new()
            });

        Self {
            client,
            url: config.doctors_api_url.clone(),
        }
    }
}

#[async_trait]
impl DoctorSource for HttpDoctorSource {
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        if self.url.trim().is_empty() {
            return Err(DoctorError::NotConfigured);
        }

        debug!("Fetching doctors from {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Doctor directory error ({}): {}", status, body);
            return Err(DoctorError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let doctors: Vec<Doctor> = serde_json::from_slice(&bytes)?;
        Ok(doctors)
    }
}

/// A fixed collection, handy for wiring the router without a network.
pub struct StaticDoctorSource {
    doctors: Vec<Doctor>,
}

impl StaticDoctorSource {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }
}

#[async_trait]
impl DoctorSource for StaticDoctorSource {
    async fn fetch_doctors(&self) -> Result<Vec<Doctor>, DoctorError> {
        Ok(self.doctors.clone())
    }
}

#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready {
        doctors: Arc<Vec<Doctor>>,
        loaded_at: DateTime<Utc>,
    },
    Failed {
        reason: String,
        failed_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogState {
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogStatus {
    pub state: CatalogState,
    pub doctors: usize,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The doctor collection for the lifetime of the process: fetched once, then read-only.
#[derive(Clone)]
pub struct DoctorCatalog {
    state: Arc<RwLock<LoadState>>,
}

impl Default for DoctorCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl DoctorCatalog {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(LoadState::Loading)),
        }
    }

    /// Already-loaded catalog.
    pub fn ready(doctors: Vec<Doctor>) -> Self {
        Self {
            state: Arc::new(RwLock::new(LoadState::Ready {
                doctors: Arc::new(doctors),
                loaded_at: Utc::now(),
            })),
        }
    }

    /// Run the single fetch. There is no retry: a failure stays visible until restart.
    pub async fn load(&self, source: &dyn DoctorSource) {
        let next = match source.fetch_doctors().await {
            Ok(doctors) => {
                info!("Loaded {} doctors", doctors.len());
                LoadState::Ready {
                    doctors: Arc::new(doctors),
                    loaded_at: Utc::now(),
                }
            }
            Err(e) => {
                error!("Failed to load doctors: {}", e);
                LoadState::Failed {
                    reason: e.to_string(),
                    failed_at: Utc::now(),
                }
            }
        };

        *self.state.write().await = next;
    }

    /// Kick off [`DoctorCatalog::load`] on the runtime; handlers see `Loading` meanwhile.
    pub fn spawn_load(&self, source: Arc<dyn DoctorSource>) -> tokio::task::JoinHandle<()> {
        let catalog = self.clone();
        tokio::spawn(async move {
            catalog.load(source.as_ref()).await;
        })
    }

    pub async fn snapshot(&self) -> LoadState {
        self.state.read().await.clone()
    }

    /// `Ok(None)` while loading, the collection once ready, the failure otherwise.
    pub async fn doctors(&self) -> Result<Option<Arc<Vec<Doctor>>>, DoctorError> {
        match self.snapshot().await {
            LoadState::Loading => Ok(None),
            LoadState::Ready { doctors, .. } => Ok(Some(doctors)),
            LoadState::Failed { reason, .. } => Err(DoctorError::Unavailable(reason)),
        }
    }

    pub async fn status(&self) -> CatalogStatus {
        match self.snapshot().await {
            LoadState::Loading => CatalogStatus {
                state: CatalogState::Loading,
                doctors: 0,
                error: None,
                updated_at: None,
            },
            LoadState::Ready { doctors, loaded_at } => CatalogStatus {
                state: CatalogState::Ready,
                doctors: doctors.len(),
                error: None,
                updated_at: Some(loaded_at),
            },
            LoadState::Failed { reason, failed_at } => CatalogStatus {
                state: CatalogState::Failed,
                doctors: 0,
                error: Some(reason),
                updated_at: Some(failed_at),
            },
        }
    }
}
