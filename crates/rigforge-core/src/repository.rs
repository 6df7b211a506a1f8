//! Saved-build repository over a pluggable [`BuildStore`].
//!
//! The repository keeps the scope's build list in memory and persists the
//! whole list on every change (write-through). The in-memory list is only
//! replaced after the store accepts the new document, so a failed write
//! never leaves a build looking saved or deleted.
//!
//! Stored entries that fail schema validation are kept verbatim: they are
//! rewritten unchanged with the rest of the list, `load`/`delete` on them
//! fail with `CorruptRecord`, and `list` skips them.

use chrono::Utc;
use rigforge_state::{BuildStore, StorageError, StoreScope};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::{BuildConfig, BuildId, ConfiguratorError, Result, SavedBuild};
use crate::metrics::METRICS;
use crate::obs;
use crate::scoring::compute_metrics;

/// Name used when a build is saved with a blank name.
pub const UNTITLED_BUILD_NAME: &str = "Untitled build";

/// Default scope when none is configured.
pub const DEFAULT_SCOPE: &str = "default";

/// Where and how much a repository stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    pub scope: StoreScope,
    /// Maximum number of saved builds in the scope (`None` = unbounded).
    pub max_builds: Option<usize>,
}

impl RepositoryConfig {
    pub fn new(scope: StoreScope) -> Self {
        Self {
            scope,
            max_builds: None,
        }
    }

    pub fn with_max_builds(mut self, max_builds: usize) -> Self {
        self.max_builds = Some(max_builds);
        self
    }

    /// Create from environment variables
    ///
    /// Reads:
    /// - RIGFORGE_SCOPE (optional, default: "default")
    /// - RIGFORGE_MAX_BUILDS (optional, unbounded when unset)
    pub fn from_env() -> Result<Self> {
        let scope = std::env::var("RIGFORGE_SCOPE").unwrap_or_else(|_| DEFAULT_SCOPE.to_string());
        let mut config = Self::new(StoreScope::new(scope)?);
        if let Ok(raw) = std::env::var("RIGFORGE_MAX_BUILDS") {
            let max = raw.trim().parse::<usize>().map_err(|_| {
                ConfiguratorError::InvalidConfig(format!(
                    "RIGFORGE_MAX_BUILDS must be a non-negative integer, got '{raw}'"
                ))
            })?;
            config = config.with_max_builds(max);
        }
        Ok(config)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    raw: Value,
    decoded: std::result::Result<SavedBuild, String>,
}

impl Entry {
    fn valid(build: SavedBuild, raw: Value) -> Self {
        Self {
            raw,
            decoded: Ok(build),
        }
    }

    fn decode(raw: Value) -> Self {
        let decoded = decode_saved_build(&raw);
        Self { raw, decoded }
    }

    fn id(&self) -> Option<&str> {
        match &self.decoded {
            Ok(build) => Some(build.id.as_str()),
            Err(_) => self.raw.get("id").and_then(Value::as_str),
        }
    }
}

fn decode_saved_build(raw: &Value) -> std::result::Result<SavedBuild, String> {
    let build: SavedBuild = serde_json::from_value(raw.clone()).map_err(|e| e.to_string())?;
    if build.id.as_str().trim().is_empty() {
        return Err("empty id".to_string());
    }
    if !build.total_price.is_finite() || build.total_price < 0.0 {
        return Err(format!("invalid totalPrice {}", build.total_price));
    }
    if let Some(bad) = build
        .config
        .components()
        .find(|c| !c.price.is_finite() || c.price < 0.0)
    {
        return Err(format!("component '{}' has invalid price {}", bad.id, bad.price));
    }
    build.config.check_taxonomy().map_err(|e| e.to_string())?;
    Ok(build)
}

/// Named build persistence for one scope.
pub struct BuildRepository<S> {
    store: S,
    config: RepositoryConfig,
    entries: Mutex<Vec<Entry>>,
}

impl<S> BuildRepository<S>
where
    S: BuildStore,
{
    /// Open the scope's build list, reading the persisted document once.
    ///
    /// Fails with `CorruptDocument` if the document is not a JSON array.
    pub async fn open(store: S, config: RepositoryConfig) -> Result<Self> {
        let entries = match store.read(&config.scope).await? {
            None => Vec::new(),
            Some(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Vec::new(),
            Some(bytes) => {
                let values: Vec<Value> = serde_json::from_slice(&bytes).map_err(|e| {
                    ConfiguratorError::CorruptDocument {
                        scope: config.scope.to_string(),
                        reason: e.to_string(),
                    }
                })?;
                values.into_iter().map(Entry::decode).collect()
            }
        };
        debug!(scope = %config.scope, entries = entries.len(), "opened build repository");

        Ok(Self {
            store,
            config,
            entries: Mutex::new(entries),
        })
    }

    pub fn scope(&self) -> &StoreScope {
        &self.config.scope
    }

    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist `config` under `name`, returning the created record.
    ///
    /// The record gets a fresh unique id, `createdAt = now`, and a
    /// `totalPrice` computed from the config. Blank names become
    /// [`UNTITLED_BUILD_NAME`].
    pub async fn save(&self, name: &str, config: &BuildConfig) -> Result<SavedBuild> {
        config.check_taxonomy()?;

        let mut entries = self.entries.lock().await;
        if let Some(max) = self.config.max_builds {
            if entries.len() >= max {
                return Err(StorageError::QuotaExceeded {
                    scope: self.config.scope.to_string(),
                    limit: max as u64,
                    attempted: entries.len() as u64 + 1,
                }
                .into());
            }
        }

        let mut id = BuildId::new();
        while entries.iter().any(|e| e.id() == Some(id.as_str())) {
            id = BuildId::new();
        }
        let name = name.trim();
        let saved = SavedBuild {
            id,
            name: if name.is_empty() {
                UNTITLED_BUILD_NAME.to_string()
            } else {
                name.to_string()
            },
            config: config.clone(),
            total_price: compute_metrics(config).total_price,
            created_at: Utc::now(),
        };
        let raw = serde_json::to_value(&saved)?;
        // Refuse anything `open` would later read back as corrupt.
        decode_saved_build(&raw).map_err(|reason| {
            ConfiguratorError::InvalidConfig(format!("build cannot be stored: {reason}"))
        })?;

        let mut next: Vec<&Value> = entries.iter().map(|e| &e.raw).collect();
        next.push(&raw);
        self.persist("save", &next).await?;

        entries.push(Entry::valid(saved.clone(), raw));
        METRICS.inc_builds_saved();
        obs::emit_build_saved(self.config.scope.as_str(), saved.id.as_str(), saved.total_price);
        Ok(saved)
    }

    /// Return a copy of the saved build `id`.
    pub async fn load(&self, id: &BuildId) -> Result<SavedBuild> {
        let entries = self.entries.lock().await;
        let entry = entries
            .iter()
            .find(|e| e.id() == Some(id.as_str()))
            .ok_or_else(|| ConfiguratorError::BuildNotFound(id.clone()))?;
        match &entry.decoded {
            Ok(build) => Ok(build.clone()),
            Err(reason) => Err(ConfiguratorError::CorruptRecord {
                id: id.to_string(),
                reason: reason.clone(),
            }),
        }
    }

    /// Remove the saved build `id`. Unknown ids are a no-op.
    pub async fn delete(&self, id: &BuildId) -> Result<()> {
        let mut entries = self.entries.lock().await;
        let Some(position) = entries.iter().position(|e| e.id() == Some(id.as_str())) else {
            debug!(scope = %self.config.scope, build_id = %id, "delete of unknown build ignored");
            return Ok(());
        };
        if let Err(reason) = &entries[position].decoded {
            return Err(ConfiguratorError::CorruptRecord {
                id: id.to_string(),
                reason: reason.clone(),
            });
        }

        let next: Vec<&Value> = entries
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != position)
            .map(|(_, e)| &e.raw)
            .collect();
        self.persist("delete", &next).await?;

        entries.remove(position);
        METRICS.inc_builds_deleted();
        obs::emit_build_deleted(self.config.scope.as_str(), id.as_str());
        Ok(())
    }

    /// Valid saved builds in insertion order. Corrupt entries are skipped.
    pub async fn list(&self) -> Vec<SavedBuild> {
        let entries = self.entries.lock().await;
        entries
            .iter()
            .filter_map(|entry| match &entry.decoded {
                Ok(build) => Some(build.clone()),
                Err(reason) => {
                    obs::emit_corrupt_record_skipped(
                        self.config.scope.as_str(),
                        entry.id(),
                        reason,
                    );
                    None
                }
            })
            .collect()
    }

    /// Number of stored entries, corrupt ones included.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    async fn persist(&self, operation: &str, entries: &[&Value]) -> Result<()> {
        let document = serde_json::to_vec(entries)?;
        if let Err(e) = self.store.write(&self.config.scope, &document).await {
            METRICS.inc_storage_failures();
            obs::emit_storage_write_failed(self.config.scope.as_str(), operation, &e);
            return Err(e.into());
        }
        Ok(())
    }
}
