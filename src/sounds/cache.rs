//! Module configuration cache
//!
//! Shared snapshot store for module configurations. Workflows read through
//! `get` and force a fresh snapshot with `reload`; nothing else writes to it.

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

use super::SoundsError;
use crate::rpc::RpcTransport;

/// Command answering with a module's full configuration
pub const GET_MODULE_CONFIG: &str = "get_module_config";

/// Source of module configuration snapshots
#[async_trait]
pub trait ModuleConfigCache: Send + Sync {
    /// Current snapshot, fetched on first use.
    async fn get(&self, module: &str) -> Result<Value, SoundsError>;

    /// Fetch a fresh snapshot and replace the cached one.
    async fn reload(&self, module: &str) -> Result<Value, SoundsError>;
}

/// Cache filled over the command transport
pub struct RpcConfigCache<T> {
    transport: T,
    entries: RwLock<HashMap<String, Value>>,
}

impl<T: RpcTransport> RpcConfigCache<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Cached snapshot without fetching
    pub fn cached(&self, module: &str) -> Option<Value> {
        self.entries.read().get(module).cloned()
    }

    async fn fetch(&self, module: &str) -> Result<Value, SoundsError> {
        let config = self
            .transport
            .send_command(GET_MODULE_CONFIG, module, None)
            .await?;
        if config.is_null() {
            return Err(SoundsError::ConfigUnavailable(module.to_string()));
        }
        self.entries
            .write()
            .insert(module.to_string(), config.clone());
        debug!(module = module, "Module configuration cached");
        Ok(config)
    }
}

#[async_trait]
impl<T: RpcTransport> ModuleConfigCache for RpcConfigCache<T> {
    async fn get(&self, module: &str) -> Result<Value, SoundsError> {
        if let Some(config) = self.cached(module) {
            return Ok(config);
        }
        self.fetch(module).await
    }

    async fn reload(&self, module: &str) -> Result<Value, SoundsError> {
        self.fetch(module).await
    }
}
