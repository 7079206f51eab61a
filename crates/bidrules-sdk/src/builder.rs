//! Builder pattern for RulesEngineModule

use crate::config::ModuleConfig;
use crate::error::{Result, SdkError};
use crate::module::RulesEngineModule;
use crate::queue::BuildQueue;
use crate::worker::TreeBuilderWorker;
use bidrules_compiler::{ResultFunctionRegistry, RulesCompiler, SchemaFunctionRegistry};
use bidrules_runtime::TreeCache;
use std::sync::Arc;

/// Builder for RulesEngineModule
///
/// # Example
///
/// ```rust,ignore
/// use bidrules_sdk::{ModuleConfig, RulesEngineModuleBuilder};
///
/// let module = RulesEngineModuleBuilder::new()
///     .with_config(ModuleConfig::load()?)
///     .build()?;
/// ```
pub struct RulesEngineModuleBuilder {
    config: ModuleConfig,
    cache: Option<Arc<TreeCache>>,
    schema_registry: SchemaFunctionRegistry,
    result_registry: ResultFunctionRegistry,
}

impl RulesEngineModuleBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self {
            config: ModuleConfig::default(),
            cache: None,
            schema_registry: SchemaFunctionRegistry::new(),
            result_registry: ResultFunctionRegistry::new(),
        }
    }

    pub fn with_config(mut self, config: ModuleConfig) -> Self {
        self.config = config;
        self
    }

    /// Share an existing cache instead of creating one
    pub fn with_cache(mut self, cache: Arc<TreeCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn with_schema_registry(mut self, registry: SchemaFunctionRegistry) -> Self {
        self.schema_registry = registry;
        self
    }

    pub fn with_result_registry(mut self, registry: ResultFunctionRegistry) -> Self {
        self.result_registry = registry;
        self
    }

    /// Build the module and spawn its tree builder on the current runtime
    pub fn build(self) -> Result<RulesEngineModule> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| SdkError::NoRuntime)?;

        let cache = self.cache.unwrap_or_default();
        let (queue, receiver) = BuildQueue::bounded(self.config.queue_capacity);
        let compiler = RulesCompiler::with_registries(self.schema_registry, self.result_registry);
        let worker = TreeBuilderWorker::new(Arc::clone(&cache), compiler, self.config.refresh_ttl())?;

        let task = handle.spawn(worker.run(receiver));

        tracing::info!(
            refresh_ttl_secs = self.config.refresh_ttl_secs,
            queue_capacity = self.config.queue_capacity,
            data_center = ?self.config.data_center,
            "rules engine module ready"
        );

        Ok(RulesEngineModule::new(cache, queue, &self.config).with_worker(task))
    }
}

impl Default for RulesEngineModuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
