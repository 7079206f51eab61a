//! Name-keyed function registries
//!
//! A registry maps a function name to a factory that validates the args and
//! builds the function. Built-ins are registered up front; hosts can add
//! their own factories before handing the registry to the compiler.

use super::{names, result, schema};
use bidrules_core::{FunctionError, FunctionSpec, ResultFunction, SchemaFunction};
use std::collections::HashMap;
use std::sync::Arc;

pub type SchemaFactory =
    Arc<dyn Fn(&serde_json::Value) -> Result<Arc<dyn SchemaFunction>, FunctionError> + Send + Sync>;

pub type ResultFactory =
    Arc<dyn Fn(&serde_json::Value) -> Result<Arc<dyn ResultFunction>, FunctionError> + Send + Sync>;

/// Registry of schema (condition) functions
#[derive(Clone)]
pub struct SchemaFunctionRegistry {
    factories: HashMap<String, SchemaFactory>,
}

impl SchemaFunctionRegistry {
    /// Registry seeded with the built-in schema functions
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(names::DEVICE_COUNTRY, schema::device_country);
        registry.register(names::DEVICE_COUNTRY_IN, schema::device_country_in);
        registry.register(names::DEVICE_REGION, schema::device_region);
        registry.register(names::DEVICE_REGION_IN, schema::device_region_in);
        registry.register(names::DATA_CENTER, schema::data_center);
        registry.register(names::DATA_CENTER_IN, schema::data_center_in);
        registry.register(names::CHANNEL, schema::channel);
        registry.register(names::EID_AVAILABLE, schema::eid_available);
        registry.register(names::EID_IN, schema::eid_in);
        registry
    }

    /// Registry without any functions
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a factory, replacing any existing one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&serde_json::Value) -> Result<Arc<dyn SchemaFunction>, FunctionError>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Build the function named by `name`
    pub fn create(
        &self,
        name: &str,
        args: &serde_json::Value,
    ) -> Result<Arc<dyn SchemaFunction>, FunctionError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| FunctionError::UnknownFunction(name.to_string()))?;
        factory(args)
    }

    pub fn create_from_spec(&self, spec: &FunctionSpec) -> Result<Arc<dyn SchemaFunction>, FunctionError> {
        self.create(&spec.function, &spec.args)
    }
}

impl Default for SchemaFunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry of result (action) functions
#[derive(Clone)]
pub struct ResultFunctionRegistry {
    factories: HashMap<String, ResultFactory>,
}

impl ResultFunctionRegistry {
    /// Registry seeded with the built-in result functions
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(names::EXCLUDE_BIDDERS, result::exclude_bidders);
        registry.register(names::INCLUDE_BIDDERS, result::include_bidders);
        registry.register(names::LOG_A_TAG, result::log_a_tag);
        registry
    }

    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&serde_json::Value) -> Result<Arc<dyn ResultFunction>, FunctionError>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(name.into(), Arc::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn create(
        &self,
        name: &str,
        args: &serde_json::Value,
    ) -> Result<Arc<dyn ResultFunction>, FunctionError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| FunctionError::UnknownFunction(name.to_string()))?;
        factory(args)
    }

    /// Build every spec in order
    pub fn create_all(&self, specs: &[FunctionSpec]) -> Result<Vec<Arc<dyn ResultFunction>>, FunctionError> {
        specs
            .iter()
            .map(|spec| self.create(&spec.function, &spec.args))
            .collect()
    }
}

impl Default for ResultFunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bidrules_core::{AuctionRequest, RequestPayload};
    use serde_json::json;

    #[derive(Debug)]
    struct Constant(String);

    impl SchemaFunction for Constant {
        fn name(&self) -> &str {
            "constant"
        }

        fn call(&self, _payload: &RequestPayload<'_>) -> Result<String, FunctionError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_builtins_registered() {
        let schema = SchemaFunctionRegistry::new();
        for name in [
            "deviceCountry",
            "deviceCountryIn",
            "deviceRegion",
            "deviceRegionIn",
            "dataCenter",
            "dataCenterIn",
            "channel",
            "eidAvailable",
            "eidIn",
        ] {
            assert!(schema.contains(name), "missing schema function {}", name);
        }

        let results = ResultFunctionRegistry::new();
        for name in ["excludeBidders", "includeBidders", "logATag"] {
            assert!(results.contains(name), "missing result function {}", name);
        }
    }

    #[test]
    fn test_unknown_function() {
        let schema = SchemaFunctionRegistry::new();
        assert_eq!(
            schema.create("doesNotExist", &serde_json::Value::Null).unwrap_err(),
            FunctionError::UnknownFunction("doesNotExist".to_string())
        );

        let results = ResultFunctionRegistry::new();
        assert!(matches!(
            results.create("doesNotExist", &json!({})),
            Err(FunctionError::UnknownFunction(_))
        ));
    }

    #[test]
    fn test_register_custom_schema_function() {
        let mut registry = SchemaFunctionRegistry::empty();
        assert!(!registry.contains("constant"));

        registry.register("constant", |args: &serde_json::Value| {
            let value = args
                .get("value")
                .and_then(|v| v.as_str())
                .ok_or_else(|| FunctionError::invalid_args("constant", "missing 'value'"))?;
            Ok(Arc::new(Constant(value.to_string())) as Arc<dyn SchemaFunction>)
        });

        let function = registry.create("constant", &json!({"value": "true"})).unwrap();
        let request = AuctionRequest::new("r");
        assert_eq!(function.call(&RequestPayload::new(&request)).unwrap(), "true");
        assert!(registry.create("constant", &json!({})).is_err());
    }

    #[test]
    fn test_create_all_stops_at_first_error() {
        let registry = ResultFunctionRegistry::new();
        let specs = vec![
            FunctionSpec::new("logATag", json!({"analyticsValue": "a"})),
            FunctionSpec::new("excludeBidders", json!({"bidders": []})),
        ];
        assert!(matches!(
            registry.create_all(&specs),
            Err(FunctionError::InvalidArgs { .. })
        ));
    }
}
