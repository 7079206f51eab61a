//! Built-in schema and result functions and their registries

pub mod registry;
pub mod result;
pub mod schema;

pub use registry::{ResultFactory, ResultFunctionRegistry, SchemaFactory, SchemaFunctionRegistry};

use bidrules_core::FunctionError;
use serde::de::DeserializeOwned;

/// Registered function names
pub mod names {
    pub const DEVICE_COUNTRY: &str = "deviceCountry";
    pub const DEVICE_COUNTRY_IN: &str = "deviceCountryIn";
    pub const DEVICE_REGION: &str = "deviceRegion";
    pub const DEVICE_REGION_IN: &str = "deviceRegionIn";
    pub const DATA_CENTER: &str = "dataCenter";
    pub const DATA_CENTER_IN: &str = "dataCenterIn";
    pub const CHANNEL: &str = "channel";
    pub const EID_AVAILABLE: &str = "eidAvailable";
    pub const EID_IN: &str = "eidIn";

    pub const EXCLUDE_BIDDERS: &str = "excludeBidders";
    pub const INCLUDE_BIDDERS: &str = "includeBidders";
    pub const LOG_A_TAG: &str = "logATag";
}

/// Decode function args; absent args decode like an empty object
pub(crate) fn decode_args<T: DeserializeOwned>(
    function: &str,
    args: &serde_json::Value,
) -> Result<T, FunctionError> {
    let args = if args.is_null() {
        serde_json::Value::Object(serde_json::Map::new())
    } else {
        args.clone()
    };
    serde_json::from_value(args).map_err(|e| FunctionError::invalid_args(function, e.to_string()))
}

/// Outcome string for a boolean test
pub(crate) fn bool_outcome(value: bool) -> String {
    if value { "true" } else { "false" }.to_string()
}
