//! Built-in schema (condition) functions

use super::{bool_outcome, decode_args, names};
use bidrules_core::{FunctionError, RequestPayload, SchemaFunction};
use serde::Deserialize;
use std::sync::Arc;

/// Request attribute read by an [`AttributeMatch`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Country,
    Region,
    DataCenter,
}

impl Attribute {
    fn read<'a>(&self, payload: &RequestPayload<'a>) -> Option<&'a str> {
        match self {
            Attribute::Country => payload.request.country(),
            Attribute::Region => payload.request.region(),
            Attribute::DataCenter => payload.data_center,
        }
    }

    fn path(&self) -> &'static str {
        match self {
            Attribute::Country => "device.geo.country",
            Attribute::Region => "device.geo.region",
            Attribute::DataCenter => "datacenter",
        }
    }
}

/// Reports a request attribute, or tests it against an allow list
///
/// Without an allow list the raw attribute value is the outcome and a missing
/// attribute is an error. With one the outcome is `"true"`/`"false"` and a
/// missing attribute counts as not listed.
#[derive(Debug)]
pub struct AttributeMatch {
    name: &'static str,
    attribute: Attribute,
    allow_list: Option<Vec<String>>,
}

impl AttributeMatch {
    pub fn new(name: &'static str, attribute: Attribute, allow_list: Option<Vec<String>>) -> Self {
        Self {
            name,
            attribute,
            allow_list,
        }
    }
}

impl SchemaFunction for AttributeMatch {
    fn name(&self) -> &str {
        self.name
    }

    fn call(&self, payload: &RequestPayload<'_>) -> Result<String, FunctionError> {
        let value = self.attribute.read(payload);
        match &self.allow_list {
            Some(list) => Ok(bool_outcome(
                value.is_some_and(|v| list.iter().any(|allowed| allowed.eq_ignore_ascii_case(v))),
            )),
            None => value
                .map(str::to_string)
                .ok_or_else(|| FunctionError::missing_attribute(self.name, self.attribute.path())),
        }
    }
}

/// Channel name, with `pbjs` reported as `web`
#[derive(Debug, Default)]
pub struct ChannelName;

impl SchemaFunction for ChannelName {
    fn name(&self) -> &str {
        names::CHANNEL
    }

    fn call(&self, payload: &RequestPayload<'_>) -> Result<String, FunctionError> {
        match payload.request.channel_name() {
            Some("pbjs") => Ok("web".to_string()),
            Some(name) => Ok(name.to_string()),
            None => Err(FunctionError::missing_attribute(
                names::CHANNEL,
                "ext.prebid.channel.name",
            )),
        }
    }
}

/// `"true"` when the user carries at least one EID
#[derive(Debug, Default)]
pub struct EidAvailable;

impl SchemaFunction for EidAvailable {
    fn name(&self) -> &str {
        names::EID_AVAILABLE
    }

    fn call(&self, payload: &RequestPayload<'_>) -> Result<String, FunctionError> {
        Ok(bool_outcome(payload.request.eid_sources().next().is_some()))
    }
}

/// `"true"` when any EID source is in the configured list
#[derive(Debug)]
pub struct EidIn {
    sources: Vec<String>,
}

impl SchemaFunction for EidIn {
    fn name(&self) -> &str {
        names::EID_IN
    }

    fn call(&self, payload: &RequestPayload<'_>) -> Result<String, FunctionError> {
        let found = payload
            .request
            .eid_sources()
            .any(|source| self.sources.iter().any(|s| s.eq_ignore_ascii_case(source)));
        Ok(bool_outcome(found))
    }
}

#[derive(Debug, Deserialize)]
struct CountryArgs {
    #[serde(default)]
    countries: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct RegionArgs {
    #[serde(default)]
    regions: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct DataCenterArgs {
    #[serde(default)]
    datacenters: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct SourcesArgs {
    sources: Vec<String>,
}

fn required_list(function: &str, field: &str, list: Option<Vec<String>>) -> Result<Vec<String>, FunctionError> {
    match list {
        Some(list) if !list.is_empty() => Ok(list),
        _ => Err(FunctionError::invalid_args(
            function,
            format!("'{}' must be a non-empty list", field),
        )),
    }
}

fn no_args(function: &str, args: &serde_json::Value) -> Result<(), FunctionError> {
    match args {
        serde_json::Value::Null => Ok(()),
        serde_json::Value::Object(map) if map.is_empty() => Ok(()),
        _ => Err(FunctionError::invalid_args(function, "takes no arguments")),
    }
}

pub fn device_country(args: &serde_json::Value) -> Result<Arc<dyn SchemaFunction>, FunctionError> {
    let args: CountryArgs = decode_args(names::DEVICE_COUNTRY, args)?;
    Ok(Arc::new(AttributeMatch::new(
        names::DEVICE_COUNTRY,
        Attribute::Country,
        args.countries,
    )))
}

pub fn device_country_in(args: &serde_json::Value) -> Result<Arc<dyn SchemaFunction>, FunctionError> {
    let args: CountryArgs = decode_args(names::DEVICE_COUNTRY_IN, args)?;
    let countries = required_list(names::DEVICE_COUNTRY_IN, "countries", args.countries)?;
    Ok(Arc::new(AttributeMatch::new(
        names::DEVICE_COUNTRY_IN,
        Attribute::Country,
        Some(countries),
    )))
}

pub fn device_region(args: &serde_json::Value) -> Result<Arc<dyn SchemaFunction>, FunctionError> {
    let args: RegionArgs = decode_args(names::DEVICE_REGION, args)?;
    Ok(Arc::new(AttributeMatch::new(
        names::DEVICE_REGION,
        Attribute::Region,
        args.regions,
    )))
}

pub fn device_region_in(args: &serde_json::Value) -> Result<Arc<dyn SchemaFunction>, FunctionError> {
    let args: RegionArgs = decode_args(names::DEVICE_REGION_IN, args)?;
    let regions = required_list(names::DEVICE_REGION_IN, "regions", args.regions)?;
    Ok(Arc::new(AttributeMatch::new(
        names::DEVICE_REGION_IN,
        Attribute::Region,
        Some(regions),
    )))
}

pub fn data_center(args: &serde_json::Value) -> Result<Arc<dyn SchemaFunction>, FunctionError> {
    let args: DataCenterArgs = decode_args(names::DATA_CENTER, args)?;
    Ok(Arc::new(AttributeMatch::new(
        names::DATA_CENTER,
        Attribute::DataCenter,
        args.datacenters,
    )))
}

pub fn data_center_in(args: &serde_json::Value) -> Result<Arc<dyn SchemaFunction>, FunctionError> {
    let args: DataCenterArgs = decode_args(names::DATA_CENTER_IN, args)?;
    let datacenters = required_list(names::DATA_CENTER_IN, "datacenters", args.datacenters)?;
    Ok(Arc::new(AttributeMatch::new(
        names::DATA_CENTER_IN,
        Attribute::DataCenter,
        Some(datacenters),
    )))
}

pub fn channel(args: &serde_json::Value) -> Result<Arc<dyn SchemaFunction>, FunctionError> {
    no_args(names::CHANNEL, args)?;
    Ok(Arc::new(ChannelName))
}

pub fn eid_available(args: &serde_json::Value) -> Result<Arc<dyn SchemaFunction>, FunctionError> {
    no_args(names::EID_AVAILABLE, args)?;
    Ok(Arc::new(EidAvailable))
}

pub fn eid_in(args: &serde_json::Value) -> Result<Arc<dyn SchemaFunction>, FunctionError> {
    let args: SourcesArgs = decode_args(names::EID_IN, args)?;
    let sources = required_list(names::EID_IN, "sources", Some(args.sources))?;
    Ok(Arc::new(EidIn { sources }))
}
