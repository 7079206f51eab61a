//! Schema and result function contracts
//!
//! Both kinds are constructed once at compile time from a `FunctionSpec` and
//! held immutably inside the compiled tree, so implementations must be
//! stateless and `Send + Sync`.

use crate::changeset::ChangeSet;
use crate::error::FunctionError;
use crate::request::AuctionRequest;
use std::fmt::Debug;

/// What a schema function gets to look at
#[derive(Debug, Clone, Copy)]
pub struct RequestPayload<'a> {
    pub request: &'a AuctionRequest,

    /// Data center of the host serving the request
    pub data_center: Option<&'a str>,
}

impl<'a> RequestPayload<'a> {
    pub fn new(request: &'a AuctionRequest) -> Self {
        Self {
            request,
            data_center: None,
        }
    }

    pub fn with_data_center(mut self, data_center: Option<&'a str>) -> Self {
        self.data_center = data_center;
        self
    }
}

/// Model group context handed to result functions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultMeta {
    pub analytics_key: String,
    pub model_version: String,
    /// `|`-joined conditions of the rule that fired, or `"default"`
    pub rule_fired: String,
}

/// A condition evaluator reducing a request to one outcome string
pub trait SchemaFunction: Debug + Send + Sync {
    /// Registered name of the function
    fn name(&self) -> &str;

    /// Compute the outcome. Must not mutate the request.
    fn call(&self, payload: &RequestPayload<'_>) -> Result<String, FunctionError>;
}

/// An action that appends mutation intents
pub trait ResultFunction: Debug + Send + Sync {
    /// Registered name of the function
    fn name(&self) -> &str;

    /// Describe the intended mutations by appending them to `change_set`
    fn add_change_set(&self, change_set: &mut ChangeSet, meta: &ResultMeta)
        -> Result<(), FunctionError>;
}
