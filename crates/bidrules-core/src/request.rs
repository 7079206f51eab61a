//! Read-only auction request view
//!
//! A minimal OpenRTB subset covering the attributes schema functions read.
//! Unknown fields in the incoming JSON are ignored.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuctionRequest {
    #[serde(default)]
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<Device>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ext: Option<RequestExt>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Device {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub eids: Vec<Eid>,
}

/// Extended user identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Eid {
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestExt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prebid: Option<PrebidExt>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PrebidExt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<Channel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl AuctionRequest {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Set `device.geo.country`
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.geo_mut().country = Some(country.into());
        self
    }

    /// Set `device.geo.region`
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.geo_mut().region = Some(region.into());
        self
    }

    /// Set `ext.prebid.channel.name`
    pub fn with_channel(mut self, name: impl Into<String>) -> Self {
        let ext = self.ext.get_or_insert_with(RequestExt::default);
        let prebid = ext.prebid.get_or_insert_with(PrebidExt::default);
        prebid.channel = Some(Channel {
            name: name.into(),
            version: None,
        });
        self
    }

    /// Append a `user.eids` entry
    pub fn with_eid(mut self, source: impl Into<String>) -> Self {
        self.user
            .get_or_insert_with(User::default)
            .eids
            .push(Eid {
                source: source.into(),
            });
        self
    }

    pub fn country(&self) -> Option<&str> {
        self.geo().and_then(|g| g.country.as_deref())
    }

    pub fn region(&self) -> Option<&str> {
        self.geo().and_then(|g| g.region.as_deref())
    }

    pub fn channel_name(&self) -> Option<&str> {
        self.ext
            .as_ref()
            .and_then(|ext| ext.prebid.as_ref())
            .and_then(|prebid| prebid.channel.as_ref())
            .map(|channel| channel.name.as_str())
    }

    pub fn eid_sources(&self) -> impl Iterator<Item = &str> {
        self.user
            .iter()
            .flat_map(|user| user.eids.iter())
            .map(|eid| eid.source.as_str())
    }

    fn geo(&self) -> Option<&Geo> {
        self.device.as_ref().and_then(|d| d.geo.as_ref())
    }

    fn geo_mut(&mut self) -> &mut Geo {
        self.device
            .get_or_insert_with(Device::default)
            .geo
            .get_or_insert_with(Geo::default)
    }
}
