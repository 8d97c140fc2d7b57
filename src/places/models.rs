use crate::geo::models::LatLng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A candidate point of interest as returned by a place source.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    pub id: String,
    pub name: Option<String>,
    pub category: String,
    /// `None` when the source could not tell where the place is.
    pub location: Option<LatLng>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PlaceQuery {
    pub origin: LatLng,
    pub category: String,
    pub radius_m: u32,
    pub limit: usize,
}
