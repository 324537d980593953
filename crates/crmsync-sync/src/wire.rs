//! JSON bodies of the HubSpot CRM v3 contacts endpoints.

use crmsync_core::{Attribute, CONSENT_GRANTED};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    #[serde(rename = "filterGroups")]
    pub filter_groups: Vec<FilterGroup>,
    pub properties: Vec<String>,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Filter {
    #[serde(rename = "propertyName")]
    pub property_name: String,
    pub operator: String,
    pub value: String,
}

impl SearchRequest {
    /// Search restricted to contacts whose consent flag is set, requesting every attribute.
    pub fn consented(limit: u32, after: Option<&str>) -> Self {
        Self {
            filter_groups: vec![FilterGroup {
                filters: vec![Filter {
                    property_name: Attribute::Consent.as_str().to_string(),
                    operator: "EQ".to_string(),
                    value: CONSENT_GRANTED.to_string(),
                }],
            }],
            properties: Attribute::all()
                .iter()
                .map(|attribute| attribute.as_str().to_string())
                .collect(),
            limit,
            after: after.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub next: Option<NextPage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextPage {
    pub after: String,
}

impl SearchResponse {
    pub fn next_after(&self) -> Option<&str> {
        self.paging
            .as_ref()
            .and_then(|paging| paging.next.as_ref())
            .map(|next| next.after.as_str())
            .filter(|after| !after.is_empty())
    }
}

impl SearchResult {
    /// Property values as optional strings. JSON null becomes `None`; scalars are stringified.
    pub fn property_map(&self) -> HashMap<String, Option<String>> {
        property_map(&self.properties)
    }
}

pub fn property_map(properties: &Map<String, Value>) -> HashMap<String, Option<String>> {
    properties
        .iter()
        .map(|(key, value)| (key.clone(), value_to_string(value)))
        .collect()
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchCreateRequest {
    pub inputs: Vec<ContactInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInput {
    pub properties: BTreeMap<String, Value>,
}
