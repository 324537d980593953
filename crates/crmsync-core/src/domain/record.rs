use crate::domain::attribute::Attribute;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

pub const CONSENT_GRANTED: &str = "true";

/// One row of the CRM search result, keyed by property name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawContactRecord {
    #[serde(rename = "firstname")]
    pub first_name: Option<String>,
    #[serde(rename = "lastname")]
    pub last_name: Option<String>,
    pub raw_email: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
    #[serde(rename = "technical_test___create_date")]
    pub create_date: Option<String>,
    pub industry: Option<String>,
    pub address: Option<String>,
    #[serde(rename = "hs_object_id")]
    pub external_id: Option<String>,
    #[serde(rename = "allowed_to_collect")]
    pub consent: Option<String>,
}

impl RawContactRecord {
    /// Every attribute in [`Attribute::all`] must be present as a key. A key mapped to `None`
    /// is a legitimately empty property.
    pub fn from_properties(properties: &HashMap<String, Option<String>>) -> Result<Self, CoreError> {
        let take = |attribute: Attribute| -> Result<Option<String>, CoreError> {
            let value = properties
                .get(attribute.as_str())
                .ok_or(CoreError::MissingAttribute(attribute.as_str()))?;
            Ok(clean_value(value.as_deref()))
        };

        Ok(Self {
            first_name: take(Attribute::FirstName)?,
            last_name: take(Attribute::LastName)?,
            raw_email: take(Attribute::RawEmail)?,
            country: take(Attribute::Country)?,
            phone: take(Attribute::Phone)?,
            create_date: take(Attribute::CreateDate)?,
            industry: take(Attribute::Industry)?,
            address: take(Attribute::Address)?,
            external_id: take(Attribute::ExternalId)?,
            consent: take(Attribute::Consent)?,
        })
    }

    pub fn get(&self, attribute: Attribute) -> Option<&str> {
        let value = match attribute {
            Attribute::FirstName => &self.first_name,
            Attribute::LastName => &self.last_name,
            Attribute::RawEmail => &self.raw_email,
            Attribute::Country => &self.country,
            Attribute::Phone => &self.phone,
            Attribute::CreateDate => &self.create_date,
            Attribute::Industry => &self.industry,
            Attribute::Address => &self.address,
            Attribute::ExternalId => &self.external_id,
            Attribute::Consent => &self.consent,
        };
        value.as_deref()
    }

    pub fn has_consent(&self) -> bool {
        self.consent.as_deref() == Some(CONSENT_GRANTED)
    }

    pub fn to_properties(&self) -> BTreeMap<String, Option<String>> {
        Attribute::all()
            .iter()
            .map(|attribute| {
                (
                    attribute.as_str().to_string(),
                    self.get(*attribute).map(str::to_string),
                )
            })
            .collect()
    }
}

/// A raw record after the field normalizers ran. Input of the merge engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub industry: Option<String>,
    pub external_id: Option<String>,
    pub create_date: Option<String>,
}

pub(crate) fn clean_value(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
