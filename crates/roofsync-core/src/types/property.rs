//! The property record: one surveyed building.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::rules::{self, DerivedMetrics};
use crate::types::PropertyId;

/// Survey input for a property that does not exist yet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    /// Street address.
    pub address: String,
    /// Postal code.
    pub zip: String,
    /// Total roof area in sq ft.
    pub roof_area: f64,
    /// Owner e-mail.
    pub email: String,
    /// Owner phone number.
    pub phone: String,
}

/// A surveyed building with its derived solar-capacity figures.
///
/// Records are immutable once created. The capacity fields are snapshots
/// taken at creation and are stored, not recomputed on read. The JSON field
/// names match the synchronized document exactly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    address: String,
    zip: String,
    roof_area: f64,
    email: String,
    phone: String,
    id: PropertyId,
    usable_area: f64,
    capacity_watts: f64,
    #[serde(rename = "capacityKW")]
    capacity_kw: f64,
    #[serde(rename = "capacityMW")]
    capacity_mw: f64,
    timestamp: DateTime<Utc>,
}

impl Property {
    /// Validate survey input and build a record with a fresh id and the
    /// current time.
    ///
    /// # Examples
    ///
    /// ```
    /// use roofsync_core::{NewProperty, Property};
    ///
    /// let property = Property::create(NewProperty {
    ///     address: "1 Industrial Way".into(),
    ///     zip: "90210".into(),
    ///     roof_area: 50_000.0,
    ///     email: "owner@example.com".into(),
    ///     phone: "555-0100".into(),
    /// })
    /// .unwrap();
    /// assert_eq!(property.capacity_kw(), 800.0);
    /// ```
    pub fn create(input: NewProperty) -> Result<Self> {
        Self::create_with(input, PropertyId::generate(), Utc::now())
    }

    /// Like [`Property::create`] with a caller-chosen id and timestamp.
    pub fn create_with(input: NewProperty, id: PropertyId, timestamp: DateTime<Utc>) -> Result<Self> {
        validate(&input)?;
        let DerivedMetrics {
            usable_area,
            capacity_watts,
            capacity_kw,
            capacity_mw,
        } = rules::derive(input.roof_area);

        Ok(Self {
            address: input.address.trim().to_string(),
            zip: input.zip.trim().to_string(),
            roof_area: input.roof_area,
            email: input.email.trim().to_string(),
            phone: input.phone.trim().to_string(),
            id,
            usable_area,
            capacity_watts,
            capacity_kw,
            capacity_mw,
            timestamp,
        })
    }

    /// Stable identifier.
    pub fn id(&self) -> &PropertyId {
        &self.id
    }

    /// Street address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Postal code.
    pub fn zip(&self) -> &str {
        &self.zip
    }

    /// Owner e-mail.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Owner phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }

    /// Total roof area in sq ft.
    pub fn roof_area(&self) -> f64 {
        self.roof_area
    }

    /// Usable roof area in sq ft.
    pub fn usable_area(&self) -> f64 {
        self.usable_area
    }

    /// Installable capacity in watts.
    pub fn capacity_watts(&self) -> f64 {
        self.capacity_watts
    }

    /// Installable capacity in kilowatts.
    pub fn capacity_kw(&self) -> f64 {
        self.capacity_kw
    }

    /// Installable capacity in megawatts.
    pub fn capacity_mw(&self) -> f64 {
        self.capacity_mw
    }

    /// Creation time.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Whether the stored roof area satisfies the current bounds.
    pub fn has_valid_roof_size(&self) -> bool {
        rules::is_valid_roof_size(self.roof_area)
    }
}

fn validate(input: &NewProperty) -> Result<()> {
    if !rules::is_valid_roof_size(input.roof_area) {
        return Err(Error::validation_field(
            "roofArea",
            rules::roof_size_message(),
        ));
    }

    let text_fields = [
        ("address", &input.address),
        ("zip", &input.zip),
        ("email", &input.email),
        ("phone", &input.phone),
    ];
    for (field, value) in text_fields {
        if value.trim().is_empty() {
            return Err(Error::validation_field(field, format!("{field} is required")));
        }
    }

    Ok(())
}
