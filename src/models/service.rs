use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ServiceTax {
    #[serde(rename = "GST", default)]
    pub gst: f64,
}

/// A bookable service category ("One Way", "Round Trip", "Hourly Packages", ...).
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ServiceEntry {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax: Option<ServiceTax>,
}

impl ServiceEntry {
    /// Configured GST percentage for this service, 0 when none is set.
    pub fn tax_percent(&self) -> f64 {
        self.tax.as_ref().map(|t| t.gst).unwrap_or(0.0)
    }
}
