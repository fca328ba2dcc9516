use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Per-km rate for a (service, vehicle type) pair. Only entries with a
/// positive price make the vehicle available for the service.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Tariff {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub service: String,
    pub vehicle_type: String,
    pub price: f64,
}

/// Fixed-price bundle for the "Hourly Packages" service: a number of hours
/// with a bundled distance limit and an extra per-km rate past the limit.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PackageTariff {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub package_id: String,
    pub vehicle_type: String,
    pub no_of_hours: u32,
    pub distance_limit: f64,
    pub price: f64,
    #[serde(default)]
    pub extra_price: f64,
    pub status: String,
    #[serde(default)]
    pub created_by: String,
}

impl PackageTariff {
    pub fn is_active(&self) -> bool {
        self.status == "Active"
    }
}
