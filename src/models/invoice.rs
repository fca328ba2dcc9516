use std::collections::BTreeMap;

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub enum InvoiceStatus {
    Unpaid,
    #[serde(rename = "Partial Paid")]
    PartialPaid,
    Paid,
}

impl InvoiceStatus {
    /// Paid invoices lock their pricing fields against further edits.
    pub fn is_locked(&self) -> bool {
        *self == InvoiceStatus::Paid
    }
}

/// The single billable line of an invoice.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub service_type: String,
    pub vehicle_type: String,
    #[serde(default)]
    pub distance_km: f64,
    #[serde(default)]
    pub price_per_km: f64,
    #[serde(default)]
    pub duration_label: String,
    #[serde(default)]
    pub amount: f64,
}

impl LineItem {
    pub fn empty() -> Self {
        LineItem {
            service_type: String::new(),
            vehicle_type: String::new(),
            distance_km: 0.0,
            price_per_km: 0.0,
            duration_label: String::new(),
            amount: 0.0,
        }
    }
}

/// Snapshot of the package tariff chosen for an "Hourly Packages" invoice.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PackageSelection {
    pub package_id: String,
    pub no_of_hours: u32,
    pub distance_limit: f64,
    pub price: f64,
    #[serde(default)]
    pub extra_price: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub invoice_id: String,
    pub item: LineItem,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_details: Option<PackageSelection>,
    pub customer_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub gst_number: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub other_charges: BTreeMap<String, f64>,
    #[serde(default)]
    pub total_amount: f64,
    pub status: InvoiceStatus,
    #[serde(default)]
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime>,
}
