use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use rand::Rng;

pub const HOURLY_PACKAGES: &str = "Hourly Packages";
pub const CGST_SGST_LABEL: &str = "CGST & SGST";
pub const IGST_LABEL: &str = "IGST";

/// Which GST split applies to an invoice. Intra-state bookings carry
/// CGST & SGST, inter-state bookings carry IGST; never both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxMode {
    CgstSgst,
    Igst,
}

impl TaxMode {
    pub fn label(&self) -> &'static str {
        match self {
            TaxMode::CgstSgst => CGST_SGST_LABEL,
            TaxMode::Igst => IGST_LABEL,
        }
    }

    /// Recover the selected mode from a persisted charge map. A map that
    /// somehow carries both labels resolves to CGST & SGST; the stale key
    /// is dropped on the next charge assembly.
    pub fn from_charges(charges: &BTreeMap<String, f64>) -> Option<TaxMode> {
        if charges.contains_key(CGST_SGST_LABEL) {
            Some(TaxMode::CgstSgst)
        } else if charges.contains_key(IGST_LABEL) {
            Some(TaxMode::Igst)
        } else {
            None
        }
    }
}

/// Free-form charge added by the operator (tolls, parking, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct CustomCharge {
    pub label: String,
    pub value: f64,
}

pub struct BillingService;

impl BillingService {
    /// Metered amount for a line item.
    pub fn line_amount(distance_km: f64, price_per_km: f64) -> f64 {
        distance_km * price_per_km
    }

    /// GST amount for the active tax selection.
    pub fn tax_amount(base_amount: f64, percent: f64) -> f64 {
        base_amount * percent / 100.0
    }

    /// Blank or malformed numeric input coerces to 0 rather than erroring.
    pub fn coerce_number(raw: &str) -> f64 {
        raw.trim().parse::<f64>().unwrap_or(0.0)
    }

    /// Charge labels are restricted to letters and spaces; everything else
    /// is stripped on input.
    pub fn sanitize_label(raw: &str) -> String {
        raw.chars()
            .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
            .collect()
    }

    /// Builds the charge map that gets persisted: carried-over charges with
    /// both tax labels cleared, plus custom charges, plus exactly the active
    /// tax entry. Clearing both keys first is what keeps a deselected tax
    /// type from lingering in the stored map.
    pub fn assemble_charges(
        other_charges: &BTreeMap<String, f64>,
        custom_charges: &[CustomCharge],
        tax: Option<(TaxMode, f64)>,
    ) -> BTreeMap<String, f64> {
        let mut charges = other_charges.clone();
        charges.remove(CGST_SGST_LABEL);
        charges.remove(IGST_LABEL);

        for charge in custom_charges {
            let label = Self::sanitize_label(&charge.label);
            if !label.trim().is_empty() {
                charges.insert(label, charge.value);
            }
        }

        if let Some((mode, amount)) = tax {
            charges.insert(mode.label().to_string(), amount);
        }

        charges
    }

    /// Default invoice number: INV-{yyyy}{m}{d}{4-digit serial}, month and
    /// day unpadded.
    pub fn invoice_number(date: NaiveDate) -> String {
        let serial: u16 = rand::thread_rng().gen_range(1000..10000);
        format!(
            "INV-{}{}{}{}",
            date.year(),
            date.month(),
            date.day(),
            serial
        )
    }
}
