use std::collections::BTreeMap;

use chrono::NaiveDate;
use mongodb::bson::{oid::ObjectId, DateTime};

use crate::models::{
    invoice::{Invoice, InvoiceStatus, LineItem, PackageSelection},
    service::ServiceEntry,
    tariff::PackageTariff,
};
use crate::services::availability::AvailabilityService;
use crate::services::billing::{
    BillingService, CustomCharge, TaxMode, CGST_SGST_LABEL, HOURLY_PACKAGES, IGST_LABEL,
};

/// Submit lifecycle of a draft. A failed save drops back to editing with
/// everything intact; nothing retries automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Draft,
    Saving,
    Saved,
    SaveFailed,
}

/// The in-progress invoice. Owns every edit until a create/update call
/// succeeds, at which point the backend owns the record.
#[derive(Debug, Clone)]
pub struct InvoiceDraft {
    pub existing_id: Option<ObjectId>,
    pub invoice_id: String,
    pub item: LineItem,
    pub package_details: Option<PackageSelection>,
    pub customer_name: String,
    pub phone: String,
    pub gst_number: String,
    pub address: String,
    pub tax_mode: Option<TaxMode>,
    pub tax_percent: f64,
    /// Non-tax charges carried over from a persisted invoice, verbatim.
    pub other_charges: BTreeMap<String, f64>,
    /// Charges added in this editing session.
    pub custom_charges: Vec<CustomCharge>,
    pub status: InvoiceStatus,
    created_by: String,
    created_at: Option<DateTime>,
    locked: bool,
    dirty: bool,
    state: SaveState,
}

impl InvoiceDraft {
    pub fn new(today: NaiveDate) -> Self {
        InvoiceDraft {
            existing_id: None,
            invoice_id: BillingService::invoice_number(today),
            item: LineItem::empty(),
            package_details: None,
            customer_name: String::new(),
            phone: String::new(),
            gst_number: String::new(),
            address: String::new(),
            tax_mode: None,
            tax_percent: 0.0,
            other_charges: BTreeMap::new(),
            custom_charges: Vec::new(),
            status: InvoiceStatus::Unpaid,
            created_by: String::new(),
            created_at: None,
            locked: false,
            dirty: false,
            state: SaveState::Draft,
        }
    }

    /// Opens a persisted invoice for editing. The stored tax entry only
    /// pre-selects the mode; its amount is recomputed fresh at save time.
    /// A stored Paid status locks the pricing fields for good.
    pub fn from_invoice(invoice: &Invoice, services: &[ServiceEntry]) -> Self {
        let tax_mode = TaxMode::from_charges(&invoice.other_charges);
        let mut other_charges = invoice.other_charges.clone();
        other_charges.remove(CGST_SGST_LABEL);
        other_charges.remove(IGST_LABEL);

        InvoiceDraft {
            existing_id: invoice.id,
            invoice_id: invoice.invoice_id.clone(),
            item: invoice.item.clone(),
            package_details: invoice.package_details.clone(),
            customer_name: invoice.customer_name.clone(),
            phone: invoice.phone.clone(),
            gst_number: invoice.gst_number.clone(),
            address: invoice.address.clone(),
            tax_mode,
            tax_percent: AvailabilityService::service_tax_percent(
                services,
                &invoice.item.service_type,
            ),
            other_charges,
            custom_charges: Vec::new(),
            status: invoice.status.clone(),
            created_by: invoice.created_by.clone(),
            created_at: invoice.created_at,
            locked: invoice.status.is_locked(),
            dirty: false,
            state: SaveState::Draft,
        }
    }

    pub fn state(&self) -> SaveState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Picking a service resets the vehicle, drops any package selection and
    /// re-resolves the GST percentage from the catalog.
    pub fn set_service_type(&mut self, name: &str, services: &[ServiceEntry]) {
        if self.locked {
            return;
        }
        self.item.service_type = name.to_string();
        self.item.vehicle_type = String::new();
        self.package_details = None;
        self.tax_percent = AvailabilityService::service_tax_percent(services, name);
        self.recompute_amount();
        self.dirty = true;
    }

    pub fn set_vehicle_type(&mut self, vehicle_type: &str) {
        if self.locked {
            return;
        }
        self.item.vehicle_type = vehicle_type.to_string();
        self.dirty = true;
    }

    /// Raw form input; blank or malformed values coerce to 0. Ignored while
    /// a package fixes the distance.
    pub fn set_distance_text(&mut self, raw: &str) {
        if self.locked || self.package_details.is_some() {
            return;
        }
        self.item.distance_km = BillingService::coerce_number(raw);
        self.recompute_amount();
        self.dirty = true;
    }

    pub fn set_price_text(&mut self, raw: &str) {
        if self.locked || self.package_details.is_some() {
            return;
        }
        self.item.price_per_km = BillingService::coerce_number(raw);
        self.recompute_amount();
        self.dirty = true;
    }

    /// Only meaningful for "Hourly Packages": fixes distance, duration and
    /// amount from the package, overriding any prior manual entry.
    pub fn select_package(&mut self, package: &PackageTariff) {
        if self.locked || self.item.service_type != HOURLY_PACKAGES {
            return;
        }
        self.package_details = Some(PackageSelection {
            package_id: package.package_id.clone(),
            no_of_hours: package.no_of_hours,
            distance_limit: package.distance_limit,
            price: package.price,
            extra_price: package.extra_price,
        });
        self.recompute_amount();
        self.dirty = true;
    }

    /// Distance estimation is skipped entirely for hourly packages; the
    /// package fixes the distance.
    pub fn wants_distance_lookup(&self) -> bool {
        self.item.service_type != HOURLY_PACKAGES
    }

    /// Result of an estimator call. A failed call never reaches here, so
    /// prior values stay untouched on error by construction.
    pub fn apply_distance(&mut self, distance_km: f64, duration: String) {
        if self.locked || !self.wants_distance_lookup() {
            return;
        }
        self.item.distance_km = distance_km;
        self.item.duration_label = duration;
        self.recompute_amount();
        self.dirty = true;
    }

    pub fn set_tax_mode(&mut self, mode: Option<TaxMode>) {
        if self.locked {
            return;
        }
        self.tax_mode = mode;
        self.dirty = true;
    }

    pub fn set_billing_party(&mut self, name: &str, phone: &str, gst_number: &str, address: &str) {
        self.customer_name = name.to_string();
        self.phone = phone.to_string();
        self.gst_number = gst_number.to_string();
        self.address = address.to_string();
        self.dirty = true;
    }

    /// A charge whose label sanitizes to nothing is rejected outright; it
    /// could never appear in the persisted charge map.
    pub fn add_custom_charge(&mut self, label: &str, value: &str) {
        let label = BillingService::sanitize_label(label);
        if label.trim().is_empty() {
            return;
        }
        self.custom_charges.push(CustomCharge {
            label,
            value: BillingService::coerce_number(value),
        });
        self.dirty = true;
    }

    pub fn remove_custom_charge(&mut self, index: usize) {
        if index < self.custom_charges.len() {
            self.custom_charges.remove(index);
            self.dirty = true;
        }
    }

    /// Package price when an hourly package is selected, otherwise the
    /// line-item amount. 0 while nothing is selected yet.
    pub fn base_amount(&self) -> f64 {
        if self.item.service_type == HOURLY_PACKAGES {
            if let Some(package) = &self.package_details {
                return package.price;
            }
        }
        self.item.amount
    }

    pub fn tax_amount(&self) -> f64 {
        match self.tax_mode {
            Some(_) => BillingService::tax_amount(self.base_amount(), self.tax_percent),
            None => 0.0,
        }
    }

    /// Total over the charges as they will actually be persisted: duplicate
    /// labels collapse to the surviving entry, so the stored total always
    /// equals base + the stored charge map + tax.
    pub fn total_amount(&self) -> f64 {
        let charges: f64 =
            BillingService::assemble_charges(&self.other_charges, &self.custom_charges, None)
                .values()
                .sum();
        self.base_amount() + charges + self.tax_amount()
    }

    /// Server-side normalization of an incoming create/update payload.
    /// Pricing fields pass through only while unlocked; a Paid invoice
    /// keeps its stored pricing regardless of what the request carries.
    pub fn apply_update(&mut self, incoming: &Invoice, services: &[ServiceEntry]) {
        self.customer_name = incoming.customer_name.clone();
        self.phone = incoming.phone.clone();
        self.gst_number = incoming.gst_number.clone();
        self.address = incoming.address.clone();
        if !incoming.invoice_id.trim().is_empty() {
            self.invoice_id = incoming.invoice_id.clone();
        }

        if !self.locked {
            self.status = incoming.status.clone();
            self.item = incoming.item.clone();
            self.package_details = incoming.package_details.clone();
            self.tax_mode = TaxMode::from_charges(&incoming.other_charges);
            self.tax_percent =
                AvailabilityService::service_tax_percent(services, &self.item.service_type);
            self.other_charges.clear();
            self.custom_charges = incoming
                .other_charges
                .iter()
                .filter(|(label, _)| {
                    label.as_str() != CGST_SGST_LABEL && label.as_str() != IGST_LABEL
                })
                .map(|(label, value)| CustomCharge {
                    label: label.clone(),
                    value: *value,
                })
                .collect();
            self.recompute_amount();
        }

        self.dirty = true;
    }

    /// Assembles the persisted document: charges with exactly one fresh tax
    /// entry, recomputed total, stamped timestamps.
    pub fn build_payload(&self, created_by: &str, now: DateTime) -> Invoice {
        let tax = self.tax_mode.map(|mode| (mode, self.tax_amount()));
        let other_charges =
            BillingService::assemble_charges(&self.other_charges, &self.custom_charges, tax);

        Invoice {
            id: self.existing_id,
            invoice_id: self.invoice_id.clone(),
            item: self.item.clone(),
            package_details: if self.item.service_type == HOURLY_PACKAGES {
                self.package_details.clone()
            } else {
                None
            },
            customer_name: self.customer_name.clone(),
            phone: self.phone.clone(),
            gst_number: self.gst_number.clone(),
            address: self.address.clone(),
            other_charges,
            total_amount: self.total_amount(),
            status: self.status.clone(),
            created_by: if self.created_by.is_empty() {
                created_by.to_string()
            } else {
                self.created_by.clone()
            },
            created_at: self.created_at.or(Some(now)),
            updated_at: Some(now),
        }
    }

    pub fn begin_save(&mut self) -> bool {
        match self.state {
            SaveState::Draft | SaveState::SaveFailed => {
                self.state = SaveState::Saving;
                true
            }
            _ => false,
        }
    }

    pub fn complete_save(&mut self) {
        self.state = SaveState::Saved;
        self.dirty = false;
    }

    /// The draft and its dirty flag survive a failed save untouched; the
    /// user resubmits manually.
    pub fn fail_save(&mut self) {
        self.state = SaveState::SaveFailed;
    }

    pub fn resume_editing(&mut self) {
        if self.state == SaveState::SaveFailed {
            self.state = SaveState::Draft;
        }
    }

    /// Unsaved-changes guard for navigation-away actions.
    pub fn can_leave(&self) -> bool {
        !self.dirty
    }

    /// Confirming the guard dialog discards the pending edits.
    pub fn confirm_discard(&mut self) {
        self.dirty = false;
    }

    fn recompute_amount(&mut self) {
        if self.item.service_type == HOURLY_PACKAGES {
            if let Some(package) = &self.package_details {
                self.item.distance_km = package.distance_limit;
                self.item.price_per_km = package.price;
                self.item.duration_label = format!("{} Hours", package.no_of_hours);
                self.item.amount = package.price;
                return;
            }
        }
        self.item.amount =
            BillingService::line_amount(self.item.distance_km, self.item.price_per_km);
    }
}
