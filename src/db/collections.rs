//! One place mapping entity to database/collection. Every handler and
//! service goes through these typed accessors instead of spelling the
//! names inline.

use mongodb::{Client, Collection};

use crate::models::{
    invoice::Invoice,
    service::ServiceEntry,
    tariff::{PackageTariff, Tariff},
    vehicle::Vehicle,
};
use crate::services::distance_service::CachedRoute;

pub struct Collections;

impl Collections {
    pub fn services(client: &Client) -> Collection<ServiceEntry> {
        client.database("Catalog").collection("Services")
    }

    pub fn vehicles(client: &Client) -> Collection<Vehicle> {
        client.database("Catalog").collection("Vehicles")
    }

    pub fn tariffs(client: &Client) -> Collection<Tariff> {
        client.database("Catalog").collection("Tariffs")
    }

    pub fn package_tariffs(client: &Client) -> Collection<PackageTariff> {
        client.database("Catalog").collection("PackageTariffs")
    }

    pub fn invoices(client: &Client) -> Collection<Invoice> {
        client.database("Billing").collection("Invoices")
    }

    pub fn route_cache(client: &Client) -> Collection<CachedRoute> {
        client.database("Global").collection("DistanceCache")
    }
}
