use crate::models::{
    service::ServiceEntry,
    tariff::{PackageTariff, Tariff},
    vehicle::Vehicle,
};

pub struct AvailabilityService;

impl AvailabilityService {
    /// Vehicle types offerable for a metered service: active vehicles that
    /// have a positive-price tariff for it, in catalog order. An empty
    /// result is not an error; the form just offers no options.
    pub fn vehicle_options(service: &str, vehicles: &[Vehicle], tariffs: &[Tariff]) -> Vec<String> {
        let mut active: Vec<&Vehicle> = vehicles.iter().filter(|v| v.is_active).collect();
        active.sort_by_key(|v| v.order);

        active
            .into_iter()
            .filter(|vehicle| {
                tariffs.iter().any(|t| {
                    t.service == service && t.vehicle_type == vehicle.vehicle_type && t.price > 0.0
                })
            })
            .map(|v| v.vehicle_type.clone())
            .collect()
    }

    /// Same intersection for hourly packages: the vehicle needs an active,
    /// positive-price package tariff for the selected package.
    pub fn package_vehicle_options(
        package_id: &str,
        vehicles: &[Vehicle],
        packages: &[PackageTariff],
    ) -> Vec<String> {
        let mut active: Vec<&Vehicle> = vehicles.iter().filter(|v| v.is_active).collect();
        active.sort_by_key(|v| v.order);

        active
            .into_iter()
            .filter(|vehicle| {
                packages.iter().any(|p| {
                    p.package_id == package_id
                        && p.vehicle_type == vehicle.vehicle_type
                        && p.is_active()
                        && p.price > 0.0
                })
            })
            .map(|v| v.vehicle_type.clone())
            .collect()
    }

    /// GST percentage configured for a service, 0 when the service is
    /// unknown or carries no tax entry.
    pub fn service_tax_percent(services: &[ServiceEntry], name: &str) -> f64 {
        services
            .iter()
            .find(|s| s.name == name)
            .map(|s| s.tax_percent())
            .unwrap_or(0.0)
    }
}
