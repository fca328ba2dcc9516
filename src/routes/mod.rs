use actix_web::web;

use crate::middleware::auth::AuthMiddleware;
use crate::middleware::role_auth::RequireRole;
use crate::models::account::UserRole;

pub mod global;
pub mod health;
pub mod invoice;
pub mod service;
pub mod tariff;
pub mod vehicle;

/// Full `/api` route tree. Everything sits behind the bearer-token
/// middleware; resource scopes additionally require Vendor (or Admin).
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::scope("/global")
                    .wrap(AuthMiddleware)
                    .route("/distance", web::get().to(global::get_distance)),
            )
            .service(
                web::scope("/invoices")
                    .wrap(RequireRole::new(UserRole::Vendor))
                    .wrap(AuthMiddleware)
                    .route("", web::get().to(invoice::get_invoices))
                    .route("", web::post().to(invoice::create_invoice))
                    .route("/{id}", web::get().to(invoice::get_by_id))
                    .route("/{id}", web::put().to(invoice::update_invoice)),
            )
            .service(
                web::scope("")
                    .wrap(RequireRole::new(UserRole::Vendor))
                    .wrap(AuthMiddleware)
                    .route("/services", web::get().to(service::get_services))
                    .route("/vehicles", web::get().to(vehicle::get_vehicles))
                    .route("/tariffs", web::get().to(tariff::get_tariffs))
                    .route(
                        "/package-tariffs",
                        web::get().to(tariff::get_package_tariffs),
                    ),
            ),
    );
}
