use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::{bson::doc, Client};
use std::sync::Arc;

use crate::db::collections::Collections;
use crate::middleware::auth::Claims;
use crate::models::account::UserRole;
use crate::models::tariff::{PackageTariff, Tariff};

#[derive(serde::Deserialize)]
pub struct TariffQuery {
    service: Option<String>,
}

/*
    /api/tariffs?service=
*/
pub async fn get_tariffs(
    data: web::Data<Arc<Client>>,
    params: web::Query<TariffQuery>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = Collections::tariffs(&client);

    let filter = match &params.service {
        Some(service) if !service.is_empty() => doc! { "service": service },
        _ => doc! {},
    };

    match collection.find(filter).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Tariff>>().await {
            Ok(tariffs) => HttpResponse::Ok().json(tariffs),
            Err(err) => {
                eprintln!("Failed to collect tariffs: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect tariffs.")
            }
        },
        Err(err) => {
            eprintln!("Failed to find tariffs: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to find tariffs.")
        }
    }
}

/*
    /api/package-tariffs

    Admin sees every active package; vendors see the admin-seeded ones plus
    their own.
*/
pub async fn get_package_tariffs(data: web::Data<Arc<Client>>, claims: Claims) -> impl Responder {
    let client = data.into_inner();
    let collection = Collections::package_tariffs(&client);

    let role = claims
        .role
        .as_deref()
        .map(UserRole::parse)
        .unwrap_or(UserRole::Vendor);

    let filter = match role {
        UserRole::Admin => doc! { "status": "Active" },
        UserRole::Vendor => doc! {
            "status": "Active",
            "createdBy": { "$in": [claims.user_id.clone(), "admin".to_string()] }
        },
    };

    match collection.find(filter).await {
        Ok(cursor) => match cursor.try_collect::<Vec<PackageTariff>>().await {
            Ok(packages) => HttpResponse::Ok().json(packages),
            Err(err) => {
                eprintln!("Failed to collect package tariffs: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect package tariffs.")
            }
        },
        Err(err) => {
            eprintln!("Failed to find package tariffs: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to find package tariffs.")
        }
    }
}
