use actix_web::{web, HttpResponse, Responder};
use mongodb::Client;
use serde_json::json;
use std::sync::Arc;

use crate::services::distance_service::DistanceService;

#[derive(serde::Deserialize)]
pub struct DistanceQuery {
    origin: Option<String>,
    destination: Option<String>,
}

/*
    /api/global/distance?origin=&destination=
*/
pub async fn get_distance(
    data: web::Data<Arc<Client>>,
    params: web::Query<DistanceQuery>,
) -> impl Responder {
    let origin = params.origin.as_deref().unwrap_or("").trim().to_string();
    let destination = params
        .destination
        .as_deref()
        .unwrap_or("")
        .trim()
        .to_string();

    if origin.is_empty() || destination.is_empty() {
        return HttpResponse::BadRequest().body("Both origin and destination are required");
    }

    let service = match DistanceService::new(data.get_ref().clone()) {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Distance service unavailable: {}", err);
            return HttpResponse::InternalServerError().body("Distance service unavailable");
        }
    };

    match service.estimate(&origin, &destination).await {
        Ok(estimate) => HttpResponse::Ok().json(json!({
            "distance": estimate.distance_km,
            "duration": estimate.duration,
        })),
        Err(err) => {
            eprintln!("Failed to estimate distance: {}", err);
            HttpResponse::BadGateway().body("Failed to estimate distance")
        }
    }
}
