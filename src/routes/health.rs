use actix_web::{web, HttpResponse, Responder};
use mongodb::{bson::doc, Client};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(client: web::Data<Arc<Client>>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    match client
        .database("Catalog")
        .run_command(doc! {"ping": 1})
        .await
    {
        Ok(_) => {
            health.services.insert(
                "mongodb".to_string(),
                ServiceStatus {
                    status: "ok".to_string(),
                    details: None,
                },
            );
        }
        Err(err) => {
            health.status = "degraded".to_string();
            health.services.insert(
                "mongodb".to_string(),
                ServiceStatus {
                    status: "error".to_string(),
                    details: Some(err.to_string()),
                },
            );
        }
    }

    HttpResponse::Ok().json(health)
}
