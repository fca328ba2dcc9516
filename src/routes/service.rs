use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::{bson::doc, Client};
use std::sync::Arc;

use crate::db::collections::Collections;
use crate::models::service::ServiceEntry;

#[derive(serde::Deserialize)]
pub struct QueryParams {
    search: Option<String>,
}

/*
    /api/services
*/
pub async fn get_services(
    data: web::Data<Arc<Client>>,
    params: web::Query<QueryParams>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = Collections::services(&client);

    let filter = match &params.search {
        Some(search_text) if !search_text.is_empty() => {
            doc! {
                "name": {
                    "$regex": format!("^{}", regex::escape(search_text)),
                    "$options": "i"
                }
            }
        }
        _ => doc! {},
    };

    match collection.find(filter).await {
        Ok(cursor) => match cursor.try_collect::<Vec<ServiceEntry>>().await {
            Ok(services) => HttpResponse::Ok().json(services),
            Err(err) => {
                eprintln!("Failed to collect services: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect services.")
            }
        },
        Err(err) => {
            eprintln!("Failed to find services: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to find services.")
        }
    }
}
