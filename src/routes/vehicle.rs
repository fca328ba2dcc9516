use actix_web::{web, HttpResponse, Responder};
use futures::TryStreamExt;
use mongodb::{bson::doc, Client};
use std::sync::Arc;

use crate::db::collections::Collections;
use crate::models::vehicle::Vehicle;

/*
    /api/vehicles
*/
pub async fn get_vehicles(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = Collections::vehicles(&client);

    match collection.find(doc! {}).sort(doc! { "order": 1 }).await {
        Ok(cursor) => match cursor.try_collect::<Vec<Vehicle>>().await {
            Ok(vehicles) => HttpResponse::Ok().json(vehicles),
            Err(err) => {
                eprintln!("Failed to collect vehicles: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect vehicles.")
            }
        },
        Err(err) => {
            eprintln!("Failed to find vehicles: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to find vehicles.")
        }
    }
}
