use actix_web::{web, HttpResponse, Responder};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime},
    Client,
};
use std::sync::Arc;

use crate::db::collections::Collections;
use crate::middleware::auth::Claims;
use crate::models::account::UserRole;
use crate::models::{invoice::Invoice, service::ServiceEntry};
use crate::services::draft::InvoiceDraft;

fn role_of(claims: &Claims) -> UserRole {
    claims
        .role
        .as_deref()
        .map(UserRole::parse)
        .unwrap_or(UserRole::Vendor)
}

async fn load_services(client: &Client) -> mongodb::error::Result<Vec<ServiceEntry>> {
    Collections::services(client)
        .find(doc! {})
        .await?
        .try_collect()
        .await
}

/*
    /api/invoices (newest first; vendors only see their own)
*/
pub async fn get_invoices(data: web::Data<Arc<Client>>, claims: Claims) -> impl Responder {
    let client = data.into_inner();
    let collection = Collections::invoices(&client);

    let filter = match role_of(&claims) {
        UserRole::Admin => doc! {},
        UserRole::Vendor => doc! { "createdBy": claims.user_id.clone() },
    };

    match collection
        .find(filter)
        .sort(doc! { "createdAt": -1 })
        .limit(100)
        .await
    {
        Ok(cursor) => match cursor.try_collect::<Vec<Invoice>>().await {
            Ok(invoices) => HttpResponse::Ok().json(invoices),
            Err(err) => {
                eprintln!("Failed to collect invoices: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to collect invoices.")
            }
        },
        Err(err) => {
            eprintln!("Failed to find invoices: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to find invoices.")
        }
    }
}

/*
    /api/invoices/{id} (vendors may only read their own)
*/
pub async fn get_by_id(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let collection = Collections::invoices(&client);

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(invoice)) => {
            if role_of(&claims) == UserRole::Vendor && invoice.created_by != claims.user_id {
                return HttpResponse::Forbidden().body("Forbidden");
            }
            HttpResponse::Ok().json(invoice)
        }
        Ok(None) => HttpResponse::NotFound().body("Invoice not found"),
        Err(err) => {
            eprintln!("Failed to retrieve invoice: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve invoice")
        }
    }
}

/*
    POST /api/invoices

    The payload is normalized through the draft layer: amounts and the tax
    entry are recomputed server-side, never trusted from the client.
*/
pub async fn create_invoice(
    data: web::Data<Arc<Client>>,
    input: web::Json<Invoice>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let input = input.into_inner();

    let services = match load_services(&client).await {
        Ok(services) => services,
        Err(err) => {
            eprintln!("Failed to load service catalog: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to load service catalog");
        }
    };

    let mut draft = InvoiceDraft::new(Utc::now().date_naive());
    draft.apply_update(&input, &services);
    draft.begin_save();
    let payload = draft.build_payload(&claims.user_id, DateTime::now());

    match Collections::invoices(&client).insert_one(&payload).await {
        Ok(result) => {
            draft.complete_save();
            let mut saved = payload;
            saved.id = result.inserted_id.as_object_id();
            HttpResponse::Ok().json(saved)
        }
        Err(err) => {
            draft.fail_save();
            eprintln!("Failed to create invoice: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create invoice")
        }
    }
}

/*
    PUT /api/invoices/{id}

    Loads the stored invoice first: a Paid invoice keeps its stored pricing
    fields no matter what the request carries, and vendors may only touch
    their own invoices. Last write wins; there are no version stamps.
*/
pub async fn update_invoice(
    path: web::Path<String>,
    data: web::Data<Arc<Client>>,
    input: web::Json<Invoice>,
    claims: Claims,
) -> impl Responder {
    let client = data.into_inner();
    let collection = Collections::invoices(&client);

    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let stored = match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(invoice)) => invoice,
        Ok(None) => return HttpResponse::NotFound().body("Invoice not found"),
        Err(err) => {
            eprintln!("Failed to retrieve invoice: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to retrieve invoice");
        }
    };

    if role_of(&claims) == UserRole::Vendor && stored.created_by != claims.user_id {
        return HttpResponse::Forbidden().body("Forbidden");
    }

    let services = match load_services(&client).await {
        Ok(services) => services,
        Err(err) => {
            eprintln!("Failed to load service catalog: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to load service catalog");
        }
    };

    let mut draft = InvoiceDraft::from_invoice(&stored, &services);
    draft.apply_update(&input.into_inner(), &services);
    draft.begin_save();
    let mut payload = draft.build_payload(&claims.user_id, DateTime::now());
    payload.id = Some(id);

    match collection.replace_one(doc! { "_id": id }, &payload).await {
        Ok(_) => {
            draft.complete_save();
            HttpResponse::Ok().json(payload)
        }
        Err(err) => {
            draft.fail_save();
            eprintln!("Failed to update invoice: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to update invoice")
        }
    }
}
