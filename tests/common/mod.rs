use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{web, App, HttpResponse};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;

use cabdesk_api::db::mongo::create_mongo_client;
use cabdesk_api::middleware::auth::Claims;
use cabdesk_api::routes;

pub const TEST_JWT_SECRET: &str = "cabdesk_test_secret";

pub struct TestApp {
    pub client: Arc<mongodb::Client>,
}

impl TestApp {
    pub async fn new() -> Self {
        std::env::set_var("JWT_SECRET", TEST_JWT_SECRET);

        let mongo_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = create_mongo_client(&mongo_uri).await;

        Self { client }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(web::Data::new(self.client.clone()))
            .route("/health", web::get().to(routes::health::health_check))
            .configure(routes::configure)
    }
}

/// Like `test::call_service`, but maps service-level errors (e.g. the 401/403
/// the auth middlewares return as `Err`) into the HTTP error response a real
/// server would send instead of panicking.
pub async fn call_service<S, R, B>(app: &S, req: R) -> HttpResponse<BoxBody>
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody + 'static,
{
    match app.call(req).await {
        Ok(resp) => resp.map_into_boxed_body().into_parts().1,
        Err(err) => err.error_response(),
    }
}

/// Mint a bearer token the way the auth middleware expects it.
pub fn bearer_token(role: &str, user_id: &str) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: format!("{}@cabdesk.test", role),
        exp: now + 3600,
        iat: now,
        user_id: user_id.to_string(),
        role: Some(role.to_string()),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("failed to sign test token");

    format!("Bearer {}", token)
}

pub fn admin_token() -> String {
    bearer_token("admin", "admin-1")
}

pub fn vendor_token() -> String {
    bearer_token("vendor", "vendor-1")
}
