mod common;

use actix_web::{http::header, test};
use serial_test::serial;

use common::{admin_token, TestApp};

#[actix_rt::test]
#[serial]
async fn test_catalog_routes_require_auth() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    for uri in [
        "/api/services",
        "/api/vehicles",
        "/api/tariffs",
        "/api/package-tariffs",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = common::call_service(&app, req).await;
        assert_eq!(resp.status(), 401, "expected 401 for {}", uri);
    }
}

#[actix_rt::test]
#[serial]
async fn test_catalog_routes_pass_role_gate_with_admin_token() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    for uri in [
        "/api/services",
        "/api/vehicles",
        "/api/tariffs?service=One%20Way",
        "/api/package-tariffs",
    ] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header((header::AUTHORIZATION, admin_token()))
            .to_request();
        let resp = common::call_service(&app, req).await;
        assert_ne!(resp.status(), 401, "unexpected 401 for {}", uri);
        assert_ne!(resp.status(), 403, "unexpected 403 for {}", uri);
    }
}
