use actix_web::{http::StatusCode, test, test::TestRequest, web::ServiceConfig, App};
use log::debug;
use serde_json::Value;

use crate::routes::json_config;

pub async fn post_request(path: &str, body: Value, configure: impl FnOnce(&mut ServiceConfig)) -> (StatusCode, String) {
    post_raw_request(path, body.to_string(), configure).await
}

pub async fn post_raw_request(
    path: &str,
    body: String,
    configure: impl FnOnce(&mut ServiceConfig),
) -> (StatusCode, String) {
    let req = TestRequest::post()
        .uri(path)
        .insert_header(("Content-Type", "application/json"))
        .set_payload(body)
        .to_request();
    let app = App::new().app_data(json_config()).configure(configure);
    let service = test::init_service(app).await;
    debug!("Making request to {path}");
    let res = test::call_service(&service, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    (status, String::from_utf8_lossy(&body).into_owned())
}
