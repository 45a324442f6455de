mod common;

use actix_web::http::Method;
use actix_web::{test, web, App};
use backend::routes;
use serde_json::Value;

use common::{asset_file_count, multipart_body, multipart_request, test_state};

#[actix_web::test]
async fn create_trims_fields_and_renders_absolute_image_url() {
    let (state, _tmp) = test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;

    let body = multipart_body(
        &[("name", " Pizza Place "), ("address", " 1 Main St ")],
        Some(("image", "logo.png", b"png-bytes")),
    );
    let req = multipart_request(Method::POST, "/api/restaurants", body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Pizza Place");
    assert_eq!(created["address"], "1 Main St");
    let image = created["image"].as_str().unwrap();
    assert!(image.starts_with("http://localhost:8080/files/"));
    assert!(image.ends_with("-logo.png"));

    // GET by the returned id reflects the same record, image rendered
    // absolute here too.
    let req = test::TestRequest::get().uri("/api/restaurants/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched["name"], "Pizza Place");
    assert_eq!(fetched["address"], "1 Main St");
    assert_eq!(fetched["image"].as_str().unwrap(), image);
}

#[actix_web::test]
async fn list_returns_all_restaurants_in_id_order() {
    let (state, _tmp) = test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/restaurants").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let empty: Value = test::read_body_json(resp).await;
    assert_eq!(empty, serde_json::json!([]));

    for name in ["First", "Second"] {
        let body = multipart_body(
            &[("name", name), ("address", "somewhere")],
            Some(("image", "logo.png", b"x")),
        );
        let req = multipart_request(Method::POST, "/api/restaurants", body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status().as_u16(), 201);
    }

    let req = test::TestRequest::get().uri("/api/restaurants").to_request();
    let resp = test::call_service(&app, req).await;
    let listed: Value = test::read_body_json(resp).await;
    let listed = listed.as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0]["id"], 1);
    assert_eq!(listed[0]["name"], "First");
    assert_eq!(listed[1]["id"], 2);
    assert_eq!(listed[1]["name"], "Second");
}

#[actix_web::test]
async fn get_missing_restaurant_returns_not_found_body() {
    let (state, _tmp) = test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/restaurants/99").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({"detail": "not found"}));
}

#[actix_web::test]
async fn update_replaces_record_and_removes_old_asset() {
    let (state, _tmp) = test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;

    let body = multipart_body(
        &[("name", "Old Name"), ("address", "Old Street")],
        Some(("image", "old.png", b"old")),
    );
    let req = multipart_request(Method::POST, "/api/restaurants", body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);
    assert_eq!(asset_file_count(&state), 1);

    let body = multipart_body(
        &[("name", " New Name "), ("address", "New Street")],
        Some(("image", "new.png", b"new")),
    );
    let req = multipart_request(Method::PUT, "/api/restaurants/1", body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 200);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["name"], "New Name");
    assert_eq!(updated["address"], "New Street");
    assert!(updated["image"].as_str().unwrap().ends_with("-new.png"));

    // Old image deleted once the row update succeeded; only the new one
    // remains.
    assert_eq!(asset_file_count(&state), 1);

    let req = test::TestRequest::get().uri("/api/restaurants/1").to_request();
    let resp = test::call_service(&app, req).await;
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched["name"], "New Name");
}

#[actix_web::test]
async fn update_missing_restaurant_returns_404_without_writing_a_file() {
    let (state, _tmp) = test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;

    let body = multipart_body(
        &[("name", "Name"), ("address", "Street")],
        Some(("image", "logo.png", b"x")),
    );
    let req = multipart_request(Method::PUT, "/api/restaurants/42", body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
    assert_eq!(asset_file_count(&state), 0);
}

#[actix_web::test]
async fn delete_twice_returns_204_then_404() {
    let (state, _tmp) = test_state().await;
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure),
    )
    .await;

    let body = multipart_body(
        &[("name", "Short Lived"), ("address", "Nowhere")],
        Some(("image", "logo.png", b"x")),
    );
    let req = multipart_request(Method::POST, "/api/restaurants", body).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 201);

    let req = test::TestRequest::delete().uri("/api/restaurants/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 204);
    let body = test::read_body(resp).await;
    assert!(body.is_empty());
    // The restaurant's own image is removed with the row.
    assert_eq!(asset_file_count(&state), 0);

    let req = test::TestRequest::delete().uri("/api/restaurants/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status().as_u16(), 404);
}
