mod common;

use actix_web::{test, web, App};
use serde_json::{json, Value};

use minierp_backend::{configure_routes, json_config, query_config};

macro_rules! init_app {
    ($pool:expr) => {
        test::init_service(
            App::new()
                .app_data(json_config())
                .app_data(query_config())
                .app_data(web::Data::new($pool.clone()))
                .configure(configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn create_then_get_returns_matching_name() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    let req = test::TestRequest::post()
        .uri("/departments")
        .set_json(json!({ "name": "Engineering", "description": "Product development" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 201);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_i64().expect("assigned id");
    assert_eq!(created["name"], "Engineering");

    let req = test::TestRequest::get()
        .uri(&format!("/departments/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let fetched: Value = test::read_body_json(resp).await;
    assert_eq!(fetched["name"], "Engineering");
    assert_eq!(fetched["description"], "Product development");
}

#[actix_web::test]
async fn create_with_empty_name_is_rejected() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    let req = test::TestRequest::post()
        .uri("/departments")
        .set_json(json!({ "name": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 422);
}

#[actix_web::test]
async fn create_with_duplicate_name_is_rejected() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    let req = test::TestRequest::post()
        .uri("/departments")
        .set_json(json!({ "name": "Sales" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::post()
        .uri("/departments")
        .set_json(json!({ "name": "Sales" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 409);
}

#[actix_web::test]
async fn list_returns_departments_in_insertion_order() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    for name in ["Engineering", "Sales", "Support"] {
        let req = test::TestRequest::post()
            .uri("/departments")
            .set_json(json!({ "name": name }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), 201);
    }

    let req = test::TestRequest::get().uri("/departments").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 200);
    let listed: Value = test::read_body_json(resp).await;
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Engineering", "Sales", "Support"]);
}

#[actix_web::test]
async fn get_unknown_department_returns_404() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    let req = test::TestRequest::get().uri("/departments/999").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn delete_removes_department() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    let req = test::TestRequest::post()
        .uri("/departments")
        .set_json(json!({ "name": "Temporary" }))
        .to_request();
    let created: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let id = created["id"].as_i64().unwrap();

    let req = test::TestRequest::delete()
        .uri(&format!("/departments/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 204);

    let req = test::TestRequest::get()
        .uri(&format!("/departments/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);

    // Repeating the delete hits an unknown id now.
    let req = test::TestRequest::delete()
        .uri(&format!("/departments/{}", id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn delete_is_rejected_while_employees_reference_it() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    let req = test::TestRequest::post()
        .uri("/departments")
        .set_json(json!({ "name": "Engineering" }))
        .to_request();
    let dept: Value = test::read_body_json(test::call_service(&app, req).await).await;
    let dept_id = dept["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/employees")
        .set_json(json!({
            "name": "Ana",
            "email": "ana@example.com",
            "department_id": dept_id
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 201);

    let req = test::TestRequest::delete()
        .uri(&format!("/departments/{}", dept_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 409);

    // The department is still there afterwards.
    let req = test::TestRequest::get()
        .uri(&format!("/departments/{}", dept_id))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 200);
}
