use axum::body::to_bytes;
use axum::Router;
use serde_json::{json, Value};
use todo_api::application::todo_service::{TodoService, TodoServiceImpl};
use todo_api::http::routing::{self, todos};
use todo_api::infrastructure::memory_repo::InMemoryTodoRepository;

fn app() -> (Router, TodoServiceImpl<InMemoryTodoRepository>) {
    let service = TodoServiceImpl::new(InMemoryTodoRepository::new());
    let router = routing::app(todos::router(todos::AppState { service: service.clone() }));
    (router, service)
}

async fn body_json(res: hyper::Response<axum::body::Body>) -> Value {
    serde_json::from_slice(&to_bytes(res.into_body(), 1024 * 1024).await.unwrap()).unwrap()
}

#[tokio::test]
async fn acceptance_full_crud_flow() {
    let (app, _) = app();

    // create
    let res = request(&app, "POST", "/api/todos", Some(json!({ "title": "Test" }))).await;
    assert_eq!(res.status(), 201);
    let body = body_json(res).await;
    assert_eq!(body["title"], "Test");
    assert_eq!(body["completed"], false);
    assert!(body["createdAt"].is_string());
    assert!(body.get("updatedAt").is_none());
    let id = body["id"].as_u64().unwrap();

    // list
    let res = request(&app, "GET", "/api/todos", None).await;
    assert_eq!(res.status(), 200);
    let list = body_json(res).await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    // get
    let res = request(&app, "GET", &format!("/api/todos/{}", id), None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(body_json(res).await["title"], "Test");

    // update
    let res = request(
        &app,
        "PUT",
        &format!("/api/todos/{}", id),
        Some(json!({ "title": "Updated", "completed": true })),
    )
    .await;
    assert_eq!(res.status(), 200);
    let body = body_json(res).await;
    assert_eq!(body["title"], "Updated");
    assert_eq!(body["completed"], true);
    assert!(body["updatedAt"].is_string());

    // the update is visible on a subsequent get
    let res = request(&app, "GET", &format!("/api/todos/{}", id), None).await;
    assert_eq!(res.status(), 200);
    let body = body_json(res).await;
    assert_eq!(body["title"], "Updated");
    assert_eq!(body["completed"], true);

    // delete returns the removed item
    let res = request(&app, "DELETE", &format!("/api/todos/{}", id), None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(body_json(res).await["id"], id);

    // gone
    let res = request(&app, "GET", &format!("/api/todos/{}", id), None).await;
    assert_eq!(res.status(), 404);
    assert_eq!(body_json(res).await, json!({ "error": "Todo not found" }));

    let res = request(&app, "GET", "/api/todos", None).await;
    assert_eq!(body_json(res).await, json!([]));
}

#[tokio::test]
async fn acceptance_create_validation() {
    let (app, _) = app();

    for payload in [json!({}), json!({ "title": "" }), json!({ "title": "   " })] {
        let res = request(&app, "POST", "/api/todos", Some(payload)).await;
        assert_eq!(res.status(), 400);
        assert_eq!(body_json(res).await, json!({ "error": "Title is required" }));
    }

    // nothing was stored and no id was consumed
    let res = request(&app, "POST", "/api/todos", Some(json!({ "title": "ok" }))).await;
    assert_eq!(res.status(), 201);
    assert_eq!(body_json(res).await["id"], 1);
}

#[tokio::test]
async fn acceptance_update_validation_and_not_found() {
    let (app, _) = app();

    let res = request(&app, "POST", "/api/todos", Some(json!({ "title": "keep" }))).await;
    let id = body_json(res).await["id"].as_u64().unwrap();

    let res = request(&app, "PUT", &format!("/api/todos/{}", id), Some(json!({ "title": " " }))).await;
    assert_eq!(res.status(), 400);
    assert_eq!(body_json(res).await, json!({ "error": "Title cannot be empty" }));

    // rejected update changed nothing
    let res = request(&app, "GET", &format!("/api/todos/{}", id), None).await;
    let body = body_json(res).await;
    assert_eq!(body["title"], "keep");
    assert!(body.get("updatedAt").is_none());

    let res = request(&app, "PUT", "/api/todos/999", Some(json!({ "completed": true }))).await;
    assert_eq!(res.status(), 404);
    assert_eq!(body_json(res).await, json!({ "error": "Todo not found" }));

    let res = request(&app, "DELETE", "/api/todos/999", None).await;
    assert_eq!(res.status(), 404);
    assert_eq!(body_json(res).await, json!({ "error": "Todo not found" }));
}

#[tokio::test]
async fn acceptance_non_numeric_id_is_not_found() {
    let (app, _) = app();

    for path in ["/api/todos/abc", "/api/todos/-1", "/api/todos/99999999999999999999999999"] {
        let res = request(&app, "GET", path, None).await;
        assert_eq!(res.status(), 404);
        assert_eq!(body_json(res).await, json!({ "error": "Todo not found" }));
    }
}

#[tokio::test]
async fn acceptance_list_preserves_creation_order() {
    let (app, _) = app();

    for title in ["A", "B", "C"] {
        let res = request(&app, "POST", "/api/todos", Some(json!({ "title": title }))).await;
        assert_eq!(res.status(), 201);
    }
    let res = request(&app, "DELETE", "/api/todos/2", None).await;
    assert_eq!(res.status(), 200);

    let res = request(&app, "GET", "/api/todos", None).await;
    let list = body_json(res).await;
    let titles: Vec<_> = list.as_array().unwrap().iter().map(|t| t["title"].as_str().unwrap().to_string()).collect();
    assert_eq!(titles, vec!["A", "C"]);
}

#[tokio::test]
async fn acceptance_reset_hook_restores_fresh_store() {
    let (app, service) = app();

    let res = request(&app, "POST", "/api/todos", Some(json!({ "title": "stale" }))).await;
    assert_eq!(res.status(), 201);

    service.reset().await;

    let res = request(&app, "GET", "/api/todos", None).await;
    assert_eq!(body_json(res).await, json!([]));
    let res = request(&app, "POST", "/api/todos", Some(json!({ "title": "fresh" }))).await;
    assert_eq!(body_json(res).await["id"], 1);
}

async fn request(app: &Router, method: &str, path: &str, body: Option<serde_json::Value>) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}
