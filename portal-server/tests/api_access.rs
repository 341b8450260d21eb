//! Role-gated API access through the full router
//! Run: cargo test -p portal-server --test api_access

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use portal_server::core::{Config, ServerState, build_router};
use portal_server::db::models::Role;
use portal_server::db::repository::{ClientRepository, RoleMapRepository};
use portal_server::db::models::ClientCreate;

async fn test_app() -> (Router, ServerState) {
    let config = Config::with_overrides("unused", 0);
    let state = ServerState::initialize_in_memory(&config).await;
    (build_router(state.clone()), state)
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn post_json(uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

async fn register(app: &Router, name: &str, email: &str) -> String {
    let (status, body) = send(
        app,
        post_json(
            "/api/auth/register",
            json!({
                "name": name,
                "email": email,
                "password": "secreto123",
                "company": "Empresa SA",
                "ruc": "1790012345001",
                "phone": "0991234567",
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    body["uid"].as_str().unwrap().to_string()
}

async fn login(app: &Router, email: &str) -> (StatusCode, Value) {
    send(
        app,
        post_json(
            "/api/auth/login",
            json!({ "email": email, "password": "secreto123" }),
            None,
        ),
    )
    .await
}

#[tokio::test]
async fn health_is_public() {
    let (app, _state) = test_app().await;
    let (status, body) = send(&app, get("/api/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn tickets_require_authentication() {
    let (app, _state) = test_app().await;
    let (status, _) = send(&app, get("/api/tickets", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_without_role_is_denied() {
    let (app, _state) = test_app().await;
    register(&app, "Pedro Salas", "pedro@empresa.ec").await;

    let (status, _) = login(&app, "pedro@empresa.ec").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn super_admin_email_logs_in_without_role_entry() {
    let (app, _state) = test_app().await;
    register(&app, "Servicio Técnico", "serviciotecnico@copiermastercyg.com.ec").await;

    let (status, body) = login(&app, "serviciotecnico@copiermastercyg.com.ec").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "admin");
}

#[tokio::test]
async fn client_ticket_lifecycle_with_admin_assignment() {
    let (app, state) = test_app().await;

    // Seed an institution the ticket form will reference
    let client = ClientRepository::new(state.get_db())
        .create(ClientCreate {
            name: "Unidad Educativa Andina".into(),
            city: "Cuenca".into(),
            contact_person: None,
            phone: None,
        })
        .await
        .unwrap();
    let client_id = client.id.unwrap().to_string();

    // Client user with an assigned role
    let uid = register(&app, "Lucía Paredes", "lucia@uea.edu.ec").await;
    RoleMapRepository::new(state.get_db())
        .assign(&uid, Role::Client)
        .await
        .unwrap();
    let (status, body) = login(&app, "lucia@uea.edu.ec").await;
    assert_eq!(status, StatusCode::OK);
    let client_token = body["token"].as_str().unwrap().to_string();

    // Create a ticket; defaults applied server-side
    let (status, ticket) = send(
        &app,
        post_json(
            "/api/tickets",
            json!({
                "institucion": client_id,
                "tipo_incidente": "Atasco de Papel",
                "description": "El equipo atasca papel en la bandeja principal",
                "priority": "Alta",
            }),
            Some(&client_token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "ticket create failed: {ticket}");
    assert_eq!(ticket["status"], "Abierto");
    assert_eq!(ticket["assigned_to"], "Sin asignar");
    assert_eq!(ticket["institucion"], "Unidad Educativa Andina");
    assert_eq!(ticket["ciudad"], "Cuenca");
    let ticket_id = ticket["id"].as_str().unwrap().to_string();

    // The client sees their ticket, but cannot assign it
    let (status, list) = send(&app, get("/api/tickets", Some(&client_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list.as_array().unwrap().len(), 1);

    let (status, _) = send(
        &app,
        post_json(
            &format!("/api/tickets/{ticket_id}/assign"),
            json!({ "technician": "Carlos Vera" }),
            Some(&client_token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // The super admin assigns it
    register(&app, "Gerencia", "gerencia@copiermastercyg.com.ec").await;
    let (status, body) = login(&app, "gerencia@copiermastercyg.com.ec").await;
    assert_eq!(status, StatusCode::OK);
    let admin_token = body["token"].as_str().unwrap().to_string();

    let (status, assigned) = send(
        &app,
        post_json(
            &format!("/api/tickets/{ticket_id}/assign"),
            json!({ "technician": "Carlos Vera" }),
            Some(&admin_token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "assign failed: {assigned}");
    assert_eq!(assigned["status"], "En Progreso");
    assert_eq!(assigned["assigned_to"], "Carlos Vera");

    // A too-short activity report is rejected, a valid one resolves
    let (status, _) = send(
        &app,
        post_json(
            &format!("/api/tickets/{ticket_id}/resolve"),
            json!({ "resolution_details": "corto" }),
            Some(&admin_token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, resolved) = send(
        &app,
        post_json(
            &format!("/api/tickets/{ticket_id}/resolve"),
            json!({
                "resolution_details": "Se retiró el papel atascado y se calibró la bandeja",
                "resolution_parts": "Rodillo de arrastre",
            }),
            Some(&admin_token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "resolve failed: {resolved}");
    assert_eq!(resolved["status"], "Resuelto");
    assert_eq!(resolved["resolved_by"], "Gerencia");

    // Report summary over the client's own tickets
    let (status, summary) = send(&app, get("/api/reports/summary", Some(&client_token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["total"], 1);
    assert_eq!(summary["resolved"], 1);

    // CSV export round trip of the same scope
    let response = app
        .clone()
        .oneshot(get("/api/reports/export.csv", Some(&client_token)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/csv"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let csv_text = String::from_utf8(bytes.to_vec()).unwrap();
    let mut reader = csv::Reader::from_reader(csv_text.as_bytes());
    let record = reader.records().next().unwrap().unwrap();
    assert_eq!(&record[8], "Resuelto");
}

#[tokio::test]
async fn contact_form_is_public_but_lead_list_is_not() {
    let (app, _state) = test_app().await;

    let (status, lead) = send(
        &app,
        post_json(
            "/api/contact",
            json!({
                "name": "Prospecto Nuevo",
                "email": "prospecto@empresa.ec",
                "message": "Necesito mantenimiento para tres copiadoras",
            }),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "contact failed: {lead}");

    let (status, _) = send(&app, get("/api/contact", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registration_review_is_admin_only() {
    let (app, state) = test_app().await;

    let uid = register(&app, "Técnico Nuevo", "tecnico@copiermastercyg.com.ec").await;
    RoleMapRepository::new(state.get_db())
        .assign(&uid, Role::Technician)
        .await
        .unwrap();
    let (_, body) = login(&app, "tecnico@copiermastercyg.com.ec").await;
    let tech_token = body["token"].as_str().unwrap().to_string();

    let (status, _) = send(&app, get("/api/registrations", Some(&tech_token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    register(&app, "Gerencia", "gerencia@copiermastercyg.com.ec").await;
    let (_, body) = login(&app, "gerencia@copiermastercyg.com.ec").await;
    let admin_token = body["token"].as_str().unwrap().to_string();

    let (status, pending) = send(&app, get("/api/registrations", Some(&admin_token))).await;
    assert_eq!(status, StatusCode::OK);
    // The technician's own registration is still pending review
    assert!(pending.as_array().unwrap().len() >= 1);
}
