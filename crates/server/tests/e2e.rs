use std::net::SocketAddr;
use std::path::PathBuf;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, ServerState};

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Use DATABASE_URL from environment; if not present, skip tests gracefully
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip e2e tests. Provide .env.test or env var.");
        return Err(anyhow::anyhow!("missing DATABASE_URL"));
    }

    let db = models::db::connect().await?;
    migration::Migrator::up(&db, None).await?;

    // Isolated upload dir per test run
    let upload_dir = PathBuf::from(format!("target/test-data/{}/uploads", Uuid::new_v4()));
    tokio::fs::create_dir_all(&upload_dir).await?;

    let state = ServerState { db, upload_dir };
    let app: Router = routes::build_router(cors(), state);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn unique_user(email_tag: &str) -> serde_json::Value {
    let suffix = Uuid::new_v4();
    json!({
        "name": "E2E User",
        "email": format!("{email_tag}_{suffix}@example.com"),
        "document": format!("doc_{suffix}"),
        "password": "Secret123",
        "phone": "+55 11 90000-0000",
    })
}

#[tokio::test]
async fn health_is_public() -> anyhow::Result<()> {
    let app = match start_server().await {
        Ok(app) => app,
        Err(_) => return Ok(()),
    };
    let resp = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn user_registration_update_and_strikes() -> anyhow::Result<()> {
    let app = match start_server().await {
        Ok(app) => app,
        Err(_) => return Ok(()),
    };
    let client = reqwest::Client::new();
    let base = &app.base_url;

    // Register
    let input = unique_user("reg");
    let resp = client.post(format!("{base}/api/usuarios")).json(&input).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);
    let created: serde_json::Value = resp.json().await?;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["num_strikes"], 0);
    assert!(created.get("password_hash").is_none());

    // Duplicate email -> 409
    let mut dup = input.clone();
    dup["document"] = json!(format!("other_{}", Uuid::new_v4()));
    let resp = client.post(format!("{base}/api/usuarios")).json(&dup).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::CONFLICT);

    // Update phone only
    let patch = json!({
        "name": input["name"],
        "email": input["email"],
        "phone": "+55 21 98888-7777",
    });
    let resp = client
        .put(format!("{base}/api/usuarios/{id}"))
        .json(&patch)
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let updated: serde_json::Value = resp.json().await?;
    assert_eq!(updated["phone"], "+55 21 98888-7777");
    assert_eq!(updated["email"], input["email"]);

    // Three strikes
    for _ in 0..3 {
        let resp = client
            .post(format!("{base}/api/usuarios/{id}/strikes"))
            .send()
            .await?;
        assert_eq!(resp.status(), HttpStatusCode::NO_CONTENT);
    }
    let fetched: serde_json::Value = client
        .get(format!("{base}/api/usuarios/{id}"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(fetched["num_strikes"], 3);

    // Strike on a missing id is a silent no-op
    let resp = client
        .post(format!("{base}/api/usuarios/999999999/strikes"))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::NO_CONTENT);

    // Idempotent deletion
    let resp = client.delete(format!("{base}/api/usuarios/{id}")).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::NO_CONTENT);
    let resp = client.delete(format!("{base}/api/usuarios/{id}")).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::NO_CONTENT);
    let resp = client.get(format!("{base}/api/usuarios/{id}")).send().await?;
    assert_eq!(resp.status(), HttpStatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn profile_image_upload_and_removal() -> anyhow::Result<()> {
    let app = match start_server().await {
        Ok(app) => app,
        Err(_) => return Ok(()),
    };
    let client = reqwest::Client::new();
    let base = &app.base_url;

    let resp = client
        .post(format!("{base}/api/usuarios"))
        .json(&unique_user("img"))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);
    let created: serde_json::Value = resp.json().await?;
    let id = created["id"].as_i64().unwrap();

    let form = reqwest::multipart::Form::new().part(
        "imagem",
        reqwest::multipart::Part::bytes(b"fake-png".to_vec()).file_name("perfil.png"),
    );
    let resp = client
        .put(format!("{base}/api/usuarios/{id}/imagem"))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let body: serde_json::Value = resp.json().await?;
    let token = body["filename"].as_str().unwrap().to_string();
    assert!(token.ends_with("perfil.png"));

    // Uploaded asset is served statically
    let resp = reqwest::get(format!("{base}/uploads/{token}")).await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);

    // Clear
    let resp = client
        .delete(format!("{base}/api/usuarios/{id}/imagem"))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::NO_CONTENT);
    let fetched: serde_json::Value = client
        .get(format!("{base}/api/usuarios/{id}"))
        .send()
        .await?
        .json()
        .await?;
    assert!(fetched["profile_image"].is_null());

    // Upload for a missing user -> 404
    let form = reqwest::multipart::Form::new().part(
        "imagem",
        reqwest::multipart::Part::bytes(b"x".to_vec()).file_name("x.png"),
    );
    let resp = client
        .put(format!("{base}/api/usuarios/999999999/imagem"))
        .multipart(form)
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn offering_lifecycle_with_tags() -> anyhow::Result<()> {
    let app = match start_server().await {
        Ok(app) => app,
        Err(_) => return Ok(()),
    };
    let client = reqwest::Client::new();
    let base = &app.base_url;

    // Provider
    let resp = client
        .post(format!("{base}/api/usuarios"))
        .json(&unique_user("provider"))
        .send()
        .await?;
    let provider: serde_json::Value = resp.json().await?;
    let provider_id = provider["id"].as_i64().unwrap();

    // Tag
    let tag_name = format!("tag_{}", Uuid::new_v4());
    let resp = client
        .post(format!("{base}/api/tags"))
        .json(&json!({ "name": tag_name }))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);
    let created_tag: serde_json::Value = resp.json().await?;
    let tag_id = created_tag["id"].as_i64().unwrap();

    // Create for a missing provider fails fast
    let offering = json!({
        "name": "Troca de chuveiro",
        "description": "Instalacao e teste",
        "price": 80.0,
        "tag_ids": [tag_id],
    });
    let resp = client
        .post(format!("{base}/api/servicos/999999999"))
        .json(&offering)
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::NOT_FOUND);

    // Create bound to the real provider
    let resp = client
        .post(format!("{base}/api/servicos/{provider_id}"))
        .json(&offering)
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::CREATED);
    let created: serde_json::Value = resp.json().await?;
    let offering_id = created["id"].as_i64().unwrap();
    assert_eq!(created["provider_id"], provider_id);
    assert_eq!(created["tags"][0]["name"], tag_name);

    // List by provider
    let resp = client
        .get(format!("{base}/api/servicos/prestador/{provider_id}"))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let listed: serde_json::Value = resp.json().await?;
    assert_eq!(listed.as_array().unwrap().len(), 1);

    // Listing for a missing provider is 404
    let resp = client
        .get(format!("{base}/api/servicos/prestador/999999999"))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::NOT_FOUND);

    // Wholesale update drops the tag
    let replacement = json!({
        "name": "Pintura",
        "description": "Parede e teto",
        "price": 300.0,
        "tag_ids": [],
    });
    let resp = client
        .put(format!("{base}/api/servicos/{offering_id}"))
        .json(&replacement)
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::OK);
    let updated: serde_json::Value = resp.json().await?;
    assert_eq!(updated["name"], "Pintura");
    assert_eq!(updated["tags"].as_array().unwrap().len(), 0);

    // Offering deletion 404s on the second attempt (unlike users)
    let resp = client
        .delete(format!("{base}/api/servicos/{offering_id}"))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::NO_CONTENT);
    let resp = client
        .delete(format!("{base}/api/servicos/{offering_id}"))
        .send()
        .await?;
    assert_eq!(resp.status(), HttpStatusCode::NOT_FOUND);

    // Cleanup
    client.delete(format!("{base}/api/tags/{tag_id}")).send().await?;
    client
        .delete(format!("{base}/api/usuarios/{provider_id}"))
        .send()
        .await?;
    Ok(())
}
