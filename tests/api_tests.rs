use enrollment_service::{
    AppState, SeedData,
    auth::{Claims, Role},
    config::{AppConfig, Env},
    create_router,
    models::{ApiResponse, Enrollment, NewEnrollment, StudentEnrollments},
};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::json;
use std::time::SystemTime;
use tokio::net::TcpListener;

const TEST_JWT_SECRET: &str = "api-test-secret";

#[derive(Debug)]
pub struct TestApp {
    pub address: String,
}

async fn spawn_app(seed: SeedData) -> TestApp {
    let config = AppConfig {
        env: Env::Production,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        ..AppConfig::default()
    };
    let router = create_router(AppState::from_seed(seed, config));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    TestApp { address }
}

fn bearer(role: Role, student_id: Option<&str>) -> String {
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;
    let claims = Claims {
        sub: "api-tester".to_string(),
        role,
        student_id: student_id.map(str::to_string),
        iat: now,
        exp: now + 600,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .unwrap();
    format!("Bearer {}", token)
}

#[tokio::test]
async fn test_health_check() {
    let app = spawn_app(SeedData::default()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", app.address))
        .send()
        .await
        .expect("req fail");

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = spawn_app(SeedData::default()).await;

    let doc: serde_json::Value = reqwest::get(format!("{}/api-docs/openapi.json", app.address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(doc["paths"]["/api/v2/enrollments/{student_id}"].is_object());
}

#[tokio::test]
async fn test_openapi_operations_carry_enrollments_tag() {
    let app = spawn_app(SeedData::default()).await;

    let doc: serde_json::Value = reqwest::get(format!("{}/api-docs/openapi.json", app.address))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let operations = [
        ("/api/v2/enrollments", "get"),
        ("/api/v2/enrollments/reset", "post"),
        ("/api/v2/enrollments/{student_id}", "get"),
        ("/api/v2/enrollments/{student_id}", "post"),
        ("/api/v2/enrollments/{student_id}", "delete"),
    ];
    for (path, method) in operations {
        let tags = &doc["paths"][path][method]["tags"];
        assert_eq!(tags, &serde_json::json!(["enrollments"]), "{} {}", method, path);
    }
}

#[tokio::test]
async fn test_enrollment_lifecycle() {
    let app = spawn_app(SeedData::default()).await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/v2/enrollments/S1", app.address);
    let s1 = bearer(Role::Student, Some("S1"));

    // Enroll
    let response = client
        .post(&url)
        .header("Authorization", &s1)
        .json(&json!({ "courseId": "CS101" }))
        .send()
        .await
        .expect("post fail");
    assert_eq!(response.status(), 200);
    let created: ApiResponse<NewEnrollment> = response.json().await.unwrap();
    assert!(created.success);
    assert_eq!(created.data.unwrap().new_enroll, Enrollment::new("S1", "CS101"));

    // Read back
    let response = client.get(&url).header("Authorization", &s1).send().await.unwrap();
    assert_eq!(response.status(), 200);
    let view: ApiResponse<StudentEnrollments> = response.json().await.unwrap();
    assert_eq!(view.data.unwrap().courses, vec!["CS101"]);

    // Admin sees it in the full listing
    let response = client
        .get(format!("{}/api/v2/enrollments", app.address))
        .header("Authorization", bearer(Role::Admin, None))
        .send()
        .await
        .unwrap();
    let all: ApiResponse<Vec<Enrollment>> = response.json().await.unwrap();
    assert_eq!(all.data.unwrap(), vec![Enrollment::new("S1", "CS101")]);

    // Drop
    let response = client
        .delete(&url)
        .header("Authorization", &s1)
        .json(&json!({ "courseId": "CS101" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let remaining: ApiResponse<Vec<Enrollment>> = response.json().await.unwrap();
    assert!(remaining.data.unwrap().is_empty());

    // Drop again
    let response = client
        .delete(&url)
        .header("Authorization", &s1)
        .json(&json!({ "courseId": "CS101" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
}
