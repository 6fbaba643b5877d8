//! API integration tests
//!
//! These run against a live server with a migrated database.

use reqwest::Client;
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:8080/api/v1";

/// Helper to get an authenticated token
async fn get_auth_token(client: &Client) -> String {
    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send login request");

    let body: Value = response.json().await.expect("Failed to parse login response");
    body["token"].as_str().expect("No token in response").to_string()
}

/// Helper to create an equipment type, returning its ID
async fn create_type(client: &Client, token: &str, name: &str, mask: &str) -> i64 {
    let response = client
        .post(format!("{}/equipment/types", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "name": name, "serial_mask": mask }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    body["id"].as_i64().expect("No type ID")
}

/// Helper to delete an equipment type (cascades to its equipment)
async fn delete_type(client: &Client, token: &str, type_id: i64) {
    let _ = client
        .delete(format!("{}/equipment/types/{}", BASE_URL, type_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await;
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();

    let response = client
        .get(format!("{}/health", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_login() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "admin"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["token"].is_string());
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
#[ignore]
async fn test_login_invalid_credentials() {
    let client = Client::new();

    let response = client
        .post(format!("{}/auth/login", BASE_URL))
        .json(&json!({
            "login": "admin",
            "password": "wrong"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_get_current_user() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/auth/me", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["login"], "admin");
}

#[tokio::test]
#[ignore]
async fn test_unauthorized_access() {
    let client = Client::new();

    let response = client
        .get(format!("{}/equipment", BASE_URL))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 401);
}

#[tokio::test]
#[ignore]
async fn test_equipment_type_crud() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let type_id = create_type(&client, &token, "IT Router X-200", "NNNAAA").await;

    // Read it back
    let response = client
        .get(format!("{}/equipment/types/{}", BASE_URL, type_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["serial_mask"], "NNNAAA");

    // Update the mask
    let response = client
        .put(format!("{}/equipment/types/{}", BASE_URL, type_id))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({ "serial_mask": "NNNAAX" }))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["serial_mask"], "NNNAAX");

    delete_type(&client, &token, type_id).await;
}

#[tokio::test]
#[ignore]
async fn test_equipment_type_mask_too_long() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .post(format!("{}/equipment/types", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "name": "IT Broken",
            "serial_mask": "A".repeat(51)
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), 400);
}

#[tokio::test]
#[ignore]
async fn test_batch_intake_and_soft_delete_lifecycle() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let type_id = create_type(&client, &token, "IT Switch L-10", "NNNN").await;

    // Batch create
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipment_type_id": type_id,
            "serial_numbers": ["0001", "0002"],
            "note": "rack 3"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["count"], 2);
    let equipment_id = body["data"][0]["id"].as_i64().expect("No equipment ID");

    // Soft delete the first record
    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(!body["deleted_at"].is_null());

    // Deleted records are invisible to the default view
    let response = client
        .get(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // Deleting it again also reports not found
    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 404);

    // A soft-deleted record still blocks its serial number
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipment_type_id": type_id,
            "serial_numbers": ["0001"]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(
        body["validation_errors"][0]["errors"][0],
        "already exists in database"
    );

    // Restore brings it back
    let response = client
        .post(format!("{}/equipment/{}/restore", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["deleted_at"].is_null());
    assert_eq!(body["serial_number"], "0001");
    assert_eq!(body["note"], "rack 3");

    // Restoring an active record is not actionable
    let response = client
        .post(format!("{}/equipment/{}/restore", BASE_URL, equipment_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);

    delete_type(&client, &token, type_id).await;
}

#[tokio::test]
#[ignore]
async fn test_batch_intake_rejects_whole_batch() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let type_id = create_type(&client, &token, "IT Modem Q-7", "NNNN").await;

    // One bad serial rejects the whole batch
    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipment_type_id": type_id,
            "serial_numbers": ["1234", "bad!", "1234"]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.expect("Failed to parse response");
    let errors = body["validation_errors"].as_array().expect("No report");
    assert_eq!(errors.len(), 2);

    // The valid serial was not persisted
    let response = client
        .get(format!(
            "{}/equipment?equipment_type={}&serial_number=1234",
            BASE_URL, type_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 0);

    delete_type(&client, &token, type_id).await;
}

#[tokio::test]
#[ignore]
async fn test_equipment_search_filters() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let type_id = create_type(&client, &token, "IT AP Wave-9", "AANN").await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipment_type_id": type_id,
            "serial_numbers": ["AB12", "CD34"],
            "note": "warehouse west"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);

    // Substring search on serial number, scoped to the type
    let response = client
        .get(format!(
            "{}/equipment?equipment_type={}&serial_number_contains=AB",
            BASE_URL, type_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["serial_number"], "AB12");
    assert_eq!(body["items"][0]["equipment_type_mask"], "AANN");

    // Free-text search across the note
    let response = client
        .get(format!(
            "{}/equipment?equipment_type={}&search=warehouse",
            BASE_URL, type_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 2);

    delete_type(&client, &token, type_id).await;
}

#[tokio::test]
#[ignore]
async fn test_type_delete_cascades() {
    let client = Client::new();
    let token = get_auth_token(&client).await;
    let type_id = create_type(&client, &token, "IT ONT F-1", "NN").await;

    let response = client
        .post(format!("{}/equipment", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .json(&json!({
            "equipment_type_id": type_id,
            "serial_numbers": ["11", "22", "33"]
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 201);
    let body: Value = response.json().await.expect("Failed to parse response");
    let soft_deleted_id = body["data"][0]["id"].as_i64().expect("No equipment ID");

    // Soft-delete one of the three
    let response = client
        .delete(format!("{}/equipment/{}", BASE_URL, soft_deleted_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert!(response.status().is_success());

    // Deleting the type removes all three rows permanently
    let response = client
        .delete(format!("{}/equipment/types/{}", BASE_URL, type_id))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), 204);

    let response = client
        .get(format!(
            "{}/equipment?equipment_type={}&visibility=all",
            BASE_URL, type_id
        ))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");
    let body: Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["total"], 0);
}

#[tokio::test]
#[ignore]
async fn test_get_stats() {
    let client = Client::new();
    let token = get_auth_token(&client).await;

    let response = client
        .get(format!("{}/equipment/stats", BASE_URL))
        .header("Authorization", format!("Bearer {}", token))
        .send()
        .await
        .expect("Failed to send request");

    assert!(response.status().is_success());

    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["total_equipment"].is_number());
    assert!(body["total_types"].is_number());
    assert_eq!(body["total_active"], body["total_equipment"]);
    assert!(body["type_statistics"].is_array());
}
