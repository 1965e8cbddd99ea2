use fieldops_async::types::{ListParams, NewJob};
use fieldops_async::{Client, FieldOpsConfig, Method};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> Client<FieldOpsConfig> {
    Client::with_config(FieldOpsConfig::detached(server.uri()).with_api_key("k"))
}

#[tokio::test]
async fn raw_request_sends_json_body() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/jobs/42"))
        .and(body_json(serde_json::json!({"status": "completed"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 42, "status": "completed"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let body = serde_json::json!({"status": "completed"});
    let resp = client
        .request("/jobs/42", Method::Patch, Some(&body))
        .await
        .unwrap();

    assert_eq!(resp["status"], "completed");
}

#[tokio::test]
async fn raw_request_empty_body_is_null() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/customers/c1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp = client
        .request("customers/c1", Method::Delete, None)
        .await
        .unwrap();
    assert!(resp.is_null());
}

#[tokio::test]
async fn jobs_list_and_create() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("status", "scheduled"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "jobs": [{
                "id": 7,
                "customer_id": 3,
                "title": "Furnace tune-up",
                "status": "scheduled",
                "scheduled_start": "2026-03-04T15:00:00Z",
                "priority": "high"
            }],
            "total": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/jobs"))
        .and(body_json(serde_json::json!({
            "customer_id": "3",
            "title": "Leak check",
            "address": "1 Main St"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "8",
            "customer_id": "3",
            "title": "Leak check"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let page = client
        .jobs()
        .list(&ListParams::new().with_status("scheduled"))
        .await
        .unwrap();
    assert_eq!(page.data.len(), 1);
    let job = &page.data[0];
    assert_eq!(job.id, "7");
    assert_eq!(job.customer_id.as_deref(), Some("3"));
    assert!(job.scheduled_start.is_some());
    assert_eq!(job.extra["priority"], "high");

    let created = client
        .jobs()
        .create(NewJob::new("3", "Leak check").with_address("1 Main St"))
        .await
        .unwrap();
    assert_eq!(created.id, "8");
}
