use fieldops_tool_core::{TextOptions, ToolContext, ToolOutcome, ToolRegistry};
use fieldops_tools::{FieldOpsTools, build_registry};
use serde_json::{Value, json};
use std::sync::Arc;
use territory_coverage::test_support::StaticGeocoder;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BILLINGS: &str = "2800 1st Ave N, Billings, MT";
const DENVER: &str = "1437 Larimer St, Denver, CO";

fn geocoder() -> Arc<StaticGeocoder> {
    Arc::new(
        StaticGeocoder::new()
            .with(BILLINGS, 45.75, -108.5)
            .with(DENVER, 39.7392, -104.9903)
            .with("59101", 45.75, -108.5),
    )
}

fn registry(server: &MockServer, geo: &Arc<StaticGeocoder>) -> ToolRegistry {
    build_registry(Arc::new(FieldOpsTools::new(server.uri(), Arc::clone(geo))))
}

fn ctx() -> ToolContext {
    ToolContext::with_credential("test-api-key")
}

async fn mount_territories(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/territories"))
        .and(header("authorization", "Bearer test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

fn success(outcome: ToolOutcome) -> (Value, String) {
    match outcome {
        ToolOutcome::Success { data, text } => (data, text),
        ToolOutcome::Error { kind, message } => panic!("expected success, got {kind}: {message}"),
    }
}

fn error_kind(outcome: &ToolOutcome) -> &'static str {
    match outcome {
        ToolOutcome::Error { kind, .. } => *kind,
        ToolOutcome::Success { .. } => panic!("expected an error outcome"),
    }
}

#[tokio::test]
async fn coverage_reports_covering_territory() {
    let server = MockServer::start().await;
    mount_territories(
        &server,
        json!([{"id": 1, "name": "Billings", "zip_codes": ["59101"], "states": ["MT"]}]),
    )
    .await;
    let geo = geocoder();

    let (data, text) = success(
        registry(&server, &geo)
            .dispatch(
                "check_territory_coverage",
                json!({"address": BILLINGS}),
                &ctx(),
                &TextOptions::default(),
            )
            .await,
    );

    assert_eq!(data["status"], "covered");
    assert_eq!(data["covering_territory"]["territory"]["id"], "1");
    assert_eq!(data["covering_territory"]["boundary"]["source"], "square_fallback");
    assert_eq!(data["territories_checked"], 1);
    assert!(text.contains("Covered by Billings (1)"), "{text}");
}

#[tokio::test]
async fn coverage_reports_closest_when_outside() {
    let server = MockServer::start().await;
    mount_territories(
        &server,
        json!({"data": [
            {"id": "bil", "name": "Billings", "zip_codes": ["59101"]},
            {"id": "off", "name": "Dormant", "zip_codes": ["59101"], "active": false}
        ], "total": 2}),
    )
    .await;
    let geo = geocoder();

    let (data, text) = success(
        registry(&server, &geo)
            .dispatch(
                "check_territory_coverage",
                json!({"address": DENVER}),
                &ctx(),
                &TextOptions::default(),
            )
            .await,
    );

    assert_eq!(data["status"], "not_covered");
    assert!(data.get("covering_territory").is_none());
    assert_eq!(data["closest_territory"]["territory"]["id"], "bil");
    let km = data["closest_territory"]["distance"]["meters"].as_f64().unwrap() / 1_000.0;
    assert!((700.0..760.0).contains(&km), "{km}");
    assert_eq!(data["total_territories"], 2);
    assert_eq!(data["active_territories"], 1);
    assert!(text.starts_with(&format!("{DENVER} -> ")), "{text}");
    assert!(text.contains("Closest territory: Billings (bil)"), "{text}");
}

#[tokio::test]
async fn missing_credential_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let geo = geocoder();
    let reg = registry(&server, &geo);
    let opts = TextOptions::default();

    for (tool, args) in [
        ("check_territory_coverage", json!({"address": BILLINGS})),
        ("check_adjacent_territories", json!({"address": BILLINGS})),
        ("get_available_appointments", json!({"address": BILLINGS})),
        ("list_jobs", json!({})),
        ("get_invoice", json!({"id": "9"})),
    ] {
        let outcome = reg.dispatch(tool, args, &ToolContext::new(), &opts).await;
        assert_eq!(error_kind(&outcome), "permission", "{tool}");
        assert!(outcome.text().contains("credential"), "{tool}");
    }
    assert_eq!(geo.call_count(), 0);
}

#[tokio::test]
async fn upstream_failures_map_by_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/territories"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jobs/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "no such job"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .expect(1)
        .mount(&server)
        .await;
    let geo = geocoder();
    let reg = registry(&server, &geo);
    let opts = TextOptions::default();

    let coverage = reg
        .dispatch("check_territory_coverage", json!({"address": BILLINGS}), &ctx(), &opts)
        .await;
    assert_eq!(error_kind(&coverage), "external");
    assert!(coverage.text().contains("503"), "{}", coverage.text());

    let job = reg.dispatch("get_job", json!({"id": "404"}), &ctx(), &opts).await;
    assert_eq!(error_kind(&job), "not_found");

    let customers = reg.dispatch("list_customers", json!({}), &ctx(), &opts).await;
    assert_eq!(error_kind(&customers), "permission");
}

#[tokio::test]
async fn unknown_address_is_not_found_and_skips_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/territories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    let geo = geocoder();
    let reg = registry(&server, &geo);
    let opts = TextOptions::default();

    let unknown = reg
        .dispatch("check_territory_coverage", json!({"address": "nowhere at all"}), &ctx(), &opts)
        .await;
    assert_eq!(error_kind(&unknown), "not_found");

    let blank = reg
        .dispatch("check_territory_coverage", json!({"address": "   "}), &ctx(), &opts)
        .await;
    assert_eq!(error_kind(&blank), "invalid_input");
}

#[tokio::test]
async fn appointments_query_uses_geocoded_location() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/scheduling/availability"))
        .and(query_param("latitude", "45.75"))
        .and(query_param("longitude", "-108.5"))
        .and(query_param("date", "2026-03-04"))
        .and(query_param("duration_minutes", "90"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"slots": [
            {"start": "2026-03-04T15:00:00Z", "end": "2026-03-04T16:30:00Z",
             "technician_id": 7, "technician_name": "Sam", "territory_id": 1}
        ]})))
        .expect(1)
        .mount(&server)
        .await;
    let geo = geocoder();

    let (data, text) = success(
        registry(&server, &geo)
            .dispatch(
                "get_available_appointments",
                json!({"address": BILLINGS, "date": "2026-03-04", "duration_minutes": 90}),
                &ctx(),
                &TextOptions::default(),
            )
            .await,
    );

    assert_eq!(data["coordinate"]["latitude"], 45.75);
    assert_eq!(data["slots"][0]["technician_id"], "7");
    assert_eq!(data["slots"][0]["territory_id"], "1");
    assert_eq!(
        text,
        format!("1 open appointments near {BILLINGS}\n  2026-03-04 15:00 - 16:30 UTC with Sam")
    );
}

#[tokio::test]
async fn appointments_reject_bad_date_before_lookup() {
    let server = MockServer::start().await;
    let geo = geocoder();

    let outcome = registry(&server, &geo)
        .dispatch(
            "get_available_appointments",
            json!({"address": BILLINGS, "date": "next tuesday"}),
            &ctx(),
            &TextOptions::default(),
        )
        .await;

    assert_eq!(error_kind(&outcome), "invalid_input");
    assert_eq!(geo.call_count(), 0);
}

#[tokio::test]
async fn adjacency_lists_territories_in_range() {
    let server = MockServer::start().await;
    mount_territories(
        &server,
        json!([
            {"id": "bil", "name": "Billings", "zip_codes": ["59101"]},
            {"id": "den", "name": "Denver", "cities": ["Denver"], "states": ["CO"]},
            {"id": "ghost", "name": "Ghost Town"}
        ]),
    )
    .await;
    let geo = Arc::new(
        StaticGeocoder::new()
            .with(BILLINGS, 45.76, -108.5)
            .with("59101", 45.75, -108.5)
            .with("Denver, CO", 39.7392, -104.9903),
    );

    let (data, text) = success(
        registry(&server, &geo)
            .dispatch(
                "check_adjacent_territories",
                json!({"address": BILLINGS, "radius_miles": 100}),
                &ctx(),
                &TextOptions::default(),
            )
            .await,
    );

    assert_eq!(data["radius_miles"], 100.0);
    let adjacent = data["adjacent"].as_array().unwrap();
    assert_eq!(adjacent.len(), 1);
    assert_eq!(adjacent[0]["territory"]["id"], "bil");
    assert_eq!(data["unresolved"][0]["id"], "ghost");
    assert!(text.contains("1 territories within 100 mi"), "{text}");
    assert!(text.contains("Could not locate: Ghost Town"), "{text}");
}

#[tokio::test]
async fn adjacency_rejects_radius_before_any_lookup() {
    let server = MockServer::start().await;
    let geo = geocoder();
    let reg = registry(&server, &geo);

    for radius in [0.0, -5.0, 500.5] {
        let outcome = reg
            .dispatch(
                "check_adjacent_territories",
                json!({"address": BILLINGS, "radius_miles": radius}),
                &ctx(),
                &TextOptions::default(),
            )
            .await;
        assert_eq!(error_kind(&outcome), "invalid_input", "{radius}");
    }
    assert_eq!(geo.call_count(), 0);
}

#[tokio::test]
async fn list_jobs_passes_pagination_through() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "100"))
        .and(query_param("status", "scheduled"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jobs": [{"id": 11, "title": "Furnace repair", "status": "scheduled"}],
            "page": 2, "per_page": 100, "total_count": 101, "has_more": false
        })))
        .expect(1)
        .mount(&server)
        .await;
    let geo = geocoder();

    let (data, text) = success(
        registry(&server, &geo)
            .dispatch(
                "list_jobs",
                json!({"page": 2, "per_page": 500, "status": "scheduled"}),
                &ctx(),
                &TextOptions::default(),
            )
            .await,
    );

    assert_eq!(data["data"][0]["id"], "11");
    assert_eq!(data["total"], 101);
    assert_eq!(text, "1 items (page 2, 101 total)\n  11 Furnace repair [scheduled]");
}

#[tokio::test]
async fn get_customer_renders_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/customers/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 42, "name": "Ada Smith", "email": "ada@example.test", "tier": "gold"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let geo = geocoder();

    let (data, text) = success(
        registry(&server, &geo)
            .dispatch("get_customer", json!({"id": "42"}), &ctx(), &TextOptions::default())
            .await,
    );

    assert_eq!(data["tier"], "gold");
    assert!(text.starts_with("42 Ada Smith <ada@example.test>\n"), "{text}");
}

#[test]
fn manifest_lists_every_tool_sorted() {
    let reg = build_registry(Arc::new(FieldOpsTools::new(
        "http://127.0.0.1:9",
        StaticGeocoder::new(),
    )));
    let manifest = serde_json::to_value(reg.manifest()).unwrap();
    let names: Vec<&str> = manifest
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap())
        .collect();

    assert_eq!(
        names,
        vec![
            "check_adjacent_territories",
            "check_territory_coverage",
            "get_available_appointments",
            "get_customer",
            "get_invoice",
            "get_job",
            "get_territory",
            "list_customers",
            "list_invoices",
            "list_jobs",
            "list_territories",
        ]
    );

    let coverage = &manifest[1];
    assert!(!coverage["description"].as_str().unwrap().is_empty());
    assert_eq!(coverage["inputSchema"]["required"], json!(["address"]));
    let adjacent = &manifest[0]["inputSchema"]["properties"];
    assert!(adjacent.get("radius_miles").is_some());
}
