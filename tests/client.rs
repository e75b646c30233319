//! Client behaviour against an in-process naming service.

mod common;

use std::sync::Arc;
use std::time::Duration;

use aznamingtool_provider::catalog::ResourceTypeCatalog;
use aznamingtool_provider::client::{ApiClient, EndpointRegistry, QUEUE_CAPACITY};
use aznamingtool_provider::config::ClientConfig;
use aznamingtool_provider::models::{ResourceEntity, ResourceNameRequest, ResourceNameResponse};
use aznamingtool_provider::services::{
    CustomComponentService, ResourceComponentService, ResourceDelimiterService,
    ResourceNamingService, ResourceTypeService, TaxonomyKind, TaxonomyService,
};
use aznamingtool_provider::ApiError;
use axum::http::Method;
use common::{StubServer, ADMIN_PASSWORD, API_KEY};
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};

fn name_response(id: i64, name: &str) -> Value {
    json!({
        "ResourceName": name,
        "Message": "",
        "Success": true,
        "ResourceNameDetails": {
            "Id": id,
            "CreatedOn": "2024-05-01T10:00:00",
            "ResourceName": name,
            "ResourceTypeName": "Compute/virtualMachines",
            "User": "General",
            "Components": [["ResourceType", "vm"], ["ResourceEnvironment", "dev"]]
        }
    })
}

fn numbered_client(stub: &StubServer, count: usize) -> ApiClient {
    let mut endpoints = EndpointRegistry::new();
    for i in 0..count {
        endpoints = endpoints.with_endpoint(format!("Op{}", i), format!("{}/op/{}", stub.url(), i));
    }
    ApiClient::builder(ClientConfig::new(stub.url(), API_KEY))
        .endpoints(endpoints)
        .build()
        .unwrap()
}

// =========================================================================
// Queue ordering
// =========================================================================

#[tokio::test]
async fn test_requests_run_in_submission_order() {
    let stub = StubServer::start().await;
    for i in 0..10 {
        // Earlier requests are slower, so any overlap would reorder arrivals.
        stub.respond_delayed(
            Method::GET,
            &format!("/op/{}", i),
            200,
            format!("{}", i),
            Duration::from_millis(30 - 3 * i as u64),
        );
    }
    let client = numbered_client(&stub, 10);

    let mut pending = Vec::new();
    for i in 0..10 {
        let request = client
            .http()
            .get(client.endpoints().resolve(&format!("Op{}", i), &[]).unwrap())
            .build()
            .unwrap();
        pending.push(client.enqueue(&request).await.unwrap());
    }
    for (i, reply) in pending.into_iter().enumerate() {
        let response = reply.wait().await.unwrap();
        assert_eq!(response.text(), i.to_string());
    }

    let paths: Vec<String> = stub.requests().into_iter().map(|r| r.path).collect();
    let expected: Vec<String> = (0..10).map(|i| format!("/op/{}", i)).collect();
    assert_eq!(paths, expected);
    assert_eq!(stub.max_in_flight(), 1);
}

#[tokio::test]
async fn test_concurrent_callers_never_overlap() {
    let stub = StubServer::start().await;
    for i in 0..8 {
        stub.respond_delayed(
            Method::GET,
            &format!("/op/{}", i),
            200,
            "0",
            Duration::from_millis(10),
        );
    }
    let client = numbered_client(&stub, 8);
    // Order in which enqueue handed each request to the worker.
    let accepted = Arc::new(tokio::sync::Mutex::new(Vec::new()));

    let mut tasks = Vec::new();
    for i in 0..8 {
        let client = client.clone();
        let accepted = Arc::clone(&accepted);
        tasks.push(tokio::spawn(async move {
            let request = client
                .http()
                .get(client.endpoints().resolve(&format!("Op{}", i), &[]).unwrap())
                .build()
                .unwrap();
            let reply = {
                let mut accepted = accepted.lock().await;
                let reply = client.enqueue(&request).await.unwrap();
                accepted.push(i);
                reply
            };
            reply.wait().await.unwrap().text()
        }));
    }
    for task in tasks {
        assert_eq!(task.await.unwrap(), "0");
    }

    let mut requests = stub.requests();
    requests.sort_by_key(|r| r.seq);
    let arrived: Vec<String> = requests.into_iter().map(|r| r.path).collect();
    let expected: Vec<String> = accepted
        .lock()
        .await
        .iter()
        .map(|i| format!("/op/{}", i))
        .collect();
    assert_eq!(arrived.len(), 8);
    assert_eq!(arrived, expected);
    assert_eq!(stub.max_in_flight(), 1);
}

#[tokio::test]
async fn test_full_queue_applies_backpressure() {
    let stub = StubServer::start().await;
    stub.respond_delayed(Method::GET, "/slow", 200, "{}", Duration::from_millis(300));
    stub.respond(Method::GET, "/fast", 200, "{}");
    let endpoints = EndpointRegistry::new()
        .with_endpoint("Slow", format!("{}/slow", stub.url()))
        .with_endpoint("Fast", format!("{}/fast", stub.url()));
    let client = ApiClient::builder(ClientConfig::new(stub.url(), API_KEY))
        .endpoints(endpoints)
        .build()
        .unwrap();

    let slow = client
        .http()
        .get(client.endpoints().resolve("Slow", &[]).unwrap())
        .build()
        .unwrap();
    let fast = client
        .http()
        .get(client.endpoints().resolve("Fast", &[]).unwrap())
        .build()
        .unwrap();

    let first = client.enqueue(&slow).await.unwrap();
    // Wait for the worker to pick up the slow request.
    while client.queue().available() < QUEUE_CAPACITY {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let mut pending = Vec::new();
    for _ in 0..QUEUE_CAPACITY {
        pending.push(client.enqueue(&fast).await.unwrap());
    }
    assert_eq!(client.queue().available(), 0);

    let blocked = tokio::time::timeout(Duration::from_millis(50), client.enqueue(&fast)).await;
    assert!(blocked.is_err(), "enqueue into a full queue should wait");

    assert_ok!(first.wait().await);
    for reply in pending {
        assert_ok!(reply.wait().await);
    }
    assert_eq!(stub.requests_to("/fast").len(), QUEUE_CAPACITY);
}

// =========================================================================
// Authentication
// =========================================================================

#[tokio::test]
async fn test_auth_headers_attached() {
    let stub = StubServer::start().await;
    stub.respond_json(Method::GET, "/api/ResourceLocations", 200, json!([]));

    let client = stub.client();
    let _: Vec<ResourceEntity> = client.get("GetAllResourceLocations", &[]).await.unwrap();

    let requests = stub.requests();
    assert_eq!(requests[0].header("apikey"), Some(API_KEY));
    assert_eq!(requests[0].header("adminpassword"), Some(ADMIN_PASSWORD));
}

#[tokio::test]
async fn test_admin_password_omitted_when_unset() {
    let stub = StubServer::start().await;
    stub.respond_json(Method::GET, "/api/ResourceLocations", 200, json!([]));

    let client = ApiClient::new(ClientConfig::new(stub.url(), API_KEY)).unwrap();
    let _: Vec<ResourceEntity> = client.get("GetAllResourceLocations", &[]).await.unwrap();

    let requests = stub.requests();
    assert_eq!(requests[0].header("apikey"), Some(API_KEY));
    assert!(requests[0].header("adminpassword").is_none());
}

// =========================================================================
// Preconditions
// =========================================================================

#[tokio::test]
async fn test_unknown_operation_sends_nothing() {
    let stub = StubServer::start().await;
    let client = stub.client();

    let err = client.get::<Value>("NoSuchOperation", &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::Precondition(_)));

    let err = client
        .post::<Value, Value>("NoSuchOperation", Some(&json!({})))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Precondition(_)));

    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_empty_registry_is_a_precondition_failure() {
    let stub = StubServer::start().await;
    let client = ApiClient::builder(ClientConfig::new(stub.url(), API_KEY))
        .endpoints(EndpointRegistry::new())
        .build()
        .unwrap();

    let err = client.delete("DeleteGeneratedName", &[("id", "1")]).await.unwrap_err();
    assert!(matches!(err, ApiError::Precondition(_)));
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_streaming_body_cannot_be_queued() {
    let stub = StubServer::start().await;
    let client = stub.client();

    let stream = tokio_stream::once(Ok::<_, std::io::Error>(b"{}".to_vec()));
    let request = client
        .http()
        .post(format!("{}/api/ResourceNamingRequests/RequestName", stub.url()))
        .body(reqwest::Body::wrap_stream(stream))
        .build()
        .unwrap();

    let err = assert_err!(client.enqueue(&request).await);
    assert!(matches!(err, ApiError::Precondition(_)));
    assert!(stub.requests().is_empty());
}

// =========================================================================
// Failures
// =========================================================================

#[tokio::test]
async fn test_error_status_keeps_payload() {
    let stub = StubServer::start().await;
    stub.respond(Method::GET, "/api/ResourceTypes", 500, r#"{"message":"boom"}"#);

    let err = stub
        .client()
        .get::<Value>("GetAllResourceTypes", &[])
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(err.server_message().as_deref(), Some("boom"));
    let payload: Value = err.payload().unwrap();
    assert_eq!(payload, json!({"message": "boom"}));
}

#[tokio::test]
async fn test_error_status_keeps_raw_bytes() {
    let stub = StubServer::start().await;
    let raw = vec![b'E', b'R', 0xff, 0xfe, b'!'];
    stub.respond(Method::GET, "/api/ResourceTypes", 502, raw.clone());

    let err = stub
        .client()
        .get::<Value>("GetAllResourceTypes", &[])
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(502));
    assert_eq!(err.body(), Some(raw.as_slice()));
    assert!(err.payload::<Value>().is_none());
}

#[tokio::test]
async fn test_failures_do_not_poison_the_queue() {
    let stub = StubServer::start().await;
    stub.respond(Method::GET, "/broken", 503, "unavailable");
    stub.respond(Method::GET, "/ok", 200, r#"{"ok":true}"#);
    let endpoints = EndpointRegistry::new()
        .with_endpoint("Unreachable", "http://127.0.0.1:1/nothing")
        .with_endpoint("Broken", format!("{}/broken", stub.url()))
        .with_endpoint("Ok", format!("{}/ok", stub.url()));
    let client = ApiClient::builder(
        ClientConfig::new(stub.url(), API_KEY).with_timeout(Duration::from_secs(5)),
    )
    .endpoints(endpoints)
    .build()
    .unwrap();

    let err = client.get::<Value>("Unreachable", &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));

    let err = client.get::<Value>("Broken", &[]).await.unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 503, .. }));

    let value: Value = assert_ok!(client.get("Ok", &[]).await);
    assert_eq!(value["ok"], true);
}

#[tokio::test]
async fn test_undecodable_body() {
    let stub = StubServer::start().await;
    stub.respond(Method::GET, "/api/ResourceTypes", 200, "not json");

    let err = stub
        .client()
        .get::<Vec<Value>>("GetAllResourceTypes", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

// =========================================================================
// Typed operations
// =========================================================================

#[tokio::test]
async fn test_cold_catalog_loads_once_under_concurrency() {
    let stub = StubServer::start().await;
    stub.respond_delayed(
        Method::GET,
        "/api/ResourceTypes",
        200,
        json!([{"Id": 1, "Resource": "Compute/virtualMachines", "ShortName": "vm"}]).to_string(),
        Duration::from_millis(50),
    );
    let client = stub.client();
    let catalog = Arc::new(ResourceTypeCatalog::new());

    let mut tasks = Vec::new();
    for _ in 0..6 {
        let client = client.clone();
        let catalog = Arc::clone(&catalog);
        tasks.push(tokio::spawn(async move {
            catalog.contains(&client, "vm").await.unwrap()
        }));
    }
    for task in tasks {
        assert!(task.await.unwrap());
    }

    assert!(catalog.is_loaded().await);
    assert_eq!(stub.requests_to("/api/ResourceTypes").len(), 1);
}

#[tokio::test]
async fn test_request_name_end_to_end() {
    let stub = StubServer::start().await;
    stub.respond_json(
        Method::POST,
        "/api/ResourceNamingRequests/RequestName",
        200,
        name_response(12, "vm-dev"),
    );

    let client = stub.client();
    let request = ResourceNameRequest {
        resource_type: "vm".to_string(),
        resource_environment: "dev".to_string(),
        ..Default::default()
    };
    let response = ResourceNamingService::new(&client)
        .request_name(&request)
        .await
        .unwrap();

    assert!(response.success);
    assert_eq!(response.resource_name, "vm-dev");
    assert_eq!(response.resource_name_details.id, 12);
    assert_eq!(response.resource_name_details.components.len(), 2);

    let sent = &stub.requests()[0];
    assert_eq!(sent.method, Method::POST);
    assert_eq!(sent.header("content-type"), Some("application/json"));
    let body = sent.json();
    assert_eq!(body["ResourceType"], "vm");
    assert_eq!(body["ResourceEnvironment"], "dev");
}

#[tokio::test]
async fn test_request_name_accepts_camel_case() {
    let stub = StubServer::start().await;
    stub.respond_json(
        Method::POST,
        "/api/ResourceNamingRequests/RequestName",
        200,
        json!({
            "resourceName": "vm-prd",
            "success": true,
            "resourceNameDetails": {"id": 3, "resourceName": "vm-prd"}
        }),
    );

    let client = stub.client();
    let response: ResourceNameResponse = client
        .post("RequestName", Some(&ResourceNameRequest::default()))
        .await
        .unwrap();
    assert_eq!(response.resource_name, "vm-prd");
    assert_eq!(response.resource_name_details.id, 3);
}

#[tokio::test]
async fn test_unsuccessful_name_request_is_rejected() {
    let stub = StubServer::start().await;
    stub.respond_json(
        Method::POST,
        "/api/ResourceNamingRequests/RequestName",
        200,
        json!({"Success": false, "Message": "Resource type is invalid"}),
    );

    let client = stub.client();
    let err = ResourceNamingService::new(&client)
        .request_name(&ResourceNameRequest::default())
        .await
        .unwrap_err();

    match err {
        ApiError::Rejected { message } => assert_eq!(message, "Resource type is invalid"),
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_get_interpolates_path() {
    let stub = StubServer::start().await;
    stub.respond_json(
        Method::GET,
        "/api/ResourceLocations/4",
        200,
        json!({"Id": 4, "Name": "East US", "ShortName": "eus", "SortOrder": 2}),
    );

    let client = stub.client();
    let location = TaxonomyService::new(&client, TaxonomyKind::Location)
        .get("4")
        .await
        .unwrap();

    assert_eq!(
        location,
        ResourceEntity {
            id: 4,
            name: "East US".to_string(),
            short_name: "eus".to_string(),
            sort_order: 2,
        }
    );
    assert_eq!(stub.requests()[0].path, "/api/ResourceLocations/4");
}

#[tokio::test]
async fn test_delete_sends_empty_body() {
    let stub = StubServer::start().await;
    stub.respond(Method::DELETE, "/api/Admin/DeleteGeneratedName/12", 200, "");

    let client = stub.client();
    assert_ok!(
        ResourceNamingService::new(&client)
            .delete_generated_name("12")
            .await
    );

    let sent = &stub.requests()[0];
    assert_eq!(sent.method, Method::DELETE);
    assert!(sent.body.is_empty());
}

#[tokio::test]
async fn test_delete_as_decodes_optional_body() {
    let stub = StubServer::start().await;
    stub.respond(Method::DELETE, "/api/ResourceEnvironments/2", 200, r#"{"Message":"deleted"}"#);
    stub.respond(Method::DELETE, "/api/ResourceEnvironments/3", 200, "");

    let client = stub.client();
    let with_body: Option<Value> = client
        .delete_as("DeleteResourceEnvironment", &[("id", "2")])
        .await
        .unwrap();
    assert_eq!(with_body.unwrap()["Message"], "deleted");

    let without_body: Option<Value> = client
        .delete_as("DeleteResourceEnvironment", &[("id", "3")])
        .await
        .unwrap();
    assert!(without_body.is_none());
}

// =========================================================================
// Service wrappers
// =========================================================================

#[tokio::test]
async fn test_custom_components_by_parent() {
    let stub = StubServer::start().await;
    stub.respond_json(
        Method::GET,
        "/api/CustomComponents/GetByParentType/AppTier",
        200,
        json!([{"Id": 1, "ParentComponent": "AppTier", "Name": "Web", "ShortName": "web"}]),
    );
    stub.respond_json(Method::GET, "/api/CustomComponents/GetByParentId/9", 200, json!([]));
    stub.respond(Method::DELETE, "/api/CustomComponents/DeleteByParentId/9", 200, "");

    let client = stub.client();
    let service = CustomComponentService::new(&client);

    let values = service.get_by_parent_type("AppTier").await.unwrap();
    assert_eq!(values.len(), 1);
    assert_eq!(values[0].short_name, "web");
    assert!(service.get_by_parent_id("9").await.unwrap().is_empty());
    assert_ok!(service.delete_by_parent_id("9").await);

    let methods: Vec<Method> = stub.requests().into_iter().map(|r| r.method).collect();
    assert_eq!(methods, vec![Method::GET, Method::GET, Method::DELETE]);
}

#[tokio::test]
async fn test_resource_components_and_types() {
    let stub = StubServer::start().await;
    stub.respond_json(
        Method::GET,
        "/api/ResourceComponents",
        200,
        json!([
            {"Id": 1, "Name": "ResourceEnvironment", "DisplayName": "Environment", "Enabled": true, "SortOrder": 2},
            {"Id": 2, "Name": "AppTier", "IsCustom": true, "MinLength": "1", "MaxLength": "5"}
        ]),
    );
    stub.respond_json(
        Method::GET,
        "/api/ResourceTypes/31",
        200,
        json!({"Id": 31, "Resource": "Compute/virtualMachines", "ShortName": "vm", "LengthMax": "15"}),
    );

    let client = stub.client();
    let components = ResourceComponentService::new(&client).get_all().await.unwrap();
    assert_eq!(components[0].display_name, "Environment");
    assert!(components[1].is_custom);
    assert_eq!(components[1].max_length, "5");

    let resource_type = ResourceTypeService::new(&client).get("31").await.unwrap();
    assert_eq!(resource_type.short_name, "vm");
    assert_eq!(resource_type.length_max, "15");
}

#[tokio::test]
async fn test_active_delimiter() {
    let stub = StubServer::start().await;
    stub.respond_json(
        Method::GET,
        "/api/ResourceDelimiters",
        200,
        json!([
            {"Id": 1, "Name": "dash", "Delimiter": "-", "Enabled": false, "SortOrder": 0},
            {"Id": 2, "Name": "none", "Delimiter": "", "Enabled": true, "SortOrder": 1}
        ]),
    );

    let client = stub.client();
    let active = ResourceDelimiterService::new(&client).active().await.unwrap();
    assert_eq!(active.unwrap().name, "none");
}
