//! Reconciler tests: create vs. update branching, error propagation,
//! no-op pass-through, and the eligibility gate.

use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use nimbus_connector::config::Credentials;
use nimbus_connector::event::{AliasEvent, Channel, Event, EventKind, IdentifyEvent, TrackEvent};
use nimbus_connector_desk::model::CustomerId;
use nimbus_connector_desk::{Delivery, DeskConfig, DeskConnector};

fn connector(server: &MockServer) -> DeskConnector {
    let config = DeskConfig::new("acme", Credentials::basic("ops@example.com", "hunter2"))
        .with_api_root(server.uri());
    DeskConnector::new(config).unwrap()
}

fn identify_event() -> IdentifyEvent {
    let mut identify = IdentifyEvent {
        user_id: Some("usr-1".to_string()),
        email: Some("jane@example.com".to_string()),
        first_name: Some("Jane".to_string()),
        last_name: Some("Doe".to_string()),
        ..Default::default()
    };
    identify
        .traits
        .insert("userId".to_string(), json!("usr-1"));
    identify
}

fn customer_body(id: u64) -> Value {
    json!({
        "id": id,
        "external_id": "usr-1",
        "first_name": "Jane",
        "last_name": "Doe",
        "emails": [{ "type": "other", "value": "jane@example.com" }]
    })
}

fn not_found() -> Value {
    json!({ "total_entries": 0, "_embedded": { "entries": [] } })
}

fn found(id: u64) -> Value {
    json!({ "total_entries": 1, "_embedded": { "entries": [customer_body(id)] } })
}

async fn mount_empty_searches(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/customers/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(not_found()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_unmatched_identify_creates_customer() {
    let server = MockServer::start().await;
    mount_empty_searches(&server).await;

    Mock::given(method("POST"))
        .and(path("/customers"))
        .and(body_partial_json(json!({
            "external_id": "usr-1",
            "first_name": "Jane",
            "last_name": "Doe",
            "emails": [{ "type": "other", "value": "jane@example.com" }],
            "emails_update_action": "replace",
            "addresses_update_action": "replace",
            "phone_numbers_update_action": "replace"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(customer_body(7)))
        .expect(1)
        .mount(&server)
        .await;

    let connector = connector(&server);
    let event = Event::new(Channel::Server, EventKind::Identify(identify_event()));

    match connector.deliver(&event).await.unwrap() {
        Delivery::Created(customer) => {
            assert_eq!(customer.id, CustomerId::Number(7));
            assert_eq!(
                customer.emails[0].value.as_deref(),
                Some("jane@example.com")
            );
            assert_eq!(customer.first_name.as_deref(), Some("Jane"));
            assert_eq!(customer.last_name.as_deref(), Some("Doe"));
        }
        other => panic!("expected create, got {other:?}"),
    }
}

#[tokio::test]
async fn test_matched_identify_updates_in_place() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers/search"))
        .and(query_param("external_id", "usr-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(found(42)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/customers/search"))
        .and(query_param("email", "jane@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(not_found()))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/customers/42"))
        .and(body_partial_json(json!({
            "emails_update_action": "replace",
            "addresses_update_action": "replace",
            "phone_numbers_update_action": "replace"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_body(42)))
        .expect(1)
        .mount(&server)
        .await;

    let connector = connector(&server);
    match connector.identify(&identify_event()).await.unwrap() {
        Delivery::Updated(customer) => assert_eq!(customer.id, CustomerId::Number(42)),
        other => panic!("expected update, got {other:?}"),
    }
}

#[tokio::test]
async fn test_lookup_auth_failure_aborts_before_any_write() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers/search"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(201).set_body_json(customer_body(1)))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path_regex("^/customers/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_body(1)))
        .expect(0)
        .mount(&server)
        .await;

    let connector = connector(&server);
    let err = connector.identify(&identify_event()).await.unwrap_err();

    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_create_conflict_surfaces_unretried() {
    let server = MockServer::start().await;
    mount_empty_searches(&server).await;

    Mock::given(method("POST"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(409).set_body_string("already exists"))
        .expect(1)
        .mount(&server)
        .await;

    let connector = connector(&server);
    let err = connector.identify(&identify_event()).await.unwrap_err();

    assert_eq!(err.status(), Some(409));
}

#[tokio::test]
async fn test_second_identify_updates_instead_of_duplicating() {
    let server = MockServer::start().await;

    // First delivery: nothing matches, the customer is created.
    mount_empty_searches(&server).await;
    Mock::given(method("POST"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(201).set_body_json(customer_body(7)))
        .expect(1)
        .mount(&server)
        .await;

    let connector = connector(&server);
    let identify = identify_event();
    assert!(matches!(
        connector.identify(&identify).await.unwrap(),
        Delivery::Created(_)
    ));

    // Second delivery against the now-populated store: same event, but the
    // external-id lookup hits and the connector patches instead.
    server.reset().await;

    Mock::given(method("GET"))
        .and(path("/customers/search"))
        .and(query_param("external_id", "usr-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(found(7)))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/customers"))
        .respond_with(ResponseTemplate::new(201).set_body_json(customer_body(8)))
        .expect(0)
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/customers/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(customer_body(7)))
        .expect(1)
        .mount(&server)
        .await;

    match connector.identify(&identify).await.unwrap() {
        Delivery::Updated(customer) => assert_eq!(customer.id, CustomerId::Number(7)),
        other => panic!("expected update on second delivery, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_identify_events_skip_without_remote_calls() {
    let server = MockServer::start().await;
    let connector = connector(&server);

    let track = Event::new(
        Channel::Server,
        EventKind::Track(TrackEvent {
            event: "Signed Up".to_string(),
            ..Default::default()
        }),
    );
    assert!(matches!(
        connector.deliver(&track).await.unwrap(),
        Delivery::Skipped
    ));

    let alias = Event::new(Channel::Server, EventKind::Alias(AliasEvent::default()));
    assert!(matches!(
        connector.deliver(&alias).await.unwrap(),
        Delivery::Skipped
    ));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_eligibility_gate() {
    let server = MockServer::start().await;
    let connector = connector(&server);

    let server_event = Event::new(Channel::Server, EventKind::Identify(identify_event()));
    assert!(connector.eligible(&server_event));

    let client_event = Event::new(Channel::Client, EventKind::Identify(identify_event()));
    assert!(!connector.eligible(&client_event));

    let unknown_event = Event::new(Channel::Unknown, EventKind::Identify(identify_event()));
    assert!(!connector.eligible(&unknown_event));

    let mut disabled = Event::new(Channel::Server, EventKind::Identify(identify_event()));
    disabled.integrations.insert("desk".to_string(), false);
    assert!(!connector.eligible(&disabled));

    let mut opted_in = Event::new(Channel::Server, EventKind::Identify(identify_event()));
    opted_in.integrations.insert("all".to_string(), false);
    opted_in.integrations.insert("desk".to_string(), true);
    assert!(connector.eligible(&opted_in));
}

#[tokio::test]
async fn test_api_key_variant_unwraps_item_responses() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/customers/search"))
        .and(query_param("api_key", "k-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(not_found()))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/customers"))
        .and(query_param("api_key", "k-123"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "item": customer_body(11) })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = DeskConfig::new("acme", Credentials::api_key("k-123"))
        .with_api_root(server.uri());
    let connector = DeskConnector::new(config).unwrap();

    match connector.identify(&identify_event()).await.unwrap() {
        Delivery::Created(customer) => assert_eq!(customer.id, CustomerId::Number(11)),
        other => panic!("expected create, got {other:?}"),
    }
}
