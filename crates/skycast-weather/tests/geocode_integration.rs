//! Integration tests for the postcode reverse lookup using wiremock.

use skycast_core::LocationError;
use skycast_weather::{
    Coordinates, FixedPosition, LocationResolver, NoPositioning, PostcodeLookup,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LAT: f64 = 51.5142;
const LON: f64 = -0.0931;

fn resolver(server: &MockServer) -> LocationResolver {
    LocationResolver::new(
        PostcodeLookup::new(&server.uri()).unwrap(),
        Box::new(FixedPosition(Coordinates::new(LAT, LON))),
    )
}

#[tokio::test]
async fn test_device_location_returns_first_postcode() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes"))
        .and(query_param("lon", "-0.0931"))
        .and(query_param("lat", "51.5142"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 200,
            "result": [
                { "postcode": "EC2V 8AF", "distance": 12.5 },
                { "postcode": "EC2V 7HH", "distance": 40.1 }
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let postcode = resolver(&mock_server).resolve_from_device().await.unwrap();
    assert_eq!(postcode.as_str(), "EC2V 8AF");
}

#[tokio::test]
async fn test_null_result_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 200,
            "result": null
        })))
        .mount(&mock_server)
        .await;

    let result = resolver(&mock_server).resolve_from_device().await;
    assert_eq!(result, Err(LocationError::PostcodeNotFound));
}

#[tokio::test]
async fn test_empty_result_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 200,
            "result": []
        })))
        .mount(&mock_server)
        .await;

    let result = resolver(&mock_server).resolve_from_device().await;
    assert_eq!(result, Err(LocationError::PostcodeNotFound));
}

#[tokio::test]
async fn test_error_status_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "status": 400,
            "error": "Invalid longitude/latitude submitted"
        })))
        .mount(&mock_server)
        .await;

    let result = resolver(&mock_server).resolve_from_device().await;
    assert_eq!(result, Err(LocationError::PostcodeNotFound));
}

#[tokio::test]
async fn test_body_status_is_checked() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": 404,
            "result": [{ "postcode": "EC2V 8AF" }]
        })))
        .mount(&mock_server)
        .await;

    let result = resolver(&mock_server).resolve_from_device().await;
    assert_eq!(result, Err(LocationError::PostcodeNotFound));
}

#[tokio::test]
async fn test_no_positioning_skips_lookup() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/postcodes"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let resolver = LocationResolver::new(
        PostcodeLookup::new(&mock_server.uri()).unwrap(),
        Box::new(NoPositioning),
    );
    let result = resolver.resolve_from_device().await;
    assert_eq!(result, Err(LocationError::PositioningUnavailable));
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    // Nothing listens on the discard port
    let lookup = PostcodeLookup::new("http://127.0.0.1:9").unwrap();
    let result = lookup.postcode_for(Coordinates::new(LAT, LON)).await;
    assert!(
        matches!(result, Err(LocationError::Network(_))),
        "expected network error, got {:?}",
        result
    );
}
