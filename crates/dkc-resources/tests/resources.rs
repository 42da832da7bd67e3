//! Resource client tests against a mocked DKC API.

use chrono::{TimeZone, Utc};
use reqwest::header::HeaderMap;
use serde_json::json;
use wiremock::matchers::{body_json, body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dkc_auth::{ApiConfig, HeaderSet};
use dkc_resources::models::{DeliveryTimeContent, DeliveryTimeContentItem, PostFileContent};
use dkc_resources::{
    ApiResponse, Catalog, Content, Delivery, News, Page, ResourceError, ResponseError, RestClient,
    StockQuery,
};

const TOKEN: &str = "tok123";

fn rest_client(server: &MockServer) -> (HeaderSet, RestClient) {
    let config = ApiConfig::with_base_url(&server.uri()).unwrap();
    let headers = HeaderSet::new(HeaderMap::new());
    headers.set_access_token(TOKEN).unwrap();
    let http = config.build_http_client().unwrap();
    let client = RestClient::new(http, config, headers.view());
    (headers, client)
}

fn material_json() -> serde_json::Value {
    json!({
        "material": {
            "id": 1200,
            "node_id": 5,
            "etim_class_id": "EC000001",
            "name": "Cable tray",
            "type": "tray",
            "series": "S5",
            "country": "RU",
            "unit": "m",
            "volume": 2,
            "weight": 1.5,
            "code": 1200,
            "url": "https://www.dkc.ru/catalog/1200",
            "price": 99.9,
            "barcode": ["4607128320036"],
            "thumbnail_url": null,
            "additional_images": null,
            "attributes": { "length": 3000, "color": "grey" },
            "packing": { "box": 10 },
            "avg_delivery": { "1": "3" },
            "accessories": [1201],
            "accessories_codes": ["1201"]
        }
    })
}

#[tokio::test]
async fn test_get_material_success_sends_token_and_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog/material"))
        .and(query_param("code", "1200"))
        .and(header("AccessToken", TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(material_json()))
        .expect(1)
        .mount(&server)
        .await;

    let (_headers, client) = rest_client(&server);
    let response = Catalog::new(client).get_material("1200").await.unwrap();

    let material = response.success().unwrap().material;
    assert_eq!(material.code, "1200");
    assert_eq!(material.kind, "tray");
    assert_eq!(material.attributes.unwrap()["length"], "3000");
    assert_eq!(material.accessories, vec!["1201".to_string()]);
    assert!(material.warehouse.is_none());
}

#[tokio::test]
async fn test_empty_material_code_never_reaches_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let (_headers, client) = rest_client(&server);
    let result = Catalog::new(client).get_material("").await;

    assert!(matches!(result, Err(ResourceError::InvalidArgument { name: "code", .. })));
}

#[tokio::test]
async fn test_forbidden_returns_alternative_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog/material/related"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({ "errorCode": "ACCESS_DENIED", "errorMessage": "token expired" })),
        )
        .mount(&server)
        .await;

    let (_headers, client) = rest_client(&server);
    let response = Catalog::new(client).get_material_related(None).await.unwrap();

    match response {
        ApiResponse::ErrorAlternative(e) => {
            assert_eq!(e.error_code, "ACCESS_DENIED");
            assert_eq!(e.error_message, "token expired");
        }
        other => panic!("Expected ErrorAlternative, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_without_code_gets_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog/material/analogs"))
        .and(query_param("code", "9999"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "not found" })))
        .mount(&server)
        .await;

    let (_headers, client) = rest_client(&server);
    let response = Catalog::new(client)
        .get_material_analogs(Some("9999"))
        .await
        .unwrap();

    assert_eq!(
        response,
        ApiResponse::Error(ResponseError {
            code: 404,
            message: "not found".to_string()
        })
    );
}

#[tokio::test]
async fn test_html_body_is_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news/company"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let (_headers, client) = rest_client(&server);
    let result = News::new(client).get_news_company(Page::default()).await;

    match result {
        Err(ResourceError::Protocol { status, body_snippet, .. }) => {
            assert_eq!(status.as_u16(), 502);
            assert!(body_snippet.contains("bad gateway"));
        }
        other => panic!("Expected Protocol error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_certificates_bare_array_is_wrapped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog/material/certificates"))
        .and(query_param("code", "1200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 7,
            "name": "EAC",
            "src": "https://www.dkc.ru/cert/7.pdf",
            "type": "declaration",
            "number": "RU-1",
            "start_date": 1600000000,
            "expiration_date": 1700000000,
            "node_ids": [1],
            "item_ids": ["1200"],
            "item_full_codes": ["R5-1200"]
        }])))
        .mount(&server)
        .await;

    let (_headers, client) = rest_client(&server);
    let response = Catalog::new(client)
        .get_material_certificates("1200")
        .await
        .unwrap();

    let certificates = response.success().unwrap().certificates;
    assert_eq!(certificates.len(), 1);
    assert_eq!(certificates[0].node_ids, vec!["1".to_string()]);
}

#[tokio::test]
async fn test_stock_query_parameters() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog/material/stock"))
        .and(query_param("code", "1200,1201"))
        .and(query_param("id", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "create": "2021-07-19 21:00:00",
            "materials": [{
                "id": 5,
                "status": true,
                "code": "1200",
                "warehouse": [{ "code": 1, "amount": 40, "receipt": [{ "date": "2021-07-25T00:00:00+03:00", "amount": 10 }] }]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_headers, client) = rest_client(&server);
    let query = StockQuery::all().codes(["1200", "1201"]).id("5");
    let stock = Catalog::new(client)
        .get_material_stock(&query)
        .await
        .unwrap()
        .success()
        .unwrap();

    assert_eq!(stock.create, Utc.with_ymd_and_hms(2021, 7, 19, 21, 0, 0).unwrap());
    assert_eq!(stock.materials[0].warehouse[0].receipt[0].amount, 10);
}

#[tokio::test]
async fn test_news_pagination_and_zero_length() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/news/community"))
        .and(query_param("page_index", "2"))
        .and(query_param("length", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "news": [{ "text": "Open day", "timestamp": "2021-07-19" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_headers, client) = rest_client(&server);
    let news = News::new(client);

    let feed = news.get_news_community(Page::new(2, 5)).await.unwrap().success().unwrap();
    assert_eq!(feed.news[0].text, "Open day");

    let result = news.get_news_products(Page::new(0, 0)).await;
    assert!(matches!(result, Err(ResourceError::InvalidArgument { name: "length", .. })));
}

#[tokio::test]
async fn test_revision_size_sends_unix_timestamp() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/revisions/last/size"))
        .and(query_param("last_updated", "1626728400"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "size": 1024, "forced_update": false })))
        .expect(1)
        .mount(&server)
        .await;

    let (_headers, client) = rest_client(&server);
    let since = Utc.with_ymd_and_hms(2021, 7, 19, 21, 0, 0).unwrap();
    let size = Content::new(client)
        .get_revisions_last_size(Some(since))
        .await
        .unwrap()
        .success()
        .unwrap();

    assert_eq!(size.size, 1024);
    assert!(!size.forced_update);
}

#[tokio::test]
async fn test_revision_drawings_changes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/revisions/drawings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "revision": {
                "delta": true,
                "drawings": {
                    "updated": [{
                        "id": 3,
                        "name": "Tray sketch",
                        "links": [{ "type": "dwg", "src": "https://www.dkc.ru/d/3.dwg" }],
                        "node_ids": ["1"],
                        "item_ids": [],
                        "item_full_codes": []
                    }],
                    "removed": [4, "5"]
                }
            }
        })))
        .mount(&server)
        .await;

    let (_headers, client) = rest_client(&server);
    let revision = Content::new(client)
        .get_revision_drawings(None)
        .await
        .unwrap()
        .success()
        .unwrap()
        .revision;

    assert!(revision.delta);
    assert_eq!(revision.drawings.updated[0].id, "3");
    assert_eq!(revision.drawings.updated[0].links[0].kind, "dwg");
    assert_eq!(revision.drawings.removed, vec!["4".to_string(), "5".to_string()]);
}

#[tokio::test]
async fn test_file_download_and_upload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/file"))
        .and(query_param("id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "name": "catalog.txt", "value": "MUAy" })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/file"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("name=file_with_key.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 889 })))
        .expect(1)
        .mount(&server)
        .await;

    let (_headers, client) = rest_client(&server);
    let content = Content::new(client);

    let file = content.get_file(1).await.unwrap().success().unwrap();
    assert_eq!(file.name, "catalog.txt");

    let upload = PostFileContent {
        name: "file_with_key.txt".to_string(),
        value: "8-khkjgj7hgJHGJHG97jhHKJ".to_string(),
    };
    let posted = content.post_file(&upload).await.unwrap().success().unwrap();
    assert_eq!(posted.id, 889);

    let nameless = PostFileContent {
        name: String::new(),
        value: "x".to_string(),
    };
    assert!(matches!(
        content.post_file(&nameless).await,
        Err(ResourceError::InvalidArgument { name: "name", .. })
    ));
}

#[tokio::test]
async fn test_delivery_time_posts_json() {
    let server = MockServer::start().await;
    let request = DeliveryTimeContent {
        company_warehouse: "msk".to_string(),
        items: vec![DeliveryTimeContentItem {
            code: 1200,
            count: 4,
            warehouse_id: 1,
        }],
    };
    Mock::given(method("POST"))
        .and(path("/delivery/time"))
        .and(body_json(&request))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [{
                "code": 1200,
                "status": true,
                "date_last": { "date": "2021-07-25 00:00:00", "amount": 4 },
                "date_detail": [{ "date": "2021-07-25 00:00:00", "amount": 4 }]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (_headers, client) = rest_client(&server);
    let delivery = Delivery::new(client);
    let estimate = delivery
        .get_delivery_time(&request)
        .await
        .unwrap()
        .success()
        .unwrap();

    assert!(estimate.items[0].status);
    assert_eq!(estimate.items[0].date_detail.len(), 1);

    let empty = DeliveryTimeContent {
        company_warehouse: "msk".to_string(),
        items: Vec::new(),
    };
    assert!(matches!(
        delivery.get_delivery_time(&empty).await,
        Err(ResourceError::InvalidArgument { name: "items", .. })
    ));
}

#[tokio::test]
async fn test_refreshed_token_applies_to_next_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/catalog/material/video"))
        .and(header("AccessToken", "rotated"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "video": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let (headers, client) = rest_client(&server);
    let catalog = Catalog::new(client);
    headers.set_access_token("rotated").unwrap();

    let response = catalog.get_material_video(None).await.unwrap();
    assert!(response.is_success());
}
