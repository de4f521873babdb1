use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_ok_for_health_check(ctx: &TestContext) {
    let response = ctx.app.client.get("/health").await.unwrap();

    response.assert_status(StatusCode::OK);

    // Health endpoint returns plain text
    assert_eq!(response.text(), "OK");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_include_request_id_in_responses(ctx: &TestContext) {
    let response = ctx.app.client.get("/health").await.unwrap();
    response.assert_header_exists("x-request-id");

    let first = response.header("x-request-id").unwrap().clone();
    let second = ctx.app.client.get("/health").await.unwrap();
    assert_ne!(second.header("x-request-id").unwrap(), &first);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_echo_caller_supplied_request_id(ctx: &TestContext) {
    let response = ctx
        .app
        .client
        .get_with_headers("/health", &[("x-request-id", "trace-abc-123")])
        .await
        .unwrap();

    response
        .assert_status(StatusCode::OK)
        .assert_header("x-request-id", "trace-abc-123");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_serve_the_upload_form(ctx: &TestContext) {
    let response = ctx.app.client.get("/").await.unwrap();

    response.assert_status(StatusCode::OK);
    assert!(response
        .header("content-type")
        .unwrap()
        .starts_with("text/html"));

    let page = response.text();
    assert!(page.contains("action=\"/convert\""));
    assert!(page.contains("multipart/form-data"));
    assert!(page.contains("name=\"pdf_file\""));
    assert!(page.contains("name=\"use_gtts\""));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_not_found_for_unknown_routes(ctx: &TestContext) {
    let response = ctx.app.client.get("/download/report.mp3").await.unwrap();
    response.assert_status(StatusCode::NOT_FOUND);
}
