use status_watch::{FeedConfig, HttpFeed};

fn feed() -> HttpFeed {
    HttpFeed::new(&FeedConfig {
        endpoint: "https://feed.example/api/update.json".to_owned(),
        username: "status".to_owned(),
        password: "hunter2".to_owned(),
    })
    .expect("feed constructs")
}

#[test]
fn updates_post_to_the_configured_endpoint() {
    let request = feed()
        .build_request("Production instance is unreachable")
        .build()
        .expect("request builds");

    assert_eq!(request.method(), "POST");
    assert_eq!(
        request.url().as_str(),
        "https://feed.example/api/update.json"
    );
}

#[test]
fn updates_carry_basic_auth() {
    let request = feed()
        .build_request("hello")
        .build()
        .expect("request builds");

    let authorization = request
        .headers()
        .get("authorization")
        .expect("authorization header present")
        .to_str()
        .expect("header is ASCII");
    assert!(authorization.starts_with("Basic "));
}

#[test]
fn the_message_is_form_encoded_as_the_status_field() {
    let request = feed()
        .build_request("Production instance is now reachable")
        .build()
        .expect("request builds");

    assert_eq!(
        request.headers().get("content-type").map(|v| v.as_bytes()),
        Some(b"application/x-www-form-urlencoded".as_slice())
    );
    let body = request
        .body()
        .and_then(|body| body.as_bytes())
        .expect("body is in memory");
    assert_eq!(
        body,
        b"status=Production+instance+is+now+reachable".as_slice()
    );
}
