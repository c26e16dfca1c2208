mod common;

use common::{body_json, mock_session};
use reqwest::Method;
use serde_json::json;

const BASE: &str = "https://tagstore.test";

#[test]
fn user_lookup_hits_the_users_resource() {
    let (session, backend) = mock_session(BASE);
    session.users().username("alice").get().expect("get");

    let request = backend.last_request();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url, format!("{BASE}/users/alice"));
    assert!(request.body.is_none());
}

#[test]
fn namespace_get_sends_all_three_flags() {
    let (session, backend) = mock_session(BASE);
    session
        .namespaces()
        .path("alice/books")
        .get(true, false, true)
        .expect("get");

    assert_eq!(
        backend.last_request().url,
        format!("{BASE}/namespaces/alice/books?returnDescription=true&returnNamespaces=false&returnTags=true")
    );
}

#[test]
fn namespace_post_creates_a_named_child() {
    let (session, backend) = mock_session(BASE);
    session
        .namespaces()
        .path("alice")
        .post("books", "reading list")
        .expect("post");

    let request = backend.last_request();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url, format!("{BASE}/namespaces/alice"));
    assert_eq!(
        body_json(&request),
        json!({"name": "books", "description": "reading list"})
    );
}

#[test]
fn namespace_put_replaces_the_description() {
    let (session, backend) = mock_session(BASE);
    session
        .namespaces()
        .path("alice/books")
        .put("better description")
        .expect("put");

    let request = backend.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(body_json(&request), json!({"description": "better description"}));
}

#[test]
fn namespace_delete_addresses_the_full_path() {
    let (session, backend) = mock_session(BASE);
    session
        .namespaces()
        .path("alice/books")
        .delete()
        .expect("delete");

    let request = backend.last_request();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url, format!("{BASE}/namespaces/alice/books"));
}

#[test]
fn empty_namespace_path_addresses_the_root() {
    let (session, backend) = mock_session(BASE);
    session
        .namespaces()
        .path("")
        .post("alice", "a top-level namespace")
        .expect("post");

    assert_eq!(backend.last_request().url, format!("{BASE}/namespaces"));
}

#[test]
fn tag_post_carries_the_indexed_flag() {
    let (session, backend) = mock_session(BASE);
    session
        .tags()
        .path("alice/books")
        .post("rating", "how much I liked it", true)
        .expect("post");

    let request = backend.last_request();
    assert_eq!(request.url, format!("{BASE}/tags/alice/books"));
    assert_eq!(
        body_json(&request),
        json!({"name": "rating", "description": "how much I liked it", "indexed": true})
    );
}

#[test]
fn tag_get_asks_for_the_description() {
    let (session, backend) = mock_session(BASE);
    session
        .tags()
        .path("alice/books/rating")
        .get(true)
        .expect("get");

    assert_eq!(
        backend.last_request().url,
        format!("{BASE}/tags/alice/books/rating?returnDescription=true")
    );
}

#[test]
fn object_queries_are_form_encoded() {
    let (session, backend) = mock_session(BASE);
    session
        .objects()
        .get("has alice/books/rating > 3")
        .expect("get");

    assert_eq!(
        backend.last_request().url,
        format!("{BASE}/objects?query=has+alice%2Fbooks%2Frating+%3E+3")
    );
}

#[test]
fn object_creation_sends_about_only_when_present() {
    let (session, backend) = mock_session(BASE);

    session.objects().post(Some("book:dune")).expect("post");
    assert_eq!(body_json(&backend.last_request()), json!({"about": "book:dune"}));

    session.objects().post(None).expect("post");
    let request = backend.last_request();
    assert_eq!(request.url, format!("{BASE}/objects"));
    assert_eq!(body_json(&request), json!({}));
}

#[test]
fn object_get_carries_the_show_about_flag() {
    let (session, backend) = mock_session(BASE);
    session.objects().id("uid-1").get(true).expect("get");

    assert_eq!(
        backend.last_request().url,
        format!("{BASE}/objects/uid-1?showAbout=true")
    );
}

#[test]
fn object_tag_paths_nest_id_then_tag() {
    let (session, backend) = mock_session(BASE);
    let objects = session.objects();
    let tag = objects.id("uid-1").tag("alice/books/rating");

    tag.head().expect("head");
    let request = backend.last_request();
    assert_eq!(request.method, Method::HEAD);
    assert_eq!(
        request.url,
        format!("{BASE}/objects/uid-1/alice/books/rating")
    );

    tag.delete().expect("delete");
    assert_eq!(backend.last_request().method, Method::DELETE);
}

#[test]
fn permission_categories_map_to_their_roots() {
    let (session, backend) = mock_session(BASE);

    session
        .permissions()
        .namespaces()
        .path("alice/books")
        .get("create")
        .expect("get");
    assert_eq!(
        backend.last_request().url,
        format!("{BASE}/permissions/namespaces/alice/books?action=create")
    );

    session
        .permissions()
        .tags()
        .path("alice/books/rating")
        .get("update")
        .expect("get");
    assert_eq!(
        backend.last_request().url,
        format!("{BASE}/permissions/tags/alice/books/rating?action=update")
    );

    session
        .permissions()
        .tag_values()
        .path("alice/books/rating")
        .get("read")
        .expect("get");
    assert_eq!(
        backend.last_request().url,
        format!("{BASE}/permissions/tag-values/alice/books/rating?action=read")
    );
}

#[test]
fn permission_put_sends_policy_and_exceptions() {
    let (session, backend) = mock_session(BASE);
    session
        .permissions()
        .tag_values()
        .path("alice/books/rating")
        .put("read", "closed", &["alice", "bob"])
        .expect("put");

    let request = backend.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(
        request.url,
        format!("{BASE}/permissions/tag-values/alice/books/rating?action=read")
    );
    assert_eq!(
        body_json(&request),
        json!({"policy": "closed", "exceptions": ["alice", "bob"]})
    );
}

#[test]
fn policies_address_user_category_and_action() {
    let (session, backend) = mock_session(BASE);

    session
        .policies()
        .policy("alice", "namespaces", "create")
        .get()
        .expect("get");
    assert_eq!(
        backend.last_request().url,
        format!("{BASE}/policies/alice/namespaces/create")
    );

    session
        .policies()
        .policy("alice", "namespaces", "create")
        .put("open", &[])
        .expect("put");
    let request = backend.last_request();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(
        body_json(&request),
        json!({"policy": "open", "exceptions": []})
    );
}
