use tagstore_api::{path_child, path_split};

#[test]
fn child_of_the_root_is_the_bare_name() {
    assert_eq!(path_child("", "test"), "test");
}

#[test]
fn child_joins_onto_its_parent_with_a_slash() {
    assert_eq!(path_child("test", "test"), "test/test");
    assert_eq!(path_child("alice/books", "rating"), "alice/books/rating");
}

#[test]
fn split_yields_parent_and_leaf() {
    assert_eq!(path_split("goo/moo"), Some(("goo", "moo")));
    assert_eq!(path_split("alice/books/rating"), Some(("alice/books", "rating")));
}

#[test]
fn split_of_a_bare_name_has_no_parent() {
    assert_eq!(path_split("test"), None);
}

#[test]
fn split_reverses_child_joins() {
    let path = path_child("alice/books", "rating");
    assert_eq!(path_split(&path), Some(("alice/books", "rating")));
}
