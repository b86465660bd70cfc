//! Document model unit tests

use super::document::Document;
use super::node::BoundingBox;
use super::selector::{css_escape, Selector};
use super::snapshot::DocumentSnapshot;
use super::EventKind;
use tokio::sync::mpsc;

fn sample_document() -> Document {
    let mut doc = Document::new();
    let body = doc.body();

    let main = doc.create_element("main");
    doc.set_attribute(main, "class", "layout");
    doc.set_bounding_box(main, BoundingBox::new(0.0, 0.0, 1000.0, 800.0));
    doc.append_child(body, main);

    let card = doc.create_element("div");
    doc.set_attribute(card, "class", "card product-card");
    doc.set_bounding_box(card, BoundingBox::new(100.0, 100.0, 300.0, 200.0));
    doc.append_child(main, card);

    let title = doc.create_element("h2");
    doc.set_attribute(title, "id", "title");
    doc.set_bounding_box(title, BoundingBox::new(110.0, 110.0, 280.0, 30.0));
    doc.append_child(card, title);
    doc.append_text(title, "Dog food");

    doc
}

#[test]
fn query_selector_by_id() {
    let doc = sample_document();
    let found = doc.query_selector("#title").unwrap();
    assert!(found.is_some());
    assert_eq!(doc.tag(found.unwrap()), "h2");
}

#[test]
fn query_selector_by_class_and_tag() {
    let doc = sample_document();
    assert!(doc.query_selector(".product-card").unwrap().is_some());
    assert!(doc.query_selector("div.card").unwrap().is_some());
    assert!(doc.query_selector("section.card").unwrap().is_none());
}

#[test]
fn query_selector_attribute_equality() {
    let mut doc = sample_document();
    let button = doc.create_element("button");
    doc.set_attribute(button, "data-testid", "add-to-cart");
    let body = doc.body();
    doc.append_child(body, button);

    let found = doc.query_selector("[data-testid=\"add-to-cart\"]").unwrap();
    assert_eq!(found, Some(button));
}

#[test]
fn query_selector_child_combinator_path() {
    let doc = sample_document();
    let found = doc.query_selector("main.layout > div.card > h2").unwrap();
    assert!(found.is_some());
    assert_eq!(doc.attribute(found.unwrap(), "id"), Some("title"));

    // Child combinator must not match across levels
    assert!(doc.query_selector("main.layout > h2").unwrap().is_none());
}

#[test]
fn query_selector_descendant_combinator() {
    let doc = sample_document();
    assert!(doc.query_selector("main h2").unwrap().is_some());
    assert!(doc.query_selector("body h2").unwrap().is_some());
}

#[test]
fn invalid_selector_is_an_error() {
    let doc = sample_document();
    assert!(doc.query_selector("").is_err());
    assert!(doc.query_selector("div >> p").is_err());
    assert!(doc.query_selector("[unterminated").is_err());
}

#[test]
fn css_escape_round_trips_through_parser() {
    let escaped = css_escape("2col:wide");
    let selector = format!(".{}", escaped);
    // Parse succeeds and matches an element carrying the raw class
    let parsed = Selector::parse(&selector).unwrap();

    let mut doc = Document::new();
    let body = doc.body();
    let div = doc.create_element("div");
    doc.set_attribute(div, "class", "2col:wide");
    doc.append_child(body, div);

    assert!(parsed.matches(&doc, div));
}

#[test]
fn hit_test_prefers_topmost_sibling() {
    let mut doc = Document::new();
    let body = doc.body();

    let below = doc.create_element("div");
    doc.set_bounding_box(below, BoundingBox::new(0.0, 0.0, 200.0, 200.0));
    doc.append_child(body, below);

    let above = doc.create_element("div");
    doc.set_bounding_box(above, BoundingBox::new(0.0, 0.0, 200.0, 200.0));
    doc.append_child(body, above);

    assert_eq!(doc.element_from_point(50.0, 50.0), Some(above));
}

#[test]
fn hit_test_skips_pointer_events_none_and_hidden() {
    let mut doc = Document::new();
    let body = doc.body();

    let target = doc.create_element("div");
    doc.set_bounding_box(target, BoundingBox::new(0.0, 0.0, 200.0, 200.0));
    doc.append_child(body, target);

    let overlay = doc.create_element("div");
    doc.set_bounding_box(overlay, BoundingBox::new(0.0, 0.0, 200.0, 200.0));
    doc.set_inline_style(overlay, "pointer-events", "none");
    doc.append_child(body, overlay);

    assert_eq!(doc.element_from_point(10.0, 10.0), Some(target));

    doc.set_inline_style(overlay, "pointer-events", "");
    assert_eq!(doc.element_from_point(10.0, 10.0), Some(overlay));

    doc.set_inline_style(overlay, "display", "none");
    assert_eq!(doc.element_from_point(10.0, 10.0), Some(target));
}

#[test]
fn hit_test_falls_back_to_body() {
    let doc = Document::new();
    assert_eq!(doc.element_from_point(10.0, 10.0), Some(doc.body()));
}

#[test]
fn detached_nodes_report_as_not_attached() {
    let mut doc = sample_document();
    let card = doc.query_selector(".card").unwrap().unwrap();
    let title = doc.query_selector("#title").unwrap().unwrap();

    assert!(doc.is_attached(card));
    assert!(doc.is_attached(title));

    doc.remove_node(card);
    assert!(!doc.is_attached(card));
    // Descendants of a detached subtree are detached too
    assert!(!doc.is_attached(title));
}

#[test]
fn text_content_and_direct_text() {
    let mut doc = sample_document();
    let card = doc.query_selector(".card").unwrap().unwrap();
    let title = doc.query_selector("#title").unwrap().unwrap();

    assert_eq!(doc.text_content(title), "Dog food");
    assert_eq!(doc.text_content(card), "Dog food");
    assert!(doc.has_direct_text(title));
    assert!(!doc.has_direct_text(card));

    doc.append_text(card, "   ");
    assert!(!doc.has_direct_text(card));
}

#[test]
fn scroll_shifts_all_but_fixed_boxes() {
    let mut doc = sample_document();
    let title = doc.query_selector("#title").unwrap().unwrap();

    let fixed = doc.create_element("div");
    doc.set_bounding_box(fixed, BoundingBox::new(5.0, 5.0, 10.0, 10.0));
    doc.computed_style_mut(fixed).position = "fixed".to_string();
    let body = doc.body();
    doc.append_child(body, fixed);

    doc.scroll_by(0.0, 50.0);

    assert_eq!(doc.bounding_box(title).top, 60.0);
    assert_eq!(doc.bounding_box(fixed).top, 5.0);
}

#[test]
fn suppressors_register_and_remove_exactly() {
    let mut doc = Document::new();
    let body = doc.body();

    let a = doc.add_suppressor(EventKind::Click);
    let b = doc.add_suppressor(EventKind::Submit);
    assert_eq!(doc.suppressor_count(), 2);

    assert!(doc.dispatch(EventKind::Click, body).default_prevented);
    assert!(!doc.dispatch(EventKind::DragStart, body).default_prevented);

    doc.remove_suppressor(a);
    assert!(!doc.dispatch(EventKind::Click, body).default_prevented);
    assert!(doc.dispatch(EventKind::Submit, body).default_prevented);

    doc.remove_suppressor(b);
    // Removing an unknown id is a no-op
    doc.remove_suppressor(b);
    assert_eq!(doc.suppressor_count(), 0);
}

#[test]
fn scroll_listeners_fan_out() {
    let mut doc = Document::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let id = doc.add_scroll_listener(tx);

    doc.notify_scroll();
    doc.notify_scroll();
    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_ok());
    assert!(rx.try_recv().is_err());

    doc.remove_scroll_listener(id);
    doc.notify_scroll();
    assert!(rx.try_recv().is_err());
}

#[test]
fn snapshot_builds_a_document() {
    let json = r#"{
        "viewport_width": 800,
        "viewport_height": 600,
        "body": [
            {
                "tag": "section",
                "attributes": {"class": "hero"},
                "rect": {"top": 0, "left": 0, "width": 800, "height": 300},
                "children": [
                    {
                        "tag": "h1",
                        "attributes": {"id": "headline"},
                        "text": "Welcome",
                        "rect": {"top": 20, "left": 20, "width": 400, "height": 40}
                    }
                ]
            }
        ]
    }"#;

    let snapshot: DocumentSnapshot = serde_json::from_str(json).unwrap();
    let doc = Document::from_snapshot(&snapshot);

    let headline = doc.query_selector("#headline").unwrap().unwrap();
    assert_eq!(doc.tag(headline), "h1");
    assert_eq!(doc.text_content(headline), "Welcome");
    assert_eq!(doc.bounding_box(headline).top, 20.0);
    assert_eq!(doc.element_from_point(30.0, 30.0), Some(headline));
}
