//! End-to-end test: a small counter application driven through the public
//! API, rendered with the in-memory DOM backend.

use trellis::dom::memory::MemoryDocument;
use trellis::{html, App, MemoryHistory, State, View};

#[test]
fn counter_application() {
    let document = MemoryDocument::new();

    let body = document.create_element("body");
    let root = document.create_element("div");
    root.set_attribute("id", "root");
    body.append_child(&root);

    let history = MemoryHistory::new();
    let app = App::new(&document, &root, history.handle());

    let doc = document.clone();
    app.router().route("/", move |_| {
        let counter = State::new(0u32);
        let clicked_times = counter.map(|value| format!("Clicked {value} times"));

        let increment = counter.clone();
        View::new(&doc).add_child(
            html::div(&doc)
                .add_child(html::p(&doc, "").bind_text(&clicked_times))
                .add_child(
                    html::button(&doc, "+")
                        .on_click(move || increment.set(increment.get() + 1))
                        .id("button"),
                ),
        )
    });

    let doc = document.clone();
    app.router().fallback_to(move |_| {
        View::new(&doc).add_child(html::div(&doc).add_child(html::p(&doc, "404 Not Found!")))
    });

    app.start("/").unwrap();

    assert_eq!(
        body.outer_html(),
        "<body><div id=\"root\"><div><p>Clicked 0 times</p>\
         <button id=\"button\">+</button></div></div></body>"
    );

    body.element_by_id("button").unwrap().click();
    assert_eq!(
        body.outer_html(),
        "<body><div id=\"root\"><div><p>Clicked 1 times</p>\
         <button id=\"button\">+</button></div></div></body>"
    );

    app.router().navigate("/non-existent-path").unwrap();
    assert_eq!(
        body.outer_html(),
        "<body><div id=\"root\"><div><p>404 Not Found!</p></div></div></body>"
    );

    // Back to the counter: a fresh view with fresh state.
    let popped = history.back().unwrap();
    app.router().handle_pop(&popped).unwrap();
    assert_eq!(
        body.outer_html(),
        "<body><div id=\"root\"><div><p>Clicked 0 times</p>\
         <button id=\"button\">+</button></div></div></body>"
    );
}
