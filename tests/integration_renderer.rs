use std::cell::{Cell, RefCell};
use std::rc::Rc;

use overlay_host::overlay::ContentContainer;
use overlay_host::{Document, OverlayHost, Renderer};

#[derive(Default)]
struct Owner {
    label: String,
    calls: Cell<usize>,
    containers: RefCell<Vec<ContentContainer>>,
}

fn render(owner: &Owner, doc: &Document, container: ContentContainer) {
    owner.calls.set(owner.calls.get() + 1);
    owner.containers.borrow_mut().push(container);
    doc.set_text(container.node(), format!("{} #{}", owner.label, owner.calls.get()))
        .unwrap();
}

fn mounted() -> (Rc<Document>, OverlayHost) {
    let doc = Document::new();
    let panel = doc.create_element("section");
    doc.append_child(doc.body(), panel).unwrap();
    let mut host = OverlayHost::new(&doc);
    doc.append_child(panel, host.node()).unwrap();
    host.first_updated();
    (doc, host)
}

#[test]
fn renders_once_per_open_into_the_same_container() {
    let (doc, mut host) = mounted();
    let owner = Rc::new(Owner {
        label: "menu".into(),
        ..Owner::default()
    });
    host.set_owner(owner.clone());
    host.set_renderer(Some(Renderer::new(render)));

    for _ in 0..3 {
        host.set_opened(true).unwrap();
        // redundant reports do not re-render
        host.set_opened(true).unwrap();
        host.set_opened(false).unwrap();
    }
    assert_eq!(owner.calls.get(), 3);
    assert_eq!(host.stats().renders, 3);
    let containers = owner.containers.borrow();
    assert!(containers.iter().all(|c| Some(*c) == host.content_container()));
    let content = host.content_container().unwrap().node();
    assert_eq!(doc.text_content(content), "menu #3");
}

#[test]
fn repeated_cycles_do_not_grow_the_document() {
    let (doc, mut host) = mounted();
    host.set_owner(Rc::new(Owner {
        label: "x".into(),
        ..Owner::default()
    }));
    host.set_renderer(Some(Renderer::new(render)));
    host.set_opened(true).unwrap();
    host.set_opened(false).unwrap();
    let settled = doc.node_count();
    for _ in 0..1000 {
        host.set_opened(true).unwrap();
        host.set_opened(false).unwrap();
    }
    assert_eq!(doc.node_count(), settled);
    assert_eq!(host.stats().renders, 1001);
    let content = host.content_container().unwrap().node();
    assert_eq!(doc.children(content).len(), 1);
    assert_eq!(doc.text_content(content), "x #1001");
}

#[test]
fn content_is_written_before_open_returns() {
    let (doc, mut host) = mounted();
    host.set_owner(Rc::new(Owner {
        label: "tip".into(),
        ..Owner::default()
    }));
    host.set_renderer(Some(Renderer::new(render)));
    host.set_opened(true).unwrap();
    let content = host.content_container().unwrap().node();
    assert_eq!(doc.text_content(content), "tip #1");
    // content travels with the host
    assert_eq!(doc.path_to_root(content)[..3], [content, host.surface(), host.node()]);
    assert_eq!(doc.parent(host.node()), Some(doc.body()));
}

#[test]
fn missing_renderer_or_owner_skips_quietly() {
    let (_, mut host) = mounted();
    host.set_opened(true).unwrap();
    host.set_opened(false).unwrap();
    assert_eq!(host.stats().renders, 0);

    let owner = Rc::new(Owner::default());
    host.set_owner(owner.clone());
    host.set_opened(true).unwrap();
    host.set_opened(false).unwrap();
    assert_eq!(owner.calls.get(), 0);

    host.clear_owner();
    host.set_renderer(Some(Renderer::new(render)));
    host.set_opened(true).unwrap();
    assert_eq!(owner.calls.get(), 0);
    assert_eq!(host.stats().attaches, 3);
}

#[test]
fn owner_of_another_type_is_skipped() {
    let (_, mut host) = mounted();
    host.set_owner(Rc::new(42_u32));
    host.set_renderer(Some(Renderer::new(render)));
    host.set_opened(true).unwrap();
    assert_eq!(host.stats().renders, 0);
    assert!(host.opened());
}

#[test]
fn no_render_before_first_update() {
    let doc = Document::new();
    let mut host = OverlayHost::new(&doc);
    doc.append_child(doc.body(), host.node()).unwrap();
    let owner = Rc::new(Owner::default());
    host.set_owner(owner.clone());
    host.set_renderer(Some(Renderer::new(render)));
    host.set_opened(true).unwrap();
    assert_eq!(owner.calls.get(), 0);
    assert!(host.content_container().is_none());
}
