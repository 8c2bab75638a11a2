use super::*;
use crate::record::CookieRecord;
use crate::surface::{ListContent, RecordingSurface};

fn record(name: &str, value: &str) -> CookieRecord {
    CookieRecord {
        name: name.to_string(),
        value: value.to_string(),
        domain: "example.com".to_string(),
        path: "/".to_string(),
        secure: false,
        http_only: false,
        selected: false,
    }
}

fn list_of(len: usize) -> ListState {
    let mut list = ListState::new();
    list.load(
        (0..len)
            .map(|i| record(&format!("cookie{i}"), &format!("value{i}")))
            .collect(),
    );
    list
}

fn run(renderer: &mut Renderer, list: &ListState, surface: &mut RecordingSurface) -> usize {
    let mut frames = 0;
    while renderer.tick(list, surface) {
        frames += 1;
        assert!(frames < 100, "render never settled");
    }
    frames + 1
}

#[test]
fn fifty_items_render_in_batches_then_attach_once() {
    let list = list_of(50);
    let mut renderer = Renderer::new(ViewConfig::default());
    let mut surface = RecordingSurface::new(400);

    renderer.request(&list);
    assert!(renderer.tick(&list, &mut surface));
    assert_eq!(surface.content, ListContent::Blank);
    assert!(renderer.tick(&list, &mut surface));
    assert_eq!(surface.content, ListContent::Blank);
    assert!(!renderer.tick(&list, &mut surface));

    assert_eq!(surface.draws, 1);
    assert_eq!(surface.items().len(), 50);
    assert_eq!(renderer.strategy(), Some(RenderStrategy::Standard));
    assert_eq!(surface.active_bindings(), 0);
}

#[test]
fn fifty_one_items_use_the_window() {
    let list = list_of(51);
    let mut renderer = Renderer::new(ViewConfig::default());
    let mut surface = RecordingSurface::new(400);

    renderer.request(&list);
    run(&mut renderer, &list, &mut surface);

    assert_eq!(renderer.strategy(), Some(RenderStrategy::Windowed));
    let window = renderer.window().expect("window");
    assert_eq!(window.range(), 0..17);
    assert_eq!(surface.items().len(), 17);
    assert_eq!(surface.active_bindings(), 1);
}

#[test]
fn newer_request_cancels_pending_batches() {
    let mut list = list_of(40);
    let mut renderer = Renderer::new(ViewConfig::default());
    let mut surface = RecordingSurface::new(400);

    renderer.request(&list);
    renderer.tick(&list, &mut surface);

    list.set_filter("cookie1");
    renderer.request(&list);
    run(&mut renderer, &list, &mut surface);

    assert_eq!(surface.draws, 1);
    let names: Vec<_> = surface.items().iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names.len(), 11);
    assert!(names.iter().all(|name| name.starts_with("cookie1")));
}

#[test]
fn selection_made_during_batching_is_attached() {
    let mut list = list_of(30);
    let mut renderer = Renderer::new(ViewConfig::default());
    let mut surface = RecordingSurface::new(400);

    renderer.request(&list);
    renderer.tick(&list, &mut surface);
    list.set_selected("cookie0", "example.com", true);
    run(&mut renderer, &list, &mut surface);

    assert!(surface.items()[0].selected);
}

#[test]
fn scroll_offsets_collapse_into_one_redraw_per_frame() {
    let list = list_of(200);
    let mut renderer = Renderer::new(ViewConfig::default());
    let mut surface = RecordingSurface::new(400);

    renderer.request(&list);
    run(&mut renderer, &list, &mut surface);
    let draws = surface.draws;

    renderer.on_scroll(300);
    renderer.on_scroll(900);
    renderer.on_scroll(1_200);
    assert!(renderer.has_pending_work());
    assert!(!renderer.tick(&list, &mut surface));

    assert_eq!(surface.draws, draws + 1);
    let window = renderer.window().expect("window");
    assert_eq!(window.range(), 15..32);
    assert_eq!(window.offset_px, 900);
}

#[test]
fn scroll_binding_is_reused_then_released() {
    let mut list = list_of(120);
    let mut renderer = Renderer::new(ViewConfig::default());
    let mut surface = RecordingSurface::new(400);

    renderer.request(&list);
    run(&mut renderer, &list, &mut surface);
    renderer.request(&list);
    run(&mut renderer, &list, &mut surface);
    assert_eq!(surface.active_bindings(), 1);

    list.set_filter("cookie11");
    renderer.request(&list);
    run(&mut renderer, &list, &mut surface);
    assert_eq!(renderer.strategy(), Some(RenderStrategy::Standard));
    assert_eq!(surface.active_bindings(), 0);
}

#[test]
fn scroll_during_switch_to_standard_does_not_redraw_old_window() {
    let long = list_of(80);
    let mut renderer = Renderer::new(ViewConfig::default());
    let mut surface = RecordingSurface::new(400);

    renderer.request(&long);
    run(&mut renderer, &long, &mut surface);
    assert_eq!(surface.draws, 1);

    let short = list_of(30);
    renderer.request(&short);
    assert_eq!(surface.active_bindings(), 0);
    renderer.on_scroll(600);
    assert!(renderer.tick(&short, &mut surface));

    assert_eq!(surface.draws, 1);
    assert_eq!(renderer.window(), None);

    run(&mut renderer, &short, &mut surface);
    assert_eq!(surface.draws, 2);
    assert_eq!(renderer.strategy(), Some(RenderStrategy::Standard));
    assert_eq!(surface.items().len(), 30);
}

#[test]
fn empty_views_show_a_message() {
    let mut list = list_of(0);
    let mut renderer = Renderer::new(ViewConfig::default());
    let mut surface = RecordingSurface::new(400);

    renderer.request(&list);
    run(&mut renderer, &list, &mut surface);
    assert!(matches!(surface.content, ListContent::Empty(_)));

    list.load(vec![record("sid", "abc")]);
    list.set_filter("zzz");
    renderer.request(&list);
    run(&mut renderer, &list, &mut surface);
    match &surface.content {
        ListContent::Empty(message) => assert!(message.contains("zzz")),
        other => panic!("unexpected content {other:?}"),
    }
}

#[test]
fn toggling_expansion_redraws_the_item() {
    let list = list_of(3);
    let mut renderer = Renderer::new(ViewConfig::default());
    let mut surface = RecordingSurface::new(400);
    renderer.request(&list);
    run(&mut renderer, &list, &mut surface);

    assert_eq!(renderer.toggle_expanded(&list, 1, &mut surface), Some(true));
    assert!(surface.items()[1].expanded);
    assert!(renderer.is_expanded(&list, 1));
    assert_eq!(renderer.toggle_expanded(&list, 1, &mut surface), Some(false));
    assert!(!surface.items()[1].expanded);
}

#[test]
fn focus_wraps_around_the_filtered_view() {
    let list = list_of(3);
    let mut renderer = Renderer::new(ViewConfig::default());
    let mut surface = RecordingSurface::new(400);
    renderer.request(&list);
    run(&mut renderer, &list, &mut surface);

    assert_eq!(renderer.move_focus(&list, 2, FocusMove::Next, &mut surface), Some(0));
    assert_eq!(surface.focused, Some(0));
    assert_eq!(
        renderer.move_focus(&list, 0, FocusMove::Previous, &mut surface),
        Some(2)
    );
}

#[test]
fn focus_scrolls_a_long_list() {
    let list = list_of(200);
    let mut renderer = Renderer::new(ViewConfig::default());
    let mut surface = RecordingSurface::new(400);
    renderer.request(&list);
    run(&mut renderer, &list, &mut surface);

    assert_eq!(
        renderer.move_focus(&list, 0, FocusMove::Previous, &mut surface),
        Some(199)
    );
    let window = renderer.window().expect("window");
    assert!(window.contains(199));
}

#[test]
fn inputs_map_to_actions() {
    assert_eq!(
        ItemInput::Key(ItemKey::ModifiedSpace).action(),
        ItemAction::ToggleSelection
    );
    assert_eq!(
        ItemInput::Pointer(PointerTarget::Checkbox).action(),
        ItemAction::ToggleSelection
    );
    assert_eq!(ItemInput::Key(ItemKey::Enter).action(), ItemAction::ToggleExpanded);
    assert_eq!(ItemInput::Key(ItemKey::Space).action(), ItemAction::ToggleExpanded);
    assert_eq!(
        ItemInput::Pointer(PointerTarget::Row).action(),
        ItemAction::ToggleExpanded
    );
    assert_eq!(
        ItemInput::Key(ItemKey::ArrowUp).action(),
        ItemAction::MoveFocus(FocusMove::Previous)
    );
}
