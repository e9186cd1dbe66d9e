//! End-to-end editing scenarios driven through the editor.

use inkstage_core::elements::ElementKind;
use inkstage_core::{
    Editor, EditorEvent, Element, ElementId, ElementPatch, ElementState, EngineConfig,
    GuidelineKind, ToolKind,
};
use kurbo::Point;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn gesture(editor: &mut Editor, points: &[(f64, f64)]) {
    let (first, rest) = points.split_first().expect("gesture needs a point");
    editor.handle_event(EditorEvent::PointerDown(Point::new(first.0, first.1)));
    let mut last = *first;
    for &(x, y) in rest {
        editor.handle_event(EditorEvent::PointerMove(Point::new(x, y)));
        last = (x, y);
    }
    editor.handle_event(EditorEvent::PointerUp(Point::new(last.0, last.1)));
}

fn add_rect(editor: &mut Editor, id: &str, x: f64, y: f64, w: f64, h: f64) -> ElementId {
    let id = ElementId::new(id);
    let rect = Element::create_default(ElementKind::Rectangle, x, y, Some(id.clone()))
        .update(ElementPatch::frame(x, y, w, h));
    editor.canvas_mut().add_element(rect).unwrap();
    id
}

#[test]
fn drag_out_rectangle() {
    init_logging();
    let mut editor = Editor::default();
    editor.set_tool(ToolKind::Draw(ElementKind::Rectangle));
    gesture(&mut editor, &[(10.0, 10.0), (60.0, 40.0), (110.0, 60.0)]);

    let elements = editor.canvas().elements();
    assert_eq!(elements.len(), 1);
    let state = elements[0].to_state();
    assert_eq!(state.kind, ElementKind::Rectangle);
    assert!((state.x - 10.0).abs() < f64::EPSILON);
    assert!((state.y - 10.0).abs() < f64::EPSILON);
    assert!((state.width - 100.0).abs() < f64::EPSILON);
    assert!((state.height - 50.0).abs() < f64::EPSILON);
    assert!(matches!(elements[0], Element::Shape(_)));
    assert_eq!(editor.active_tool(), ToolKind::Select);
    assert_eq!(editor.canvas().selected_id(), Some(elements[0].id()));
}

#[test]
fn pencil_stroke_is_normalized() {
    init_logging();
    let mut editor = Editor::default();
    editor.set_tool(ToolKind::Pencil);
    gesture(&mut editor, &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);

    let stroke = editor.canvas().elements()[0].as_stroke().unwrap();
    assert!(stroke.base.x.abs() < f64::EPSILON);
    assert!(stroke.base.y.abs() < f64::EPSILON);
    assert!((stroke.base.width - 10.0).abs() < f64::EPSILON);
    assert!((stroke.base.height - 10.0).abs() < f64::EPSILON);
    assert_eq!(stroke.points, vec![0.0, 0.0, 10.0, 0.0, 10.0, 10.0]);
    assert_eq!(editor.active_tool(), ToolKind::Pencil);
}

#[test]
fn duplicate_offsets_and_selects_copy() {
    init_logging();
    let mut editor = Editor::default();
    let id = add_rect(&mut editor, "1700000000001", 50.0, 50.0, 100.0, 100.0);

    let copy_id = editor.canvas_mut().duplicate_element(&id).unwrap();
    assert_ne!(copy_id, id);

    let canvas = editor.canvas();
    let original = canvas.element(&id).unwrap().base();
    let copy = canvas.element(&copy_id).unwrap().base();
    assert!((copy.x - 70.0).abs() < f64::EPSILON);
    assert!((copy.y - 70.0).abs() < f64::EPSILON);
    assert_eq!(copy.name, format!("{} (Copy)", original.name));
    assert_eq!(canvas.selected_id(), Some(&copy_id));
}

#[test]
fn drag_snaps_right_edge_to_sibling() {
    init_logging();
    let mut editor = Editor::default();
    let a = add_rect(&mut editor, "a", 0.0, 0.0, 100.0, 100.0);
    add_rect(&mut editor, "b", 200.0, 130.0, 100.0, 100.0);

    // A.right lands at 197, 3px short of B.left.
    editor.pointer_down(Point::new(50.0, 50.0));
    editor.pointer_move(Point::new(147.0, 61.0));

    let guidelines = editor.canvas().guidelines();
    assert_eq!(guidelines.len(), 1);
    let guide = &guidelines[0];
    assert_eq!(guide.kind, GuidelineKind::Vertical);
    assert!((guide.position - 200.0).abs() < f64::EPSILON);
    // Spans A (11..111) and B (130..230) plus the margin.
    assert!((guide.start.y - -9.0).abs() < f64::EPSILON);
    assert!((guide.end.y - 250.0).abs() < f64::EPSILON);

    editor.pointer_up(Point::new(147.0, 61.0));
    let moved = editor.canvas().element(&a).unwrap().bounds();
    assert!((moved.x1 - 200.0).abs() < f64::EPSILON);
    assert!((moved.y0 - 11.0).abs() < f64::EPSILON);
    assert!(editor.canvas().guidelines().is_empty());
}

#[test]
fn click_with_draw_tool_creates_nothing() {
    init_logging();
    let mut editor = Editor::default();
    editor.set_tool(ToolKind::Draw(ElementKind::Star));
    gesture(&mut editor, &[(10.0, 10.0), (14.0, 15.0)]);
    assert!(editor.canvas().elements().is_empty());
    assert_eq!(editor.active_tool(), ToolKind::Select);
    assert!(!editor.canvas().can_undo());

    editor.set_tool(ToolKind::Draw(ElementKind::Star));
    gesture(&mut editor, &[(10.0, 10.0), (60.0, 60.0)]);
    let base = editor.canvas().elements()[0].base();
    assert_eq!(base.kind, ElementKind::Star);
    assert!((base.width - 50.0).abs() < f64::EPSILON);
    assert!((base.height - 50.0).abs() < f64::EPSILON);
}

#[test]
fn noop_update_is_not_recorded() {
    init_logging();
    let mut editor = Editor::default();
    let id = add_rect(&mut editor, "a", 0.0, 0.0, 100.0, 100.0);
    let canvas = editor.canvas_mut();
    let depth = canvas.undo_depth();

    assert!(!canvas.update_element(&id, ElementPatch::position(0.0, 0.0)));
    assert_eq!(canvas.undo_depth(), depth);

    assert!(canvas.update_element(&id, ElementPatch::position(40.0, 0.0)));
    assert_eq!(canvas.undo_depth(), depth + 1);

    assert!(canvas.undo());
    assert!(canvas.element(&id).unwrap().base().x.abs() < f64::EPSILON);
    assert!(canvas.redo());
    assert!((canvas.element(&id).unwrap().base().x - 40.0).abs() < f64::EPSILON);
}

#[test]
fn snap_threshold_boundary() {
    init_logging();
    for (gap, snaps) in [(5.0, true), (5.1, false)] {
        let mut editor = Editor::default();
        let a = add_rect(&mut editor, "a", 0.0, 0.0, 100.0, 100.0);
        add_rect(&mut editor, "b", 300.0, 500.0, 100.0, 100.0);

        // Drag A so its right edge sits `gap` short of B.left.
        let dx = 200.0 - gap;
        editor.pointer_down(Point::new(50.0, 50.0));
        editor.pointer_move(Point::new(50.0 + dx, 50.0));
        editor.pointer_up(Point::new(50.0 + dx, 50.0));

        let x = editor.canvas().element(&a).unwrap().base().x;
        let expected = if snaps { 200.0 } else { dx };
        assert!((x - expected).abs() < 1e-9, "gap {gap}: x = {x}");
    }
}

#[test]
fn pen_path_closes_near_start() {
    init_logging();
    let mut editor = Editor::default();
    editor.handle_event(EditorEvent::Key { key: 'p', shift: false });
    gesture(
        &mut editor,
        &[(0.0, 0.0), (80.0, 0.0), (80.0, 80.0), (3.0, 2.0)],
    );

    let stroke = editor.canvas().elements()[0].as_stroke().unwrap();
    assert_eq!(stroke.base.kind, ElementKind::Pen);
    assert!(stroke.closed);
    assert_eq!(editor.active_tool(), ToolKind::Pen);
}

#[test]
fn undo_restores_selection_consistency() {
    init_logging();
    let mut editor = Editor::default();
    editor.set_tool(ToolKind::Draw(ElementKind::Circle));
    gesture(&mut editor, &[(0.0, 0.0), (40.0, 40.0)]);
    assert!(editor.canvas().selected_id().is_some());

    assert!(editor.undo());
    assert!(editor.canvas().elements().is_empty());
    assert!(editor.canvas().selected_id().is_none());
    assert!(editor.redo());
    assert_eq!(editor.canvas().elements().len(), 1);
}

#[test]
fn state_round_trips_through_json() {
    init_logging();
    let element = Element::create_default(
        ElementKind::ChatBubble,
        5.0,
        6.0,
        Some(ElementId::new("bubble-1")),
    );
    let json = serde_json::to_string(&element.to_state()).unwrap();
    assert!(json.contains("\"type\":\"chat-bubble\""));

    let state: ElementState = serde_json::from_str(&json).unwrap();
    assert_eq!(Element::create(state), element);

    // Legacy kind name still loads.
    let legacy = json.replace("chat-bubble", "message-square");
    let state: ElementState = serde_json::from_str(&legacy).unwrap();
    assert_eq!(state.kind, ElementKind::ChatBubble);
}

#[test]
fn config_overrides_apply() {
    init_logging();
    let config = EngineConfig::from_json(r#"{"historyLimit": 2}"#).unwrap();
    let mut editor = Editor::new(config);
    let id = add_rect(&mut editor, "a", 0.0, 0.0, 10.0, 10.0);
    let canvas = editor.canvas_mut();
    for x in 1..=4 {
        canvas.update_element(&id, ElementPatch::position(f64::from(x), 0.0));
    }
    assert_eq!(canvas.undo_depth(), 2);
}
