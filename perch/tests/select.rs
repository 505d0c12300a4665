use std::time::Duration;

use perch::widgets::{Phase, Select};
use perch::{OverlayConfig, SelectError, SelectEvent};
use perchdom::{Document, ElementId, Platform, Rect};

fn friends() -> Vec<String> {
    ["Kim", "Joe", "Kit"].iter().map(|s| s.to_string()).collect()
}

fn setup() -> (Document, ElementId) {
    let mut doc = Document::new(1024.0, 900.0);
    let trigger = doc.create_element("trigger");
    doc.set_layout(trigger, Rect::from_edges(100.0, 130.0, 40.0, 180.0))
        .unwrap();
    doc.append_to_body(trigger).unwrap();
    (doc, trigger)
}

fn dispatch(doc: &mut Document, select: &mut Select) {
    while doc.has_pending_signals() {
        for signal in doc.take_signals() {
            select.handle(doc, signal);
        }
    }
}

fn tick(doc: &mut Document, select: &mut Select, dt: Duration) {
    doc.advance(dt);
    dispatch(doc, select);
}

fn mounted() -> (Document, Select) {
    let (mut doc, trigger) = setup();
    let mut select = Select::new(friends(), OverlayConfig::default());
    select.after_view_init(&mut doc, trigger);
    (doc, select)
}

#[test]
fn test_default_select_has_sample_options() {
    let select = Select::default();
    assert_eq!(select.options().len(), 15);
    assert_eq!(select.options()[0], "Option 1");
    assert_eq!(select.options()[14], "Option 4");
    assert_eq!(select.label(), "Select...");
    assert!(!select.is_open());
    assert!(select.trigger().is_none());
}

#[test]
fn test_toggle_opens_and_closes_dropdown() {
    let (mut doc, mut select) = mounted();

    select.toggle_dropdown(&mut doc);
    assert!(select.is_open());
    assert_eq!(select.dropdown().phase(), Phase::Open);
    let overlay = select.dropdown().overlay().unwrap();
    assert_eq!(doc.content(overlay).unwrap(), ["Kim", "Joe", "Kit"]);

    select.toggle_dropdown(&mut doc);
    assert!(!select.is_open());
    assert_eq!(select.dropdown().phase(), Phase::Closing);

    tick(&mut doc, &mut select, Duration::from_millis(150));
    assert_eq!(select.dropdown().phase(), Phase::Closed);
    assert!(!doc.exists(overlay));
    assert!(!select.is_open());
}

#[test]
fn test_toggle_before_view_init_opens_on_init() {
    let (mut doc, trigger) = setup();
    let mut select = Select::new(friends(), OverlayConfig::default());

    select.toggle_dropdown(&mut doc);
    assert!(select.is_open());
    assert!(select.dropdown().overlay().is_none());

    select.after_view_init(&mut doc, trigger);
    assert_eq!(select.trigger(), Some(trigger));
    assert_eq!(select.dropdown().phase(), Phase::Open);
}

#[test]
fn test_view_init_happens_once() {
    let (mut doc, trigger) = setup();
    let other = doc.create_element("trigger");
    let mut select = Select::new(friends(), OverlayConfig::default());

    select.after_view_init(&mut doc, trigger);
    select.after_view_init(&mut doc, other);

    assert_eq!(select.trigger(), Some(trigger));
    assert_eq!(select.dropdown().origin(), Some(trigger));
}

#[test]
fn test_choose_records_option_and_stays_open() {
    let (mut doc, mut select) = mounted();
    select.toggle_dropdown(&mut doc);

    select.choose(&mut doc, 1).unwrap();

    assert_eq!(select.selected(), Some("Joe"));
    assert_eq!(select.label(), "Joe");
    assert!(select.is_open());
    assert_eq!(select.dropdown().phase(), Phase::Open);
    assert_eq!(
        select.take_events(),
        vec![SelectEvent::Selected("Joe".to_string())]
    );
}

#[test]
fn test_choose_out_of_range() {
    let (mut doc, mut select) = mounted();
    assert_eq!(
        select.choose(&mut doc, 3),
        Err(SelectError::NoSuchOption { index: 3, len: 3 })
    );
    assert!(select.selected().is_none());
    assert!(select.take_events().is_empty());
}

#[test]
fn test_on_select_does_not_close() {
    let (mut doc, mut select) = mounted();
    select.toggle_dropdown(&mut doc);
    select.on_select("Kit");
    assert_eq!(select.selected(), Some("Kit"));
    assert!(select.is_open());
}

#[test]
fn test_close_dropdown_forces_flag_off() {
    let (mut doc, mut select) = mounted();
    select.toggle_dropdown(&mut doc);

    select.close_dropdown(&mut doc);
    select.close_dropdown(&mut doc);
    assert!(!select.is_open());
    assert_eq!(select.dropdown().phase(), Phase::Closing);

    tick(&mut doc, &mut select, Duration::from_millis(200));
    assert_eq!(select.dropdown().phase(), Phase::Closed);
}

#[test]
fn test_rapid_toggle_keeps_one_live_overlay() {
    let (mut doc, mut select) = mounted();

    for _ in 0..5 {
        select.toggle_dropdown(&mut doc);
        tick(&mut doc, &mut select, Duration::from_millis(20));
    }
    assert!(select.is_open());

    tick(&mut doc, &mut select, Duration::from_millis(1000));
    assert_eq!(select.dropdown().phase(), Phase::Open);
    assert!(select.is_open());
    // Trigger plus exactly one overlay.
    assert_eq!(doc.attached().len(), 2);
    assert_eq!(select.dropdown().generation(), 3);
}

#[test]
fn test_dispose_removes_overlay() {
    let (mut doc, mut select) = mounted();
    select.toggle_dropdown(&mut doc);
    let overlay = select.dropdown().overlay().unwrap();

    select.dispose(&mut doc);
    select.dispose(&mut doc);

    assert!(!doc.exists(overlay));
    assert!(!select.is_open());
    assert_eq!(doc.timer_count(), 0);
    assert_eq!(doc.observer_count(), 0);
}
