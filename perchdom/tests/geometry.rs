use perchdom::{Rect, Viewport};

#[test]
fn test_rect_edges() {
    let rect = Rect::new(20.0, 500.0, 200.0, 40.0);
    assert_eq!(rect.left(), 20.0);
    assert_eq!(rect.right(), 220.0);
    assert_eq!(rect.top(), 500.0);
    assert_eq!(rect.bottom(), 540.0);
}

#[test]
fn test_rect_from_edges() {
    let rect = Rect::from_edges(500.0, 540.0, 20.0, 200.0);
    assert_eq!(rect, Rect::new(20.0, 500.0, 200.0, 40.0));
}

#[test]
fn test_rect_contains_is_half_open() {
    let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(rect.contains(0.0, 0.0));
    assert!(rect.contains(9.5, 9.5));
    assert!(!rect.contains(10.0, 5.0));
    assert!(!rect.contains(5.0, 10.0));
}

#[test]
fn test_rects_overlap_intersecting() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(5.0, 5.0, 10.0, 10.0);
    assert!(a.overlaps(&b));
    assert!(b.overlaps(&a));
}

#[test]
fn test_rects_overlap_adjacent() {
    let a = Rect::new(0.0, 0.0, 10.0, 10.0);
    let b = Rect::new(10.0, 0.0, 10.0, 10.0);
    assert!(!a.overlaps(&b));
}

#[test]
fn test_rect_translate() {
    let rect = Rect::new(20.0, 500.0, 200.0, 40.0).translate(-5.0, -100.0);
    assert_eq!(rect, Rect::new(15.0, 400.0, 200.0, 40.0));
}

#[test]
fn test_empty_rect() {
    assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_empty());
    assert!(!Rect::new(0.0, 0.0, 1.0, 1.0).is_empty());
}

#[test]
fn test_viewport_bounds_ignore_scroll() {
    let viewport = Viewport::new(800.0, 600.0).with_scroll(10.0, 250.0);
    assert_eq!(viewport.bounds(), Rect::new(0.0, 0.0, 800.0, 600.0));
    assert_eq!(viewport.scroll_y, 250.0);
}
