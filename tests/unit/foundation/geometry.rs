use super::*;

#[test]
fn rect_normalizes_on_construction() {
    let r = Rect::new(10.0, 20.0, 0.0, 5.0);
    assert_eq!(r, Rect::new(0.0, 5.0, 10.0, 20.0));
    assert_eq!(r.width(), 10.0);
    assert_eq!(r.height(), 15.0);
    assert_eq!(r.area(), 150.0);
}

#[test]
fn rect_include_grows_to_union() {
    let mut r = Rect::new(0.0, 0.0, 10.0, 15.0);
    assert!(r.include(&Rect::new(-5.0, 5.0, 8.0, 18.0)));
    assert_eq!(r, Rect::new(-5.0, 0.0, 10.0, 18.0));
    assert_eq!(r.to_string(), "Rect(-5, 0, 10, 18)");
}

#[test]
fn rect_include_from_empty_reports_change() {
    let mut r = Rect::default();
    assert!(r.is_empty());
    assert!(r.include(&Rect::new(1.0, 2.0, 3.0, 4.0)));
    assert!(!r.is_empty());

    let mut line = Rect::default();
    assert!(line.include(&Rect::new(0.0, 0.0, 0.0, 5.0)));
}

#[test]
fn rect_include_contained_is_noop() {
    let mut r = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(!r.include(&Rect::new(2.0, 2.0, 8.0, 8.0)));
    assert_eq!(r, Rect::new(0.0, 0.0, 10.0, 10.0));
}

#[test]
fn size_scaling_floors() {
    let s = Size::new(100.0, 51.0).scaled_by(0.5);
    assert_eq!(s, Size::new(50.0, 25.0));
    assert_eq!(Size::new(3.0, 7.0).scaled_by(1.0 / 3.0), Size::new(1.0, 2.0));
}

#[test]
fn size_emptiness() {
    assert!(Size::ZERO.is_empty());
    assert!(Size::new(0.0, 5.0).is_empty());
    assert!(Size::new(5.0, 0.0).is_empty());
    assert!(!Size::new(1.0, 1.0).is_empty());
    assert_eq!(Size::new(3.0, 4.0).to_string(), "3 x 4");
}

#[test]
fn rect_serde_normalizes() {
    let r: Rect =
        serde_json::from_str(r#"{"left":4.0,"top":0.0,"right":1.0,"bottom":2.0}"#).unwrap();
    assert_eq!(r.left(), 1.0);
    assert_eq!(r.right(), 4.0);
    let json = serde_json::to_string(&r).unwrap();
    assert!(json.contains("\"left\":1.0"));
}

#[test]
fn kurbo_round_trip_keeps_edges() {
    let r = Rect::new(1.0, 2.0, 3.0, 4.0);
    let k: kurbo::Rect = r.into();
    assert_eq!(Rect::from(k), r);
}
