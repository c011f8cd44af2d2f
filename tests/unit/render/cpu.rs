use super::*;

const RED: Color = Color::rgb(255, 0, 0);

#[test]
fn new_surface_is_filled_with_the_background() {
    let mut s = CpuSurface::new(4, 3, Some(Color::rgb(10, 20, 30))).unwrap();
    let frame = s.finish().unwrap();
    assert_eq!((frame.width, frame.height), (4, 3));
    assert_eq!(frame.data.len(), 4 * 3 * 4);
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(3, 2), Some([10, 20, 30, 255]));
    assert_eq!(frame.pixel(4, 0), None);
}

#[test]
fn dimensions_are_validated() {
    assert!(matches!(
        CpuSurface::new(0, 10, None),
        Err(ClockError::Validation(_))
    ));
    assert!(CpuSurface::new(70_000, 10, None).is_err());
    let mut s = CpuSurface::new(8, 8, None).unwrap();
    assert!(s.resize(8, 0).is_err());
}

#[test]
fn fill_under_transform_covers_the_device_rect() {
    let mut s = CpuSurface::new(16, 16, None).unwrap();
    s.save();
    s.translate(4.0, 4.0);
    s.scale(2.0, 2.0);
    s.begin_path();
    s.rect(0.0, 0.0, 2.0, 2.0);
    s.fill(RED).unwrap();
    s.restore().unwrap();
    let frame = s.finish().unwrap();

    assert_eq!(frame.pixel(5, 5), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(7, 7), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(2, 2), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(10, 10), Some([0, 0, 0, 0]));
}

#[test]
fn clear_rect_restores_the_background_only_inside_the_region() {
    let bg = Color::rgb(0, 0, 255);
    let mut s = CpuSurface::new(10, 10, Some(bg)).unwrap();
    s.begin_path();
    s.rect(0.0, 0.0, 10.0, 10.0);
    s.fill(RED).unwrap();
    s.clear_rect(0.0, 0.0, 5.0, 10.0).unwrap();
    let frame = s.finish().unwrap();
    assert_eq!(frame.pixel(2, 5), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(7, 5), Some([255, 0, 0, 255]));
}

#[test]
fn drawing_after_a_clear_composites_over_earlier_content() {
    let mut s = CpuSurface::new(10, 10, None).unwrap();
    s.begin_path();
    s.rect(0.0, 0.0, 5.0, 10.0);
    s.fill(RED).unwrap();
    s.clear_rect(8.0, 8.0, 2.0, 2.0).unwrap();
    s.begin_path();
    s.rect(5.0, 0.0, 5.0, 10.0);
    s.fill(Color::WHITE).unwrap();
    let frame = s.finish().unwrap();
    assert_eq!(frame.pixel(1, 1), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(8, 1), Some([255, 255, 255, 255]));
}

#[test]
fn empty_paths_and_transparent_paint_draw_nothing() {
    let mut s = CpuSurface::new(4, 4, None).unwrap();
    s.begin_path();
    s.fill(RED).unwrap();
    s.begin_path();
    s.rect(0.0, 0.0, 4.0, 4.0);
    s.fill(Color::TRANSPARENT).unwrap();
    s.stroke(RED, 0.0).unwrap();
    let frame = s.finish().unwrap();
    assert!(frame.data.iter().all(|&b| b == 0));
}

#[test]
fn unbalanced_restore_is_a_render_error() {
    let mut s = CpuSurface::new(4, 4, None).unwrap();
    assert!(matches!(s.restore(), Err(ClockError::Render(_))));
}

#[test]
fn stroke_paints_the_outline() {
    let mut s = CpuSurface::new(20, 20, None).unwrap();
    s.begin_path();
    s.rect(4.0, 4.0, 12.0, 12.0);
    s.stroke(RED, 2.0).unwrap();
    let frame = s.finish().unwrap();
    assert_eq!(frame.pixel(4, 10).map(|p| p[3]), Some(255));
    assert_eq!(frame.pixel(10, 10), Some([0, 0, 0, 0]));
}

#[test]
fn straight_alpha_undoes_premultiplication() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 128, 128],
        premultiplied: true,
    };
    let straight = frame.to_straight_alpha();
    assert!(!straight.premultiplied);
    assert_eq!(straight.data, vec![128, 0, 255, 128]);
}

#[test]
fn resize_drops_content() {
    let mut s = CpuSurface::new(4, 4, None).unwrap();
    s.begin_path();
    s.rect(0.0, 0.0, 4.0, 4.0);
    s.fill(RED).unwrap();
    s.resize(6, 2).unwrap();
    assert_eq!(s.width(), 6.0);
    let frame = s.finish().unwrap();
    assert_eq!(frame.data.len(), 6 * 2 * 4);
    assert!(frame.data.iter().all(|&b| b == 0));
}
