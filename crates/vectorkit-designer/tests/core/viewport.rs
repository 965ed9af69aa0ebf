use vectorkit_designer::model::Point;
use vectorkit_designer::viewport::{Viewport, ZOOM_STEP};
use vectorkit_settings::ViewportSettings;

#[test]
fn test_viewport_creation() {
    let vp = Viewport::default();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan(), Point::new(0.0, 0.0));
}

#[test]
fn test_zoom_steps() {
    let mut vp = Viewport::default();
    vp.zoom_in();
    assert!((vp.zoom() - ZOOM_STEP).abs() < 1e-12);
    vp.zoom_out();
    assert!((vp.zoom() - 1.0).abs() < 1e-12);
}

#[test]
fn test_zoom_limits_follow_settings() {
    let mut vp = Viewport::new(&ViewportSettings {
        min_zoom: 0.5,
        max_zoom: 2.0,
    });
    for _ in 0..10 {
        vp.zoom_in();
    }
    assert_eq!(vp.zoom(), 2.0);
    for _ in 0..20 {
        vp.zoom_out();
    }
    assert_eq!(vp.zoom(), 0.5);

    vp.set_zoom(f64::NAN);
    assert_eq!(vp.zoom(), 0.5);
}

#[test]
fn test_screen_world_round_trip() {
    let mut vp = Viewport::default();
    vp.set_zoom(2.0);
    vp.set_pan(10.0, 20.0);

    let world = vp.screen_to_world(Point::new(110.0, 220.0));
    assert_eq!(world, Point::new(50.0, 100.0));
    assert_eq!(vp.world_to_screen(world), Point::new(110.0, 220.0));
}

#[test]
fn test_positive_y_goes_down() {
    let vp = Viewport::default();
    let top = vp.world_to_screen(Point::new(0.0, 0.0));
    let lower = vp.world_to_screen(Point::new(0.0, 100.0));
    assert!(lower.y > top.y);
}

#[test]
fn test_pan_by_and_reset() {
    let mut vp = Viewport::default();
    vp.pan_by(5.0, -5.0);
    vp.pan_by(1.0, 1.0);
    assert_eq!(vp.pan(), Point::new(6.0, -4.0));

    vp.set_zoom(3.0);
    vp.reset();
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan(), Point::new(0.0, 0.0));
}

#[test]
fn test_with_limits_reclamps_zoom() {
    let mut vp = Viewport::default();
    vp.set_zoom(4.0);
    vp.set_pan(10.0, -5.0);

    let tight = ViewportSettings {
        min_zoom: 0.5,
        max_zoom: 2.0,
    };
    let limited = vp.with_limits(&tight);
    assert_eq!(limited.zoom(), 2.0);
    assert_eq!(limited.pan(), Point::new(10.0, -5.0));

    // A zero lower limit is not a usable range.
    let broken = ViewportSettings {
        min_zoom: 0.0,
        max_zoom: 5.0,
    };
    let mut tiny = Viewport::new(&broken);
    tiny.set_zoom(0.0);
    assert_eq!(tiny.zoom(), 0.0);
    assert_eq!(tiny.with_limits(&broken).zoom(), 0.1);

    vp.set_pan(f64::NAN, 1.0);
    assert_eq!(vp.with_limits(&tight).pan(), Point::new(0.0, 0.0));
}
