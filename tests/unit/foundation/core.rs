use super::*;

#[test]
fn canvas_center_is_half_extent() {
    let c = Canvas::new(1920, 1080).unwrap();
    assert_eq!(c.center(), Point::new(960.0, 540.0));
}

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 1080).is_err());
    assert!(Canvas::new(1920, 0).is_err());
}

#[test]
fn fps_frame_duration_is_reciprocal() {
    let fps = Fps::new(30, 1).unwrap();
    assert!((fps.frame_duration_secs() - 1.0 / 30.0).abs() < 1e-12);

    let ntsc = Fps::new(30000, 1001).unwrap();
    assert!((ntsc.as_f64() - 29.97).abs() < 1e-2);
    assert!(Fps::new(30, 0).is_err());
    assert!(Fps::new(0, 1).is_err());
}

#[test]
fn rgb_scale_is_per_channel() {
    let c = Rgb::new(1.0, 0.5, 0.25).scale(0.5);
    assert_eq!(c, Rgb::new(0.5, 0.25, 0.125));
    assert_eq!(Rgb::WHITE.scale(0.0), Rgb::BLACK);
}

#[test]
fn rgb_to_rgba8_is_opaque() {
    assert_eq!(Rgb::WHITE.to_rgba8(), [255, 255, 255, 255]);
    assert_eq!(Rgb::new(0.0, 0.5, 1.0).to_rgba8(), [0, 128, 255, 255]);
}
