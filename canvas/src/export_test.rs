#![allow(clippy::float_cmp)]

use super::*;
use crate::curve::{Anchor, HandleKind};

fn pt(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

fn frame() -> CanvasFrame {
    CanvasFrame { width_px: 288.0, height_px: 768.0 }
}

fn default_curve() -> Curve {
    Curve::new_default(frame())
}

/// A bulging curve dragged partly off the left edge of the canvas.
fn bulging_curve() -> Curve {
    let mut curve = default_curve();
    curve.insert_anchor(0, pt(144.0, 384.0));
    curve.move_anchor(1, pt(-30.0, 400.0));
    curve.move_anchor(0, pt(200.0, 0.0));
    curve
}

fn folded_curve() -> Curve {
    Curve::from_anchors(vec![
        Anchor::start(pt(0.0, 0.0), pt(0.0, 0.0)),
        Anchor::interior(pt(100.0, 100.0), pt(100.0, 100.0), pt(100.0, 100.0)),
        Anchor::interior(pt(100.0, 0.0), pt(100.0, 0.0), pt(100.0, 0.0)),
        Anchor::end(pt(0.0, 100.0), pt(0.0, 100.0)),
    ])
}

// =============================================================
// fmt_num
// =============================================================

#[test]
fn fmt_num_drops_trailing_zeros() {
    assert_eq!(fmt_num(144.0), "144");
    assert_eq!(fmt_num(12.5), "12.5");
    assert_eq!(fmt_num(0.125), "0.125");
}

#[test]
fn fmt_num_rounds_to_three_places() {
    assert_eq!(fmt_num(1.234_56), "1.235");
    assert_eq!(fmt_num(2.000_4), "2");
}

#[test]
fn fmt_num_folds_negative_zero() {
    assert_eq!(fmt_num(-0.0), "0");
    assert_eq!(fmt_num(-0.000_1), "0");
    assert_eq!(fmt_num(-3.5), "-3.5");
}

// =============================================================
// margin_shift
// =============================================================

#[test]
fn default_curve_shifts_onto_margin() {
    let dx = margin_shift(&default_curve()).unwrap();
    assert!((dx - (96.0 - 144.0)).abs() < 1e-9);
}

#[test]
fn shifted_minimum_equals_margin() {
    for curve in [default_curve(), bulging_curve()] {
        let dx = margin_shift(&curve).unwrap();
        let min_x = curve
            .polyline(SAMPLE_RESOLUTION)
            .iter()
            .map(|p| p.x + dx)
            .fold(f64::INFINITY, f64::min);
        assert!((min_x - EXPORT_MARGIN_PX).abs() < 1e-9, "min x {min_x}");
    }
}

#[test]
fn curve_left_of_canvas_shifts_right() {
    assert!(margin_shift(&bulging_curve()).unwrap() > EXPORT_MARGIN_PX);
}

#[test]
fn margin_shift_of_empty_curve_is_none() {
    assert_eq!(margin_shift(&Curve::default()), None);
}

// =============================================================
// outline_path_data
// =============================================================

#[test]
fn default_outline_path_is_exact() {
    let curve = default_curve();
    let d = outline_path_data(&curve, frame(), margin_shift(&curve).unwrap());
    assert_eq!(d, "M 0 768 L 0 0 L 96 0 C 96 100 96 668 96 768 L 0 768 Z");
}

#[test]
fn outline_has_one_cubic_per_segment() {
    let curve = bulging_curve();
    let d = outline_path_data(&curve, frame(), 0.0);
    assert_eq!(d.matches(" C ").count(), curve.segment_count());
    assert!(d.starts_with("M 0 768 L 0 0 L 200 0 C "));
    assert!(d.ends_with(" L 0 768 Z"));
}

#[test]
fn outline_shifts_handles_with_anchors() {
    let mut curve = default_curve();
    curve.move_handle(0, HandleKind::Outgoing, pt(10.0, 50.0));
    let d = outline_path_data(&curve, frame(), 5.0);
    assert!(d.contains(" C 15 50 149 668 149 768"));
}

// =============================================================
// export_svg
// =============================================================

#[test]
fn export_declares_frame_size() {
    let svg = export_svg(&default_curve(), frame()).unwrap();
    assert!(svg.contains("<svg"));
    assert!(svg.contains(r#"width="288""#));
    assert!(svg.contains(r#"height="768""#));
    assert!(svg.contains("http://www.w3.org/2000/svg"));
}

#[test]
fn export_has_exactly_one_filled_path() {
    let svg = export_svg(&bulging_curve(), frame()).unwrap();
    assert_eq!(svg.matches("<path").count(), 1);
    assert!(svg.contains(r#"fill="black""#));
    assert!(svg.contains(r#"stroke="black""#));
    assert!(!svg.contains(r#"fill="none""#));
}

#[test]
fn export_embeds_outline_data() {
    let svg = export_svg(&default_curve(), frame()).unwrap();
    assert!(svg.contains("M 0 768 L 0 0 L 96 0 C 96 100 96 668 96 768 L 0 768 Z"));
}

#[test]
fn export_is_deterministic() {
    let curve = bulging_curve();
    assert_eq!(export_svg(&curve, frame()), export_svg(&curve, frame()));
}

#[test]
fn self_intersecting_curve_is_refused() {
    let f = CanvasFrame { width_px: 100.0, height_px: 100.0 };
    assert_eq!(export_svg(&folded_curve(), f), Err(ExportError::SelfIntersecting));
}

#[test]
fn too_few_anchors_is_refused_silently() {
    let curve = Curve::from_anchors(vec![Anchor::start(pt(0.0, 0.0), pt(0.0, 10.0))]);
    let err = export_svg(&curve, frame()).unwrap_err();
    assert_eq!(err, ExportError::InsufficientAnchors { count: 1 });
    assert!(err.user_message().is_none());
}

#[test]
fn self_intersection_has_user_message() {
    assert!(ExportError::SelfIntersecting.user_message().is_some());
}
