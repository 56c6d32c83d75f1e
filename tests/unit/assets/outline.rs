use super::*;
use kurbo::ParamCurve;

#[test]
fn line_cubic_advances_at_constant_speed() {
    let c = line_to_cubic(Point::new(0.0, 0.0), Point::new(9.0, 3.0));
    for i in 0..=10 {
        let u = i as f64 / 10.0;
        let p = c.eval(u);
        assert!((p.x - 9.0 * u).abs() < 1e-9);
        assert!((p.y - 3.0 * u).abs() < 1e-9);
    }
}

#[test]
fn closed_square_yields_four_segments() {
    let outlines = parse_path_data("M0,0 L10,0 L10,10 L0,10 Z").unwrap();
    assert_eq!(outlines.len(), 1);
    let segs = outlines[0].segments();
    assert_eq!(segs.len(), 4);
    assert_eq!(segs[3].p0, Point::new(0.0, 10.0));
    assert_eq!(segs[3].p3, Point::new(0.0, 0.0));
}

#[test]
fn close_at_start_adds_no_segment() {
    let outlines = parse_path_data("M0,0 L10,0 L10,10 L0,0 Z").unwrap();
    assert_eq!(outlines[0].len(), 3);
}

#[test]
fn subpaths_become_separate_outlines() {
    let outlines = parse_path_data("M0,0 L1,0 L1,1 Z M5,5 Q6,7 8,5 C9,4 10,6 11,5").unwrap();
    assert_eq!(outlines.len(), 2);
    assert_eq!(outlines[1].len(), 2);
    assert_eq!(concat_segments(&outlines).len(), 5);
}

#[test]
fn bare_moves_are_dropped() {
    let outlines = parse_path_data("M0,0 M3,3 L4,4").unwrap();
    assert_eq!(outlines.len(), 1);
    assert_eq!(outlines[0].segments()[0].p0, Point::new(3.0, 3.0));
}

#[test]
fn invalid_path_data_is_a_parse_error() {
    assert!(matches!(
        parse_path_data("M0,0 L"),
        Err(EpicycleError::Parse(_))
    ));
}
