use super::*;
use std::f64::consts::TAU;

fn direct_dft(points: &[Complex64]) -> Vec<Complex64> {
    let m = points.len();
    (0..m)
        .map(|k| {
            let sum: Complex64 = points
                .iter()
                .enumerate()
                .map(|(n, p)| p * Complex64::from_polar(1.0, -TAU * (k * n) as f64 / m as f64))
                .sum();
            sum / m as f64
        })
        .collect()
}

fn wobbly(m: usize) -> PointSequence {
    PointSequence::from_points(
        (0..m)
            .map(|n| {
                let a = TAU * n as f64 / m as f64;
                Complex64::new(a.cos() + 0.3 * (3.0 * a).sin(), a.sin() - 0.2 * (2.0 * a).cos())
            })
            .collect(),
    )
}

#[test]
fn frequency_labels_follow_signed_convention() {
    let even: Vec<i64> = (0..6).map(|k| frequency_for_index(k, 6)).collect();
    assert_eq!(even, vec![0, 1, 2, 3, -2, -1]);
    let odd: Vec<i64> = (0..5).map(|k| frequency_for_index(k, 5)).collect();
    assert_eq!(odd, vec![0, 1, 2, -2, -1]);
}

#[test]
fn fft_matches_direct_sum() {
    for m in [1usize, 2, 7, 16, 45] {
        let points = wobbly(m);
        let spectrum = decompose(&points).unwrap();
        assert_eq!(spectrum.len(), m);
        let expected = direct_dft(points.as_slice());
        for (c, e) in spectrum.components().iter().zip(expected) {
            assert!((c.coefficient - e).norm() < 1e-10, "m={m} k={}", c.index);
        }
    }
}

#[test]
fn dc_is_the_mean() {
    let points = PointSequence::from_points(vec![
        Complex64::new(1.0, 2.0),
        Complex64::new(3.0, -2.0),
        Complex64::new(5.0, 6.0),
    ]);
    let spectrum = decompose(&points).unwrap();
    let dc = spectrum.dc().unwrap();
    assert_eq!(dc.index, 0);
    assert!((dc.coefficient - Complex64::new(3.0, 2.0)).norm() < 1e-12);
}

#[test]
fn pure_rotation_has_single_bin() {
    let m = 32;
    let points = PointSequence::from_points(
        (0..m)
            .map(|n| Complex64::from_polar(0.5, -TAU * 3.0 * n as f64 / m as f64))
            .collect(),
    );
    let spectrum = decompose(&points).unwrap();
    for c in spectrum.components() {
        if c.frequency == -3 {
            assert!((c.magnitude() - 0.5).abs() < 1e-12);
        } else {
            assert!(c.magnitude() < 1e-12, "bin {} leaked", c.frequency);
        }
    }
}

#[test]
fn empty_sequence_is_rejected() {
    assert!(matches!(
        decompose(&PointSequence::default()),
        Err(EpicycleError::EmptyInput {
            stage: Stage::Decomposition,
            ..
        })
    ));
}
