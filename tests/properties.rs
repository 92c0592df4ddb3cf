//! Property-based tests for membership shapes, interpolation and the tipping system.

use fuzzy_tip::{interp_membership, trimf, Shape, TipSystem, Universe};
use proptest::prelude::*;

fn universe() -> Vec<f64> {
    Universe::new(0. ..=10., 0.5).unwrap().points().to_vec()
}

/// Three ordered breakpoints inside 0..=10, snapped to the 0.5 grid
fn breakpoints3() -> impl Strategy<Value = (f64, f64, f64)> {
    prop::array::uniform3(0u8..=20).prop_map(|mut p| {
        p.sort_unstable();
        (f64::from(p[0]) / 2., f64::from(p[1]) / 2., f64::from(p[2]) / 2.)
    })
}

fn breakpoints4() -> impl Strategy<Value = (f64, f64, f64, f64)> {
    prop::array::uniform4(0u8..=20).prop_map(|mut p| {
        p.sort_unstable();
        (f64::from(p[0]) / 2., f64::from(p[1]) / 2., f64::from(p[2]) / 2., f64::from(p[3]) / 2.)
    })
}

proptest! {
    #[test]
    fn prop_triangular_bounds((a, b, c) in breakpoints3(), x in -2.0..12.0f64) {
        let shape = Shape::triangular(a, b, c).unwrap();
        let degree = shape.degree(x);

        prop_assert!((0. ..=1.).contains(&degree));
        prop_assert_eq!(shape.degree(b), 1.);
        if a != b {
            prop_assert_eq!(shape.degree(a), 0.);
        }
        if b != c {
            prop_assert_eq!(shape.degree(c), 0.);
        }
    }

    #[test]
    fn prop_triangular_rejects_unordered(a in 0.0..10.0f64, gap in 0.001..5.0f64) {
        prop_assert!(Shape::triangular(a, a - gap, a + gap).is_err());
        prop_assert!(Shape::trapezoidal(a, a + gap, a, a + gap).is_err());
    }

    #[test]
    fn prop_trapezoidal_plateau_and_support((a, b, c, d) in breakpoints4(), x in -2.0..12.0f64) {
        let shape = Shape::trapezoidal(a, b, c, d).unwrap();
        let degree = shape.degree(x);

        prop_assert!((0. ..=1.).contains(&degree));
        if (b..=c).contains(&x) {
            prop_assert_eq!(degree, 1.);
        }
        if x < a || x > d {
            prop_assert_eq!(degree, 0.);
        }
    }

    #[test]
    fn prop_gaussian_symmetric_and_decreasing(mean in 0.0..10.0f64, sigma in 0.1..5.0f64, d in 0.01..5.0f64) {
        let shape = Shape::gaussian(mean, sigma).unwrap();

        prop_assert_eq!(shape.degree(mean), 1.);
        prop_assert!((shape.degree(mean - d) - shape.degree(mean + d)).abs() < 1e-12);
        prop_assert!(shape.degree(mean + d) < 1.);
        prop_assert!(shape.degree(mean + 2. * d) <= shape.degree(mean + d));
    }

    #[test]
    fn prop_interpolation_exact_at_nodes((a, b, c) in breakpoints3()) {
        let universe = universe();
        let curve = trimf(&universe, a, b, c).unwrap();

        for (x, y) in universe.iter().zip(&curve) {
            prop_assert_eq!(interp_membership(&universe, &curve, *x).unwrap(), *y);
        }
    }

    #[test]
    fn prop_interpolation_monotonic_on_rising_edge(a in 0u8..10, t1 in 0.0..1.0f64, t2 in 0.0..1.0f64) {
        // Rising edge only: a triangle peaking at the universe end
        let universe = universe();
        let curve = trimf(&universe, f64::from(a), 10., 10.).unwrap();
        let (lo, hi) = (f64::from(a) + t1.min(t2), f64::from(a) + t1.max(t2));

        let lo = interp_membership(&universe, &curve, lo).unwrap();
        let hi = interp_membership(&universe, &curve, hi).unwrap();

        prop_assert!(lo <= hi);
    }

    #[test]
    fn prop_tip_within_universe(food in 0.0..=10.0f64, service in 0.0..=10.0f64) {
        let system = TipSystem::new().unwrap();
        let outputs = system.infer(food, service).unwrap();
        let tip = outputs.defuzzificated();

        prop_assert!((0. ..=30.).contains(&tip));
        prop_assert_eq!(outputs.activations().len(), 3);

        for (i, aggregated) in outputs.aggregated_membership().iter().enumerate() {
            let max = outputs.activations().iter().map(|a| a.membership()[i]).fold(0., f64::max);
            prop_assert_eq!(*aggregated, max);
        }
    }
}
