use num::Float;

/// Evenly spaced values, computed like numpy.linspace
pub(crate) struct Linspace<F> {
    start: F,
    end: F,
    step: F,
    index: usize,
    len: usize,
}

impl<F: Float> Linspace<F> {
    pub(crate) fn new(min: F, max: F, n: usize) -> Self {
        let step = match (n > 1).then(|| F::from(n - 1)).flatten() {
            Some(num_steps) => (max - min) / num_steps,
            None => F::zero(),
        };

        Linspace { start: min, end: max, step, index: 0, len: n }
    }

    /// Points from `min` towards `max` spaced by `step`, like numpy.arange but with
    /// the endpoint included when it lands on the grid.
    ///
    /// Callers must pass a positive, finite step and `min <= max`.
    pub(crate) fn with_step(min: F, max: F, step: F) -> Self {
        // A tiny epsilon keeps 10 / 0.1 from flooring to 99
        let eps = F::from(1e-9).unwrap_or_else(F::epsilon);
        let n = ((max - min) / step + eps).floor().to_usize().unwrap_or(0) + 1;
        let last = F::min(min + step * F::from(n - 1).unwrap_or_else(F::zero), max);

        Self::new(min, last, n)
    }
}

impl<F: Float> Iterator for Linspace<F> {
    type Item = F;

    #[inline]
    fn next(&mut self) -> Option<F> {
        if self.index >= self.len {
            return None;
        }

        let i = F::from(self.index)?;
        self.index += 1;

        // The last point is exactly `end`, as numpy does
        if self.index == self.len && self.len > 1 {
            return Some(self.end);
        }

        Some(self.start + self.step * i)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl<F: Float> ExactSizeIterator for Linspace<F> {}

#[test]
fn test_linspace() {
    let points: Vec<f64> = Linspace::new(0., 1., 5).collect();

    assert_eq!(points, vec![0., 0.25, 0.5, 0.75, 1.]);
    assert_eq!(Linspace::new(3., 7., 1).collect::<Vec<f64>>(), vec![3.]);
    assert_eq!(Linspace::<f64>::new(3., 7., 0).count(), 0);
}

#[test]
fn test_linspace_with_step() {
    let points: Vec<f64> = Linspace::with_step(0., 10., 1.).collect();

    assert_eq!(points, (0..=10).map(f64::from).collect::<Vec<_>>());
    assert_eq!(Linspace::with_step(0., 10., 0.1).len(), 101);
    // The endpoint is dropped when it is off the grid
    assert_eq!(Linspace::with_step(0., 10., 3.).collect::<Vec<f64>>(), vec![0., 3., 6., 9.]);
}

#[test]
fn test_linspace_with_step_stays_within_max() {
    let points: Vec<f64> = Linspace::with_step(0., 0.3, 0.1).collect();

    assert_eq!(points.len(), 4);
    assert_eq!(points[3], 0.3);
    assert!(points.iter().all(|p| *p <= 0.3));
    assert!(points.windows(2).all(|w| w[0] < w[1]));

    let points: Vec<f64> = Linspace::with_step(0., 1., 0.1).collect();

    assert_eq!(points.len(), 11);
    assert_eq!(points[10], 1.);
}
