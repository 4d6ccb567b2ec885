//! Linear scale over `f64` domains.

use crate::ContinuousScale;

/// Differences smaller than this are treated as coincident points.
const SOLVE_EPSILON: f64 = 1e-12;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn with_domain(&self, domain: (f64, f64)) -> Self {
        Self {
            domain,
            range: self.range,
        }
    }

    pub fn with_range(&self, range: (f64, f64)) -> Self {
        Self {
            domain: self.domain,
            range,
        }
    }

    /// Width of the domain, signed.
    pub fn domain_span(&self) -> f64 {
        self.domain.1 - self.domain.0
    }

    /// Range units per domain unit; zero for a collapsed domain.
    pub fn slope(&self) -> f64 {
        let span = self.domain_span();
        if span == 0.0 {
            0.0
        } else {
            (self.range.1 - self.range.0) / span
        }
    }
}

impl ContinuousScale for LinearScale {
    type Domain = f64;

    fn apply(&self, value: &f64) -> f64 {
        self.range.0 + (value - self.domain.0) * self.slope()
    }

    fn inverse(&self, value: f64) -> f64 {
        let slope = self.slope();
        if slope == 0.0 {
            self.domain.0
        } else {
            self.domain.0 + (value - self.range.0) / slope
        }
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn solve_domain(&self, first: (&f64, f64), second: Option<(&f64, f64)>) -> Self {
        let current = self.slope();
        let mut slope = current;
        let (d1, r1) = (*first.0, first.1);

        if let Some((d2, r2)) = second {
            let dd = *d2 - d1;
            let dr = r2 - r1;
            if dd.abs() > SOLVE_EPSILON && dr.abs() > SOLVE_EPSILON {
                let fitted = dr / dd;
                // Crossed points would reflect the axis; keep the zoom instead.
                if (fitted < 0.0) == (current < 0.0) {
                    slope = fitted;
                }
            }
        }

        if slope == 0.0 || !slope.is_finite() {
            return *self;
        }

        let domain = (
            d1 + (self.range.0 - r1) / slope,
            d1 + (self.range.1 - r1) / slope,
        );
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return *self;
        }
        self.with_domain(domain)
    }
}
