/// Linear scale for continuous-to-continuous mapping.
///
/// A zero-width domain is legal: every input maps to the midpoint of the
/// range so a dataset whose values are all equal still lands on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self {
            domain_min: domain.0,
            domain_max: domain.1,
            range_min: range.0,
            range_max: range.1,
        }
    }

    /// Scale over the `[min, max]` extent of `data`.
    ///
    /// Empty data yields a degenerate `(0, 0)` domain.
    pub fn from_extent(data: &[f64], range: (f64, f64)) -> Self {
        if data.is_empty() {
            return Self::new((0.0, 0.0), range);
        }
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self::new((min, max), range)
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.domain_max == self.domain_min
    }

    #[inline]
    pub fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    #[inline]
    pub fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }

    #[inline]
    pub fn apply(&self, value: f64) -> f64 {
        if self.is_degenerate() {
            return (self.range_min + self.range_max) * 0.5;
        }
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    /// Range → domain. A degenerate scale collapses everything onto its single
    /// domain value.
    #[inline]
    pub fn invert(&self, value: f64) -> f64 {
        if self.is_degenerate() || self.range_max == self.range_min {
            return self.domain_min;
        }
        let t = (value - self.range_min) / (self.range_max - self.range_min);
        self.domain_min + t * (self.domain_max - self.domain_min)
    }
}
