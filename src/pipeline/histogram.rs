/// Bin count used by the value distribution plot.
pub const DEFAULT_BINS: usize = 20;

/// Equal-width histogram over a set of values.
///
/// `edges` has one more entry than `counts`. Every bin is half-open
/// `[edge_i, edge_i+1)` except the last, which also includes its right edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin the finite entries of `values` into `bins` equal-width bins spanning
    /// their range. A zero-width range is widened to `[v - 0.5, v + 0.5]`
    /// (or by a few ulps for values too large for 0.5 to register).
    ///
    /// The range may be wider than `f64::MAX`; edges and bin positions are
    /// computed without forming `hi - lo`.
    ///
    /// Returns `None` if there is nothing to bin.
    pub fn compute(values: &[f64], bins: usize) -> Option<Self> {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.is_empty() || bins == 0 {
            return None;
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            let pad = 0.5f64.max(lo.abs() * f64::EPSILON);
            lo = (lo - pad).max(f64::MIN);
            hi = (hi + pad).min(f64::MAX);
        }
        // Half the span always fits in an f64, so `step` is half a bin width.
        let half_span = hi / 2.0 - lo / 2.0;
        let step = half_span / bins as f64;

        let edges: Vec<f64> = (0..=bins)
            .map(|i| {
                if i == bins {
                    hi
                } else {
                    lo + step * i as f64 + step * i as f64
                }
            })
            .collect();
        let mut counts = vec![0usize; bins];
        for v in finite {
            let idx = (((v / 2.0 - lo / 2.0) / step).floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Some(Histogram { edges, counts })
    }

    pub fn bin_width(&self) -> f64 {
        match (self.edges.first(), self.edges.get(1)) {
            (Some(a), Some(b)) => b - a,
            _ => 0.0,
        }
    }

    /// Midpoint of each bin, paired with its count.
    pub fn bars(&self) -> impl Iterator<Item = (f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(&self.counts)
            .map(|(w, &c)| ((w[0] + w[1]) / 2.0, c))
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
