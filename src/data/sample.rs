use super::model::{CellValue, Dataset, Record};

/// Category labels used by the synthetic dataset.
pub const SAMPLE_CATEGORIES: [&str; 4] = ["A", "B", "C", "D"];

/// Column order of the synthetic dataset.
pub const SAMPLE_COLUMNS: [&str; 4] = ["id", "category", "value", "score"];

/// Minimal deterministic PRNG (xoshiro256**)
pub struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    pub fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    pub fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    /// Uniform in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform in `[low, high)`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        low + (high - low) * self.next_f64()
    }

    /// Uniform index in `0..n`. `n` must be non-zero.
    pub fn pick(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    /// Box-Muller transform for normal distribution
    pub fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Generate the synthetic dashboard table.
///
/// Columns:
/// * `id`       – row number, `0..n_rows`
/// * `category` – one of [`SAMPLE_CATEGORIES`], uniformly drawn
/// * `value`    – normally distributed, mean 100, std 15
/// * `score`    – uniform in `[0, 100)`
///
/// The same `(n_rows, seed)` always yields the same table.
pub fn generate_sample_data(n_rows: usize, seed: u64) -> Dataset {
    let mut rng = SimpleRng::new(seed);

    let rows: Vec<Record> = (0..n_rows)
        .map(|i| {
            let category = SAMPLE_CATEGORIES[rng.pick(SAMPLE_CATEGORIES.len())];
            let value = rng.gauss(100.0, 15.0);
            let score = rng.uniform(0.0, 100.0);

            let mut row = Record::new();
            row.insert("id".to_string(), CellValue::Integer(i as i64));
            row.insert(
                "category".to_string(),
                CellValue::String(category.to_string()),
            );
            row.insert("value".to_string(), CellValue::Float(value));
            row.insert("score".to_string(), CellValue::Float(score));
            row
        })
        .collect();

    Dataset::from_rows(
        SAMPLE_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_and_columns() {
        let ds = generate_sample_data(200, 42);
        assert_eq!(ds.len(), 200);
        assert_eq!(ds.column_names(), &["id", "category", "value", "score"]);
        assert_eq!(ds.numeric_columns(), &["id", "value", "score"]);
    }

    #[test]
    fn test_same_seed_same_data() {
        assert_eq!(generate_sample_data(50, 7), generate_sample_data(50, 7));
        assert_ne!(generate_sample_data(50, 7), generate_sample_data(50, 8));
    }

    #[test]
    fn test_categories_and_ranges() {
        let ds = generate_sample_data(500, 1);
        for row in ds.rows() {
            let cat = row.get("category").map(|c| c.to_string()).unwrap();
            assert!(SAMPLE_CATEGORIES.contains(&cat.as_str()));
            let score = row.get("score").and_then(CellValue::as_f64).unwrap();
            assert!((0.0..100.0).contains(&score));
            let value = row.get("value").and_then(CellValue::as_f64).unwrap();
            assert!(value.is_finite());
        }
        // 500 draws over four labels: every label shows up.
        assert_eq!(ds.distinct_values("category").len(), SAMPLE_CATEGORIES.len());
    }

    #[test]
    fn test_zero_rows() {
        let ds = generate_sample_data(0, 42);
        assert!(ds.is_empty());
        assert_eq!(ds.column_names().len(), 4);
        assert!(ds.numeric_columns().is_empty());
    }

    #[test]
    fn test_gauss_is_roughly_centered() {
        let mut rng = SimpleRng::new(3);
        let n = 5000;
        let mean = (0..n).map(|_| rng.gauss(10.0, 2.0)).sum::<f64>() / n as f64;
        assert!((mean - 10.0).abs() < 0.2, "mean was {mean}");
    }
}
