//! Seeded data generators for tests and benchmarks.

use rand::prelude::*;

/// Random keys uniform in `[0, 2^bits_per_key)`.
pub fn random_keys(n: usize, bits_per_key: u32, seed: u64) -> Vec<u32> {
	assert!((1..32).contains(&bits_per_key));
	let mut rng = StdRng::seed_from_u64(seed);
	let bound = 1u32 << bits_per_key;
	(0..n).map(|_| rng.gen_range(0..bound)).collect()
}

/// Random feature values uniform in `[min, max]`, with roughly `nan_rate`
/// of them replaced by NaN.
pub fn random_values(n: usize, seed: u64, min: f32, max: f32, nan_rate: f64) -> Vec<f32> {
	assert!(max >= min);
	assert!((0.0..=1.0).contains(&nan_rate));
	let mut rng = StdRng::seed_from_u64(seed);
	let width = max - min;
	(0..n)
		.map(|_| {
			if rng.gen_bool(nan_rate) {
				f32::NAN
			} else {
				min + rng.r#gen::<f32>() * width
			}
		})
		.collect()
}

/// `n_borders` evenly spaced borders strictly inside `(min, max)`.
pub fn uniform_borders(n_borders: usize, min: f32, max: f32) -> Vec<f32> {
	let step = (max - min) / (n_borders + 1) as f32;
	(1..=n_borders).map(|i| min + i as f32 * step).collect()
}
