/// Cosine similarity in `[-1, 1]`. `None` when the vectors are empty, differ in length, or
/// either has zero norm.
pub fn cosine_similarity(left: &[f32], right: &[f32]) -> Option<f64> {
	if left.is_empty() || left.len() != right.len() {
		return None;
	}

	let mut dot = 0.0_f64;
	let mut left_norm = 0.0_f64;
	let mut right_norm = 0.0_f64;

	for (l, r) in left.iter().zip(right) {
		let (l, r) = (f64::from(*l), f64::from(*r));

		dot += l * r;
		left_norm += l * l;
		right_norm += r * r;
	}

	if left_norm <= f64::EPSILON || right_norm <= f64::EPSILON {
		return None;
	}

	let similarity = dot / (left_norm.sqrt() * right_norm.sqrt());

	similarity.is_finite().then(|| similarity.clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identical_vectors_score_one() {
		let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).expect("similarity");

		assert!((sim - 1.0).abs() < 1e-9);
	}

	#[test]
	fn orthogonal_and_opposite_vectors() {
		assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), Some(0.0));

		let sim = cosine_similarity(&[1.0, 0.0], &[-2.0, 0.0]).expect("similarity");

		assert!((sim + 1.0).abs() < 1e-9);
	}

	#[test]
	fn rejects_degenerate_inputs() {
		assert_eq!(cosine_similarity(&[], &[]), None);
		assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), None);
		assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), None);
	}
}
