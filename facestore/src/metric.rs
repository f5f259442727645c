/// Distance metric used by the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Metric {
    /// Euclidean (L2) distance.
    #[default]
    Euclidean,
    /// Cosine distance in `[0, 2]`.
    Cosine,
}

impl Metric {
    /// Distance between two vectors under this metric.
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        match self {
            Metric::Euclidean => euclidean_distance(a, b),
            Metric::Cosine => cosine_distance(a, b),
        }
    }

    pub(crate) fn as_u8(&self) -> u8 {
        match self {
            Metric::Euclidean => 0,
            Metric::Cosine => 1,
        }
    }

    pub(crate) fn from_u8(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Metric::Euclidean),
            1 => Some(Metric::Cosine),
            _ => None,
        }
    }
}

/// Compute the Euclidean (L2) distance between two vectors.
///
/// Uses f64 intermediate precision. Returns `f32::INFINITY` on a
/// dimension mismatch so a malformed comparison can never win a
/// nearest-neighbor contest.
pub fn euclidean_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return f32::INFINITY;
    }

    let mut sum: f64 = 0.0;
    for i in 0..a.len() {
        let d = a[i] as f64 - b[i] as f64;
        sum += d * d;
    }
    sum.sqrt() as f32
}

/// Compute the cosine distance between two vectors.
///
/// Returns a value in `[0, 2]` where 0 means identical direction and
/// 2 means opposite direction.
///
/// Uses f64 intermediate precision. Returns 2.0 for zero vectors or
/// dimension mismatches.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 2.0;
    }

    let mut dot: f64 = 0.0;
    let mut norm_a: f64 = 0.0;
    let mut norm_b: f64 = 0.0;

    for i in 0..a.len() {
        let ai = a[i] as f64;
        let bi = b[i] as f64;
        dot += ai * bi;
        norm_a += ai * ai;
        norm_b += bi * bi;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 2.0;
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    // Clamp to [-1, 1] to handle floating point errors.
    let similarity = similarity.clamp(-1.0, 1.0);
    (1.0 - similarity) as f32
}
