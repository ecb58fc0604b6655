//! Reusable per-path simulation buffers.

/// Scratch buffers for one path at a time.
///
/// The engine simulates paths sequentially and reuses these two
/// buffers across every path of a pricing call, so a full run makes
/// exactly one pair of allocations (plus growth if the step count
/// rises between calls). `normals` holds the raw draws for the
/// current path and `path` the prices, with `path.len() ==
/// normals.len() + 1` for the initial spot.
pub struct PathScratch {
    normals: Vec<f64>,
    path: Vec<f64>,
}

impl PathScratch {
    /// Allocates buffers for `num_steps` steps per path.
    pub fn new(num_steps: usize) -> Self {
        Self {
            normals: vec![0.0; num_steps],
            path: vec![0.0; num_steps + 1],
        }
    }

    /// Grows (never shrinks) the buffers to hold `num_steps` steps.
    pub fn ensure_capacity(&mut self, num_steps: usize) {
        if self.normals.len() < num_steps {
            self.normals.resize(num_steps, 0.0);
            self.path.resize(num_steps + 1, 0.0);
        }
    }

    /// Number of steps the buffers currently hold.
    #[inline]
    pub fn num_steps(&self) -> usize {
        self.normals.len()
    }

    /// The raw draw buffer.
    #[inline]
    pub fn normals(&self) -> &[f64] {
        &self.normals
    }

    /// Mutable access to the raw draw buffer, for filling.
    #[inline]
    pub fn normals_mut(&mut self) -> &mut [f64] {
        &mut self.normals
    }

    /// The simulated price path.
    #[inline]
    pub fn path(&self) -> &[f64] {
        &self.path
    }

    /// Splits into the draw buffer and a mutable path buffer, the
    /// borrow shape path simulation needs.
    #[inline]
    pub fn split(&mut self) -> (&[f64], &mut [f64]) {
        (&self.normals, &mut self.path)
    }

    /// Negates every draw in place for the antithetic mirror pass.
    #[inline]
    pub fn negate_normals(&mut self) {
        for z in self.normals.iter_mut() {
            *z = -*z;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sizes() {
        let scratch = PathScratch::new(252);
        assert_eq!(scratch.normals().len(), 252);
        assert_eq!(scratch.path().len(), 253);
    }

    #[test]
    fn test_ensure_capacity_grows_only() {
        let mut scratch = PathScratch::new(100);
        scratch.ensure_capacity(50);
        assert_eq!(scratch.num_steps(), 100);

        scratch.ensure_capacity(500);
        assert_eq!(scratch.num_steps(), 500);
        assert_eq!(scratch.path().len(), 501);
    }

    #[test]
    fn test_negate_normals() {
        let mut scratch = PathScratch::new(3);
        scratch.normals_mut().copy_from_slice(&[1.0, -2.0, 0.5]);
        scratch.negate_normals();
        assert_eq!(scratch.normals(), &[-1.0, 2.0, -0.5]);
    }
}
