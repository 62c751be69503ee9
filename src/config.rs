use crate::coeff::Segmentation;

/// All analysis parameters in one struct.
/// Passed explicitly into the pipeline; there is no ambient configuration.
#[derive(Debug, Clone)]
pub struct FourierConfig {
    /// Number of rotating vectors (coefficients) computed per subpath.
    pub coefficients: usize,

    /// How segments share the global parameter range: equally, or
    /// proportionally to their arc length (constant pen speed).
    pub segmentation: Segmentation,

    /// Sampling step for the cubic arc-length approximation.
    /// Smaller = more accurate segment weights, slower construction.
    pub dt: f64,
}

impl Default for FourierConfig {
    fn default() -> Self {
        Self {
            coefficients: 200,
            segmentation: Segmentation::ByDistance,
            dt: 0.01,
        }
    }
}
