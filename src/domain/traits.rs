// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer only ever asks for "all samples" and
// never knows whether they came from a CSV file, an in-memory
// fixture or anything else.

use crate::domain::sample::Sample;
use crate::error::Result;

// ─── SampleSource ─────────────────────────────────────────────────────────────
/// Any component that can produce labelled samples.
///
/// Implementations:
///   - CsvSampleLoader → delimiter-separated file with a header row
pub trait SampleSource {
    /// Load every sample. A single malformed row fails the whole
    /// load; implementations never return a partial dataset.
    fn load_all(&self) -> Result<Vec<Sample>>;
}
