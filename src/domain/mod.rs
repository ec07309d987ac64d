// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust types describing the iris problem:
//   - the three species and their fixed integer codes
//   - a labelled sample (four measurements + species)
//   - the SampleSource abstraction loaders implement
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//
// Everything above (application) and below (data, ml, infra)
// speaks in these types.

// The fixed label vocabulary
pub mod species;

// One labelled measurement row
pub mod sample;

// Core abstractions (traits) that other layers implement
pub mod traits;
