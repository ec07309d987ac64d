// ============================================================
// Layer 3 — Sample Domain Type
// ============================================================
// One labelled row of the iris table:
//   sepal length, sepal width, petal length, petal width + species
//
// Features are stored as a fixed-size array so a sample with the
// wrong number of measurements cannot be constructed at all.

use serde::{Deserialize, Serialize};

use crate::domain::species::Species;

/// Number of numeric measurements per sample, i.e. the required
/// input width of the model
pub const FEATURE_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub features: [f32; FEATURE_COUNT],
    pub species:  Species,
}

impl Sample {
    pub fn new(features: [f32; FEATURE_COUNT], species: Species) -> Self {
        Self { features, species }
    }

    /// Integer class code of this sample's species
    pub fn label(&self) -> usize {
        self.species.index()
    }
}
