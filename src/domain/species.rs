// ============================================================
// Layer 3 — Species
// ============================================================
// The label vocabulary is fixed and its order defines the
// integer class codes the network is trained against:
//
//   Setosa     → 0
//   Versicolor → 1
//   Virginica  → 2
//
// Changing this order silently invalidates every checkpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Setosa,
    Versicolor,
    Virginica,
}

impl Species {
    /// Number of classes, i.e. the required output width of the model
    pub const COUNT: usize = 3;

    /// All species in class-code order
    pub const ALL: [Species; Self::COUNT] =
        [Species::Setosa, Species::Versicolor, Species::Virginica];

    /// Integer class code used as the training target
    pub fn index(self) -> usize {
        match self {
            Species::Setosa     => 0,
            Species::Versicolor => 1,
            Species::Virginica  => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Map a dataset label to a species. Matching is exact.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Setosa"     => Some(Species::Setosa),
            "Versicolor" => Some(Species::Versicolor),
            "Virginica"  => Some(Species::Virginica),
            _            => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Species::Setosa     => "Setosa",
            Species::Versicolor => "Versicolor",
            Species::Virginica  => "Virginica",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
