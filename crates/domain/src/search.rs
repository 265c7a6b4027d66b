use serde::{Deserialize, Serialize};

use crate::{DomainError, FaceRecord};

pub const DEFAULT_TOP_K: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopK(u32);

impl TopK {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value < 1 || value > i64::from(u32::MAX) {
            return Err(DomainError::InvalidTopK(value));
        }
        Ok(Self(value as u32))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for TopK {
    fn default() -> Self {
        Self(DEFAULT_TOP_K)
    }
}

/// One candidate returned by a similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub face: FaceRecord,
    /// Percentage; can fall below zero for distant candidates.
    pub confidence: f64,
    pub distance: f64,
    pub is_match: bool,
}

impl Match {
    /// Confidence bar width in percent. The server does not clamp confidence,
    /// so dissimilar candidates can score below zero.
    pub fn bar_width(&self) -> f64 {
        if self.confidence.is_nan() {
            return 0.0;
        }
        self.confidence.clamp(0.0, 100.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub num_results: usize,
    #[serde(default)]
    pub results: Vec<Match>,
    #[serde(default)]
    pub query_image: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
