use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::DomainError;

const NO_DESCRIPTION: &str = "No description";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct FaceId(i64);

impl FaceId {
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if value <= 0 {
            return Err(DomainError::InvalidFaceId(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

impl TryFrom<i64> for FaceId {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FaceId> for i64 {
    fn from(value: FaceId) -> Self {
        value.0
    }
}

impl Display for FaceId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered person as the server reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceRecord {
    pub id: FaceId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub image_path: String,
    /// ISO-8601, with or without an offset.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl FaceRecord {
    pub fn description_or_default(&self) -> &str {
        match self.description.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => NO_DESCRIPTION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddFaceResult {
    pub message: String,
    #[serde(default)]
    pub face: Option<FaceRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchAddResult {
    pub num_added: usize,
    #[serde(default)]
    pub faces: Vec<String>,
    #[serde(default)]
    pub message: String,
}

/// Offset/limit window for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }
}
