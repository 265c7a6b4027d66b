use serde::{Deserialize, Serialize};

use crate::FaceId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total_faces: u64,
    pub total_searches: u64,
}

/// A past search as recorded by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchHistoryEntry {
    pub id: i64,
    pub query_image_path: String,
    #[serde(default)]
    pub matched_face_id: Option<FaceId>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
}
