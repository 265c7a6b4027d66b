use serde::{Deserialize, Serialize};

/// Face bounding box in pixels, sent by the server as `[top, right, bottom, left]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[i64; 4]", into = "[i64; 4]")]
pub struct FaceLocation {
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
    pub left: i64,
}

impl FaceLocation {
    pub fn width(&self) -> i64 {
        (self.right - self.left).max(0)
    }

    pub fn height(&self) -> i64 {
        (self.bottom - self.top).max(0)
    }
}

impl From<[i64; 4]> for FaceLocation {
    fn from([top, right, bottom, left]: [i64; 4]) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}

impl From<FaceLocation> for [i64; 4] {
    fn from(value: FaceLocation) -> Self {
        [value.top, value.right, value.bottom, value.left]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    pub num_faces: u32,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub detected_image: Option<String>,
    #[serde(default)]
    pub original_image: Option<String>,
    #[serde(default)]
    pub warning: Option<String>,
    #[serde(default)]
    pub face_locations: Vec<FaceLocation>,
    #[serde(default)]
    pub cropped_faces: Vec<String>,
}

impl DetectionResult {
    /// The annotated image, only when at least one face was found.
    pub fn annotated_image(&self) -> Option<&str> {
        if self.num_faces == 0 {
            return None;
        }
        self.detected_image
            .as_deref()
            .filter(|path| !path.is_empty())
    }
}
