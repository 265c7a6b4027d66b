mod detection;
mod error;
mod face;
mod naming;
mod search;
mod stats;
mod upload;

pub use detection::{DetectionResult, FaceLocation};
pub use error::DomainError;
pub use face::{AddFaceResult, BatchAddResult, FaceId, FaceRecord, PageRequest};
pub use naming::{batch_description, person_name_from_file_name, UNKNOWN_PERSON};
pub use search::{Match, SearchResult, TopK, DEFAULT_TOP_K};
pub use stats::{MatchHistoryEntry, Stats};
pub use upload::{detect_image_kind, ImageKind, ImageUpload};
