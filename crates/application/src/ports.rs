use std::path::{Path, PathBuf};
use std::time::Duration;

use facematch_domain::{
    AddFaceResult, BatchAddResult, DetectionResult, FaceId, FaceRecord, ImageKind, ImageUpload,
    MatchHistoryEntry, PageRequest, SearchResult, Stats, TopK,
};

use crate::ApplicationError;

/// The face-recognition server's HTTP contract.
pub trait FaceApi {
    fn detect_face(&self, image: &ImageUpload) -> Result<DetectionResult, ApplicationError>;

    fn add_face(
        &self,
        image: &ImageUpload,
        name: &str,
        description: Option<&str>,
    ) -> Result<AddFaceResult, ApplicationError>;

    fn batch_add_faces(
        &self,
        image: &ImageUpload,
        names: &[String],
    ) -> Result<BatchAddResult, ApplicationError>;

    fn search_face(
        &self,
        image: &ImageUpload,
        top_k: TopK,
    ) -> Result<SearchResult, ApplicationError>;

    fn list_faces(&self, page: PageRequest) -> Result<Vec<FaceRecord>, ApplicationError>;

    fn get_face(&self, face_id: FaceId) -> Result<FaceRecord, ApplicationError>;

    fn delete_face(&self, face_id: FaceId) -> Result<(), ApplicationError>;

    fn get_stats(&self) -> Result<Stats, ApplicationError>;

    fn match_history(&self, page: PageRequest)
        -> Result<Vec<MatchHistoryEntry>, ApplicationError>;
}

/// A region of the page whose markup is replaced wholesale.
pub trait Container {
    fn replace(&self, markup: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContainerId {
    DetectResult,
    AddResult,
    BatchResult,
    SearchResults,
    FacesList,
    FaceDetail,
    HistoryList,
}

impl ContainerId {
    pub const ALL: [ContainerId; 7] = [
        Self::DetectResult,
        Self::AddResult,
        Self::BatchResult,
        Self::SearchResults,
        Self::FacesList,
        Self::FaceDetail,
        Self::HistoryList,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            Self::DetectResult => "detectResult",
            Self::AddResult => "addResult",
            Self::BatchResult => "batchResult",
            Self::SearchResults => "searchResults",
            Self::FacesList => "facesList",
            Self::FaceDetail => "faceDetail",
            Self::HistoryList => "historyList",
        }
    }
}

/// File inputs, each paired with a preview image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImageInput {
    Detect,
    Add,
    Batch,
    Search,
}

impl ImageInput {
    pub const ALL: [ImageInput; 4] = [Self::Detect, Self::Add, Self::Batch, Self::Search];

    pub fn element_id(self) -> &'static str {
        match self {
            Self::Detect => "detectImage",
            Self::Add => "addImage",
            Self::Batch => "batchImage",
            Self::Search => "searchImage",
        }
    }

    pub fn preview_id(self) -> &'static str {
        match self {
            Self::Detect => "detectPreview",
            Self::Add => "addPreview",
            Self::Batch => "batchPreview",
            Self::Search => "searchPreview",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    PersonName,
    PersonDescription,
    BatchNames,
    TopK,
    FaceLookupId,
}

impl Field {
    pub fn element_id(self) -> &'static str {
        match self {
            Self::PersonName => "personName",
            Self::PersonDescription => "personDescription",
            Self::BatchNames => "batchNames",
            Self::TopK => "topK",
            Self::FaceLookupId => "faceLookupId",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatSlot {
    TotalFaces,
    TotalSearches,
}

impl StatSlot {
    pub fn element_id(self) -> &'static str {
        match self {
            Self::TotalFaces => "totalFaces",
            Self::TotalSearches => "totalSearches",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormId {
    Detect,
    Add,
    Batch,
    Search,
    FaceLookup,
}

impl FormId {
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Detect => "detectForm",
            Self::Add => "addForm",
            Self::Batch => "batchForm",
            Self::Search => "searchForm",
            Self::FaceLookup => "faceLookupForm",
        }
    }

    pub fn fields(self) -> &'static [Field] {
        match self {
            Self::Detect => &[],
            Self::Add => &[Field::PersonName, Field::PersonDescription],
            Self::Batch => &[Field::BatchNames],
            Self::Search => &[Field::TopK],
            Self::FaceLookup => &[Field::FaceLookupId],
        }
    }

    pub fn image_input(self) -> Option<ImageInput> {
        match self {
            Self::Detect => Some(ImageInput::Detect),
            Self::Add => Some(ImageInput::Add),
            Self::Batch => Some(ImageInput::Batch),
            Self::Search => Some(ImageInput::Search),
            Self::FaceLookup => None,
        }
    }
}

/// Everything the view controller may read from or write to the page.
pub trait Page {
    fn container(&self, id: ContainerId) -> &dyn Container;

    fn selected_image(&self, input: ImageInput) -> Result<Option<ImageUpload>, ApplicationError>;

    fn field_value(&self, field: Field) -> String;

    fn set_stat(&self, slot: StatSlot, value: u64);

    fn show_preview(&self, input: ImageInput, data_url: &str);

    fn hide_preview(&self, input: ImageInput);

    fn reset_form(&self, form: FormId);

    /// Blocking yes/no question.
    fn confirm(&self, prompt: &str) -> bool;

    /// Blocking page-level notice.
    fn alert(&self, message: &str);
}

#[derive(Debug, Clone)]
pub struct ScannedImage {
    pub path: PathBuf,
    pub file_name: String,
    pub kind: ImageKind,
}

#[derive(Debug, Clone, Default)]
pub struct ImageScanSummary {
    pub scanned_files: usize,
    pub supported_files: usize,
    pub files: Vec<ScannedImage>,
}

pub trait ImageScanner {
    fn scan_supported(&self, folder: &str) -> Result<ImageScanSummary, ApplicationError>;
}

pub trait ImageReader {
    fn read_upload(&self, path: &Path) -> Result<ImageUpload, ApplicationError>;
}

pub trait Pacer {
    fn pause(&self, duration: Duration);
}
