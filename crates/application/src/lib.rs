mod batch;
mod controller;
mod dates;
mod error;
mod events;
mod ports;
mod preview;
mod render;
mod use_cases;

pub use batch::BatchUploadService;
pub use controller::{
    split_names, Outcome, ViewController, ViewSettings, INVALID_FACE_ID, INVALID_TOP_K,
    NO_BATCH_NAMES, NO_IMAGE_SELECTED, NO_NAME,
};
pub use dates::{DateStyle, UNKNOWN_DATE};
pub use error::ApplicationError;
pub use events::{
    page_bindings, resolve_event, result_container, Binding, PageEvent, Trigger, HISTORY_TAB,
    MANAGE_TAB, STATS_BUTTON,
};
pub use ports::{
    Container, ContainerId, FaceApi, Field, FormId, ImageInput, ImageReader, ImageScanSummary,
    ImageScanner, Page, Pacer, ScannedImage, StatSlot,
};
pub use preview::data_url;
pub use render::{
    escape_html, render_alert, render_batch_added, render_detection, render_face_detail,
    render_history, render_roster, render_search_results, AlertKind,
};
pub use use_cases::{
    BatchUploadReport, MappedName, NameMapping, UploadFolderCommand, DEFAULT_UPLOAD_PAUSE,
};
