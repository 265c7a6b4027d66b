pub mod fs;
pub mod html;
pub mod http;
pub mod presenters;

pub use fs::{FsImageReader, ThreadPacer, WalkdirImageScanner};
pub use html::{HtmlContainer, HtmlPage};
pub use http::HttpFaceApi;
pub use presenters::{present_stats, present_upload_report, present_written};
