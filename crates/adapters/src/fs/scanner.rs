use std::path::Path;

use facematch_application::{ApplicationError, ImageScanSummary, ImageScanner, ScannedImage};
use facematch_domain::{detect_image_kind, ImageKind};
use walkdir::WalkDir;

/// Lists the images directly inside a folder, sorted by file name.
#[derive(Debug, Default)]
pub struct WalkdirImageScanner;

impl ImageScanner for WalkdirImageScanner {
    fn scan_supported(&self, folder: &str) -> Result<ImageScanSummary, ApplicationError> {
        let folder_path = Path::new(folder);
        if !folder_path.is_dir() {
            return Err(ApplicationError::Validation(format!(
                "folder does not exist or is not a directory: {folder}"
            )));
        }

        let mut summary = ImageScanSummary::default();

        let entries = WalkDir::new(folder_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();
        for entry in entries.into_iter().filter_map(Result::ok) {
            if !entry.file_type().is_file() {
                continue;
            }

            summary.scanned_files += 1;
            let kind = detect_image_kind(entry.path());
            if kind == ImageKind::Unsupported {
                continue;
            }

            summary.supported_files += 1;
            summary.files.push(ScannedImage {
                path: entry.path().to_path_buf(),
                file_name: entry.file_name().to_string_lossy().to_string(),
                kind,
            });
        }

        Ok(summary)
    }
}
