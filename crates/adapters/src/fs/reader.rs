use std::fs;
use std::path::Path;

use facematch_application::{ApplicationError, ImageReader};
use facematch_domain::{ImageKind, ImageUpload};
use image::ImageFormat;

/// Reads an image file into an upload, trusting the bytes over the extension.
/// Unrecognised content is sent as `application/octet-stream` and left for the
/// server to accept or refuse.
#[derive(Debug, Default)]
pub struct FsImageReader;

impl ImageReader for FsImageReader {
    fn read_upload(&self, path: &Path) -> Result<ImageUpload, ApplicationError> {
        let bytes = fs::read(path)
            .map_err(|error| ApplicationError::Io(format!("{}: {error}", path.display())))?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        let upload = ImageUpload::new(file_name, bytes)?;
        let sniffed = match image::guess_format(upload.bytes()) {
            Ok(ImageFormat::Jpeg) => ImageKind::Jpeg,
            Ok(ImageFormat::Png) => ImageKind::Png,
            Ok(ImageFormat::Bmp) => ImageKind::Bmp,
            _ => upload.kind(),
        };
        Ok(upload.with_kind(sniffed))
    }
}
