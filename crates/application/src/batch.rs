use facematch_domain::{batch_description, person_name_from_file_name};
use log::{info, warn};

use crate::{
    ApplicationError, BatchUploadReport, FaceApi, ImageReader, ImageScanner, Pacer,
    UploadFolderCommand,
};

/// Registers every image of a folder as a face, one `add_face` call each.
pub struct BatchUploadService {
    api: Box<dyn FaceApi>,
    scanner: Box<dyn ImageScanner>,
    reader: Box<dyn ImageReader>,
    pacer: Box<dyn Pacer>,
}

impl BatchUploadService {
    pub fn new(
        api: Box<dyn FaceApi>,
        scanner: Box<dyn ImageScanner>,
        reader: Box<dyn ImageReader>,
        pacer: Box<dyn Pacer>,
    ) -> Self {
        Self {
            api,
            scanner,
            reader,
            pacer,
        }
    }

    pub fn upload_folder(
        &self,
        command: UploadFolderCommand,
    ) -> Result<BatchUploadReport, ApplicationError> {
        if command.folder.trim().is_empty() {
            return Err(ApplicationError::Validation(
                "folder path must not be empty".to_string(),
            ));
        }

        let scan = self.scanner.scan_supported(&command.folder)?;
        let total = scan.files.len();
        let mut report = BatchUploadReport {
            scanned_files: scan.scanned_files,
            total,
            ..BatchUploadReport::default()
        };
        info!("uploading {total} image(s) from {}", command.folder);

        for (index, file) in scan.files.iter().enumerate() {
            if index > 0 && !command.pause.is_zero() {
                self.pacer.pause(command.pause);
            }

            let (name, description) = match command.mapping.get(&file.file_name) {
                Some(mapped) => (
                    mapped.name.clone(),
                    mapped
                        .description
                        .clone()
                        .unwrap_or_else(|| batch_description(&file.file_name, index, total)),
                ),
                None => (
                    person_name_from_file_name(&file.file_name),
                    batch_description(&file.file_name, index, total),
                ),
            };

            let uploaded = self
                .reader
                .read_upload(&file.path)
                .and_then(|image| self.api.add_face(&image, &name, Some(&description)));
            match uploaded {
                Ok(result) => {
                    info!("[{}/{total}] {}: {}", index + 1, file.file_name, result.message);
                    report.succeeded += 1;
                }
                Err(error) => {
                    warn!("[{}/{total}] {} failed: {error}", index + 1, file.file_name);
                    report.failures.push((file.file_name.clone(), error.to_string()));
                }
            }
        }

        Ok(report)
    }
}
