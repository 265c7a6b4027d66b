use std::fmt::{Debug, Formatter};
use std::path::Path;

use crate::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Jpeg,
    Png,
    Bmp,
    Unsupported,
}

impl ImageKind {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Bmp => "image/bmp",
            Self::Unsupported => "application/octet-stream",
        }
    }
}

pub fn detect_image_kind(path: &Path) -> ImageKind {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return ImageKind::Unsupported;
    };

    match ext.to_ascii_lowercase().as_str() {
        "jpg" | "jpeg" => ImageKind::Jpeg,
        "png" => ImageKind::Png,
        "bmp" => ImageKind::Bmp,
        _ => ImageKind::Unsupported,
    }
}

/// An image chosen by the user, ready to be posted as the `file` field.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageUpload {
    file_name: String,
    kind: ImageKind,
    bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, DomainError> {
        let file_name = file_name.into();
        if bytes.is_empty() {
            return Err(DomainError::EmptyImage(file_name));
        }
        let kind = detect_image_kind(Path::new(&file_name));
        Ok(Self {
            file_name,
            kind,
            bytes,
        })
    }

    /// Overrides the extension-derived kind, e.g. after sniffing the bytes.
    pub fn with_kind(mut self, kind: ImageKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn kind(&self) -> ImageKind {
        self.kind
    }

    pub fn content_type(&self) -> &'static str {
        self.kind.mime_type()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Debug for ImageUpload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("kind", &self.kind)
            .field("len", &self.bytes.len())
            .finish()
    }
}
