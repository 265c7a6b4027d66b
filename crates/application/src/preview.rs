use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use facematch_domain::ImageUpload;

/// Inline `data:` URL for showing a chosen image before it is uploaded.
pub fn data_url(image: &ImageUpload) -> String {
    format!(
        "data:{};base64,{}",
        image.content_type(),
        STANDARD.encode(image.bytes())
    )
}
