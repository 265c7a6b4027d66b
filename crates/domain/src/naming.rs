//! Naming rules for folder uploads, where people are named after their files.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

pub const UNKNOWN_PERSON: &str = "Unknown Person";

static TRAILING_COUNTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[_\-]\d+$").expect("valid trailing counter pattern"));
static TRAILING_UNDERSCORE_COUNTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_\d+$").expect("valid trailing counter pattern"));
static CAMERA_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(IMG|DSC|PIC|PHOTO|IMAGE)[_\-]?\d*[_\-]?").expect("valid prefix pattern")
});

/// Derives a display name such as `Tran Thi B` from `IMG_001_tran_thi_b.png`.
pub fn person_name_from_file_name(file_name: &str) -> String {
    let stem = Path::new(file_name)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default();

    let stem = TRAILING_COUNTER.replace(stem, "");
    let stem = TRAILING_UNDERSCORE_COUNTER.replace(&stem, "");
    let stem = CAMERA_PREFIX.replace(&stem, "");

    let name = stem
        .replace(['_', '-'], " ")
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if name.is_empty() {
        UNKNOWN_PERSON.to_string()
    } else {
        name
    }
}

/// Description attached to the `index`-th of `total` uploaded files.
pub fn batch_description(file_name: &str, index: usize, total: usize) -> String {
    let name = person_name_from_file_name(file_name);
    if name != UNKNOWN_PERSON {
        return format!("{name} - Auto imported from {file_name}");
    }

    match index % 4 {
        0 => format!("Person #{} of {total}", index + 1),
        1 => "Face image imported from batch upload".to_string(),
        2 => "Auto-imported face data".to_string(),
        _ => format!("Batch upload - Image {}/{total}", index + 1),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
