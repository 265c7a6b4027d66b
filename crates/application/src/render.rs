//! Markup for each result container. Every function replaces the whole
//! content of the container it is handed.

use facematch_domain::{BatchAddResult, DetectionResult, FaceRecord, MatchHistoryEntry, SearchResult};

use crate::{Container, DateStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Error,
}

impl AlertKind {
    fn class(self) -> &'static str {
        match self {
            Self::Success => "message-success",
            Self::Error => "message-error",
        }
    }

    fn icon(self) -> &'static str {
        match self {
            Self::Success => "bi-check-circle-fill",
            Self::Error => "bi-exclamation-triangle-fill",
        }
    }
}

pub fn render_alert(target: &dyn Container, kind: AlertKind, message: &str) {
    target.replace(&alert_markup(kind, message));
}

pub fn render_detection(target: &dyn Container, result: &DetectionResult) {
    let mut html = format!(
        r#"<div class="detection-info fade-in">
    <h4><i class="bi bi-people-fill"></i> {}</h4>
    <p class="mb-0">{}</p>
</div>
"#,
        result.num_faces,
        escape_html(&result.message)
    );

    if let Some(warning) = result.warning.as_deref().filter(|text| !text.is_empty()) {
        html.push_str(&format!(
            r#"<div class="detection-warning"><i class="bi bi-exclamation-circle"></i> {}</div>
"#,
            escape_html(warning)
        ));
    }

    match result.annotated_image() {
        Some(path) => {
            html.push_str(&format!(
                r#"<div class="text-center">
    <img src="{}" class="img-preview fade-in" alt="Detected faces">
    <p class="mt-2 text-muted"><i class="bi bi-info-circle"></i> Faces detected: {}</p>
</div>
"#,
                image_src(path),
                result.num_faces
            ));
            if !result.cropped_faces.is_empty() {
                html.push_str(r#"<div class="cropped-faces">"#);
                for (index, crop) in result.cropped_faces.iter().enumerate() {
                    let size = result
                        .face_locations
                        .get(index)
                        .map(|location| {
                            format!(r#" title="{}x{} px""#, location.width(), location.height())
                        })
                        .unwrap_or_default();
                    html.push_str(&format!(
                        r#"<img src="{}" class="cropped-face" alt="Face {}"{size}>"#,
                        image_src(crop),
                        index + 1
                    ));
                }
                html.push_str("</div>\n");
            }
        }
        None => html.push_str(&empty_state(
            "bi-emoji-frown",
            "No faces detected in the image",
            None,
        )),
    }

    target.replace(&html);
}

pub fn render_search_results(target: &dyn Container, result: &SearchResult) {
    if result.num_results == 0 {
        target.replace(&empty_state(
            "bi-search",
            "No matching faces found in database",
            None,
        ));
        return;
    }

    let mut html = format!(
        r#"<div class="mb-3"><strong><i class="bi bi-info-circle"></i> Found {} matching face(s)</strong></div>
"#,
        result.num_results
    );

    for found in &result.results {
        let (badge_class, badge_text) = if found.is_match {
            ("match-true", "Match")
        } else {
            ("match-false", "No Match")
        };
        let name = escape_html(&found.face.name);
        html.push_str(&format!(
            r#"<div class="result-card fade-in">
    <div class="row align-items-center">
        <div class="col-md-3 text-center">
            <img src="{src}" class="result-image" alt="{name}">
        </div>
        <div class="col-md-9">
            <h5 class="mb-2">{name} <span class="match-badge {badge_class}">{badge_text}</span></h5>
            <p class="text-muted mb-2">{description}</p>
            <div class="mb-2">
                <strong>Confidence:</strong>
                <div class="confidence-bar mt-1">
                    <div class="confidence-fill" style="width: {width}%">{confidence:.2}%</div>
                </div>
            </div>
            <small class="text-muted"><i class="bi bi-rulers"></i> Distance: {distance:.4}</small>
        </div>
    </div>
</div>
"#,
            src = image_src(&found.face.image_path),
            description = escape_html(found.face.description_or_default()),
            width = found.bar_width(),
            confidence = found.confidence,
            distance = found.distance,
        ));
    }

    target.replace(&html);
}

pub fn render_roster(target: &dyn Container, faces: &[FaceRecord], dates: DateStyle) {
    if faces.is_empty() {
        target.replace(&empty_state(
            "bi-database-x",
            "No faces in database yet",
            Some(
                r#"<button class="btn btn-primary" data-activate="add-tab"><i class="bi bi-plus-circle"></i> Add First Face</button>"#,
            ),
        ));
        return;
    }

    let mut html = format!(
        r#"<div class="mb-3"><strong><i class="bi bi-people"></i> Total: {} face(s)</strong></div>
"#,
        faces.len()
    );
    for face in faces {
        html.push_str(&face_card(face, dates));
    }
    target.replace(&html);
}

pub fn render_face_detail(target: &dyn Container, face: &FaceRecord, dates: DateStyle) {
    target.replace(&face_card(face, dates));
}

pub fn render_batch_added(target: &dyn Container, result: &BatchAddResult) {
    let mut html = alert_markup(AlertKind::Success, &result.message);
    if !result.faces.is_empty() {
        html.push_str(r#"<ul class="batch-added">"#);
        for name in &result.faces {
            html.push_str(&format!("<li>{}</li>", escape_html(name)));
        }
        html.push_str("</ul>\n");
    }
    target.replace(&html);
}

pub fn render_history(target: &dyn Container, entries: &[MatchHistoryEntry], dates: DateStyle) {
    if entries.is_empty() {
        target.replace(&empty_state("bi-clock-history", "No searches yet", None));
        return;
    }

    let mut html = format!(
        r#"<div class="mb-3"><strong><i class="bi bi-clock-history"></i> Total: {} search(es)</strong></div>
"#,
        entries.len()
    );
    for entry in entries {
        let matched = entry
            .matched_face_id
            .map(|id| format!("Face #{id}"))
            .unwrap_or_else(|| "No match".to_string());
        let confidence = entry
            .confidence
            .map(|value| format!("{value:.2}%"))
            .unwrap_or_else(|| "-".to_string());
        let distance = entry
            .distance
            .map(|value| format!("{value:.4}"))
            .unwrap_or_else(|| "-".to_string());
        html.push_str(&format!(
            r#"<div class="history-row fade-in">
    <img src="{}" class="history-image" alt="Search #{}">
    <span class="history-match">{}</span>
    <span class="history-confidence">{}</span>
    <span class="history-distance">{}</span>
    <small class="text-muted"><i class="bi bi-calendar"></i> {}</small>
</div>
"#,
            image_src(&entry.query_image_path),
            entry.id,
            matched,
            confidence,
            distance,
            escape_html(&dates.format(entry.created_at.as_deref()))
        ));
    }
    target.replace(&html);
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn alert_markup(kind: AlertKind, message: &str) -> String {
    format!(
        r#"<div class="{} fade-in"><i class="bi {}"></i> {}</div>
"#,
        kind.class(),
        kind.icon(),
        escape_html(message)
    )
}

fn empty_state(icon: &str, message: &str, action: Option<&str>) -> String {
    format!(
        r#"<div class="empty-state">
    <i class="bi {icon}"></i>
    <p>{message}</p>{}
</div>
"#,
        action.unwrap_or_default()
    )
}

fn face_card(face: &FaceRecord, dates: DateStyle) -> String {
    let name = escape_html(&face.name);
    format!(
        r#"<div class="face-card fade-in">
    <img src="{src}" class="face-card-img" alt="{name}">
    <div class="face-card-info">
        <h6 class="mb-1">{name}</h6>
        <p class="text-muted mb-1 small">{description}</p>
        <small class="text-muted"><i class="bi bi-calendar"></i> {created}</small>
    </div>
    <div class="face-card-actions">
        <button class="btn btn-sm btn-danger" data-action="delete-face" data-face-id="{id}" data-face-name="{name}"><i class="bi bi-trash"></i> Delete</button>
    </div>
</div>
"#,
        src = image_src(&face.image_path),
        description = escape_html(face.description_or_default()),
        created = escape_html(&dates.format(face.created_at.as_deref())),
        id = face.id,
    )
}

fn image_src(path: &str) -> String {
    escape_html(&format!("/{}", path.trim_start_matches('/')))
}
