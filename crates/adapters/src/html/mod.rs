use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use facematch_application::{
    escape_html, ApplicationError, Container, ContainerId, Field, FormId, ImageInput, ImageReader,
    Page, StatSlot,
};
use facematch_domain::ImageUpload;
use log::debug;

#[derive(Debug, Default)]
pub struct HtmlContainer {
    markup: RefCell<String>,
}

impl HtmlContainer {
    pub fn markup(&self) -> String {
        self.markup.borrow().clone()
    }
}

impl Container for HtmlContainer {
    fn replace(&self, markup: &str) {
        *self.markup.borrow_mut() = markup.to_string();
    }
}

type Confirmer = Box<dyn Fn(&str) -> bool>;

/// In-memory page: inputs are set by the caller, results are kept as markup
/// and can be written out as one HTML document.
pub struct HtmlPage {
    title: String,
    reader: Box<dyn ImageReader>,
    containers: Vec<HtmlContainer>,
    files: RefCell<BTreeMap<ImageInput, PathBuf>>,
    fields: RefCell<BTreeMap<Field, String>>,
    stats: RefCell<BTreeMap<StatSlot, u64>>,
    previews: RefCell<BTreeMap<ImageInput, String>>,
    alerts: RefCell<Vec<String>>,
    confirmer: Confirmer,
}

impl HtmlPage {
    pub fn new(title: impl Into<String>, reader: Box<dyn ImageReader>) -> Self {
        Self {
            title: title.into(),
            reader,
            containers: ContainerId::ALL
                .iter()
                .map(|_| HtmlContainer::default())
                .collect(),
            files: RefCell::default(),
            fields: RefCell::default(),
            stats: RefCell::default(),
            previews: RefCell::default(),
            alerts: RefCell::default(),
            confirmer: Box::new(|_| false),
        }
    }

    /// Answers confirmation prompts. Without one every prompt is declined.
    pub fn with_confirmer(mut self, confirmer: impl Fn(&str) -> bool + 'static) -> Self {
        self.confirmer = Box::new(confirmer);
        self
    }

    pub fn select_file(&self, input: ImageInput, path: impl AsRef<Path>) {
        self.files
            .borrow_mut()
            .insert(input, path.as_ref().to_path_buf());
    }

    pub fn set_field(&self, field: Field, value: impl Into<String>) {
        self.fields.borrow_mut().insert(field, value.into());
    }

    pub fn content(&self, id: ContainerId) -> String {
        self.slot(id).markup()
    }

    pub fn stat(&self, slot: StatSlot) -> Option<u64> {
        self.stats.borrow().get(&slot).copied()
    }

    pub fn preview(&self, input: ImageInput) -> Option<String> {
        self.previews.borrow().get(&input).cloned()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    pub fn render_document(&self) -> String {
        let mut html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{}</title>
</head>
<body>
<section class="stats">
"#,
            escape_html(&self.title)
        );

        for slot in [StatSlot::TotalFaces, StatSlot::TotalSearches] {
            let value = self
                .stat(slot)
                .map(|value| value.to_string())
                .unwrap_or_else(|| "-".to_string());
            html.push_str(&format!(
                "<span id=\"{}\">{value}</span>\n",
                slot.element_id()
            ));
        }
        html.push_str("</section>\n");

        for input in ImageInput::ALL {
            match self.preview(input) {
                Some(src) => html.push_str(&format!(
                    "<img id=\"{}\" class=\"img-preview\" src=\"{}\">\n",
                    input.preview_id(),
                    escape_html(&src)
                )),
                None => html.push_str(&format!(
                    "<img id=\"{}\" class=\"img-preview\" style=\"display: none\">\n",
                    input.preview_id()
                )),
            }
        }

        for (id, container) in ContainerId::ALL.iter().zip(&self.containers) {
            html.push_str(&format!(
                "<div id=\"{}\">\n{}</div>\n",
                id.element_id(),
                container.markup()
            ));
        }

        for alert in self.alerts.borrow().iter() {
            html.push_str(&format!(
                "<div class=\"page-alert\" role=\"alert\">{}</div>\n",
                escape_html(alert)
            ));
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn slot(&self, id: ContainerId) -> &HtmlContainer {
        let index = ContainerId::ALL
            .iter()
            .position(|candidate| *candidate == id)
            .unwrap_or_default();
        &self.containers[index]
    }
}

impl Page for HtmlPage {
    fn container(&self, id: ContainerId) -> &dyn Container {
        self.slot(id)
    }

    fn selected_image(&self, input: ImageInput) -> Result<Option<ImageUpload>, ApplicationError> {
        let Some(path) = self.files.borrow().get(&input).cloned() else {
            return Ok(None);
        };
        self.reader.read_upload(&path).map(Some)
    }

    fn field_value(&self, field: Field) -> String {
        self.fields
            .borrow()
            .get(&field)
            .cloned()
            .unwrap_or_default()
    }

    fn set_stat(&self, slot: StatSlot, value: u64) {
        self.stats.borrow_mut().insert(slot, value);
    }

    fn show_preview(&self, input: ImageInput, data_url: &str) {
        self.previews
            .borrow_mut()
            .insert(input, data_url.to_string());
    }

    fn hide_preview(&self, input: ImageInput) {
        self.previews.borrow_mut().remove(&input);
    }

    fn reset_form(&self, form: FormId) {
        debug!("resetting {}", form.element_id());
        let mut fields = self.fields.borrow_mut();
        for field in form.fields() {
            fields.remove(field);
        }
        if let Some(input) = form.image_input() {
            self.files.borrow_mut().remove(&input);
        }
    }

    fn confirm(&self, prompt: &str) -> bool {
        (self.confirmer)(prompt)
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}
