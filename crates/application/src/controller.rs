use facematch_domain::{FaceId, ImageUpload, PageRequest, TopK};
use log::{debug, info, warn};

use crate::render::{
    render_alert, render_batch_added, render_detection, render_face_detail, render_history,
    render_roster, render_search_results, AlertKind,
};
use crate::{
    data_url, ApplicationError, Container, ContainerId, DateStyle, FaceApi, Field, FormId,
    ImageInput, Page, PageEvent, StatSlot,
};

pub const NO_IMAGE_SELECTED: &str = "Please select an image";
pub const NO_NAME: &str = "Please enter a name";
pub const NO_BATCH_NAMES: &str = "Please enter at least one name";
pub const INVALID_TOP_K: &str = "Top K must be a positive whole number";
pub const INVALID_FACE_ID: &str = "Please enter a valid face id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewSettings {
    pub default_top_k: TopK,
    pub faces_page: PageRequest,
    pub history_page: PageRequest,
    pub dates: DateStyle,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            default_top_k: TopK::default(),
            faces_page: PageRequest::new(0, 100),
            history_page: PageRequest::new(0, 50),
            dates: DateStyle::default(),
        }
    }
}

/// How a dispatched event ended.
#[derive(Debug)]
pub enum Outcome {
    Rendered,
    /// Input was invalid; nothing was sent.
    Rejected,
    /// The user declined a confirmation.
    Cancelled,
    /// Nothing to do, e.g. an emptied file input.
    Ignored,
    Failed(ApplicationError),
}

impl Outcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered)
    }
}

/// Routes page events to the server and paints the answers back.
///
/// Each handler runs validate, call, render and any dependent refresh in
/// that order. Nothing is shared between forms and nothing is retried.
pub struct ViewController<'a> {
    api: &'a dyn FaceApi,
    page: &'a dyn Page,
    settings: ViewSettings,
}

impl<'a> ViewController<'a> {
    pub fn new(api: &'a dyn FaceApi, page: &'a dyn Page, settings: ViewSettings) -> Self {
        Self {
            api,
            page,
            settings,
        }
    }

    pub fn dispatch(&self, event: PageEvent) -> Outcome {
        debug!("dispatching {event:?}");
        match event {
            PageEvent::Ready | PageEvent::StatsRequested => self.load_stats(),
            PageEvent::DetectSubmitted => self.submit_detect(),
            PageEvent::AddSubmitted => self.submit_add(),
            PageEvent::BatchAddSubmitted => self.submit_batch_add(),
            PageEvent::SearchSubmitted => self.submit_search(),
            PageEvent::FaceLookupSubmitted => self.submit_face_lookup(),
            PageEvent::ManageTabActivated => self.load_faces(),
            PageEvent::HistoryTabActivated => self.load_history(),
            PageEvent::DeleteRequested { face_id, name } => self.delete_face(face_id, &name),
            PageEvent::ImageSelected(input) => self.preview_image(input),
        }
    }

    pub fn load_stats(&self) -> Outcome {
        match self.api.get_stats() {
            Ok(stats) => {
                self.page.set_stat(StatSlot::TotalFaces, stats.total_faces);
                self.page
                    .set_stat(StatSlot::TotalSearches, stats.total_searches);
                Outcome::Rendered
            }
            Err(error) => {
                warn!("loading stats failed: {error}");
                Outcome::Failed(error)
            }
        }
    }

    fn submit_detect(&self) -> Outcome {
        let target = self.page.container(ContainerId::DetectResult);
        let image = match self.require_image(ImageInput::Detect, target) {
            Ok(image) => image,
            Err(outcome) => return outcome,
        };

        match self.api.detect_face(&image) {
            Ok(result) => {
                render_detection(target, &result);
                Outcome::Rendered
            }
            Err(error) => self.fail(target, error),
        }
    }

    fn submit_add(&self) -> Outcome {
        let target = self.page.container(ContainerId::AddResult);
        let image = match self.require_image(ImageInput::Add, target) {
            Ok(image) => image,
            Err(outcome) => return outcome,
        };
        let name = self.page.field_value(Field::PersonName);
        let name = name.trim();
        if name.is_empty() {
            return reject(target, NO_NAME);
        }
        let description = self.page.field_value(Field::PersonDescription);
        let description = Some(description.trim()).filter(|text| !text.is_empty());

        match self.api.add_face(&image, name, description) {
            Ok(result) => {
                info!("added face for {name}");
                render_alert(target, AlertKind::Success, &result.message);
                self.page.reset_form(FormId::Add);
                self.page.hide_preview(ImageInput::Add);
                self.load_stats();
                Outcome::Rendered
            }
            Err(error) => self.fail(target, error),
        }
    }

    fn submit_batch_add(&self) -> Outcome {
        let target = self.page.container(ContainerId::BatchResult);
        let image = match self.require_image(ImageInput::Batch, target) {
            Ok(image) => image,
            Err(outcome) => return outcome,
        };
        let names = split_names(&self.page.field_value(Field::BatchNames));
        if names.is_empty() {
            return reject(target, NO_BATCH_NAMES);
        }

        match self.api.batch_add_faces(&image, &names) {
            Ok(result) => {
                info!("batch added {} face(s)", result.num_added);
                render_batch_added(target, &result);
                self.page.reset_form(FormId::Batch);
                self.page.hide_preview(ImageInput::Batch);
                self.load_stats();
                Outcome::Rendered
            }
            Err(error) => self.fail(target, error),
        }
    }

    fn submit_search(&self) -> Outcome {
        let target = self.page.container(ContainerId::SearchResults);
        let image = match self.require_image(ImageInput::Search, target) {
            Ok(image) => image,
            Err(outcome) => return outcome,
        };
        let Some(top_k) = self.top_k() else {
            return reject(target, INVALID_TOP_K);
        };

        match self.api.search_face(&image, top_k) {
            Ok(result) => {
                render_search_results(target, &result);
                self.load_stats();
                Outcome::Rendered
            }
            Err(error) => self.fail(target, error),
        }
    }

    fn submit_face_lookup(&self) -> Outcome {
        let target = self.page.container(ContainerId::FaceDetail);
        let Some(face_id) = self
            .page
            .field_value(Field::FaceLookupId)
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(|value| FaceId::new(value).ok())
        else {
            return reject(target, INVALID_FACE_ID);
        };

        match self.api.get_face(face_id) {
            Ok(face) => {
                render_face_detail(target, &face, self.settings.dates);
                Outcome::Rendered
            }
            Err(error) => self.fail(target, error),
        }
    }

    fn load_faces(&self) -> Outcome {
        let target = self.page.container(ContainerId::FacesList);
        match self.api.list_faces(self.settings.faces_page) {
            Ok(faces) => {
                render_roster(target, &faces, self.settings.dates);
                Outcome::Rendered
            }
            Err(error) => self.fail(target, error),
        }
    }

    fn load_history(&self) -> Outcome {
        let target = self.page.container(ContainerId::HistoryList);
        match self.api.match_history(self.settings.history_page) {
            Ok(entries) => {
                render_history(target, &entries, self.settings.dates);
                Outcome::Rendered
            }
            Err(error) => self.fail(target, error),
        }
    }

    fn delete_face(&self, face_id: FaceId, name: &str) -> Outcome {
        if !self
            .page
            .confirm(&format!("Are you sure you want to delete {name}?"))
        {
            debug!("delete of face {face_id} declined");
            return Outcome::Cancelled;
        }

        match self.api.delete_face(face_id) {
            Ok(()) => {
                info!("deleted face {face_id}");
                self.load_faces();
                self.load_stats();
                Outcome::Rendered
            }
            Err(error) => {
                let message = match &error {
                    ApplicationError::Server { message, .. } => {
                        format!("Error deleting face: {message}")
                    }
                    other => other.inline_message(),
                };
                warn!("deleting face {face_id} failed: {error}");
                self.page.alert(&message);
                Outcome::Failed(error)
            }
        }
    }

    fn preview_image(&self, input: ImageInput) -> Outcome {
        match self.page.selected_image(input) {
            Ok(Some(image)) => {
                self.page.show_preview(input, &data_url(&image));
                Outcome::Rendered
            }
            Ok(None) => Outcome::Ignored,
            Err(error) => {
                warn!("reading {} failed: {error}", input.element_id());
                Outcome::Failed(error)
            }
        }
    }

    fn require_image(
        &self,
        input: ImageInput,
        target: &dyn Container,
    ) -> Result<ImageUpload, Outcome> {
        match self.page.selected_image(input) {
            Ok(Some(image)) => Ok(image),
            Ok(None) => Err(reject(target, NO_IMAGE_SELECTED)),
            Err(error) => Err(self.fail(target, error)),
        }
    }

    fn top_k(&self) -> Option<TopK> {
        let raw = self.page.field_value(Field::TopK);
        let raw = raw.trim();
        if raw.is_empty() {
            return Some(self.settings.default_top_k);
        }
        raw.parse::<i64>()
            .ok()
            .and_then(|value| TopK::new(value).ok())
    }

    fn fail(&self, target: &dyn Container, error: ApplicationError) -> Outcome {
        warn!("request failed: {error}");
        render_alert(target, AlertKind::Error, &error.inline_message());
        Outcome::Failed(error)
    }
}

pub fn split_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn reject(target: &dyn Container, message: &str) -> Outcome {
    render_alert(target, AlertKind::Error, message);
    Outcome::Rejected
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    use facematch_domain::{
        AddFaceResult, BatchAddResult, DetectionResult, FaceRecord, Match, MatchHistoryEntry,
        SearchResult, Stats,
    };

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Detect(String),
        Add {
            name: String,
            description: Option<String>,
        },
        BatchAdd(Vec<String>),
        Search(u32),
        ListFaces,
        GetFace(i64),
        Delete(i64),
        Stats,
        History,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Failure {
        Server,
        Transport,
    }

    #[derive(Default)]
    struct FakeApi {
        calls: RefCell<Vec<Call>>,
        failure: Cell<Option<Failure>>,
        matches: Vec<Match>,
        faces: Vec<FaceRecord>,
    }

    impl FakeApi {
        fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        fn record<T>(&self, call: Call, ok: impl FnOnce() -> T) -> Result<T, ApplicationError> {
            self.calls.borrow_mut().push(call);
            match self.failure.get() {
                Some(Failure::Server) => Err(ApplicationError::Server {
                    status: Some(404),
                    message: "Face not found".to_string(),
                }),
                Some(Failure::Transport) => Err(ApplicationError::Transport(
                    "connection refused".to_string(),
                )),
                None => Ok(ok()),
            }
        }
    }

    impl FaceApi for FakeApi {
        fn detect_face(&self, image: &ImageUpload) -> Result<DetectionResult, ApplicationError> {
            self.record(Call::Detect(image.file_name().to_string()), || {
                DetectionResult {
                    num_faces: 1,
                    message: "Detected 1 face(s)".to_string(),
                    detected_image: Some("uploads/x_detected.jpg".to_string()),
                    original_image: None,
                    warning: None,
                    face_locations: Vec::new(),
                    cropped_faces: Vec::new(),
                }
            })
        }

        fn add_face(
            &self,
            _image: &ImageUpload,
            name: &str,
            description: Option<&str>,
        ) -> Result<AddFaceResult, ApplicationError> {
            self.record(
                Call::Add {
                    name: name.to_string(),
                    description: description.map(str::to_string),
                },
                || AddFaceResult {
                    message: format!("Successfully added face for {name}"),
                    face: None,
                },
            )
        }

        fn batch_add_faces(
            &self,
            _image: &ImageUpload,
            names: &[String],
        ) -> Result<BatchAddResult, ApplicationError> {
            self.record(Call::BatchAdd(names.to_vec()), || BatchAddResult {
                num_added: names.len(),
                faces: names.to_vec(),
                message: format!("Successfully added {} face(s)", names.len()),
            })
        }

        fn search_face(
            &self,
            _image: &ImageUpload,
            top_k: TopK,
        ) -> Result<SearchResult, ApplicationError> {
            self.record(Call::Search(top_k.get()), || SearchResult {
                num_results: self.matches.len(),
                results: self.matches.clone(),
                query_image: None,
                message: None,
            })
        }

        fn list_faces(&self, _page: PageRequest) -> Result<Vec<FaceRecord>, ApplicationError> {
            self.record(Call::ListFaces, || self.faces.clone())
        }

        fn get_face(&self, face_id: FaceId) -> Result<FaceRecord, ApplicationError> {
            self.record(Call::GetFace(face_id.get()), || face(face_id.get(), "Found"))
        }

        fn delete_face(&self, face_id: FaceId) -> Result<(), ApplicationError> {
            self.record(Call::Delete(face_id.get()), || ())
        }

        fn get_stats(&self) -> Result<Stats, ApplicationError> {
            self.calls.borrow_mut().push(Call::Stats);
            Ok(Stats {
                total_faces: 12,
                total_searches: 34,
            })
        }

        fn match_history(
            &self,
            _page: PageRequest,
        ) -> Result<Vec<MatchHistoryEntry>, ApplicationError> {
            self.record(Call::History, Vec::new)
        }
    }

    #[derive(Default)]
    struct FakeContainer {
        markup: RefCell<Option<String>>,
    }

    impl Container for FakeContainer {
        fn replace(&self, markup: &str) {
            *self.markup.borrow_mut() = Some(markup.to_string());
        }
    }

    struct FakePage {
        containers: Vec<FakeContainer>,
        images: RefCell<HashMap<ImageInput, ImageUpload>>,
        fields: RefCell<HashMap<Field, String>>,
        stats: RefCell<HashMap<StatSlot, u64>>,
        previews: RefCell<HashMap<ImageInput, String>>,
        resets: RefCell<Vec<FormId>>,
        confirm_answer: Cell<bool>,
        prompts: RefCell<Vec<String>>,
        alerts: RefCell<Vec<String>>,
    }

    impl FakePage {
        fn new() -> Self {
            Self {
                containers: ContainerId::ALL
                    .iter()
                    .map(|_| FakeContainer::default())
                    .collect(),
                images: RefCell::default(),
                fields: RefCell::default(),
                stats: RefCell::default(),
                previews: RefCell::default(),
                resets: RefCell::default(),
                confirm_answer: Cell::new(false),
                prompts: RefCell::default(),
                alerts: RefCell::default(),
            }
        }

        fn with_image(self, input: ImageInput) -> Self {
            let image = ImageUpload::new("face.jpg", vec![0xFF, 0xD8, 0xFF]).expect("upload");
            self.images.borrow_mut().insert(input, image);
            self.previews
                .borrow_mut()
                .insert(input, "data:stale".to_string());
            self
        }

        fn with_field(self, field: Field, value: &str) -> Self {
            self.fields.borrow_mut().insert(field, value.to_string());
            self
        }

        fn markup(&self, id: ContainerId) -> Option<String> {
            self.slot(id).markup.borrow().clone()
        }

        fn untouched(&self) -> bool {
            self.containers
                .iter()
                .all(|container| container.markup.borrow().is_none())
                && self.stats.borrow().is_empty()
                && self.alerts.borrow().is_empty()
        }

        fn slot(&self, id: ContainerId) -> &FakeContainer {
            let index = ContainerId::ALL
                .iter()
                .position(|candidate| *candidate == id)
                .expect("known container");
            &self.containers[index]
        }
    }

    impl Page for FakePage {
        fn container(&self, id: ContainerId) -> &dyn Container {
            self.slot(id)
        }

        fn selected_image(
            &self,
            input: ImageInput,
        ) -> Result<Option<ImageUpload>, ApplicationError> {
            Ok(self.images.borrow().get(&input).cloned())
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
            self.resets.borrow_mut().push(form);
        }

        fn confirm(&self, prompt: &str) -> bool {
            self.prompts.borrow_mut().push(prompt.to_string());
            self.confirm_answer.get()
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }

    fn face(id: i64, name: &str) -> FaceRecord {
        FaceRecord {
            id: FaceId::new(id).expect("id"),
            name: name.to_string(),
            description: Some("Engineer".to_string()),
            image_path: format!("uploads/{id}.jpg"),
            created_at: Some("2026-02-17T14:05:09".to_string()),
            updated_at: None,
        }
    }

    fn found(id: i64, name: &str, confidence: f64) -> Match {
        Match {
            face: face(id, name),
            confidence,
            distance: 1.0 - confidence / 100.0,
            is_match: confidence >= 50.0,
        }
    }

    fn controller<'a>(api: &'a FakeApi, page: &'a FakePage) -> ViewController<'a> {
        ViewController::new(api, page, ViewSettings::default())
    }

    #[test]
    fn submits_without_image_never_reach_the_server() {
        let cases = [
            (PageEvent::DetectSubmitted, ContainerId::DetectResult),
            (PageEvent::AddSubmitted, ContainerId::AddResult),
            (PageEvent::BatchAddSubmitted, ContainerId::BatchResult),
            (PageEvent::SearchSubmitted, ContainerId::SearchResults),
        ];
        for (event, container) in cases {
            let api = FakeApi::default();
            let page = FakePage::new()
                .with_field(Field::PersonName, "Alice")
                .with_field(Field::BatchNames, "Alice, Bob");

            let outcome = controller(&api, &page).dispatch(event);

            assert!(matches!(outcome, Outcome::Rejected));
            assert!(api.calls().is_empty());
            let markup = page.markup(container).expect("validation message");
            assert!(markup.contains(NO_IMAGE_SELECTED));
            assert!(markup.contains("message-error"));
        }
    }

    #[test]
    fn detect_renders_annotated_image() {
        let api = FakeApi::default();
        let page = FakePage::new().with_image(ImageInput::Detect);

        let outcome = controller(&api, &page).dispatch(PageEvent::DetectSubmitted);

        assert!(outcome.is_rendered());
        assert_eq!(api.calls(), vec![Call::Detect("face.jpg".to_string())]);
        let markup = page.markup(ContainerId::DetectResult).expect("markup");
        assert!(markup.contains("/uploads/x_detected.jpg"));
    }

    #[test]
    fn add_refreshes_stats_once_and_resets_form() {
        let api = FakeApi::default();
        let page = FakePage::new()
            .with_image(ImageInput::Add)
            .with_field(Field::PersonName, "  Alice ")
            .with_field(Field::PersonDescription, "   ");

        let outcome = controller(&api, &page).dispatch(PageEvent::AddSubmitted);

        assert!(outcome.is_rendered());
        assert_eq!(
            api.calls(),
            vec![
                Call::Add {
                    name: "Alice".to_string(),
                    description: None,
                },
                Call::Stats,
            ]
        );
        let markup = page.markup(ContainerId::AddResult).expect("markup");
        assert!(markup.contains("message-success"));
        assert!(markup.contains("Successfully added face for Alice"));
        assert_eq!(*page.resets.borrow(), vec![FormId::Add]);
        assert!(!page.previews.borrow().contains_key(&ImageInput::Add));
        assert_eq!(page.stats.borrow().get(&StatSlot::TotalFaces), Some(&12));
    }

    #[test]
    fn add_requires_a_name() {
        let api = FakeApi::default();
        let page = FakePage::new().with_image(ImageInput::Add);

        let outcome = controller(&api, &page).dispatch(PageEvent::AddSubmitted);

        assert!(matches!(outcome, Outcome::Rejected));
        assert!(api.calls().is_empty());
        assert!(page
            .markup(ContainerId::AddResult)
            .expect("markup")
            .contains(NO_NAME));
    }

    #[test]
    fn search_renders_cards_in_order_then_refreshes_stats_once() {
        let api = FakeApi {
            matches: vec![
                found(2, "Bob", 88.0),
                found(1, "Alice", 61.25),
                found(3, "Carol", 12.5),
            ],
            ..FakeApi::default()
        };
        let page = FakePage::new()
            .with_image(ImageInput::Search)
            .with_field(Field::TopK, "3");

        let outcome = controller(&api, &page).dispatch(PageEvent::SearchSubmitted);

        assert!(outcome.is_rendered());
        assert_eq!(api.calls(), vec![Call::Search(3), Call::Stats]);
        let markup = page.markup(ContainerId::SearchResults).expect("markup");
        assert_eq!(markup.matches(r#"class="result-card"#).count(), 3);
        assert!(markup.find("Bob").expect("bob") < markup.find("Alice").expect("alice"));
        assert!(markup.find("Alice").expect("alice") < markup.find("Carol").expect("carol"));
    }

    #[test]
    fn search_uses_default_top_k_and_rejects_bad_values() {
        let api = FakeApi::default();
        let page = FakePage::new().with_image(ImageInput::Search);
        controller(&api, &page).dispatch(PageEvent::SearchSubmitted);
        assert_eq!(api.calls()[0], Call::Search(5));

        let api = FakeApi::default();
        let page = FakePage::new()
            .with_image(ImageInput::Search)
            .with_field(Field::TopK, "0");
        let outcome = controller(&api, &page).dispatch(PageEvent::SearchSubmitted);
        assert!(matches!(outcome, Outcome::Rejected));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn server_failure_shows_detail_without_stats_refresh() {
        let api = FakeApi::default();
        api.failure.set(Some(Failure::Server));
        let page = FakePage::new().with_image(ImageInput::Search);

        let outcome = controller(&api, &page).dispatch(PageEvent::SearchSubmitted);

        assert!(matches!(
            outcome,
            Outcome::Failed(ApplicationError::Server { .. })
        ));
        assert_eq!(api.calls(), vec![Call::Search(5)]);
        let markup = page.markup(ContainerId::SearchResults).expect("markup");
        assert!(markup.contains("Face not found"));
        assert!(!markup.contains("Error: "));
    }

    #[test]
    fn transport_failure_shows_raw_error_text() {
        let api = FakeApi::default();
        api.failure.set(Some(Failure::Transport));
        let page = FakePage::new().with_image(ImageInput::Detect);

        controller(&api, &page).dispatch(PageEvent::DetectSubmitted);

        let markup = page.markup(ContainerId::DetectResult).expect("markup");
        assert!(markup.contains("Error: connection refused"));
    }

    #[test]
    fn declined_delete_makes_no_calls_and_changes_nothing() {
        let api = FakeApi::default();
        let page = FakePage::new();

        let outcome = controller(&api, &page).dispatch(PageEvent::DeleteRequested {
            face_id: FaceId::new(4).expect("id"),
            name: "Dana".to_string(),
        });

        assert!(matches!(outcome, Outcome::Cancelled));
        assert!(api.calls().is_empty());
        assert!(page.untouched());
        assert_eq!(
            *page.prompts.borrow(),
            vec!["Are you sure you want to delete Dana?".to_string()]
        );
    }

    #[test]
    fn confirmed_delete_refreshes_roster_and_stats() {
        let api = FakeApi {
            faces: vec![face(1, "Alice")],
            ..FakeApi::default()
        };
        let page = FakePage::new();
        page.confirm_answer.set(true);

        let outcome = controller(&api, &page).dispatch(PageEvent::DeleteRequested {
            face_id: FaceId::new(4).expect("id"),
            name: "Dana".to_string(),
        });

        assert!(outcome.is_rendered());
        assert_eq!(
            api.calls(),
            vec![Call::Delete(4), Call::ListFaces, Call::Stats]
        );
        assert!(page
            .markup(ContainerId::FacesList)
            .expect("roster")
            .contains("Alice"));
    }

    #[test]
    fn failed_delete_raises_blocking_alert() {
        let api = FakeApi::default();
        api.failure.set(Some(Failure::Server));
        let page = FakePage::new();
        page.confirm_answer.set(true);

        controller(&api, &page).dispatch(PageEvent::DeleteRequested {
            face_id: FaceId::new(4).expect("id"),
            name: "Dana".to_string(),
        });

        assert_eq!(
            *page.alerts.borrow(),
            vec!["Error deleting face: Face not found".to_string()]
        );
        assert_eq!(api.calls(), vec![Call::Delete(4)]);
    }

    #[test]
    fn unreachable_server_on_delete_alerts_with_generic_prefix() {
        let api = FakeApi::default();
        api.failure.set(Some(Failure::Transport));
        let page = FakePage::new();
        page.confirm_answer.set(true);

        let outcome = controller(&api, &page).dispatch(PageEvent::DeleteRequested {
            face_id: FaceId::new(4).expect("id"),
            name: "Dana".to_string(),
        });

        assert!(matches!(
            outcome,
            Outcome::Failed(ApplicationError::Transport(_))
        ));
        assert_eq!(
            *page.alerts.borrow(),
            vec!["Error: connection refused".to_string()]
        );
        assert_eq!(api.calls(), vec![Call::Delete(4)]);
    }

    #[test]
    fn ready_loads_stats_into_slots() {
        let api = FakeApi::default();
        let page = FakePage::new();

        controller(&api, &page).dispatch(PageEvent::Ready);

        assert_eq!(api.calls(), vec![Call::Stats]);
        assert_eq!(page.stats.borrow().get(&StatSlot::TotalSearches), Some(&34));
    }

    #[test]
    fn image_selection_updates_preview() {
        let api = FakeApi::default();
        let page = FakePage::new().with_image(ImageInput::Detect);

        let outcome = controller(&api, &page).dispatch(PageEvent::ImageSelected(ImageInput::Detect));

        assert!(outcome.is_rendered());
        assert_eq!(
            page.previews.borrow().get(&ImageInput::Detect).map(String::as_str),
            Some("data:image/jpeg;base64,/9j/")
        );

        let outcome = controller(&api, &page).dispatch(PageEvent::ImageSelected(ImageInput::Search));
        assert!(matches!(outcome, Outcome::Ignored));
        assert!(api.calls().is_empty());
    }

    #[test]
    fn batch_add_sends_trimmed_names() {
        let api = FakeApi::default();
        let page = FakePage::new()
            .with_image(ImageInput::Batch)
            .with_field(Field::BatchNames, " John, Jane ,, Bob");

        controller(&api, &page).dispatch(PageEvent::BatchAddSubmitted);

        assert_eq!(
            api.calls(),
            vec![
                Call::BatchAdd(vec![
                    "John".to_string(),
                    "Jane".to_string(),
                    "Bob".to_string()
                ]),
                Call::Stats,
            ]
        );
        assert!(page
            .markup(ContainerId::BatchResult)
            .expect("markup")
            .contains("Successfully added 3 face(s)"));
    }

    #[test]
    fn face_lookup_validates_id() {
        let api = FakeApi::default();
        let page = FakePage::new().with_field(Field::FaceLookupId, "abc");
        let outcome = controller(&api, &page).dispatch(PageEvent::FaceLookupSubmitted);
        assert!(matches!(outcome, Outcome::Rejected));
        assert!(api.calls().is_empty());

        let page = FakePage::new().with_field(Field::FaceLookupId, "7");
        controller(&api, &page).dispatch(PageEvent::FaceLookupSubmitted);
        assert_eq!(api.calls(), vec![Call::GetFace(7)]);
        assert!(page
            .markup(ContainerId::FaceDetail)
            .expect("markup")
            .contains("Found"));
    }

    #[test]
    fn manage_tab_renders_roster_and_history_tab_renders_history() {
        let api = FakeApi::default();
        let page = FakePage::new();
        let view = controller(&api, &page);

        view.dispatch(PageEvent::ManageTabActivated);
        view.dispatch(PageEvent::HistoryTabActivated);

        assert_eq!(api.calls(), vec![Call::ListFaces, Call::History]);
        assert!(page
            .markup(ContainerId::FacesList)
            .expect("roster")
            .contains("No faces in database yet"));
        assert!(page
            .markup(ContainerId::HistoryList)
            .expect("history")
            .contains("No searches yet"));
    }
}
