use facematch_domain::FaceId;

use crate::{ContainerId, FormId, ImageInput};

pub const MANAGE_TAB: &str = "manage-tab";
pub const HISTORY_TAB: &str = "history-tab";
pub const STATS_BUTTON: &str = "statsBtn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    Ready,
    DetectSubmitted,
    AddSubmitted,
    BatchAddSubmitted,
    SearchSubmitted,
    FaceLookupSubmitted,
    ManageTabActivated,
    HistoryTabActivated,
    StatsRequested,
    DeleteRequested { face_id: FaceId, name: String },
    ImageSelected(ImageInput),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Submit,
    Change,
    Click,
}

/// Ties a page element and a trigger to the event it raises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub element: &'static str,
    pub trigger: Trigger,
    pub event: PageEvent,
}

impl Binding {
    fn new(element: &'static str, trigger: Trigger, event: PageEvent) -> Self {
        Self {
            element,
            trigger,
            event,
        }
    }
}

/// Handlers attached when the page becomes ready. Per-card delete actions
/// are bound by the roster markup itself (`data-action="delete-face"`).
pub fn page_bindings() -> Vec<Binding> {
    let mut bindings = vec![
        Binding::new(
            FormId::Detect.element_id(),
            Trigger::Submit,
            PageEvent::DetectSubmitted,
        ),
        Binding::new(
            FormId::Add.element_id(),
            Trigger::Submit,
            PageEvent::AddSubmitted,
        ),
        Binding::new(
            FormId::Batch.element_id(),
            Trigger::Submit,
            PageEvent::BatchAddSubmitted,
        ),
        Binding::new(
            FormId::Search.element_id(),
            Trigger::Submit,
            PageEvent::SearchSubmitted,
        ),
        Binding::new(
            FormId::FaceLookup.element_id(),
            Trigger::Submit,
            PageEvent::FaceLookupSubmitted,
        ),
        Binding::new(MANAGE_TAB, Trigger::Click, PageEvent::ManageTabActivated),
        Binding::new(HISTORY_TAB, Trigger::Click, PageEvent::HistoryTabActivated),
        Binding::new(STATS_BUTTON, Trigger::Click, PageEvent::StatsRequested),
    ];
    bindings.extend(ImageInput::ALL.into_iter().map(|input| {
        Binding::new(
            input.element_id(),
            Trigger::Change,
            PageEvent::ImageSelected(input),
        )
    }));
    bindings
}

pub fn resolve_event(element: &str, trigger: Trigger) -> Option<PageEvent> {
    page_bindings()
        .into_iter()
        .find(|binding| binding.element == element && binding.trigger == trigger)
        .map(|binding| binding.event)
}

/// The container a submit event reports into.
pub fn result_container(event: &PageEvent) -> Option<ContainerId> {
    match event {
        PageEvent::DetectSubmitted => Some(ContainerId::DetectResult),
        PageEvent::AddSubmitted => Some(ContainerId::AddResult),
        PageEvent::BatchAddSubmitted => Some(ContainerId::BatchResult),
        PageEvent::SearchSubmitted => Some(ContainerId::SearchResults),
        PageEvent::FaceLookupSubmitted => Some(ContainerId::FaceDetail),
        PageEvent::ManageTabActivated => Some(ContainerId::FacesList),
        PageEvent::HistoryTabActivated => Some(ContainerId::HistoryList),
        _ => None,
    }
}
