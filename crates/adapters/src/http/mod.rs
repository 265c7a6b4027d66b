mod envelope;

use std::time::Duration;

use facematch_application::{ApplicationError, FaceApi};
use facematch_domain::{
    AddFaceResult, BatchAddResult, DetectionResult, FaceId, FaceRecord, ImageUpload,
    MatchHistoryEntry, PageRequest, SearchResult, Stats, TopK,
};
use log::debug;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use envelope::{check_envelope, decode, FaceEnvelope, FacesEnvelope, HistoryEnvelope, StatsEnvelope};

/// Blocking client for the face-recognition server's JSON API.
#[derive(Debug, Clone)]
pub struct HttpFaceApi {
    client: Client,
    base_url: String,
}

impl HttpFaceApi {
    pub fn new(server_url: &str, api_base: &str, timeout: Duration) -> Result<Self, ApplicationError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport)?;
        Ok(Self {
            client,
            base_url: join_base(server_url, api_base),
        })
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn paged(&self, path: &str, page: PageRequest) -> String {
        format!("{}?skip={}&limit={}", self.endpoint(path), page.skip, page.limit)
    }

    fn exchange(&self, request: RequestBuilder) -> Result<(u16, String), ApplicationError> {
        let response = request.send().map_err(transport)?;
        let status = response.status().as_u16();
        debug!("{} answered HTTP {status}", response.url());
        let body = response.text().map_err(transport)?;
        Ok((status, body))
    }

    fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        fallback: &str,
    ) -> Result<T, ApplicationError> {
        let (status, body) = self.exchange(request)?;
        decode(status, &body, fallback)
    }
}

impl FaceApi for HttpFaceApi {
    fn detect_face(&self, image: &ImageUpload) -> Result<DetectionResult, ApplicationError> {
        let form = image_form(image)?;
        self.fetch(
            self.client.post(self.endpoint("detect-face")).multipart(form),
            "Error detecting faces",
        )
    }

    fn add_face(
        &self,
        image: &ImageUpload,
        name: &str,
        description: Option<&str>,
    ) -> Result<AddFaceResult, ApplicationError> {
        let mut form = image_form(image)?.text("name", name.to_string());
        if let Some(description) = description.filter(|text| !text.is_empty()) {
            form = form.text("description", description.to_string());
        }
        self.fetch(
            self.client.post(self.endpoint("add-face")).multipart(form),
            "Error adding face",
        )
    }

    fn batch_add_faces(
        &self,
        image: &ImageUpload,
        names: &[String],
    ) -> Result<BatchAddResult, ApplicationError> {
        let form = image_form(image)?.text("names", names.join(","));
        self.fetch(
            self.client.post(self.endpoint("batch-add-faces")).multipart(form),
            "Error adding faces",
        )
    }

    fn search_face(
        &self,
        image: &ImageUpload,
        top_k: TopK,
    ) -> Result<SearchResult, ApplicationError> {
        let form = image_form(image)?.text("top_k", top_k.get().to_string());
        self.fetch(
            self.client.post(self.endpoint("search-face")).multipart(form),
            "Error searching face",
        )
    }

    fn list_faces(&self, page: PageRequest) -> Result<Vec<FaceRecord>, ApplicationError> {
        let envelope: FacesEnvelope = self.fetch(
            self.client.get(self.paged("faces", page)),
            "Error loading faces",
        )?;
        Ok(envelope.faces)
    }

    fn get_face(&self, face_id: FaceId) -> Result<FaceRecord, ApplicationError> {
        let envelope: FaceEnvelope = self.fetch(
            self.client.get(self.endpoint(&format!("faces/{face_id}"))),
            "Error loading face",
        )?;
        Ok(envelope.face)
    }

    fn delete_face(&self, face_id: FaceId) -> Result<(), ApplicationError> {
        let (status, body) = self.exchange(
            self.client
                .delete(self.endpoint(&format!("faces/{face_id}"))),
        )?;
        check_envelope(status, &body, "Unknown error").map(|_| ())
    }

    fn get_stats(&self) -> Result<Stats, ApplicationError> {
        let envelope: StatsEnvelope = self.fetch(
            self.client.get(self.endpoint("stats")),
            "Error loading stats",
        )?;
        Ok(envelope.stats)
    }

    fn match_history(
        &self,
        page: PageRequest,
    ) -> Result<Vec<MatchHistoryEntry>, ApplicationError> {
        let envelope: HistoryEnvelope = self.fetch(
            self.client.get(self.paged("match-history", page)),
            "Error loading match history",
        )?;
        Ok(envelope.results)
    }
}

fn image_form(image: &ImageUpload) -> Result<Form, ApplicationError> {
    let part = Part::bytes(image.bytes().to_vec())
        .file_name(image.file_name().to_string())
        .mime_str(image.content_type())
        .map_err(transport)?;
    Ok(Form::new().part("file", part))
}

fn join_base(server_url: &str, api_base: &str) -> String {
    let server = server_url.trim_end_matches('/');
    match api_base.trim_matches('/') {
        "" => server.to_string(),
        base => format!("{server}/{base}"),
    }
}

fn transport(error: reqwest::Error) -> ApplicationError {
    ApplicationError::Transport(error.to_string())
}
