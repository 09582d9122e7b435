use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub const TEXT_PLAIN: &str = "text/plain";

#[derive(Debug)]
pub enum PredictionError {
    Transport(reqwest::Error),
    Api { status: u16, message: String },
    Decode(serde_json::Error),
}

impl std::error::Error for PredictionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PredictionError::Transport(err) => Some(err),
            PredictionError::Decode(err) => Some(err),
            PredictionError::Api { .. } => None,
        }
    }
}

impl fmt::Display for PredictionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PredictionError::Transport(err) => write!(f, "Prediction request failed: {}", err),
            PredictionError::Api { status, message } => {
                write!(f, "Prediction service returned {}: {}", status, message)
            }
            PredictionError::Decode(err) => write!(f, "Malformed prediction response: {}", err),
        }
    }
}

impl From<reqwest::Error> for PredictionError {
    fn from(error: reqwest::Error) -> Self {
        PredictionError::Transport(error)
    }
}

impl From<serde_json::Error> for PredictionError {
    fn from(error: serde_json::Error) -> Self {
        PredictionError::Decode(error)
    }
}

/// Resource name the service uses to address a trained model.
///
/// Components are inserted as given; an empty model id yields a name ending in `models/`.
pub fn model_path(project_id: &str, compute_region: &str, model_id: &str) -> String {
    format!(
        "projects/{}/locations/{}/models/{}",
        project_id, compute_region, model_id
    )
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TextSnippet {
    pub content: String,
    pub mime_type: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExamplePayload {
    pub text_snippet: TextSnippet,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    #[serde(skip)]
    pub name: String,
    pub payload: ExamplePayload,
    pub params: HashMap<String, String>,
}

impl PredictionRequest {
    pub fn text(name: String, content: String) -> PredictionRequest {
        PredictionRequest {
            name,
            payload: ExamplePayload {
                text_snippet: TextSnippet {
                    content,
                    mime_type: TEXT_PLAIN.to_owned(),
                },
            },
            params: HashMap::new(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ClassificationAnnotation {
    #[serde(default)]
    pub score: f64,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationResult {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub classification: ClassificationAnnotation,
}

#[derive(Deserialize, Debug, Default)]
struct PredictionResponse {
    #[serde(default)]
    payload: Vec<ClassificationResult>,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorStatus,
}

#[derive(Deserialize, Debug)]
struct ErrorStatus {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

fn api_error(status: u16, body: &str) -> PredictionError {
    let message = match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) if envelope.error.status.is_empty() => envelope.error.message,
        Ok(envelope) => format!("{}: {}", envelope.error.status, envelope.error.message),
        Err(_) => body.trim().to_owned(),
    };
    PredictionError::Api { status, message }
}

fn parse_response(body: &str) -> Result<Vec<ClassificationResult>, PredictionError> {
    let response: PredictionResponse = serde_json::from_str(body)?;
    Ok(response.payload)
}

#[async_trait]
pub trait PredictionService: Send + Sync {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<Vec<ClassificationResult>, PredictionError>;
}

pub struct AutoMlClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: Option<String>,
}

impl AutoMlClient {
    pub fn new(endpoint: &str, access_token: Option<String>) -> AutoMlClient {
        AutoMlClient {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_owned(),
            access_token,
        }
    }

    pub fn predict_url(&self, name: &str) -> String {
        format!("{}/{}:predict", self.endpoint, name)
    }

    fn build_request(&self, request: &PredictionRequest) -> reqwest::RequestBuilder {
        let builder = self.http.post(self.predict_url(&request.name)).json(request);
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

#[async_trait]
impl PredictionService for AutoMlClient {
    async fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<Vec<ClassificationResult>, PredictionError> {
        info!("Sending prediction request for {}", request.name);
        debug!("Request payload {:?}", request.payload);

        let response = self.build_request(request).send().await?;
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(api_error(status.as_u16(), &text));
        }
        parse_response(&text)
    }
}
