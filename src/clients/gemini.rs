use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{Result, SurveyError};
use crate::models::gemini::Part;
use crate::models::{GenerateContentRequest, GenerateContentResponse, ImageAssessment};
use crate::processors::parse_reply;
use crate::settings::GeminiSettings;
use crate::utils::constants::{GEMINI_API_KEY_ENV, GEMINI_API_KEY_HEADER};
use crate::utils::image::encode_image;

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Prompt asking the model to rate how well a report's description and
/// obstacle type match the attached photo.
pub fn build_prompt(description: &str, obstacle_type: &str) -> String {
    format!(
        r#"Please analyze this image and compare it to the following description: "{description}".
The reported obstacle type is: "{obstacle_type}".
Rate the accuracy of the description and obstacle type from 0% to 100%, {{percentage}},
along with an explanation, {{reason}} (please keep the explanation at 1 sentence long at maximum). Then, return a json with the format
{{
    "rating": {{percentage}},
    "reason": {{reason}}
}}.
Nothing else"#
    )
}

/// Text of the first part of the first candidate.
pub fn extract_reply_text(response: &GenerateContentResponse) -> Result<String> {
    let candidate = response
        .candidates
        .first()
        .ok_or_else(|| SurveyError::UnexpectedFormat("response has no candidates".to_string()))?;

    match candidate.content.parts.first() {
        Some(Part::Text { text }) => Ok(text.clone()),
        Some(Part::InlineData { .. }) => Err(SurveyError::UnexpectedFormat(
            "first part of candidate is not text".to_string(),
        )),
        None => Err(SurveyError::UnexpectedFormat(format!(
            "candidate has no content parts (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        ))),
    }
}

pub struct GeminiClient {
    client: Client,
    url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// Fails before any I/O when no API key is configured.
    pub fn new(settings: &GeminiSettings) -> Result<Self> {
        let api_key = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                SurveyError::Config(format!(
                    "Gemini API key not configured (set {} or gemini.api_key)",
                    GEMINI_API_KEY_ENV
                ))
            })?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            url: settings.url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/v1/models/{}:generateContent", self.url, self.model)
    }

    pub async fn generate(&self, request: &GenerateContentRequest) -> Result<GenerateContentResponse> {
        let endpoint = self.endpoint();
        debug!(%endpoint, "Sending generateContent request");

        let response = self
            .client
            .post(&endpoint)
            .header(GEMINI_API_KEY_HEADER, &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SurveyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Send the image with the rating prompt and parse the reply.
    pub async fn analyze_image(
        &self,
        image_path: &Path,
        description: &str,
        obstacle_type: &str,
    ) -> Result<ImageAssessment> {
        let image = encode_image(image_path)?;
        info!(
            path = %image_path.display(),
            mime = %image.mime_type,
            encoded_len = image.data.len(),
            "Encoded image"
        );

        let request = GenerateContentRequest::text_with_image(
            build_prompt(description, obstacle_type),
            image.mime_type,
            image.data,
        );

        let response = self.generate(&request).await?;
        let text = extract_reply_text(&response)?;
        debug!("Model reply: {}", text);

        Ok(parse_reply(&text))
    }
}
