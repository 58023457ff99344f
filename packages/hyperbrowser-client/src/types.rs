use serde::{Deserialize, Serialize};

/// Browser session options forwarded with an extract job.
///
/// These map one-to-one onto the session features the platform offers
/// (stealth fingerprinting, residential proxying, captcha solving).
/// All default to off; the platform bills some of them separately.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOptions {
    pub use_stealth: bool,
    pub use_proxy: bool,
    pub solve_captchas: bool,
    pub adblock: bool,
    pub accept_cookies: bool,
}

impl SessionOptions {
    /// Enable stealth mode.
    pub fn with_stealth(mut self) -> Self {
        self.use_stealth = true;
        self
    }

    /// Route the session through the platform's proxy pool.
    pub fn with_proxy(mut self) -> Self {
        self.use_proxy = true;
        self
    }

    /// Solve captchas encountered during the session.
    pub fn with_captcha_solving(mut self) -> Self {
        self.solve_captchas = true;
        self
    }

    /// Block ads and dismiss cookie banners.
    pub fn with_adblock(mut self) -> Self {
        self.adblock = true;
        self.accept_cookies = true;
        self
    }
}

/// Parameters for starting an extract job.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartExtractJobParams {
    pub urls: Vec<String>,

    /// Natural-language instruction steering the extraction.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,

    /// JSON Schema the extracted data must conform to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_options: Option<SessionOptions>,
}

impl StartExtractJobParams {
    /// Create extract params for a single URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            urls: vec![url.into()],
            prompt: None,
            schema: None,
            session_options: None,
        }
    }

    /// Set the extraction prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set the target JSON schema.
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.schema = Some(schema);
        self
    }

    /// Set session options.
    pub fn with_session_options(mut self, options: SessionOptions) -> Self {
        self.session_options = Some(options);
        self
    }
}

/// Response to starting an extract job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartExtractJobResponse {
    pub job_id: String,
}

/// Lifecycle states of an extract job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractJobStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl ExtractJobStatus {
    /// Whether the job is in a terminal state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Status/result of an extract job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractJobResponse {
    pub status: ExtractJobStatus,

    /// Extracted data, present once the job completes.
    pub data: Option<serde_json::Value>,

    /// Error description, present when the job fails.
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_options_serialize_camel_case() {
        let options = SessionOptions::default()
            .with_stealth()
            .with_captcha_solving();

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["useStealth"], true);
        assert_eq!(json["solveCaptchas"], true);
        assert_eq!(json["useProxy"], false);
    }

    #[test]
    fn test_extract_params_skip_absent_fields() {
        let params = StartExtractJobParams::new("https://example.com/p/1");
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["urls"][0], "https://example.com/p/1");
        assert!(json.get("prompt").is_none());
        assert!(json.get("schema").is_none());
        assert!(json.get("sessionOptions").is_none());
    }

    #[test]
    fn test_job_status_parsing() {
        let resp: ExtractJobResponse =
            serde_json::from_str(r#"{"status":"completed","data":{"name":"x"}}"#).unwrap();
        assert_eq!(resp.status, ExtractJobStatus::Completed);
        assert!(resp.status.is_terminal());
        assert!(resp.data.is_some());

        let resp: ExtractJobResponse =
            serde_json::from_str(r#"{"status":"running"}"#).unwrap();
        assert!(!resp.status.is_terminal());
    }
}
