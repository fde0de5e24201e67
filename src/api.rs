//! HTTP access to the analysis server.

use crate::AnalysisConstants;
use log::{debug, info};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen_futures::JsFuture;

pub const CONSTANTS_PATH: &str = "get_constants";
pub const ANALYZE_PATH: &str = "analyze_video";
/// Multipart field the server reads the upload from.
pub const VIDEO_FIELD: &str = "video";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstantsFetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Invalid constants payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ConstantsFetchError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            ConstantsFetchError::Status(status.as_u16())
        } else if e.is_decode() {
            ConstantsFetchError::Decode(e.to_string())
        } else {
            ConstantsFetchError::Network(e.to_string())
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UploadError {
    #[error("Failed to read file: {0}")]
    Read(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server responded with status {0}")]
    Status(u16),

    #[error("Invalid analysis response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for UploadError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            UploadError::Status(status.as_u16())
        } else if e.is_decode() {
            UploadError::Decode(e.to_string())
        } else {
            UploadError::Network(e.to_string())
        }
    }
}

/// Body returned by the analyze endpoint.
#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    message: String,
}

/// Join an endpoint path onto the configured base URL.
pub fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Fetch the analysis constants from `{base_url}/get_constants`.
pub async fn fetch_constants(base_url: &str) -> Result<AnalysisConstants, ConstantsFetchError> {
    let url = join_url(base_url, CONSTANTS_PATH);
    debug!("Fetching constants from {}", url);

    let client = reqwest::Client::new();
    let constants = client
        .get(&url)
        .send()
        .await?
        .error_for_status()?
        .json::<AnalysisConstants>()
        .await?;

    info!("Loaded analysis constants (video path: {})", constants.video_path);
    Ok(constants)
}

/// Read the full contents of a browser file.
pub async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, UploadError> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| UploadError::Read(format!("{:?}", e)))?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// Post a video to `{base_url}/analyze_video` and return the server's message.
pub async fn upload_video(base_url: &str, file: &web_sys::File) -> Result<String, UploadError> {
    let url = join_url(base_url, ANALYZE_PATH);
    let name = file.name();
    let bytes = read_file_bytes(file).await?;
    info!("Uploading {} ({} bytes) to {}", name, bytes.len(), url);

    let mut part = Part::bytes(bytes).file_name(name);
    let mime = file.type_();
    if !mime.is_empty() {
        part = part.mime_str(&mime)?;
    }
    let form = Form::new().part(VIDEO_FIELD, part);

    let client = reqwest::Client::new();
    let response = client
        .post(&url)
        .multipart(form)
        .send()
        .await?
        .error_for_status()?
        .json::<AnalyzeResponse>()
        .await?;

    Ok(response.message)
}
