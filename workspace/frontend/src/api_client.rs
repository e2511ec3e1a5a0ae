pub mod stocks;

use gloo_net::http::Request;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::settings;

fn api_base() -> String {
    settings::get_settings().api_base_url()
}

/// API Response wrapper
#[derive(Debug, Deserialize, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub message: String,
    pub success: bool,
}

/// Error Response
#[derive(Debug, Deserialize, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    pub success: bool,
}

/// An error surfaced to components, keeping the backend's error code so
/// the UI can render an expected miss (weekend lookup, no data) differently
/// from a hard failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn transport(message: String) -> Self {
        Self {
            code: "TRANSPORT".to_string(),
            message,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Common GET request handler
pub async fn get<T>(endpoint: &str) -> Result<T, ApiError>
where
    T: for<'de> Deserialize<'de>,
{
    let url = format!("{}{}", api_base(), endpoint);
    log::debug!("GET request to: {}", url);

    let response = Request::get(&url).send().await.map_err(|e| {
        let error_msg = format!("Request failed: {}", e);
        log::error!("GET {} - {}", endpoint, error_msg);
        ApiError::transport(error_msg)
    })?;

    if !response.ok() {
        log::warn!("GET {} - Non-OK response: {}", endpoint, response.status());
        let error_response: Result<ErrorResponse, _> = response.json().await;
        return Err(match error_response {
            Ok(err) => {
                log::error!("GET {} - API error [{}]: {}", endpoint, err.code, err.error);
                ApiError {
                    code: err.code,
                    message: err.error,
                }
            }
            Err(_) => {
                let error_msg = format!("HTTP error: {}", response.status());
                log::error!("GET {} - {}", endpoint, error_msg);
                ApiError::transport(error_msg)
            }
        });
    }

    log::trace!("GET {} - Response received, parsing JSON", endpoint);
    let api_response: ApiResponse<T> = response.json().await.map_err(|e| {
        let error_msg = format!("Failed to parse response: {}", e);
        log::error!("GET {} - {}", endpoint, error_msg);
        ApiError::transport(error_msg)
    })?;

    log::info!("GET {} - Success", endpoint);
    Ok(api_response.data)
}
