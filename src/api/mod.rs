//! Wire contract with the BMI calculation service
//!
//! The service owns the formula and the category thresholds. We only build
//! the request from validated form input and decode whatever comes back.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::SubmitError;

/// Path of the calculation endpoint, relative to the configured server URL
pub const BMI_PATH: &str = "/api/bmi";

/// Unit the height field is entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum HeightUnit {
    #[default]
    Cm,
    M,
}

impl HeightUnit {
    pub fn toggle(self) -> Self {
        match self {
            HeightUnit::Cm => HeightUnit::M,
            HeightUnit::M => HeightUnit::Cm,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HeightUnit::Cm => "cm",
            HeightUnit::M => "m",
        }
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Height as sent on the wire. Flattened into the request so exactly one
/// of `height_cm` / `height_m` appears.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Height {
    #[serde(rename = "height_cm")]
    Centimeters(f64),
    #[serde(rename = "height_m")]
    Meters(f64),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiRequest {
    pub weight_kg: f64,
    #[serde(flatten)]
    pub height: Height,
}

impl BmiRequest {
    /// Validate raw form text and build a request.
    /// Weight is checked before height; the first failure wins.
    pub fn from_form(weight: &str, height: &str, unit: HeightUnit) -> Result<Self, SubmitError> {
        let weight_kg = parse_positive(weight).ok_or(SubmitError::InvalidWeight)?;
        let height = parse_positive(height).ok_or(SubmitError::InvalidHeight)?;

        let height = match unit {
            HeightUnit::Cm => Height::Centimeters(height),
            HeightUnit::M => Height::Meters(height),
        };

        Ok(Self { weight_kg, height })
    }
}

/// Parse a finite number strictly greater than zero
fn parse_positive(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Successful calculation result. Extra fields from the service are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BmiResponse {
    pub bmi: f64,
    pub category: String,
    pub note: String,
    pub healthy_weight_min_kg: f64,
    pub healthy_weight_max_kg: f64,
}

/// Message for a non-ok response. `None` means the body was not JSON.
/// Otherwise the `error` field is used when it is truthy, else "Server error".
fn service_error_message(body: Option<&Value>) -> String {
    let Some(body) = body else {
        return "Invalid response".to_string();
    };

    match body.get("error") {
        Some(Value::String(msg)) if !msg.is_empty() => msg.clone(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::Number(n)) if n.as_f64().map_or(true, |v| v != 0.0) => n.to_string(),
        Some(other @ (Value::Array(_) | Value::Object(_))) => other.to_string(),
        _ => "Server error".to_string(),
    }
}

/// HTTP client for the BMI service
#[derive(Debug, Clone)]
pub struct BmiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl BmiClient {
    pub fn new(server_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: format!("{}{}", server_url.trim_end_matches('/'), BMI_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST one request and wait for the answer. No timeout, no retry.
    pub async fn calculate(&self, request: &BmiRequest) -> Result<BmiResponse, SubmitError> {
        tracing::debug!("POST {} {:?}", self.endpoint, request);

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.json::<Value>().await.ok();
            let message = service_error_message(body.as_ref());
            tracing::warn!("BMI service returned {}: {}", status, message);
            return Err(SubmitError::Service {
                status: status.as_u16(),
                message,
            });
        }

        let body: BmiResponse = response.json().await?;
        tracing::debug!("BMI service answered {:?}", body);
        Ok(body)
    }
}
