//! Payload contracts for the login, registration and password-change
//! endpoints. Validation is structural only: every required field present and
//! non-empty.

use serde::Deserialize;
use thiserror::Error;

/// Error for request payload validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

fn require(value: &str, field: &'static str) -> Result<(), RequestError> {
    if value.is_empty() {
        Err(RequestError::MissingField(field))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), RequestError> {
        require(&self.user_name, "userName")?;
        require(&self.password, "password")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), RequestError> {
        require(&self.mobile, "mobile")?;
        require(&self.password, "password")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    pub old_password: String,
    #[serde(default)]
    pub new_password: String,
}

impl UpdatePasswordRequest {
    pub fn validate(&self) -> Result<(), RequestError> {
        require(&self.old_password, "oldPassword")?;
        require(&self.new_password, "newPassword")
    }
}
