/*
 * Responsibility
 * - Dashboard / profile-edit DTOs
 */
use serde::{Deserialize, Serialize};

use crate::repos::{ProfileUpdate, UserRecord};

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<UserRecord> for DashboardData {
    fn from(row: UserRecord) -> Self {
        Self {
            username: row.username,
            name: row.name,
            email: row.email,
        }
    }
}

/// Current values of the editable profile fields.
#[derive(Debug, Serialize)]
pub struct EditFormData {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl From<UserRecord> for EditFormData {
    fn from(row: UserRecord) -> Self {
        Self {
            name: row.name,
            email: row.email,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    // Missing or null: leave unchanged
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl From<ProfileUpdateRequest> for ProfileUpdate {
    fn from(req: ProfileUpdateRequest) -> Self {
        Self {
            name: req.name.map(|s| s.trim().to_string()),
            email: req.email.map(|s| s.trim().to_string()),
        }
    }
}
