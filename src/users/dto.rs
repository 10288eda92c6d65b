use serde::{Deserialize, Serialize};

use crate::auth::dto::PublicUser;
use crate::auth::repo::CoachStyle;
use crate::users::repo::PrivacySettings;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

/// Per-category sharing flags; absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePrivacyRequest {
    pub water_intake: Option<bool>,
    pub exercise: Option<bool>,
    pub weight: Option<bool>,
    pub sleep: Option<bool>,
    pub vital_signs: Option<bool>,
    pub goals: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCoachPreferenceRequest {
    pub coach_style: CoachStyle,
}

#[derive(Debug, Serialize)]
pub struct ProfileData {
    pub user: PublicUser,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyData {
    pub privacy_settings: PrivacySettings,
}
