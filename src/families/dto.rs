use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::families::repo::{Family, FamilyInvitation, MemberProfile};
use crate::families::visibility::MemberDashboard;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFamilyRequest {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteMemberRequest {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FamilyData {
    pub family: Family,
}

#[derive(Debug, Serialize)]
pub struct FamilyDetailsData {
    pub family: FamilyDetails,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyDetails {
    #[serde(flatten)]
    pub family: Family,
    pub members: Vec<MemberProfile>,
}

#[derive(Debug, Serialize)]
pub struct InvitationData {
    pub invitation: FamilyInvitation,
}

#[derive(Debug, Serialize)]
pub struct FamilyDashboardData {
    pub dashboard: FamilyDashboard,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyDashboard {
    pub family_id: Uuid,
    pub members: Vec<MemberDashboard>,
}
