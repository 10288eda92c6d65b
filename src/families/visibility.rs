//! Per-member privacy filtering for the family dashboard.
//!
//! A category is included only when the member shares it or the viewer is
//! looking at their own row. Hidden categories are omitted from the JSON
//! entirely, so clients can tell "hidden" apart from "no data logged".
//! Admin status grants no extra visibility.

use serde::Serialize;
use uuid::Uuid;

use crate::goals::repo::Goal;
use crate::logs::dashboard::{
    DashboardSummary, ExerciseSummary, SleepSummary, VitalSigns, WaterSummary, WeightSummary,
};
use crate::users::repo::PrivacySettings;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDashboard {
    pub user_id: Uuid,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water: Option<WaterSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise: Option<ExerciseSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<WeightSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<SleepSummary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vital_signs: Option<VitalSigns>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goals: Option<Vec<Goal>>,
}

pub fn filter_member_view(
    viewer_id: Uuid,
    member_id: Uuid,
    member_name: &str,
    settings: &PrivacySettings,
    summary: DashboardSummary,
    goals: Vec<Goal>,
) -> MemberDashboard {
    let own = viewer_id == member_id;
    MemberDashboard {
        user_id: member_id,
        name: member_name.to_string(),
        water: (own || settings.water_intake_shared).then_some(summary.water),
        exercise: (own || settings.exercise_shared).then_some(summary.exercise),
        weight: (own || settings.weight_shared).then_some(summary.weight),
        sleep: (own || settings.sleep_shared).then_some(summary.sleep),
        vital_signs: (own || settings.vital_signs_shared).then_some(summary.vital_signs),
        goals: (own || settings.goals_shared).then_some(goals),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::dashboard::{
        EXERCISE_GOAL_MINUTES, SLEEP_GOAL_HOURS, WATER_GOAL_ML, WeightTrend,
    };
    use time::OffsetDateTime;

    fn sample_summary() -> DashboardSummary {
        DashboardSummary {
            water: WaterSummary {
                current: 500.0,
                goal: WATER_GOAL_ML,
            },
            exercise: ExerciseSummary {
                minutes: 20,
                goal: EXERCISE_GOAL_MINUTES,
            },
            weight: WeightSummary {
                current: Some(80.0),
                trend: WeightTrend::Stable,
            },
            sleep: SleepSummary {
                hours: 7.5,
                goal: SLEEP_GOAL_HOURS,
            },
            vital_signs: VitalSigns {
                blood_pressure: None,
                heart_rate: Some(62),
                temperature: None,
            },
        }
    }

    fn settings(user_id: Uuid, weight_shared: bool) -> PrivacySettings {
        PrivacySettings {
            id: Uuid::new_v4(),
            user_id,
            water_intake_shared: true,
            exercise_shared: true,
            weight_shared,
            sleep_shared: true,
            vital_signs_shared: false,
            goals_shared: true,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn unshared_categories_are_hidden_from_other_members() {
        let member = Uuid::new_v4();
        let viewer = Uuid::new_v4();
        let view = filter_member_view(
            viewer,
            member,
            "Alice",
            &settings(member, false),
            sample_summary(),
            vec![],
        );
        assert!(view.weight.is_none());
        assert!(view.vital_signs.is_none());
        assert!(view.water.is_some());
        assert!(view.sleep.is_some());
    }

    #[test]
    fn members_always_see_their_own_data() {
        let member = Uuid::new_v4();
        let view = filter_member_view(
            member,
            member,
            "Alice",
            &settings(member, false),
            sample_summary(),
            vec![],
        );
        assert!(view.weight.is_some());
        assert!(view.vital_signs.is_some());
    }

    #[test]
    fn hidden_categories_are_omitted_not_null() {
        let member = Uuid::new_v4();
        let viewer = Uuid::new_v4();
        let view = filter_member_view(
            viewer,
            member,
            "Alice",
            &settings(member, false),
            sample_summary(),
            vec![],
        );
        let json = serde_json::to_value(&view).unwrap();
        // Absent key, not a null placeholder
        assert!(json.get("weight").is_none());
        assert!(json.get("vitalSigns").is_none());
        assert!(json.get("water").is_some());
    }
}
