//! Goal progress: a 0–100 figure from start, target, and current values.
//!
//! Monotonic goals measure distance travelled from the start value; band
//! goals (maintenance and vitals targets) measure proximity to the target.
//! When no current value is snapshotted on the goal it is derived from the
//! latest relevant metric record.

use sqlx::PgPool;
use time::OffsetDateTime;

use crate::auth::repo::User;
use crate::goals::repo::{Goal, GoalType};
use crate::logs::{dashboard, repo as logs_repo};

pub fn compute(goal_type: GoalType, start: f64, target: f64, current: f64) -> f64 {
    if goal_type.is_band() {
        if target == 0.0 {
            return if current == target { 100.0 } else { 0.0 };
        }
        100.0 - ((current - target).abs() / target * 100.0).min(100.0)
    } else {
        if target == start {
            return if current == target { 100.0 } else { 0.0 };
        }
        ((current - start) / (target - start) * 100.0).clamp(0.0, 100.0)
    }
}

fn bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let height_m = height_cm / 100.0;
    weight_kg / (height_m * height_m)
}

/// Latest relevant reading for the goal's metric, or None when the user has
/// no usable source (e.g. a BMI goal without a recorded height).
pub async fn derive_current(
    db: &PgPool,
    user: &User,
    goal: &Goal,
    now: OffsetDateTime,
) -> anyhow::Result<Option<f64>> {
    let (start, end) = dashboard::day_bounds(now);
    let user_id = goal.user_id;

    let derived = match goal.goal_type {
        GoalType::WeightLoss | GoalType::WeightGain | GoalType::WeightMaintenance => {
            logs_repo::latest_weight(db, user_id).await?.map(|w| w.weight)
        }
        GoalType::BmiTarget => {
            let weight = logs_repo::latest_weight(db, user_id).await?.map(|w| w.weight);
            match (weight, user.height) {
                (Some(w), Some(h)) if h > 0.0 => Some(bmi(w, h)),
                _ => None,
            }
        }
        GoalType::ExerciseMinutes => {
            Some(logs_repo::exercise_total_between(db, user_id, start, end).await? as f64)
        }
        GoalType::WaterIntake => {
            Some(logs_repo::water_total_between(db, user_id, start, end).await?)
        }
        GoalType::SleepHours => logs_repo::latest_sleep_between(db, user_id, start, end)
            .await?
            .map(|s| f64::from(s.duration) / 60.0),
        GoalType::BloodPressure => logs_repo::latest_blood_pressure(db, user_id)
            .await?
            .map(|bp| f64::from(bp.systolic)),
        GoalType::HeartRate => logs_repo::latest_heart_rate(db, user_id)
            .await?
            .map(|hr| f64::from(hr.bpm)),
    };
    Ok(derived)
}

/// Resolve the current value used for progress: the snapshot on the goal
/// when present, otherwise the derived reading, otherwise the start value.
pub fn resolve_current(goal: &Goal, derived: Option<f64>) -> f64 {
    goal.current_value
        .or(derived)
        .unwrap_or(goal.start_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn weight_loss_midway() {
        // 75 -> 70, currently 72.5: half way there
        let p = compute(GoalType::WeightLoss, 75.0, 70.0, 72.5);
        assert!(approx(p, 50.0), "got {p}");
    }

    #[test]
    fn water_intake_from_zero_start() {
        let p = compute(GoalType::WaterIntake, 0.0, 2000.0, 1500.0);
        assert!(approx(p, 75.0), "got {p}");
    }

    #[test]
    fn monotonic_progress_clamps_both_ways() {
        // Overshot the target
        assert!(approx(compute(GoalType::WeightLoss, 75.0, 70.0, 65.0), 100.0));
        // Moved away from the target
        assert!(approx(compute(GoalType::WeightLoss, 75.0, 70.0, 80.0), 0.0));
        // Gain goal overshoot
        assert!(approx(compute(GoalType::WeightGain, 60.0, 65.0, 70.0), 100.0));
    }

    #[test]
    fn degenerate_monotonic_goal_avoids_division() {
        assert!(approx(compute(GoalType::WeightLoss, 70.0, 70.0, 70.0), 100.0));
        assert!(approx(compute(GoalType::WeightLoss, 70.0, 70.0, 72.0), 0.0));
    }

    #[test]
    fn band_goal_scores_proximity() {
        assert!(approx(compute(GoalType::WeightMaintenance, 0.0, 80.0, 80.0), 100.0));
        // 10% away from target -> 90
        assert!(approx(compute(GoalType::WeightMaintenance, 0.0, 80.0, 88.0), 90.0));
        // Far off target floors at 0
        assert!(approx(compute(GoalType::HeartRate, 0.0, 60.0, 180.0), 0.0));
    }

    #[test]
    fn band_goal_is_symmetric() {
        let above = compute(GoalType::BloodPressure, 0.0, 120.0, 132.0);
        let below = compute(GoalType::BloodPressure, 0.0, 120.0, 108.0);
        assert!(approx(above, below));
        assert!(approx(above, 90.0));
    }

    #[test]
    fn resolve_prefers_snapshot_then_derived_then_start() {
        let goal = sample_goal(Some(72.0), 75.0);
        assert!(approx(resolve_current(&goal, Some(71.0)), 72.0));
        let goal = sample_goal(None, 75.0);
        assert!(approx(resolve_current(&goal, Some(71.0)), 71.0));
        assert!(approx(resolve_current(&goal, None), 75.0));
    }

    fn sample_goal(current_value: Option<f64>, start_value: f64) -> Goal {
        use crate::goals::repo::GoalStatus;
        Goal {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            goal_type: GoalType::WeightLoss,
            start_value,
            target_value: 70.0,
            current_value,
            start_date: OffsetDateTime::UNIX_EPOCH,
            target_date: OffsetDateTime::UNIX_EPOCH,
            status: GoalStatus::Active,
            is_shared: true,
            action_plan: None,
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        }
    }
}
