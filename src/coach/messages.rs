//! Coach message generation: fixed per-style pools with random selection.
//! The interface (message + trigger type out) is what the rest of the app
//! depends on; the generator behind it is swappable.

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::auth::repo::CoachStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementType {
    Streak,
    GoalComplete,
    PersonalBest,
    #[serde(other)]
    Default,
}

const ENCOURAGING_DAILY: &[&str] = &[
    "Good morning! Ready to make today a healthy day? Let's start by staying hydrated!",
    "Every small step counts. What's one healthy thing you can do right now?",
    "You showed up today, and that already matters. Let's build on it!",
];

const MOTIVATING_DAILY: &[&str] = &[
    "No excuses today. Pick a goal and chase it down!",
    "Champions are built on daily habits. Log your first win this morning!",
    "Push a little harder than yesterday. Your future self is watching!",
];

const INFORMATIVE_DAILY: &[&str] = &[
    "Adults should aim for about 2 liters of water a day. A glass with each meal gets you most of the way.",
    "Thirty minutes of moderate exercise a day measurably lowers cardiovascular risk. A brisk walk counts.",
    "Consistent sleep and wake times improve sleep quality more than extra hours do.",
];

const FRIENDLY_DAILY: &[&str] = &[
    "Hey there! How about a glass of water to kick things off?",
    "Morning! Your streak would love some company today.",
    "Hi! Small wins add up. Let's grab an easy one this morning.",
];

const ENCOURAGING_PROMPTS: &[&str] = &[
    "You're doing great! Just a little more to reach your daily water goal.",
    "Nice pace today. Keep it going, you're closer than you think!",
];

const MOTIVATING_PROMPTS: &[&str] = &[
    "Don't stop now. Finish what you started today!",
    "The goal doesn't care how you feel. Close it out!",
];

const INFORMATIVE_PROMPTS: &[&str] = &[
    "Spreading water intake across the day absorbs better than catching up in the evening.",
    "Short activity breaks between long sitting stretches help regulate blood pressure.",
];

const FRIENDLY_PROMPTS: &[&str] = &[
    "Almost there, want to top up that water glass?",
    "A quick stretch break sounds good right about now, doesn't it?",
];

fn pick(pool: &[&'static str]) -> &'static str {
    pool.choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or("Keep going!")
}

pub fn daily_message(style: CoachStyle) -> &'static str {
    pick(match style {
        CoachStyle::Encouraging => ENCOURAGING_DAILY,
        CoachStyle::Motivating => MOTIVATING_DAILY,
        CoachStyle::Informative => INFORMATIVE_DAILY,
        CoachStyle::Friendly => FRIENDLY_DAILY,
    })
}

pub fn motivational_prompt(style: CoachStyle) -> &'static str {
    pick(match style {
        CoachStyle::Encouraging => ENCOURAGING_PROMPTS,
        CoachStyle::Motivating => MOTIVATING_PROMPTS,
        CoachStyle::Informative => INFORMATIVE_PROMPTS,
        CoachStyle::Friendly => FRIENDLY_PROMPTS,
    })
}

pub fn celebration(achievement: AchievementType, value: Option<i64>) -> String {
    match achievement {
        AchievementType::Streak => {
            let days = value.unwrap_or(1);
            format!("Incredible! You've maintained a {days}-day streak! Keep up the amazing work!")
        }
        AchievementType::GoalComplete => {
            "Congratulations! You've achieved your goal! Time to set a new challenge!".to_string()
        }
        AchievementType::PersonalBest => {
            "New personal best! You've outdone yourself. This is what progress looks like!"
                .to_string()
        }
        AchievementType::Default => {
            "Amazing achievement! You should be proud of yourself!".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn daily_messages_come_from_the_style_pool() {
        for _ in 0..20 {
            let msg = daily_message(CoachStyle::Motivating);
            assert!(MOTIVATING_DAILY.contains(&msg));
        }
    }

    #[test]
    fn prompts_come_from_the_style_pool() {
        for _ in 0..20 {
            let msg = motivational_prompt(CoachStyle::Informative);
            assert!(INFORMATIVE_PROMPTS.contains(&msg));
        }
    }

    #[test]
    fn streak_celebration_interpolates_the_value() {
        let msg = celebration(AchievementType::Streak, Some(12));
        assert!(msg.contains("12-day streak"));
    }

    #[test]
    fn unknown_achievement_falls_back_to_default() {
        let parsed: AchievementType = serde_json::from_str("\"first_login\"").unwrap();
        assert_eq!(parsed, AchievementType::Default);
        let msg = celebration(parsed, None);
        assert!(msg.contains("proud of yourself"));
    }
}
