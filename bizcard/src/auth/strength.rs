//! Password strength scoring
//!
//! One point per satisfied criterion, capped at [`MAX_SCORE`]:
//!
//! | Criterion | Default |
//! |-----------|---------|
//! | minimum length | ≥ 6 characters |
//! | lowercase letter | |
//! | uppercase letter | |
//! | digit | |
//! | symbol | any non-alphanumeric, non-space character |
//! | length bonus | ≥ 8 characters |
//!
//! Labels: 0–1 weak, 2–3 fair, 4–5 good, 6 strong.
//!
//! # Example
//!
//! ```rust
//! use bizcard::auth::{password_strength, StrengthLabel};
//!
//! assert_eq!(password_strength("").label, StrengthLabel::Weak);
//! assert_eq!(password_strength("Aa1!aaaa").label, StrengthLabel::Strong);
//! ```

use serde::{Deserialize, Serialize};

use crate::config::PasswordSettings;

/// Highest possible score
pub const MAX_SCORE: u8 = 6;

/// Strength bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthLabel {
    /// Score 0–1
    Weak,
    /// Score 2–3
    Fair,
    /// Score 4–5
    Good,
    /// Score 6
    Strong,
}

impl StrengthLabel {
    /// Bucket for a score
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            0 | 1 => Self::Weak,
            2 | 3 => Self::Fair,
            4 | 5 => Self::Good,
            _ => Self::Strong,
        }
    }

    /// Lowercase name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weak => "weak",
            Self::Fair => "fair",
            Self::Good => "good",
            Self::Strong => "strong",
        }
    }

    /// Meter color for this bucket
    #[must_use]
    pub const fn color(self) -> StrengthColor {
        match self {
            Self::Weak => StrengthColor::Red,
            Self::Fair => StrengthColor::Orange,
            Self::Good => StrengthColor::Blue,
            Self::Strong => StrengthColor::Green,
        }
    }
}

/// Color token of the strength meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrengthColor {
    /// Weak
    Red,
    /// Fair
    Orange,
    /// Good
    Blue,
    /// Strong
    Green,
}

impl StrengthColor {
    /// Token name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Blue => "blue",
            Self::Green => "green",
        }
    }

    /// CSS class of the meter bar
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Red => "strength-red",
            Self::Orange => "strength-orange",
            Self::Blue => "strength-blue",
            Self::Green => "strength-green",
        }
    }
}

/// Scored password
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordStrength {
    /// 0..=6
    pub score: u8,
    /// Bucket
    pub label: StrengthLabel,
    /// Meter color
    pub color: StrengthColor,
}

impl PasswordStrength {
    fn from_score(score: u8) -> Self {
        let score = score.min(MAX_SCORE);
        let label = StrengthLabel::from_score(score);
        Self {
            score,
            label,
            color: label.color(),
        }
    }
}

/// Scorer with configurable length thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrengthScorer {
    min_length: usize,
    bonus_length: usize,
}

impl Default for PasswordStrengthScorer {
    fn default() -> Self {
        Self {
            min_length: 6,
            bonus_length: 8,
        }
    }
}

impl PasswordStrengthScorer {
    /// Scorer with custom thresholds; `bonus_length` is raised to at least
    /// `min_length`
    #[must_use]
    pub fn with_thresholds(min_length: usize, bonus_length: usize) -> Self {
        Self {
            min_length,
            bonus_length: bonus_length.max(min_length),
        }
    }

    /// Scorer from the `[password]` config section
    #[must_use]
    pub fn from_settings(settings: &PasswordSettings) -> Self {
        Self::with_thresholds(settings.min_length, settings.bonus_length)
    }

    /// Score a password
    #[must_use]
    pub fn score(&self, password: &str) -> PasswordStrength {
        let length = password.chars().count();
        let criteria = [
            length >= self.min_length,
            password.chars().any(char::is_lowercase),
            password.chars().any(char::is_uppercase),
            password.chars().any(|c| c.is_ascii_digit()),
            password
                .chars()
                .any(|c| !c.is_alphanumeric() && !c.is_whitespace()),
            length >= self.bonus_length,
        ];
        #[allow(clippy::cast_possible_truncation)]
        let score = criteria.iter().filter(|met| **met).count() as u8;
        PasswordStrength::from_score(score)
    }
}

/// Score a password with the default thresholds
#[must_use]
pub fn password_strength(password: &str) -> PasswordStrength {
    PasswordStrengthScorer::default().score(password)
}
