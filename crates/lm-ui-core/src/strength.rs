//! Password strength meter for the registration page.

pub const MAX_SCORE: u8 = 5;

/// One point each for: at least 8 characters, an uppercase letter, a lowercase
/// letter, a digit, and any non-alphanumeric character.
pub fn score(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }
    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    checks.iter().filter(|&&hit| hit).count().min(MAX_SCORE as usize) as u8
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

impl StrengthLevel {
    pub fn from_score(score: u8) -> Self {
        match score {
            4.. => StrengthLevel::Strong,
            3 => StrengthLevel::Medium,
            _ => StrengthLevel::Weak,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Medium => "Medium",
            StrengthLevel::Strong => "Strong",
        }
    }

    /// Bootstrap background class for the progress bar.
    pub fn bar_class(self) -> &'static str {
        match self {
            StrengthLevel::Weak => "bg-danger",
            StrengthLevel::Medium => "bg-warning",
            StrengthLevel::Strong => "bg-success",
        }
    }
}

/// Everything the meter renders for one password value.
#[derive(Clone, Debug, PartialEq)]
pub struct StrengthReading {
    pub score: u8,
    pub level: StrengthLevel,
    pub percent: f64,
}

impl StrengthReading {
    pub fn of(password: &str) -> Self {
        let score = score(password);
        Self {
            score,
            level: StrengthLevel::from_score(score),
            percent: f64::from(score) / f64::from(MAX_SCORE) * 100.0,
        }
    }
}
