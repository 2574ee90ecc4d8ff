//! Advisory password-strength meter.
//!
//! Display only: the score never gates navigation, which enforces just
//! the minimum length through the Security step rules.

const SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Score and display label for the strength bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PasswordStrength {
    /// Satisfied criteria, 0..=5.
    pub score: u8,
    pub label: &'static str,
}

/// Counts satisfied criteria: length ≥ 8, lowercase, uppercase, digit, symbol.
pub fn password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength {
            score: 0,
            label: "",
        };
    }

    let criteria = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| SYMBOLS.contains(c)),
    ];
    let score = criteria.iter().filter(|met| **met).count() as u8;

    let label = if score < 2 {
        "Weak"
    } else if score < 4 {
        "Fair"
    } else if score < 5 {
        "Good"
    } else {
        "Strong"
    };

    PasswordStrength { score, label }
}
