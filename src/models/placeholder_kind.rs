use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaceholderKind {
    Doctor,
    Vacation,
    Holiday,
    Sickday,
}

impl PlaceholderKind {
    pub const ALL: [PlaceholderKind; 4] = [
        PlaceholderKind::Doctor,
        PlaceholderKind::Vacation,
        PlaceholderKind::Holiday,
        PlaceholderKind::Sickday,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            PlaceholderKind::Doctor => "Doctor",
            PlaceholderKind::Vacation => "Vacation",
            PlaceholderKind::Holiday => "Holiday",
            PlaceholderKind::Sickday => "Sickday",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "Doctor" => Some(PlaceholderKind::Doctor),
            "Vacation" => Some(PlaceholderKind::Vacation),
            "Holiday" => Some(PlaceholderKind::Holiday),
            "Sickday" => Some(PlaceholderKind::Sickday),
            _ => None,
        }
    }

    /// Helper: convert user input (any case, `sick` accepted for `Sickday`)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "doctor" => Some(PlaceholderKind::Doctor),
            "vacation" => Some(PlaceholderKind::Vacation),
            "holiday" => Some(PlaceholderKind::Holiday),
            "sickday" | "sick" => Some(PlaceholderKind::Sickday),
            _ => None,
        }
    }

    /// Duration proposed when the user does not give one.
    pub fn default_hours(&self) -> f64 {
        match self {
            PlaceholderKind::Doctor => 4.0,
            PlaceholderKind::Vacation | PlaceholderKind::Holiday | PlaceholderKind::Sickday => 8.0,
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            PlaceholderKind::Doctor => "🩺",
            PlaceholderKind::Vacation => "🌴",
            PlaceholderKind::Holiday => "🎉",
            PlaceholderKind::Sickday => "🤒",
        }
    }
}
