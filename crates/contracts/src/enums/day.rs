use serde::{Deserialize, Serialize};

/// Day of the week a timeslot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    /// Stable storage code of the day.
    pub fn code(&self) -> &'static str {
        match self {
            Day::Monday => "MONDAY",
            Day::Tuesday => "TUESDAY",
            Day::Wednesday => "WEDNESDAY",
            Day::Thursday => "THURSDAY",
            Day::Friday => "FRIDAY",
            Day::Saturday => "SATURDAY",
            Day::Sunday => "SUNDAY",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "MONDAY" => Some(Day::Monday),
            "TUESDAY" => Some(Day::Tuesday),
            "WEDNESDAY" => Some(Day::Wednesday),
            "THURSDAY" => Some(Day::Thursday),
            "FRIDAY" => Some(Day::Friday),
            "SATURDAY" => Some(Day::Saturday),
            "SUNDAY" => Some(Day::Sunday),
            _ => None,
        }
    }

    pub fn all() -> Vec<Day> {
        vec![
            Day::Monday,
            Day::Tuesday,
            Day::Wednesday,
            Day::Thursday,
            Day::Friday,
            Day::Saturday,
            Day::Sunday,
        ]
    }
}
