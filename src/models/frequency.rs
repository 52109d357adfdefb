use chrono::{Days, Months, NaiveDate};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How often a preventive task recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default)]
pub enum Frequency {
    Weekly,
    Biweekly,
    #[default]
    Monthly,
    Bimonthly,
    Semiannual,
    Annual,
}

impl Frequency {
    pub const ALL: [Frequency; 6] = [
        Frequency::Weekly,
        Frequency::Biweekly,
        Frequency::Monthly,
        Frequency::Bimonthly,
        Frequency::Semiannual,
        Frequency::Annual,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "Weekly",
            Frequency::Biweekly => "Biweekly",
            Frequency::Monthly => "Monthly",
            Frequency::Bimonthly => "Bimonthly",
            Frequency::Semiannual => "Semiannual",
            Frequency::Annual => "Annual",
        }
    }

    pub fn from_db_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// Lenient conversion: unknown labels recur monthly.
    pub fn from_label(s: &str) -> Self {
        Self::from_db_str(s).unwrap_or_default()
    }

    /// Move `date` forward by one period.
    /// Month steps clamp to the last day of the target month (31/01 → 28/02).
    pub fn advance(&self, date: NaiveDate) -> NaiveDate {
        let stepped = match self {
            Frequency::Weekly => date.checked_add_days(Days::new(7)),
            Frequency::Biweekly => date.checked_add_days(Days::new(14)),
            Frequency::Monthly => date.checked_add_months(Months::new(1)),
            Frequency::Bimonthly => date.checked_add_months(Months::new(2)),
            Frequency::Semiannual => date.checked_add_months(Months::new(6)),
            Frequency::Annual => date.checked_add_months(Months::new(12)),
        };
        stepped.unwrap_or(NaiveDate::MAX)
    }
}
