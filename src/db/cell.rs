//! Typed spreadsheet cell values.

use chrono::{Datelike, NaiveDateTime};

/// Fixed timestamp format used at every transport boundary.
pub const DATETIME_FMT: &str = "%d/%m/%Y %H:%M:%S";

/// Storage format for date cells inside the workbook file.
const DB_DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single cell of a sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDateTime),
}

impl Cell {
    /// Build a text cell; an empty string becomes `Cell::Empty`.
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() { Cell::Empty } else { Cell::Text(s) }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Render the cell as the string a caller sees.
    ///
    /// Dates use `dd/MM/yyyy HH:mm:ss`; dates before 1970 are treated as
    /// invalid and render empty. Whole numbers drop the fractional part.
    pub fn to_display(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => format_number(*n),
            Cell::Bool(b) => b.to_string(),
            Cell::Date(d) => {
                if d.year() < 1970 {
                    String::new()
                } else {
                    d.format(DATETIME_FMT).to_string()
                }
            }
        }
    }

    /// Convert enum → (kind, value) pair stored in the `cells` table.
    pub fn to_db(&self) -> Option<(&'static str, String)> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) if s.is_empty() => None,
            Cell::Text(s) => Some(("text", s.clone())),
            Cell::Number(n) => Some(("number", n.to_string())),
            Cell::Bool(b) => Some(("bool", b.to_string())),
            Cell::Date(d) => Some(("date", d.format(DB_DATETIME_FMT).to_string())),
        }
    }

    /// Convert a stored (kind, value) pair back into a cell.
    /// Values that do not parse for their kind fall back to text.
    pub fn from_db(kind: &str, value: String) -> Self {
        match kind {
            "number" => value
                .parse::<f64>()
                .map(Cell::Number)
                .unwrap_or(Cell::Text(value)),
            "bool" => match value.as_str() {
                "true" => Cell::Bool(true),
                "false" => Cell::Bool(false),
                _ => Cell::Text(value),
            },
            "date" => NaiveDateTime::parse_from_str(&value, DB_DATETIME_FMT)
                .map(Cell::Date)
                .unwrap_or(Cell::Text(value)),
            _ => Cell::text(value),
        }
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::text(s)
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::text(s)
    }
}

impl From<&String> for Cell {
    fn from(s: &String) -> Self {
        Cell::text(s.as_str())
    }
}

impl From<f64> for Cell {
    fn from(n: f64) -> Self {
        Cell::Number(n)
    }
}

impl From<bool> for Cell {
    fn from(b: bool) -> Self {
        Cell::Bool(b)
    }
}

impl From<NaiveDateTime> for Cell {
    fn from(d: NaiveDateTime) -> Self {
        Cell::Date(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn date_cells_use_fixed_format() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap();
        assert_eq!(Cell::Date(d).to_display(), "05/03/2024 07:08:09");
    }

    #[test]
    fn pre_epoch_dates_render_empty() {
        let d = NaiveDate::from_ymd_opt(1899, 12, 30)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(Cell::Date(d).to_display(), "");
    }

    #[test]
    fn whole_numbers_have_no_fraction() {
        assert_eq!(Cell::Number(3.0).to_display(), "3");
        assert_eq!(Cell::Number(2.5).to_display(), "2.5");
    }

    #[test]
    fn db_round_trip_keeps_kind() {
        let cells = [
            Cell::text("abc"),
            Cell::Number(12.25),
            Cell::Bool(false),
            Cell::Date(
                NaiveDate::from_ymd_opt(2025, 1, 31)
                    .unwrap()
                    .and_hms_opt(23, 59, 0)
                    .unwrap(),
            ),
        ];
        for c in cells {
            let (kind, value) = c.to_db().unwrap();
            assert_eq!(Cell::from_db(kind, value), c);
        }
        assert!(Cell::Empty.to_db().is_none());
    }
}
