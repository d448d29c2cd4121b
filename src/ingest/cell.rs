use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw spreadsheet value as handed over by the sheet reader or an API client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Bool(bool),
    Text(String),
    #[default]
    Empty,
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for empty cells and text that is blank after trimming.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Finite numeric value of a number cell.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Money to at most two fractional digits: `0.1 + 0.2` prints as "0.3".
pub fn format_amount(value: f64) -> String {
    if !value.is_finite() {
        return format_number(value);
    }
    format_number((value * 100.0).round() / 100.0)
}

/// Integral values print without a fractional part ("12", not "12.0").
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_amount, format_number, Cell};

    #[test]
    fn display_matches_spreadsheet_text() {
        assert_eq!(Cell::Number(12.0).to_string(), "12");
        assert_eq!(Cell::Number(12.5).to_string(), "12.5");
        assert_eq!(Cell::Empty.to_string(), "");
        assert_eq!(Cell::Bool(true).to_string(), "true");
        assert_eq!(Cell::text("Москва").to_string(), "Москва");
    }

    #[test]
    fn deserializes_json_cells() {
        let cells: Vec<Cell> =
            serde_json::from_str(r#"["Москва", 2, 3.5, null, true]"#).expect("cells");
        assert_eq!(
            cells,
            vec![
                Cell::text("Москва"),
                Cell::Number(2.0),
                Cell::Number(3.5),
                Cell::Empty,
                Cell::Bool(true),
            ]
        );
    }

    #[test]
    fn format_number_keeps_negative_zero_tidy() {
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1234.5), "1234.5");
    }

    #[test]
    fn format_amount_rounds_to_kopecks() {
        assert_eq!(format_amount(0.1 + 0.2), "0.3");
        assert_eq!(format_amount(1234.567), "1234.57");
        assert_eq!(format_amount(80.0), "80");
        assert_eq!(format_amount(-0.001), "0");
    }
}
