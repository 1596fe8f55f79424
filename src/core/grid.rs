use serde::{Deserialize, Serialize};

/// A single spreadsheet cell. Attendance exports are produced by badge
/// terminals and then edited by hand, so a cell can hold text, a bare
/// number, or nothing at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    /// Trimmed text content, `None` for empty cells and blank strings.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => Some(format_number(*n)),
            Cell::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }

    /// Numeric content, accepting numeric-looking text.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Empty => None,
            Cell::Number(n) => Some(*n),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(_) => false,
            Cell::Text(s) => s.trim().is_empty(),
        }
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

/// A rectangular-ish grid of cells. Rows may be ragged; the parser indexes
/// defensively and never assumes a header row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Grid {
    pub rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// Cell at (row, col), `Cell::Empty` when out of bounds.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        static EMPTY: Cell = Cell::Empty;
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_cell_trims_and_blanks_to_none() {
        assert_eq!(Cell::Text("  Person ID ".into()).as_text().as_deref(), Some("Person ID"));
        assert_eq!(Cell::Text("   ".into()).as_text(), None);
        assert_eq!(Cell::Empty.as_text(), None);
    }

    #[test]
    fn numeric_cell_renders_without_trailing_zeroes() {
        assert_eq!(Cell::Number(480.0).as_text().as_deref(), Some("480"));
        assert_eq!(Cell::Text("480".into()).as_number(), Some(480.0));
    }
}
