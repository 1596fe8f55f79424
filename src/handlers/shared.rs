use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::core::schedule::monday_of_week;
use crate::error::AppError;

/// Uniform response envelope for every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    pub fn success_with_message(data: Option<T>, message: &str) -> Self {
        Self {
            success: true,
            data,
            message: Some(message.to_string()),
        }
    }
}

impl ApiResponse<()> {
    pub fn error(message: &str) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.to_string()),
        }
    }
}

/// Minutes rendered as the "3h05" duration format the summary tables use.
pub fn format_minutes(minutes: i64) -> String {
    format!("{}h{:02}", minutes / 60, minutes % 60)
}

/// Query string for the endpoints that address one stored week.
#[derive(Debug, Deserialize)]
pub struct WeekQuery {
    pub week: String,
}

/// Parse a `week=YYYY-MM-DD` query value and normalize it to the Monday of
/// that week, the key every weekly schedule is stored under.
pub fn parse_week(raw: &str) -> Result<NaiveDate, AppError> {
    let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid week date '{}'", raw)))?;
    Ok(monday_of_week(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duration_format_pads_minutes() {
        assert_eq!(format_minutes(0), "0h00");
        assert_eq!(format_minutes(65), "1h05");
        assert_eq!(format_minutes(480), "8h00");
    }
}
