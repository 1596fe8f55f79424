use anyhow::Result;
use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::core::parser::{AttendanceBlock, MISSING, UNKNOWN};
use crate::database::models::{AttendanceDay, Employee};

#[derive(Clone)]
pub struct EmployeeRepository {
    pool: MySqlPool,
}

impl EmployeeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    pub async fn get_all(&self) -> Result<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT id, person_id, name, department, position, joining_date FROM employees",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    pub async fn get_by_person_id(&self, person_id: &str) -> Result<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(
            "SELECT id, person_id, name, department, position, joining_date \
             FROM employees WHERE person_id = ?",
        )
        .bind(person_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(employee)
    }

    /// Distinct department names, excluding the parser's unknown sentinel.
    pub async fn get_departments(&self) -> Result<Vec<String>> {
        let departments = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT department FROM employees \
             WHERE department IS NOT NULL AND department != ? ORDER BY department",
        )
        .bind(UNKNOWN)
        .fetch_all(&self.pool)
        .await?;

        Ok(departments)
    }

    /// Upsert one parsed block's identity row and all of its punch rows.
    /// Returns the number of punch rows written. Days without a usable
    /// calendar date are skipped, matching the parser's local-failure policy.
    pub async fn save_block(&self, block: &AttendanceBlock) -> Result<u64> {
        let employee_id = self.upsert_identity(block).await?;
        let mut written = 0u64;

        for (i, date_cell) in block.dates.iter().enumerate() {
            let Some(day) = parse_punch_date(date_cell) else {
                continue;
            };

            let check_in = punch_value(block.check_ins.get(i));
            let check_out = punch_value(block.check_outs.get(i));
            let minutes = block.attended_minutes.get(i).copied().unwrap_or(0).max(0);
            let status = punch_value(block.statuses.get(i));

            sqlx::query(
                r#"
                INSERT INTO attendance_days (employee_id, day, check_in, check_out, minutes, status)
                VALUES (?, ?, ?, ?, ?, ?)
                ON DUPLICATE KEY UPDATE
                    check_in = VALUES(check_in),
                    check_out = VALUES(check_out),
                    minutes = VALUES(minutes),
                    status = VALUES(status)
                "#,
            )
            .bind(employee_id)
            .bind(day)
            .bind(check_in)
            .bind(check_out)
            .bind(minutes)
            .bind(status)
            .execute(&self.pool)
            .await?;

            written += 1;
        }

        Ok(written)
    }

    async fn upsert_identity(&self, block: &AttendanceBlock) -> Result<i64> {
        // joining_date is deliberately not refreshed on conflict: the first
        // import that carried it wins, later exports often blank the field.
        sqlx::query(
            r#"
            INSERT INTO employees (person_id, name, department, position, joining_date)
            VALUES (?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                name = VALUES(name),
                department = VALUES(department),
                position = VALUES(position)
            "#,
        )
        .bind(&block.person_id)
        .bind(&block.name)
        .bind(&block.department)
        .bind(&block.position)
        .bind(&block.joining_date)
        .execute(&self.pool)
        .await?;

        let id = sqlx::query_scalar::<_, i64>("SELECT id FROM employees WHERE person_id = ?")
            .bind(&block.person_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(id)
    }

    /// Rebuild attendance blocks from persisted punch rows, optionally
    /// filtered to one calendar month. Employees with no rows in the period
    /// are omitted.
    pub async fn fetch_blocks(
        &self,
        year: Option<i32>,
        month: Option<u32>,
    ) -> Result<Vec<AttendanceBlock>> {
        let employees = self.get_all().await?;
        let mut blocks = Vec::new();

        for employee in employees {
            let days = match (year, month) {
                (Some(y), Some(m)) => {
                    sqlx::query_as::<_, AttendanceDay>(
                        "SELECT id, employee_id, day, check_in, check_out, minutes, status \
                         FROM attendance_days \
                         WHERE employee_id = ? AND YEAR(day) = ? AND MONTH(day) = ? \
                         ORDER BY day",
                    )
                    .bind(employee.id)
                    .bind(y)
                    .bind(m)
                    .fetch_all(&self.pool)
                    .await?
                }
                _ => {
                    sqlx::query_as::<_, AttendanceDay>(
                        "SELECT id, employee_id, day, check_in, check_out, minutes, status \
                         FROM attendance_days WHERE employee_id = ? ORDER BY day",
                    )
                    .bind(employee.id)
                    .fetch_all(&self.pool)
                    .await?
                }
            };

            if days.is_empty() {
                continue;
            }

            blocks.push(block_from_rows(&employee, &days));
        }

        Ok(blocks)
    }

    /// Rebuild the full attendance block for one employee. `None` when the
    /// employee has no punch rows at all.
    pub async fn fetch_block_for(&self, employee: &Employee) -> Result<Option<AttendanceBlock>> {
        let days = sqlx::query_as::<_, AttendanceDay>(
            "SELECT id, employee_id, day, check_in, check_out, minutes, status \
             FROM attendance_days WHERE employee_id = ? ORDER BY day",
        )
        .bind(employee.id)
        .fetch_all(&self.pool)
        .await?;

        if days.is_empty() {
            return Ok(None);
        }
        Ok(Some(block_from_rows(employee, &days)))
    }

    /// Year/month pairs that have punch data, most recent first.
    pub async fn available_periods(&self) -> Result<Vec<(i32, u32)>> {
        let rows = sqlx::query_as::<_, (i32, i32)>(
            "SELECT DISTINCT YEAR(day), MONTH(day) FROM attendance_days \
             ORDER BY YEAR(day) DESC, MONTH(day) DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|(y, m)| (y, m as u32)).collect())
    }
}

fn block_from_rows(employee: &Employee, days: &[AttendanceDay]) -> AttendanceBlock {
    let text = |value: &Option<String>| {
        value
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string())
    };

    AttendanceBlock {
        person_id: employee.person_id.clone(),
        name: text(&employee.name),
        department: text(&employee.department),
        position: text(&employee.position),
        joining_date: text(&employee.joining_date),
        dates: days
            .iter()
            .map(|d| d.day.format("%Y-%m-%d").to_string())
            .collect(),
        check_ins: days
            .iter()
            .map(|d| d.check_in.clone().unwrap_or_else(|| MISSING.to_string()))
            .collect(),
        check_outs: days
            .iter()
            .map(|d| d.check_out.clone().unwrap_or_else(|| MISSING.to_string()))
            .collect(),
        attended_minutes: days.iter().map(|d| d.minutes as i64).collect(),
        statuses: days
            .iter()
            .map(|d| d.status.clone().unwrap_or_else(|| MISSING.to_string()))
            .collect(),
        summary: String::new(),
    }
}

fn punch_value(cell: Option<&String>) -> Option<String> {
    let value = cell?.trim();
    if value.is_empty() || value == MISSING || value == "nan" || value == "None" {
        None
    } else {
        Some(value.to_string())
    }
}

/// Exports are inconsistent about date formats, so try the handful seen in
/// the wild before giving up on a row.
fn parse_punch_date(cell: &str) -> Option<NaiveDate> {
    let trimmed = cell.trim();
    if trimmed.is_empty() || trimmed == MISSING || trimmed == "nan" || trimmed == "None" {
        return None;
    }

    let head = trimmed.split_whitespace().next().unwrap_or(trimmed);
    for format in ["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(head, format) {
            return Some(date);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punch_date_accepts_common_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 4);
        assert_eq!(parse_punch_date("2024-03-04"), expected);
        assert_eq!(parse_punch_date("04/03/2024"), expected);
        assert_eq!(parse_punch_date("2024-03-04 00:00:00"), expected);
        assert_eq!(parse_punch_date("-"), None);
    }
}
