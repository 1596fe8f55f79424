use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::MySqlPool;

use crate::core::schedule::{CalculationContext, WeeklySchedule};
use crate::database::models::{DepartmentScheduleRow, ScheduleTemplateRow, WeeklyScheduleRow};

#[derive(Clone)]
pub struct ScheduleRepository {
    pool: MySqlPool,
}

impl ScheduleRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    // Individual weekly schedules

    pub async fn save_weekly(
        &self,
        person_id: &str,
        week_monday: NaiveDate,
        schedule: &WeeklySchedule,
    ) -> Result<()> {
        let data_json = serde_json::to_string(schedule)?;
        sqlx::query(
            r#"
            INSERT INTO weekly_schedules (person_id, week_monday, data_json)
            VALUES (?, ?, ?)
            ON DUPLICATE KEY UPDATE data_json = VALUES(data_json)
            "#,
        )
        .bind(person_id)
        .bind(week_monday)
        .bind(data_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_weekly(
        &self,
        person_id: &str,
        week_monday: NaiveDate,
    ) -> Result<Option<WeeklySchedule>> {
        let row = sqlx::query_scalar::<_, String>(
            "SELECT data_json FROM weekly_schedules WHERE person_id = ? AND week_monday = ?",
        )
        .bind(person_id)
        .bind(week_monday)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(json) => Ok(Some(
                serde_json::from_str(&json).context("stored weekly schedule is not valid JSON")?,
            )),
            None => Ok(None),
        }
    }

    // Departmental defaults

    pub async fn save_department(&self, department: &str, schedule: &WeeklySchedule) -> Result<()> {
        let data_json = serde_json::to_string(schedule)?;
        sqlx::query(
            r#"
            INSERT INTO department_schedules (department, data_json)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE data_json = VALUES(data_json)
            "#,
        )
        .bind(department)
        .bind(data_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_department(&self, department: &str) -> Result<Option<WeeklySchedule>> {
        let row = sqlx::query_scalar::<_, String>(
            "SELECT data_json FROM department_schedules WHERE department = ?",
        )
        .bind(department)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(json) => Ok(Some(
                serde_json::from_str(&json)
                    .context("stored department schedule is not valid JSON")?,
            )),
            None => Ok(None),
        }
    }

    // Named templates

    pub async fn get_templates(&self) -> Result<Vec<(String, WeeklySchedule)>> {
        let rows = sqlx::query_as::<_, ScheduleTemplateRow>(
            "SELECT name, data_json FROM schedule_templates ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut templates = Vec::with_capacity(rows.len());
        for row in rows {
            match serde_json::from_str(&row.data_json) {
                Ok(schedule) => templates.push((row.name, schedule)),
                Err(err) => log::warn!("skipping unreadable template '{}': {}", row.name, err),
            }
        }
        Ok(templates)
    }

    pub async fn save_template(&self, name: &str, schedule: &WeeklySchedule) -> Result<()> {
        let data_json = serde_json::to_string(schedule)?;
        sqlx::query(
            r#"
            INSERT INTO schedule_templates (name, data_json)
            VALUES (?, ?)
            ON DUPLICATE KEY UPDATE data_json = VALUES(data_json)
            "#,
        )
        .bind(name)
        .bind(data_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Fetch every schedule a batch computation needs in one pass: three
    /// queries total, regardless of how many employees or days the batch
    /// covers. Query failures propagate; computing statistics against a
    /// silently empty context would produce wrong numbers, not degraded ones.
    pub async fn calculation_context(&self) -> Result<CalculationContext> {
        let mut context = CalculationContext::default();

        let departments = sqlx::query_as::<_, DepartmentScheduleRow>(
            "SELECT department, data_json FROM department_schedules",
        )
        .fetch_all(&self.pool)
        .await?;

        for row in departments {
            match serde_json::from_str(&row.data_json) {
                Ok(schedule) => {
                    context.department_schedules.insert(row.department, schedule);
                }
                Err(err) => log::warn!(
                    "skipping unreadable department schedule '{}': {}",
                    row.department,
                    err
                ),
            }
        }

        let weekly = sqlx::query_as::<_, WeeklyScheduleRow>(
            "SELECT person_id, week_monday, data_json FROM weekly_schedules",
        )
        .fetch_all(&self.pool)
        .await?;

        for row in weekly {
            match serde_json::from_str(&row.data_json) {
                Ok(schedule) => {
                    context
                        .individual_schedules
                        .insert((row.person_id, row.week_monday), schedule);
                }
                Err(err) => log::warn!(
                    "skipping unreadable weekly schedule for {} ({}): {}",
                    row.person_id,
                    row.week_monday,
                    err
                ),
            }
        }

        let departments_by_employee = sqlx::query_as::<_, (String, Option<String>)>(
            "SELECT person_id, department FROM employees",
        )
        .fetch_all(&self.pool)
        .await?;

        for (person_id, department) in departments_by_employee {
            if let Some(department) = department {
                context.employee_departments.insert(person_id, department);
            }
        }

        Ok(context)
    }
}
