use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::core::grid::Grid;
use crate::core::schedule::WeeklySchedule;
use crate::database::repositories::{EmployeeRepository, ScheduleRepository};
use crate::error::AppError;
use crate::handlers::shared::{parse_week, ApiResponse, WeekQuery};
use crate::services::import;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyScheduleResponse {
    pub schedule: WeeklySchedule,
    pub is_fallback: bool,
}

/// Individual weekly schedule for one employee; falls back to the
/// departmental default (flagged as such) when no individual plan exists.
pub async fn get_weekly_schedule(
    person_id: web::Path<String>,
    query: web::Query<WeekQuery>,
    schedules: web::Data<ScheduleRepository>,
    employees: web::Data<EmployeeRepository>,
) -> Result<HttpResponse, AppError> {
    let monday = parse_week(&query.week)?;

    if let Some(schedule) = schedules.get_weekly(&person_id, monday).await? {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(WeeklyScheduleResponse {
            schedule,
            is_fallback: false,
        })));
    }

    let department = employees
        .get_by_person_id(&person_id)
        .await?
        .and_then(|e| e.department);
    if let Some(department) = department {
        if let Some(schedule) = schedules.get_department(&department).await? {
            return Ok(HttpResponse::Ok().json(ApiResponse::success(WeeklyScheduleResponse {
                schedule,
                is_fallback: true,
            })));
        }
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(WeeklyScheduleResponse {
        schedule: WeeklySchedule::default(),
        is_fallback: false,
    })))
}

pub async fn put_weekly_schedule(
    person_id: web::Path<String>,
    query: web::Query<WeekQuery>,
    body: web::Json<WeeklySchedule>,
    schedules: web::Data<ScheduleRepository>,
) -> Result<HttpResponse, AppError> {
    let monday = parse_week(&query.week)?;
    schedules
        .save_weekly(&person_id, monday, &body)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Schedule saved",
    )))
}

/// Departments that can carry a default schedule.
pub async fn list_departments(
    employees: web::Data<EmployeeRepository>,
) -> Result<HttpResponse, AppError> {
    let departments = employees.get_departments().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(departments)))
}

pub async fn get_department_schedule(
    department: web::Path<String>,
    schedules: web::Data<ScheduleRepository>,
) -> Result<HttpResponse, AppError> {
    let schedule = schedules
        .get_department(&department)
        .await?
        .unwrap_or_default();
    Ok(HttpResponse::Ok().json(ApiResponse::success(schedule)))
}

pub async fn put_department_schedule(
    department: web::Path<String>,
    body: web::Json<WeeklySchedule>,
    schedules: web::Data<ScheduleRepository>,
) -> Result<HttpResponse, AppError> {
    schedules.save_department(&department, &body).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Department schedule saved",
    )))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateResponse {
    pub name: String,
    pub schedule: WeeklySchedule,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveTemplateRequest {
    pub name: String,
    pub schedule: WeeklySchedule,
}

pub async fn get_templates(
    schedules: web::Data<ScheduleRepository>,
) -> Result<HttpResponse, AppError> {
    let templates: Vec<TemplateResponse> = schedules
        .get_templates()
        .await?
        .into_iter()
        .map(|(name, schedule)| TemplateResponse { name, schedule })
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(templates)))
}

pub async fn save_template(
    body: web::Json<SaveTemplateRequest>,
    schedules: web::Data<ScheduleRepository>,
) -> Result<HttpResponse, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::BadRequest("template name is required".to_string()));
    }
    schedules.save_template(body.name.trim(), &body.schedule).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Template saved",
    )))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub grid: Grid,
    pub week_start: String,
    pub department: Option<String>,
}

/// Import a planner grid of free-form shift text as individual weekly
/// schedules. Row-level problems are reported, not fatal.
pub async fn import_plannings(
    body: web::Json<ImportRequest>,
    employees: web::Data<EmployeeRepository>,
    schedules: web::Data<ScheduleRepository>,
) -> Result<HttpResponse, AppError> {
    let monday = parse_week(&body.week_start)?;
    let known = employees.get_all().await?;

    let outcome = import::import_plannings(
        &body.grid,
        monday,
        body.department.as_deref(),
        &known,
        &schedules,
    )
    .await
    .map_err(|e| AppError::BadRequest(e.to_string()))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(outcome)))
}
