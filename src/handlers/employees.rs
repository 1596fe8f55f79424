use actix_web::{web, HttpResponse};

use crate::core::analysis;
use crate::core::stats::EmployeeStatistics;
use crate::database::repositories::{EmployeeRepository, ReportRepository, ScheduleRepository};
use crate::error::AppError;
use crate::handlers::shared::{parse_week, ApiResponse, WeekQuery};

/// Latest stored report row for one employee, manual or computed.
pub async fn get_statistics(
    person_id: web::Path<String>,
    reports: web::Data<ReportRepository>,
) -> Result<HttpResponse, AppError> {
    match reports.get_report(&person_id).await? {
        Some(row) => Ok(HttpResponse::Ok().json(ApiResponse::success(row))),
        None => Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error(
            "No report stored for this employee",
        ))),
    }
}

/// Store a manual statistics override. Overrides replace the computed
/// numbers at display and export time; recomputation for other employees is
/// unaffected.
pub async fn put_statistics_override(
    person_id: web::Path<String>,
    body: web::Json<EmployeeStatistics>,
    reports: web::Data<ReportRepository>,
) -> Result<HttpResponse, AppError> {
    reports
        .upsert_statistics(&person_id, &body, true)
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
        None,
        "Manual override saved",
    )))
}

/// Seven-day punches-versus-plan detail for one employee's week, built from
/// persisted punch rows and the same schedule snapshot the batch uses.
pub async fn get_timesheet(
    person_id: web::Path<String>,
    query: web::Query<WeekQuery>,
    employees: web::Data<EmployeeRepository>,
    schedules: web::Data<ScheduleRepository>,
) -> Result<HttpResponse, AppError> {
    let monday = parse_week(&query.week)?;

    let Some(employee) = employees.get_by_person_id(&person_id).await? else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Unknown employee")));
    };
    let block = employees.fetch_block_for(&employee).await?;

    let context = schedules
        .calculation_context()
        .await
        .map_err(|e| AppError::ContextUnavailable(e.to_string()))?;

    let days = analysis::week_timesheet(
        &person_id,
        employee.department.as_deref(),
        block.as_ref(),
        &context,
        monday,
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(days)))
}

/// Drop a manual override; the next batch recomputes the row.
pub async fn delete_statistics_override(
    person_id: web::Path<String>,
    reports: web::Data<ReportRepository>,
) -> Result<HttpResponse, AppError> {
    if reports.clear_override(&person_id).await? {
        Ok(HttpResponse::Ok().json(ApiResponse::<()>::success_with_message(
            None,
            "Manual override cleared",
        )))
    } else {
        Ok(HttpResponse::NotFound().json(ApiResponse::<()>::error(
            "No manual override for this employee",
        )))
    }
}
