use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::core::stats::{self, GlobalStatistics};
use crate::database::repositories::{EmployeeRepository, ReportRepository, ScheduleRepository};
use crate::error::AppError;
use crate::handlers::reports::{summarize, EmployeeSummary};
use crate::handlers::shared::ApiResponse;

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub employees: Vec<EmployeeSummary>,
    pub global: GlobalStatistics,
    pub periods: Vec<Period>,
    pub period: Option<Period>,
    pub warnings: Vec<String>,
}

/// Recompute statistics from persisted punch rows, filtered to a calendar
/// month when one is given (defaulting to the most recent month that has
/// data). An empty store yields an empty dashboard, not an error.
pub async fn get_dashboard(
    query: web::Query<DashboardQuery>,
    employees: web::Data<EmployeeRepository>,
    schedules: web::Data<ScheduleRepository>,
    reports: web::Data<ReportRepository>,
) -> Result<HttpResponse, AppError> {
    let periods: Vec<Period> = employees
        .available_periods()
        .await?
        .into_iter()
        .map(|(year, month)| Period { year, month })
        .collect();

    let selected = match (query.year, query.month) {
        (Some(year), Some(month)) => Some(Period { year, month }),
        _ => periods.first().map(|p| Period {
            year: p.year,
            month: p.month,
        }),
    };

    let blocks = employees
        .fetch_blocks(
            selected.as_ref().map(|p| p.year),
            selected.as_ref().map(|p| p.month),
        )
        .await?;

    if blocks.is_empty() {
        return Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            Some(DashboardResponse {
                employees: Vec::new(),
                global: GlobalStatistics::default(),
                periods,
                period: selected,
                warnings: Vec::new(),
            }),
            "No attendance data for the selected period",
        )));
    }

    let context = schedules
        .calculation_context()
        .await
        .map_err(|e| AppError::ContextUnavailable(e.to_string()))?;
    let overrides = reports
        .manual_overrides()
        .await
        .map_err(|e| AppError::ContextUnavailable(e.to_string()))?;

    let (statistics, warnings) = stats::compute_batch(&blocks, &context, &overrides);
    let global = stats::global_statistics(&statistics);

    Ok(HttpResponse::Ok().json(ApiResponse::success(DashboardResponse {
        employees: summarize(&blocks, &statistics),
        global,
        periods,
        period: selected,
        warnings,
    })))
}
