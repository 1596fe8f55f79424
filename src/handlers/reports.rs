use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::core::analysis;
use crate::core::grid::Grid;
use crate::core::parser::{self, AttendanceBlock};
use crate::core::stats::{self, EmployeeStatistics, GlobalStatistics};
use crate::database::repositories::{EmployeeRepository, ReportRepository, ScheduleRepository};
use crate::error::AppError;
use crate::handlers::shared::{format_minutes, ApiResponse};
use crate::services::{ReportStore, StoredReport};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub grid: Grid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeSummary {
    pub person_id: String,
    pub name: String,
    pub department: String,
    pub position: String,
    pub joining_date: String,
    pub statistics: EmployeeStatistics,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub token: String,
    pub employees: Vec<EmployeeSummary>,
    pub global: GlobalStatistics,
    pub warnings: Vec<String>,
    pub persistence_message: String,
}

/// Ingest a raw attendance grid: parse it, compute statistics against the
/// pre-loaded schedule context, persist what was found, and stash the batch
/// under a fresh token for follow-up requests.
pub async fn upload_report(
    body: web::Json<UploadRequest>,
    employees: web::Data<EmployeeRepository>,
    schedules: web::Data<ScheduleRepository>,
    reports: web::Data<ReportRepository>,
    store: web::Data<ReportStore>,
) -> Result<HttpResponse, AppError> {
    let mut parsed = parser::parse(&body.grid);

    // Schedules and overrides are fetched once for the whole batch. If this
    // fails we stop: statistics computed without the context would be
    // quietly wrong, which is worse than an error.
    let context = schedules
        .calculation_context()
        .await
        .map_err(|e| AppError::ContextUnavailable(e.to_string()))?;
    let overrides = reports
        .manual_overrides()
        .await
        .map_err(|e| AppError::ContextUnavailable(e.to_string()))?;

    let (statistics, stat_warnings) = stats::compute_batch(&parsed.blocks, &context, &overrides);
    parsed.warnings.extend(stat_warnings);
    let global = stats::global_statistics(&statistics);

    // Persistence failures do not void the computed report; the caller still
    // gets their numbers plus a message saying the store is behind.
    let mut persistence_message = String::new();
    let mut punches = 0u64;
    for (block, block_stats) in parsed.blocks.iter().zip(&statistics) {
        match employees.save_block(block).await {
            Ok(count) => punches += count,
            Err(err) => {
                log::error!("failed to persist block for {}: {}", block.person_id, err);
                persistence_message = format!("some rows were not persisted: {}", err);
            }
        }
        if let Err(err) = reports
            .upsert_statistics(&block.person_id, block_stats, false)
            .await
        {
            log::error!("failed to persist report for {}: {}", block.person_id, err);
        }
    }
    if persistence_message.is_empty() {
        persistence_message = format!(
            "saved {} employee(s), {} punch row(s)",
            parsed.blocks.len(),
            punches
        );
    }

    let summaries = summarize(&parsed.blocks, &statistics);
    let warnings = parsed.warnings.clone();

    let token = store
        .insert(StoredReport {
            report: parsed,
            statistics,
            global: global.clone(),
            created_at: Utc::now(),
        })
        .await;

    Ok(HttpResponse::Ok().json(ApiResponse::success(UploadResponse {
        token,
        employees: summaries,
        global,
        warnings,
        persistence_message,
    })))
}

/// Full stored batch for a token, 404 once it has expired. An expired token
/// is routine (re-upload), not a computation error.
pub async fn get_report(
    token: web::Path<String>,
    store: web::Data<ReportStore>,
) -> Result<HttpResponse, AppError> {
    match store.get(&token).await {
        Some(stored) => Ok(HttpResponse::Ok().json(ApiResponse::success(&*stored))),
        None => Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Report expired or unknown token"))),
    }
}

/// Flat summary row per employee, the shape the downstream PDF and
/// spreadsheet renderers consume.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub person_id: String,
    pub name: String,
    pub department: String,
    pub days_worked: i64,
    pub days_absent: i64,
    pub rest_days: i64,
    pub total_hours: f64,
    pub overtime: String,
    pub undertime: String,
    pub late_duration: String,
    pub late_count: i64,
}

pub async fn export_report(
    token: web::Path<String>,
    store: web::Data<ReportStore>,
) -> Result<HttpResponse, AppError> {
    let Some(stored) = store.get(&token).await else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Report expired or unknown token")));
    };

    let rows: Vec<ExportRow> = stored
        .report
        .blocks
        .iter()
        .zip(&stored.statistics)
        .map(|(block, s)| ExportRow {
            person_id: block.person_id.clone(),
            name: block.name.clone(),
            department: block.department.clone(),
            days_worked: s.total_days_worked,
            days_absent: s.total_days_absent,
            rest_days: s.total_weekends,
            total_hours: s.total_hours,
            overtime: format_minutes(s.total_overtime_minutes),
            undertime: format_minutes(s.total_undertime_minutes),
            late_duration: format_minutes(s.total_late_minutes),
            late_count: s.count_lates,
        })
        .collect();

    Ok(HttpResponse::Ok().json(ApiResponse::success(rows)))
}

/// Days in the stored batch where someone clocked in but never out, the
/// list the payroll follow-up works from.
pub async fn report_anomalies(
    token: web::Path<String>,
    store: web::Data<ReportStore>,
) -> Result<HttpResponse, AppError> {
    let Some(stored) = store.get(&token).await else {
        return Ok(HttpResponse::NotFound()
            .json(ApiResponse::<()>::error("Report expired or unknown token")));
    };

    let anomalies = analysis::missing_checkouts(&stored.report.blocks);
    Ok(HttpResponse::Ok().json(ApiResponse::success(anomalies)))
}

pub fn summarize(
    blocks: &[AttendanceBlock],
    statistics: &[EmployeeStatistics],
) -> Vec<EmployeeSummary> {
    blocks
        .iter()
        .zip(statistics)
        .map(|(block, s)| EmployeeSummary {
            person_id: block.person_id.clone(),
            name: block.name.clone(),
            department: block.department.clone(),
            position: block.position.clone(),
            joining_date: block.joining_date.clone(),
            statistics: s.clone(),
        })
        .collect()
}
