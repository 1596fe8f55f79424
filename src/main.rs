use actix_cors::Cors;
use actix_web::{get, middleware::Logger, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Result;

use attendly::database::{
    init_database,
    repositories::{EmployeeRepository, ReportRepository, ScheduleRepository},
};
use attendly::handlers::{dashboard, employees, reports, schedules};
use attendly::services::ReportStore;
use attendly::Config;

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Attendly API v1.0")
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now()
    }))
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = Config::from_env()?;
    log::info!("starting attendly ({} environment)", config.environment);

    let pool = init_database(&config.database_url).await?;
    log::info!("database ready, migrations applied");

    // Repositories and the token-keyed report store
    let employee_repository = EmployeeRepository::new(pool.clone());
    let schedule_repository = ScheduleRepository::new(pool.clone());
    let report_repository = ReportRepository::new(pool.clone());
    let report_store = ReportStore::new(config.report_cache_capacity, config.report_ttl_minutes);

    let employee_repo_data = web::Data::new(employee_repository);
    let schedule_repo_data = web::Data::new(schedule_repository);
    let report_repo_data = web::Data::new(report_repository);
    let report_store_data = web::Data::new(report_store);
    let config_data = web::Data::new(config.clone());

    let server_address = config.server_address();
    log::info!("listening on http://{}", server_address);

    HttpServer::new(move || {
        App::new()
            .app_data(employee_repo_data.clone())
            .app_data(schedule_repo_data.clone())
            .app_data(report_repo_data.clone())
            .app_data(report_store_data.clone())
            .app_data(config_data.clone())
            .wrap(
                Cors::default()
                    .allowed_origin("http://localhost:3000")
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec!["Authorization", "Content-Type", "Accept"])
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(hello)
            .service(health)
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/reports")
                            .route("", web::post().to(reports::upload_report))
                            .route("/{token}", web::get().to(reports::get_report))
                            .route("/{token}/export", web::get().to(reports::export_report))
                            .route(
                                "/{token}/anomalies",
                                web::get().to(reports::report_anomalies),
                            ),
                    )
                    .route("/dashboard", web::get().to(dashboard::get_dashboard))
                    .service(
                        web::scope("/schedules")
                            .route("/departments", web::get().to(schedules::list_departments))
                            .route(
                                "/departments/{name}",
                                web::get().to(schedules::get_department_schedule),
                            )
                            .route(
                                "/departments/{name}",
                                web::put().to(schedules::put_department_schedule),
                            )
                            .route("/templates", web::get().to(schedules::get_templates))
                            .route("/templates", web::post().to(schedules::save_template))
                            .route("/import", web::post().to(schedules::import_plannings))
                            .route(
                                "/{person_id}",
                                web::get().to(schedules::get_weekly_schedule),
                            )
                            .route(
                                "/{person_id}",
                                web::put().to(schedules::put_weekly_schedule),
                            ),
                    )
                    .service(
                        web::scope("/employees")
                            .route(
                                "/{person_id}/statistics",
                                web::get().to(employees::get_statistics),
                            )
                            .route(
                                "/{person_id}/statistics",
                                web::put().to(employees::put_statistics_override),
                            )
                            .route(
                                "/{person_id}/statistics",
                                web::delete().to(employees::delete_statistics_override),
                            )
                            .route(
                                "/{person_id}/timesheet",
                                web::get().to(employees::get_timesheet),
                            ),
                    ),
            )
    })
    .bind(&server_address)?
    .run()
    .await
    .map_err(|e| anyhow::anyhow!("server error: {}", e))
}
