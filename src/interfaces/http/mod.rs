use crate::domain::app_config::ServerConfig;
use crate::domain::cleanup::ExportMetadata;
use crate::domain::error::{AppError, Result};
use crate::interfaces::state::AppState;
use actix_cors::Cors;
use actix_web::http::{header, StatusCode};
use actix_web::error::InternalError;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info, warn};
use validator::Validate;

const INDEX_HTML: &str = include_str!("../../../static/index.html");
const NO_SPREADSHEET_ID: &str = "No spreadsheet ID provided";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RemoveDuplicatesRequest {
    #[validate(required, length(min = 1))]
    pub spreadsheet_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DownloadCsvRequest {
    #[validate(required, length(min = 1))]
    pub spreadsheet_id: Option<String>,
    #[serde(default)]
    pub territory: Option<String>,
    #[serde(default)]
    pub round_robin_name: Option<String>,
    #[serde(default)]
    pub custom_field: Option<String>,
}

impl DownloadCsvRequest {
    fn metadata(&self) -> ExportMetadata {
        ExportMetadata {
            territory: self.territory.clone().unwrap_or_default(),
            round_robin_name: self.round_robin_name.clone().unwrap_or_default(),
            custom_field: self.custom_field.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody { error: message })
}

fn require_spreadsheet_id<'a>(request: &impl Validate, id: Option<&'a str>) -> Result<&'a str> {
    request
        .validate()
        .map_err(|_| AppError::ValidationError(NO_SPREADSHEET_ID.to_string()))?;
    id.ok_or_else(|| AppError::ValidationError(NO_SPREADSHEET_ID.to_string()))
}

fn export_error_status(err: &AppError) -> StatusCode {
    match err {
        AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

#[post("/remove-duplicates")]
async fn remove_duplicates(
    data: web::Data<AppState>,
    req: web::Json<RemoveDuplicatesRequest>,
) -> impl Responder {
    let spreadsheet_id = match require_spreadsheet_id(&*req, req.spreadsheet_id.as_deref()) {
        Ok(id) => id,
        Err(e) => {
            data.log("ERROR", "HttpApi", NO_SPREADSHEET_ID);
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    data.log(
        "INFO",
        "HttpApi",
        &format!("Removing duplicates for spreadsheet: {}", spreadsheet_id),
    );

    match data.remove_duplicates_use_case.execute(spreadsheet_id).await {
        Ok(report) => {
            data.log(
                "INFO",
                "Cleanup",
                &format!(
                    "Removed {} duplicate rows ({} -> {})",
                    report.duplicates_removed, report.initial_row_count, report.final_row_count
                ),
            );
            HttpResponse::Ok().json(report)
        }
        // Cleanup failures keep the 200 status and carry the message in the body.
        Err(e) => {
            data.log("ERROR", "Cleanup", &e.to_string());
            error_response(StatusCode::OK, e.to_string())
        }
    }
}

#[post("/download-csv")]
async fn download_csv(
    data: web::Data<AppState>,
    req: web::Json<DownloadCsvRequest>,
) -> impl Responder {
    let spreadsheet_id = match require_spreadsheet_id(&*req, req.spreadsheet_id.as_deref()) {
        Ok(id) => id,
        Err(e) => {
            data.log("ERROR", "HttpApi", "No spreadsheet ID provided for CSV download");
            return error_response(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    data.log(
        "INFO",
        "HttpApi",
        &format!("Downloading CSV for spreadsheet: {}", spreadsheet_id),
    );

    let use_case = &data.download_csv_use_case;
    match use_case.execute(spreadsheet_id, &req.metadata()).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header((
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", use_case.file_name()),
            ))
            .body(bytes),
        Err(e) => {
            let status = export_error_status(&e);
            let level = if status == StatusCode::NOT_FOUND { "WARN" } else { "ERROR" };
            data.log(level, "Export", &e.to_string());
            error_response(status, e.to_string())
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<AppState>) -> impl Responder {
    let logs = data.logs.lock().unwrap_or_else(PoisonError::into_inner);
    HttpResponse::Ok().json(&*logs)
}

/// Malformed or non-JSON bodies become `400 {"error": ...}`.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let message = err.to_string();
        InternalError::from_response(err, error_response(StatusCode::BAD_REQUEST, message)).into()
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(index)
        .service(remove_duplicates)
        .service(download_csv)
        .service(get_logs);
}

/// Record an operator-facing entry and mirror it to `tracing`. The buffer
/// keeps at most `capacity` entries, dropping the oldest.
pub fn add_log(
    logs: &Mutex<Vec<LogEntry>>,
    capacity: usize,
    level: &str,
    source: &str,
    message: &str,
) {
    match level {
        "ERROR" => error!(source = %source, "{}", message),
        "WARN" => warn!(source = %source, "{}", message),
        _ => info!(source = %source, "{}", message),
    }

    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap_or_else(PoisonError::into_inner);
    logs.push(entry);
    if logs.len() > capacity {
        let excess = logs.len() - capacity;
        logs.drain(..excess);
    }
}

pub fn start_server(state: Arc<AppState>, config: &ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::from(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Local operator tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run();

    Ok(server)
}
