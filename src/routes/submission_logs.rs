use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use crate::error::AppError;
use crate::models::DailySubmissions;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct LogParams {
    pub date: Option<String>,
    pub format: Option<String>,
}

/// Without `date` (or with an empty one): list log files. Otherwise that
/// day's submissions.
pub async fn query(
    State(state): State<SharedState>,
    params: Result<Query<LogParams>, QueryRejection>,
) -> Result<Response, AppError> {
    let Query(params) = params.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let Some(date) = params.date.filter(|d| !d.is_empty()) else {
        let files = state.store.list_files().await?;
        return Ok(Json(serde_json::json!({ "files": files })).into_response());
    };

    let daily = state.store.submissions_for(&date).await?;

    match params.format.as_deref().unwrap_or("json") {
        "csv" => {
            let disposition = format!("attachment; filename=\"submissions-{}.csv\"", daily.date);
            Ok((
                [
                    (header::CONTENT_TYPE, "text/csv".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                export_csv(&daily),
            )
                .into_response())
        }
        _ => Ok(Json(daily).into_response()),
    }
}

pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

fn export_csv(daily: &DailySubmissions) -> String {
    use std::fmt::Write;
    let mut csv = String::new();

    // Union of top-level keys, first seen first
    let mut keys: Vec<String> = Vec::new();
    let mut has_scalars = false;
    for record in &daily.submissions {
        match record.as_object() {
            Some(obj) => {
                for key in obj.keys() {
                    if !keys.contains(key) {
                        keys.push(key.clone());
                    }
                }
            }
            None => has_scalars = true,
        }
    }
    if has_scalars && !keys.iter().any(|k| k == "value") {
        keys.push("value".to_string());
    }

    let header: Vec<String> = keys.iter().map(|k| csv_escape(k.as_str())).collect();
    let _ = writeln!(csv, "{}", header.join(","));

    for record in &daily.submissions {
        let row: Vec<String> = keys
            .iter()
            .map(|key| match record.as_object() {
                Some(obj) => obj.get(key).map(csv_cell).unwrap_or_default(),
                None if key == "value" => csv_cell(record),
                None => String::new(),
            })
            .collect();
        let _ = writeln!(csv, "{}", row.join(","));
    }

    csv
}

fn csv_cell(value: &Value) -> String {
    match value {
        Value::String(s) => csv_escape(s),
        Value::Null => String::new(),
        other => csv_escape(&other.to_string()),
    }
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}
