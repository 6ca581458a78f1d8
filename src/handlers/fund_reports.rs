use axum::{
    Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use super::{ensure_pdf, read_multipart};
use crate::{
    AppState,
    client::ForwardedCookies,
    error::AppError,
    models::{FundReport, FundReportMetadata, ReportType, UpdateFundReportRequest},
    services::fund_reports,
    validation::ValidatedJson,
};

#[derive(Debug, Deserialize, utoipa::IntoParams)]
pub struct ReportListQuery {
    pub fund_id: Option<Uuid>,
}

#[utoipa::path(
    get,
    path = "/api/admin/fund-reports",
    params(ReportListQuery),
    responses((status = 200, description = "Reports", body = [FundReport]))
)]
pub async fn list_reports(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Query(query): Query<ReportListQuery>,
) -> Result<Json<Vec<FundReport>>, AppError> {
    Ok(Json(fund_reports::list(&state.backend(&cookies), query.fund_id).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/fund-reports/{id}",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses((status = 200, description = "Report", body = FundReport))
)]
pub async fn get_report(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FundReport>, AppError> {
    Ok(Json(fund_reports::get(&state.backend(&cookies), id).await?))
}

/// Parses the text parts of the upload form into validated metadata.
fn metadata_from(form: &super::MultipartForm) -> Result<FundReportMetadata, AppError> {
    let fund_id = form
        .field("fund_id")
        .ok_or_else(|| AppError::Validation(vec!["fund_id: is required".to_string()]))?;
    let fund_id = Uuid::parse_str(fund_id)
        .map_err(|_| AppError::Validation(vec!["fund_id: must be a UUID".to_string()]))?;

    let report_type = form
        .field("report_type")
        .ok_or_else(|| AppError::Validation(vec!["report_type: is required".to_string()]))?;
    let report_type: ReportType = serde_json::from_value(serde_json::Value::String(report_type.to_string()))
        .map_err(|_| AppError::Validation(vec!["report_type: unknown report type".to_string()]))?;

    let metadata = FundReportMetadata {
        fund_id,
        title: form.field("title").unwrap_or_default().to_string(),
        report_type,
        period: form.field("period").map(str::to_string),
    };
    metadata.validate()?;
    Ok(metadata)
}

/// create_report
///
/// [Admin Route] Multipart upload: `fund_id`, `title`, `report_type`, optional
/// `period`, and the PDF in `file`.
#[utoipa::path(
    post,
    path = "/api/admin/fund-reports",
    request_body(content_type = "multipart/form-data", description = "Report metadata and PDF file"),
    responses(
        (status = 201, description = "Uploaded", body = FundReport),
        (status = 400, description = "Missing or invalid file")
    )
)]
pub async fn create_report(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<FundReport>), AppError> {
    let mut form = read_multipart(multipart, "file").await?;
    let metadata = metadata_from(&form)?;
    let file = form.require_file()?;
    ensure_pdf(&file)?;

    let report = fund_reports::create(&state.backend(&cookies), &metadata, file).await?;
    tracing::info!(report_id = %report.id, fund_id = %report.fund_id, "fund report uploaded");
    Ok((StatusCode::CREATED, Json(report)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/fund-reports/{id}",
    params(("id" = Uuid, Path, description = "Report ID")),
    request_body = UpdateFundReportRequest,
    responses((status = 200, description = "Updated", body = FundReport))
)]
pub async fn update_report(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateFundReportRequest>,
) -> Result<Json<FundReport>, AppError> {
    Ok(Json(fund_reports::update(&state.backend(&cookies), id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/admin/fund-reports/{id}",
    params(("id" = Uuid, Path, description = "Report ID")),
    responses((status = 204, description = "Deleted"))
)]
pub async fn delete_report(
    cookies: ForwardedCookies,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    fund_reports::delete(&state.backend(&cookies), id).await?;
    Ok(StatusCode::NO_CONTENT)
}
