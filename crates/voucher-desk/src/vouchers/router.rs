use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::domain::{Role, Voucher, VoucherDraft, VoucherId};
use super::export::ReportExporter;
use super::panels::RolePanel;
use super::report::{ReportRange, VoucherReport};
use super::service::VoucherDesk;
use super::store::ApprovalOutcome;
use crate::error::AppError;

/// Router builder exposing the entry, approval, report, and export surfaces.
pub fn voucher_router<E>(service: Arc<VoucherDesk<E>>) -> Router
where
    E: ReportExporter + 'static,
{
    Router::new()
        .route(
            "/api/v1/vouchers",
            post(submit_handler::<E>).get(list_handler::<E>),
        )
        .route("/api/v1/vouchers/pending", get(pending_handler::<E>))
        .route(
            "/api/v1/vouchers/:voucher_id/approve",
            post(approve_handler::<E>),
        )
        .route("/api/v1/vouchers/report", get(report_handler::<E>))
        .route("/api/v1/vouchers/report/export", get(export_handler::<E>))
        .route("/api/v1/panels/:role", get(panel_handler::<E>))
        .with_state(service)
}

/// Report bounds as typed into the form; blanks are rejected when parsed.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

impl ReportQuery {
    fn range(&self) -> Result<ReportRange, AppError> {
        Ok(ReportRange::parse(&self.start, &self.end)?)
    }
}

/// Approval response; an unknown id is reported, not treated as an error.
#[derive(Debug, Serialize)]
pub struct ApprovalView {
    pub voucher_id: VoucherId,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher: Option<Voucher>,
}

impl From<ApprovalOutcome> for ApprovalView {
    fn from(outcome: ApprovalOutcome) -> Self {
        Self {
            voucher_id: outcome.voucher_id(),
            outcome: outcome.label(),
            voucher: outcome.voucher().cloned(),
        }
    }
}

pub(crate) async fn submit_handler<E>(
    State(service): State<Arc<VoucherDesk<E>>>,
    payload: Result<Json<VoucherDraft>, JsonRejection>,
) -> Response
where
    E: ReportExporter + 'static,
{
    let Json(draft) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            let payload = json!({ "error": rejection.body_text() });
            return (rejection.status(), Json(payload)).into_response();
        }
    };

    match service.submit(&draft) {
        Ok(voucher) => (StatusCode::CREATED, Json(voucher)).into_response(),
        Err(error) => {
            let payload = json!({
                "error": error.to_string(),
                "field": error.field(),
            });
            (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn list_handler<E>(
    State(service): State<Arc<VoucherDesk<E>>>,
) -> Json<Vec<Voucher>>
where
    E: ReportExporter + 'static,
{
    Json(service.vouchers())
}

pub(crate) async fn pending_handler<E>(
    State(service): State<Arc<VoucherDesk<E>>>,
) -> Json<Vec<Voucher>>
where
    E: ReportExporter + 'static,
{
    Json(service.pending())
}

pub(crate) async fn approve_handler<E>(
    State(service): State<Arc<VoucherDesk<E>>>,
    Path(voucher_id): Path<u64>,
) -> Json<ApprovalView>
where
    E: ReportExporter + 'static,
{
    Json(service.approve(VoucherId(voucher_id)).into())
}

pub(crate) async fn report_handler<E>(
    State(service): State<Arc<VoucherDesk<E>>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<VoucherReport>, AppError>
where
    E: ReportExporter + 'static,
{
    let range = query.range()?;
    Ok(Json(service.report(range)))
}

pub(crate) async fn export_handler<E>(
    State(service): State<Arc<VoucherDesk<E>>>,
    Query(query): Query<ReportQuery>,
) -> Result<Response, AppError>
where
    E: ReportExporter + 'static,
{
    let range = query.range()?;
    let artifact = service.export(&range)?;

    let headers = [
        (header::CONTENT_TYPE, artifact.content_type.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", artifact.file_name),
        ),
    ];
    Ok((StatusCode::OK, headers, artifact.bytes).into_response())
}

pub(crate) async fn panel_handler<E>(
    State(service): State<Arc<VoucherDesk<E>>>,
    Path(role): Path<Role>,
) -> Json<RolePanel>
where
    E: ReportExporter + 'static,
{
    Json(service.panel(role))
}
