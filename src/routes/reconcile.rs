use actix_web::{http::header, http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::models::{
    ErrorResponse, HealthResponse, MatchPairRequest, RawNamePair, ReconcileRequest, ReconcileResponse,
};
use crate::services::{augment_records, check_row_limit, pairs_from_records, CsvTable, NameColumns, TableError};
use crate::core::{NameMatcher, TokenDictionary};

/// File name offered for the reconciled CSV download
pub const RESULT_FILE_NAME: &str = "smart_name_matching_result.csv";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub matcher: NameMatcher,
    pub columns: NameColumns,
    pub max_rows: usize,
}

/// Configure all reconciliation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/reconcile", web::post().to(reconcile_json))
        .route("/reconcile/csv", web::post().to(reconcile_csv))
        .route("/match", web::post().to(match_pair));
}

fn table_error_response(err: &TableError) -> HttpResponse {
    let (error, status) = match err {
        TableError::MissingColumn { .. } => ("missing_column", StatusCode::BAD_REQUEST),
        TableError::RowLimitExceeded { .. } => ("row_limit_exceeded", StatusCode::PAYLOAD_TOO_LARGE),
        TableError::Csv(_) | TableError::InvalidUtf8(_) => ("invalid_csv", StatusCode::BAD_REQUEST),
    };

    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: err.to_string(),
        status_code: status.as_u16(),
    })
}

fn internal_error(message: String) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        error: "Reconciliation failed".to_string(),
        message,
        status_code: 500,
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Reconcile a JSON table
///
/// POST /api/v1/reconcile
///
/// Request body:
/// ```json
/// {
///   "rows": [
///     { "farmerName": "string", "pfmsFarmerName": "string", "...": "..." }
///   ]
/// }
/// ```
async fn reconcile_json(
    state: web::Data<AppState>,
    req: web::Json<ReconcileRequest>,
) -> impl Responder {
    let rows = req.into_inner().rows;

    if let Err(e) = check_row_limit(rows.len(), state.max_rows) {
        return table_error_response(&e);
    }

    let pairs = match pairs_from_records(&rows, &state.columns) {
        Ok(pairs) => pairs,
        Err(e) => {
            tracing::info!("Rejected reconcile request: {}", e);
            return table_error_response(&e);
        }
    };

    let batch_id = uuid::Uuid::new_v4().to_string();
    tracing::info!("Reconciling batch {} with {} rows", batch_id, pairs.len());

    let matcher = state.matcher.clone();
    let result = match web::block(move || matcher.reconcile(&pairs)).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Reconciliation of batch {} failed: {}", batch_id, e);
            return internal_error(e.to_string());
        }
    };

    HttpResponse::Ok().json(ReconcileResponse {
        batch_id,
        rows: augment_records(rows, &result.evidence),
        summary: result.summary,
    })
}

/// Reconcile a CSV upload
///
/// POST /api/v1/reconcile/csv
///
/// The body is CSV with a header row. The response is the same table with
/// the derived columns appended, offered as a file download.
async fn reconcile_csv(state: web::Data<AppState>, body: web::Bytes) -> impl Responder {
    let state = state.into_inner();

    let outcome = web::block(move || -> Result<(Vec<u8>, usize), TableError> {
        let text = String::from_utf8(body.to_vec())?;
        let table = CsvTable::parse(text.as_bytes())?;
        check_row_limit(table.records.len(), state.max_rows)?;

        let pairs = table.pairs(&state.columns)?;
        let result = state.matcher.reconcile(&pairs);
        let output = table.write_augmented(&result.evidence)?;

        Ok((output, result.summary.matched))
    })
    .await;

    match outcome {
        Ok(Ok((output, matched))) => {
            tracing::debug!("CSV reconciliation produced {} bytes ({} matching)", output.len(), matched);
            HttpResponse::Ok()
                .content_type("text/csv; charset=utf-8")
                .insert_header((
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", RESULT_FILE_NAME),
                ))
                .body(output)
        }
        Ok(Err(e)) => {
            tracing::info!("Rejected CSV upload: {}", e);
            table_error_response(&e)
        }
        Err(e) => {
            tracing::error!("CSV reconciliation failed: {}", e);
            internal_error(e.to_string())
        }
    }
}

/// Evaluate a single name pair
///
/// POST /api/v1/match
///
/// Request body:
/// ```json
/// {
///   "farmerName": "string",
///   "pfmsFarmerName": "string",
///   "dictionary": ["string"]
/// }
/// ```
async fn match_pair(
    state: web::Data<AppState>,
    req: web::Json<MatchPairRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let req = req.into_inner();
    let dictionary = TokenDictionary::from_tokens(&req.dictionary);
    let pair = RawNamePair::new(req.farmer_name, req.pfms_farmer_name);

    let evidence = state.matcher.evaluate(&pair, &dictionary);

    HttpResponse::Ok().json(evidence)
}
