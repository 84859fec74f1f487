use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use ticker_types::{PolarizingPair, Sentence, SentimentResult};
use tracing::{debug, error};

use crate::context::CoreContext;
use crate::mentions::{MentionCount, MentionError, MentionTable};
use crate::report::compose_article;

/// Largest JSON string escape of one input byte (`\u00XX`).
const MAX_ESCAPE_BYTES: usize = 6;
/// Room for JSON framing and field names on top of the escaped text.
const BODY_OVERHEAD: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub ctx: Arc<CoreContext>,
    pub max_text_bytes: usize,
}

#[derive(Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Deserialize)]
pub struct ArticleRequest {
    pub title: Option<String>,
    pub body: String,
}

#[derive(Serialize)]
pub struct MentionsResponse {
    found: bool,
    main_company: Option<String>,
    main_symbol: Option<String>,
    total: usize,
    mentions: Vec<MentionCount>,
}

#[derive(Serialize)]
pub struct PolarityBody {
    pos: f64,
    neu: f64,
    neg: f64,
    compound: f64,
}

#[derive(Serialize)]
pub struct SentimentResponse {
    subjectivity: f64,
    polarity: PolarityBody,
}

#[derive(Serialize)]
pub struct SentenceBody {
    text: String,
    start: usize,
    compound: f64,
}

#[derive(Serialize)]
pub struct PolarizingResponse {
    most_negative: Option<SentenceBody>,
    most_positive: Option<SentenceBody>,
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    text: String,
    mentions: MentionsResponse,
    sentiment: SentimentResponse,
    polarizing: PolarizingResponse,
}

#[derive(Serialize)]
pub struct SymbolResponse {
    symbol: String,
    company: String,
    symbols: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    // Any text within `max_text_bytes` must reach `validate_text` and get a
    // JSON 400 rather than a bare 413 from the body limit.
    let body_limit = state
        .max_text_bytes
        .saturating_mul(MAX_ESCAPE_BYTES)
        .saturating_add(BODY_OVERHEAD);
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/symbols/{symbol}", get(symbol_lookup))
        .route("/v1/mentions", post(mentions))
        .route("/v1/sentiment", post(sentiment))
        .route("/v1/polarizing", post(polarizing))
        .route("/v1/analyze", post(analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn symbol_lookup(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<SymbolResponse>, ApiError> {
    let lexicon = state.ctx.lexicon();
    let company = lexicon
        .company_for_symbol(&symbol)
        .ok_or_else(|| ApiError::NotFound(format!("unknown symbol {symbol}")))?;
    let symbols = lexicon
        .symbols_for_company(company)
        .unwrap_or(symbol.as_str());
    Ok(Json(SymbolResponse {
        company: company.to_string(),
        symbols: symbols.to_string(),
        symbol,
    }))
}

async fn mentions(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<MentionsResponse>, ApiError> {
    validate_text(&req.text, state.max_text_bytes)?;
    let table = state.ctx.count_mentions(&req.text)?;
    Ok(Json(mentions_body(table)))
}

async fn sentiment(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<SentimentResponse>, ApiError> {
    validate_text(&req.text, state.max_text_bytes)?;
    Ok(Json(sentiment_body(state.ctx.score_sentiment(&req.text))))
}

async fn polarizing(
    State(state): State<AppState>,
    Json(req): Json<TextRequest>,
) -> Result<Json<PolarizingResponse>, ApiError> {
    validate_text(&req.text, state.max_text_bytes)?;
    Ok(Json(polarizing_body(
        state.ctx.polarizing_sentences(&req.text),
    )))
}

async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<ArticleRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let text = compose_article(req.title.as_deref().unwrap_or_default(), &req.body);
    validate_text(&text, state.max_text_bytes)?;

    let report = state.ctx.analyze(&text)?;
    if let Some(main) = report.main_mention() {
        debug!("main company {} ({})", main.company, main.symbol);
    }
    let response = AnalyzeResponse {
        mentions: mentions_body(report.mentions),
        sentiment: sentiment_body(report.sentiment),
        polarizing: polarizing_body(report.polarizing),
        text: report.text.to_string(),
    };
    Ok(Json(response))
}

fn validate_text(text: &str, max_bytes: usize) -> Result<(), ApiError> {
    if text.trim().is_empty() {
        return Err(ApiError::bad_request("text is required"));
    }
    if text.len() > max_bytes {
        return Err(ApiError::bad_request(format!(
            "text must be at most {max_bytes} bytes"
        )));
    }
    Ok(())
}

fn mentions_body(table: Option<MentionTable>) -> MentionsResponse {
    let Some(table) = table else {
        return MentionsResponse {
            found: false,
            main_company: None,
            main_symbol: None,
            total: 0,
            mentions: Vec::new(),
        };
    };
    let total = table.total();
    let (main_company, main_symbol) = table
        .main()
        .map(|m| (Some(m.company.clone()), Some(m.symbol.clone())))
        .unwrap_or_default();
    MentionsResponse {
        found: true,
        main_company,
        main_symbol,
        total,
        mentions: table.into_rows(),
    }
}

fn sentiment_body(result: SentimentResult) -> SentimentResponse {
    SentimentResponse {
        subjectivity: result.subjectivity,
        polarity: PolarityBody {
            pos: result.polarity.pos,
            neu: result.polarity.neu,
            neg: result.polarity.neg,
            compound: result.polarity.compound,
        },
    }
}

fn sentence_body(sentence: Sentence<'_>) -> SentenceBody {
    SentenceBody {
        text: sentence.text.to_string(),
        start: sentence.start,
        compound: sentence.compound,
    }
}

fn polarizing_body(pair: PolarizingPair<'_>) -> PolarizingResponse {
    PolarizingResponse {
        most_negative: pair.most_negative.map(sentence_body),
        most_positive: pair.most_positive.map(sentence_body),
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("internal server error")]
    Internal,
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl From<MentionError> for ApiError {
    fn from(err: MentionError) -> Self {
        error!("mention aggregation failed: {err}");
        ApiError::Internal
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::NotFound(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Internal => {
                let body = Json(json!({ "error": "internal server error" }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}
