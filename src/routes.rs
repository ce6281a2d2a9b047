use rocket::{get, http::Status, post, serde::json::Json, State};
use serde::Serialize;
use tracing::{debug, error, instrument};

use crate::config::{KV_TOKEN_VAR, KV_URL_VAR, UPSTASH_TOKEN_VAR, UPSTASH_URL_VAR};
use crate::models::{AnswerKey, ErrorResponse, Tally, VoteRequest, VoteResponse};
use crate::service::VoteService;

pub struct AppState {
    pub service: VoteService,
}

impl AppState {
    pub fn new(service: VoteService) -> Self {
        Self { service }
    }
}

#[get("/votes")]
pub async fn get_votes(state: &State<AppState>) -> Json<Tally> {
    let (tally, _) = state.service.tally().await;
    Json(tally)
}

#[instrument(skip(state, request))]
#[post("/votes", format = "json", data = "<request>")]
pub async fn submit_vote(
    state: &State<AppState>,
    request: Json<VoteRequest>,
) -> Result<Json<VoteResponse>, (Status, Json<ErrorResponse>)> {
    let request = request.into_inner();
    let answer = match request
        .answer
        .as_ref()
        .and_then(serde_json::Value::as_str)
        .map(str::parse::<AnswerKey>)
    {
        Some(Ok(answer)) => answer,
        _ => {
            debug!("Rejected vote with missing or unknown answer key");
            return Err((
                Status::BadRequest,
                Json(ErrorResponse {
                    error: "Invalid answer".into(),
                }),
            ));
        }
    };

    match state.service.submit(answer).await {
        Ok((votes, _)) => Ok(Json(VoteResponse {
            success: true,
            votes,
        })),
        Err(e) => {
            error!("Error submitting vote: {}", e);
            Err((
                Status::InternalServerError,
                Json(ErrorResponse {
                    error: "Failed to submit vote".into(),
                }),
            ))
        }
    }
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}

#[derive(Debug, Serialize)]
pub struct EnvVarStatus {
    #[serde(rename = "hasUPSTASH_REDIS_REST_URL")]
    pub has_upstash_url: bool,
    #[serde(rename = "hasUPSTASH_REDIS_REST_TOKEN")]
    pub has_upstash_token: bool,
    #[serde(rename = "hasKV_REST_API_URL")]
    pub has_kv_url: bool,
    #[serde(rename = "hasKV_REST_API_TOKEN")]
    pub has_kv_token: bool,
}

impl EnvVarStatus {
    fn from_env() -> Self {
        Self {
            has_upstash_url: std::env::var_os(UPSTASH_URL_VAR).is_some(),
            has_upstash_token: std::env::var_os(UPSTASH_TOKEN_VAR).is_some(),
            has_kv_url: std::env::var_os(KV_URL_VAR).is_some(),
            has_kv_token: std::env::var_os(KV_TOKEN_VAR).is_some(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub redis: bool,
    pub fallback: bool,
    pub message: String,
    #[serde(rename = "envVars")]
    pub env_vars: EnvVarStatus,
}

/// Store connectivity diagnostics. Env-var presence is re-read per request so
/// the report reflects the live environment, not startup state.
#[get("/health")]
pub async fn health(state: &State<AppState>) -> Json<HealthStatus> {
    let env_vars = EnvVarStatus::from_env();
    let mut status = HealthStatus {
        redis: false,
        fallback: false,
        message: String::new(),
        env_vars,
    };

    match state.service.store() {
        Some(store) => match store.ping().await {
            Ok(()) => {
                status.redis = true;
                status.message = "✅ Using Upstash Redis storage".into();
            }
            Err(e) => {
                status.message = format!("❌ Redis connection failed: {}", e);
            }
        },
        None => {
            status.fallback = true;
            let mut missing = Vec::new();
            if !status.env_vars.has_upstash_url && !status.env_vars.has_kv_url {
                missing.push("UPSTASH_REDIS_REST_URL or KV_REST_API_URL");
            }
            if !status.env_vars.has_upstash_token && !status.env_vars.has_kv_token {
                missing.push("UPSTASH_REDIS_REST_TOKEN or KV_REST_API_TOKEN");
            }
            status.message = format!(
                "⚠️ Missing environment variables: {}. Using in-memory fallback (NOT PERSISTENT)",
                missing.join(", ")
            );
        }
    }

    Json(status)
}
