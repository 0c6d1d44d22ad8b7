//! In-memory rendition of the AI Horde v2 endpoints covered by the SDK.
//!
//! # Design
//! Jobs complete instantly and deterministically: queueing a generation
//! immediately stores its finished results, so tests never need to poll or
//! sleep. Error responses use the horde's uniform `{"message"}` body. The
//! worker roster is static and filterable by `?type=`.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const KUDOS_PER_IMAGE: f64 = 10.0;
const SUBMIT_REWARD: f64 = 10.0;

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
pub struct GenerationInput {
    pub prompt: String,
    pub params: Option<GenerationParams>,
    #[serde(default = "default_true")]
    pub nsfw: bool,
    #[serde(default)]
    pub censor_nsfw: bool,
    #[serde(default)]
    pub shared: bool,
    #[serde(default)]
    pub models: Vec<String>,
}

#[derive(Deserialize)]
pub struct GenerationParams {
    #[serde(default = "default_n")]
    pub n: u32,
}

fn default_n() -> u32 {
    1
}

#[derive(Deserialize)]
pub struct SubmitInput {
    pub id: Uuid,
    pub generation: String,
    pub state: String,
    pub seed: String,
    #[serde(default)]
    pub censored: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct Generation {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub worker_name: String,
    pub model: String,
    pub state: String,
    pub img: String,
    pub seed: String,
    pub censored: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkerInfo {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub worker_type: String,
    pub online: bool,
    pub requests_fulfilled: u64,
    pub kudos_rewards: f64,
    pub performance: String,
    pub threads: u32,
    pub uptime: u64,
    pub maintenance_mode: bool,
    pub nsfw: bool,
    pub trusted: bool,
    pub models: Vec<String>,
    pub max_pixels: Option<u64>,
}

#[derive(Clone, Debug)]
pub struct Job {
    pub kudos: f64,
    pub shared: bool,
    pub generations: Vec<Generation>,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Job>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/v2/generate/async", post(create_generation))
        .route("/v2/generate/check/{id}", get(check_generation))
        .route(
            "/v2/generate/status/{id}",
            get(get_status).delete(cancel_generation),
        )
        .route("/v2/generate/submit", post(submit_generation))
        .route("/v2/workers", get(list_workers))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type ErrorBody = (StatusCode, Json<Value>);

fn error_body(status: StatusCode, message: &str) -> ErrorBody {
    (status, Json(json!({ "message": message })))
}

fn require_apikey(headers: &HeaderMap) -> Result<(), ErrorBody> {
    if headers.get("apikey").is_none() {
        return Err(error_body(StatusCode::UNAUTHORIZED, "No API key sent"));
    }
    Ok(())
}

fn status_body(job: &Job) -> Value {
    json!({
        "finished": job.generations.len(),
        "processing": 0,
        "restarted": 0,
        "waiting": 0,
        "done": true,
        "faulted": false,
        "wait_time": 0,
        "queue_position": 0,
        "kudos": job.kudos,
        "is_possible": true,
        "generations": job.generations,
        "shared": job.shared,
    })
}

fn check_body(job: &Job) -> Value {
    json!({
        "finished": job.generations.len(),
        "processing": 0,
        "restarted": 0,
        "waiting": 0,
        "done": true,
        "faulted": false,
        "wait_time": 0,
        "queue_position": 0,
        "kudos": job.kudos,
        "is_possible": true,
    })
}

fn worker_roster() -> Vec<WorkerInfo> {
    vec![
        WorkerInfo {
            id: Uuid::from_u128(0xA1),
            name: "mock-image-worker".to_string(),
            worker_type: "image".to_string(),
            online: true,
            requests_fulfilled: 100,
            kudos_rewards: 2000.0,
            performance: "0.5 megapixelsteps per second".to_string(),
            threads: 1,
            uptime: 3600,
            maintenance_mode: false,
            nsfw: false,
            trusted: true,
            models: vec!["Deliberate".to_string(), "stable_diffusion".to_string()],
            max_pixels: Some(262_144),
        },
        WorkerInfo {
            id: Uuid::from_u128(0xA2),
            name: "mock-text-worker".to_string(),
            worker_type: "text".to_string(),
            online: true,
            requests_fulfilled: 40,
            kudos_rewards: 800.0,
            performance: "2.1 tokens per second".to_string(),
            threads: 2,
            uptime: 7200,
            maintenance_mode: false,
            nsfw: true,
            trusted: false,
            models: vec!["llama".to_string()],
            max_pixels: None,
        },
    ]
}

async fn create_generation(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<GenerationInput>,
) -> Result<(StatusCode, Json<Value>), ErrorBody> {
    require_apikey(&headers)?;

    if input.censor_nsfw && input.nsfw {
        return Err(error_body(
            StatusCode::BAD_REQUEST,
            "censor_nsfw is only valid when nsfw is false",
        ));
    }
    let n = input.params.as_ref().map_or(1, |p| p.n);
    if n == 0 {
        return Err(error_body(StatusCode::BAD_REQUEST, "n must be at least 1"));
    }

    let model = input
        .models
        .first()
        .cloned()
        .unwrap_or_else(|| "stable_diffusion".to_string());

    let id = Uuid::new_v4();
    let generations = (0..n)
        .map(|i| Generation {
            id: Uuid::new_v4(),
            worker_id: Uuid::from_u128(0xA1),
            worker_name: "mock-image-worker".to_string(),
            model: model.clone(),
            state: "ok".to_string(),
            img: "aGVsbG8gaG9yZGU=".to_string(),
            seed: (1000 + i).to_string(),
            censored: false,
        })
        .collect();

    let job = Job {
        kudos: KUDOS_PER_IMAGE * f64::from(n),
        shared: input.shared,
        generations,
    };
    db.write().await.insert(id, job.clone());

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "id": id, "kudos": job.kudos })),
    ))
}

async fn check_generation(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ErrorBody> {
    let jobs = db.read().await;
    let job = jobs
        .get(&id)
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "Request Not Found"))?;
    Ok(Json(check_body(job)))
}

async fn get_status(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ErrorBody> {
    let jobs = db.read().await;
    let job = jobs
        .get(&id)
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "Request Not Found"))?;
    Ok(Json(status_body(job)))
}

async fn cancel_generation(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ErrorBody> {
    require_apikey(&headers)?;
    let mut jobs = db.write().await;
    let job = jobs
        .remove(&id)
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "Request Not Found"))?;
    Ok(Json(status_body(&job)))
}

async fn submit_generation(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(input): Json<SubmitInput>,
) -> Result<Json<Value>, ErrorBody> {
    require_apikey(&headers)?;
    let jobs = db.read().await;
    if !jobs.contains_key(&input.id) {
        return Err(error_body(StatusCode::NOT_FOUND, "Request Not Found"));
    }
    Ok(Json(json!({ "reward": SUBMIT_REWARD })))
}

#[derive(Deserialize)]
struct WorkersQuery {
    #[serde(rename = "type")]
    worker_type: Option<String>,
}

async fn list_workers(Query(query): Query<WorkersQuery>) -> Json<Vec<WorkerInfo>> {
    let workers = worker_roster()
        .into_iter()
        .filter(|w| {
            query
                .worker_type
                .as_deref()
                .is_none_or(|t| w.worker_type == t)
        })
        .collect();
    Json(workers)
}
