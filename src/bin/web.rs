//! Single binary web server: REST API for knockout tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST, PORT, MAX_TEAMS, INACTIVITY_HOURS, CLEANUP_INTERVAL_MINUTES.

use actix_web::{
    delete, get, post, put,
    web::{Bytes, Data, Json, Path, Query},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use knockout_tournament_web::{
    parse_team_names, register_teams, shuffle_seeding, Bracket, BracketError, Match, Tournament,
    TournamentError, TournamentId, DEFAULT_MAX_TEAMS,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory tournaments by id. The write lock serializes every read-modify-write.
type Store = RwLock<HashMap<TournamentId, TournamentEntry>>;
type AppState = Data<Store>;

/// Settings read from the environment at startup.
#[derive(Clone, Debug)]
struct ServerConfig {
    host: String,
    port: u16,
    max_teams: usize,
    inactivity_timeout: Duration,
    cleanup_interval: Duration,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env_or("PORT", 8080),
            max_teams: env_or("MAX_TEAMS", DEFAULT_MAX_TEAMS),
            inactivity_timeout: Duration::from_secs(env_or("INACTIVITY_HOURS", 12u64) * 3600),
            cleanup_interval: Duration::from_secs(env_or("CLEANUP_INTERVAL_MINUTES", 30u64) * 60),
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct TeamBody {
    name: String,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    teams: Vec<TeamBody>,
    #[serde(default)]
    shuffle: bool,
}

#[derive(Deserialize)]
struct ImportQuery {
    name: String,
    #[serde(default)]
    shuffle: bool,
}

#[derive(Deserialize)]
struct UpdateMatchBody {
    score_1: u32,
    score_2: u32,
    #[serde(default)]
    expected_version: Option<u64>,
}

#[derive(Deserialize)]
struct ScheduleBody {
    scheduled_time: DateTime<Utc>,
}

#[derive(Serialize)]
struct UpdateMatchResponse<'a> {
    bracket: &'a Bracket,
    #[serde(rename = "match")]
    game: &'a Match,
    version: u64,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id (e.g. /api/tournaments/{id}/matches/{match_id})
#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: String,
}

fn error_response(e: &TournamentError) -> HttpResponse {
    log::warn!("Rejected request: {}", e);
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::Bracket(BracketError::MatchNotFound(_)) => {
            HttpResponse::NotFound().json(body)
        }
        TournamentError::VersionConflict { .. } => HttpResponse::Conflict().json(body),
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn no_tournament() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

fn lock_error() -> HttpResponse {
    HttpResponse::InternalServerError().body("lock error")
}

/// Register teams, optionally shuffle, build the bracket and store the tournament.
fn create_and_store<I, S>(
    state: &Store,
    config: &ServerConfig,
    name: &str,
    team_names: I,
    shuffle: bool,
) -> HttpResponse
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let created = register_teams(team_names, config.max_teams).and_then(|mut teams| {
        if shuffle {
            shuffle_seeding(&mut teams);
        }
        Tournament::new(name, teams)
    });
    let tournament = match created {
        Ok(t) => t,
        Err(e) => return error_response(&e),
    };
    log::info!(
        "Created tournament {} '{}' with {} teams",
        tournament.id,
        tournament.name,
        tournament.total_teams
    );
    let response = HttpResponse::Created().json(&tournament);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    g.insert(
        tournament.id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Run `op` on one match of one tournament and answer with the updated match.
fn with_match<F>(state: &Store, path: &TournamentMatchPath, op: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament, &str) -> Result<(), TournamentError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    if let Err(e) = op(&mut entry.tournament, &path.match_id) {
        return error_response(&e);
    }
    let t = &entry.tournament;
    match t.bracket.get_match(&path.match_id) {
        Some(m) => HttpResponse::Ok().json(UpdateMatchResponse {
            bracket: &t.bracket,
            game: m,
            version: t.version,
        }),
        None => error_response(&TournamentError::from(BracketError::MatchNotFound(
            path.match_id.clone(),
        ))),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "knockout-tournament-web",
    })
}

/// Create a tournament from a JSON team list.
#[post("/api/tournaments")]
async fn api_create_tournament(
    state: AppState,
    config: Data<ServerConfig>,
    body: Json<CreateTournamentBody>,
) -> HttpResponse {
    let names = body.teams.iter().map(|t| t.name.as_str());
    create_and_store(&state, &config, &body.name, names, body.shuffle)
}

/// Create a tournament from a CSV team list (one team name per row).
#[post("/api/tournaments/import")]
async fn api_import_tournament(
    state: AppState,
    config: Data<ServerConfig>,
    query: Query<ImportQuery>,
    body: Bytes,
) -> HttpResponse {
    match parse_team_names(body.as_ref()) {
        Ok(names) => create_and_store(&state, &config, &query.name, names, query.shuffle),
        Err(e) => error_response(&e),
    }
}

/// List all tournaments (summaries, newest first).
#[get("/api/tournaments")]
async fn api_list_tournaments(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let mut list: Vec<_> = g.values().map(|e| e.tournament.summary()).collect();
    list.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    HttpResponse::Ok().json(list)
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.tournament)
        }
        None => no_tournament(),
    }
}

#[delete("/api/tournaments/{id}")]
async fn api_delete_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.remove(&path.id) {
        Some(_) => {
            log::info!("Deleted tournament {}", path.id);
            HttpResponse::NoContent().finish()
        }
        None => no_tournament(),
    }
}

/// Round names and progress for the bracket overview.
#[get("/api/tournaments/{id}/rounds")]
async fn api_rounds(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(entry.tournament.bracket.round_summaries()),
        None => no_tournament(),
    }
}

/// Enter (or correct) a match score; the winner advances to the next round.
#[put("/api/tournaments/{id}/matches/{match_id}")]
async fn api_update_match(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<UpdateMatchBody>,
) -> HttpResponse {
    with_match(&state, &path, |t, match_id| {
        t.record_result(match_id, body.score_1, body.score_2, body.expected_version)
            .map(|_| ())
    })
}

#[put("/api/tournaments/{id}/matches/{match_id}/schedule")]
async fn api_schedule_match(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<ScheduleBody>,
) -> HttpResponse {
    with_match(&state, &path, |t, match_id| {
        t.schedule_match(match_id, body.scheduled_time).map(|_| ())
    })
}

#[post("/api/tournaments/{id}/matches/{match_id}/start")]
async fn api_start_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    with_match(&state, &path, |t, match_id| t.start_match(match_id).map(|_| ()))
}

#[post("/api/tournaments/{id}/matches/{match_id}/pause")]
async fn api_pause_match(state: AppState, path: Path<TournamentMatchPath>) -> HttpResponse {
    with_match(&state, &path, |t, match_id| t.pause_match(match_id).map(|_| ()))
}

/// Reset tournament: rebuild the bracket from the same teams, dropping all results.
#[post("/api/tournaments/{id}/reset")]
async fn api_reset_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return lock_error(),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    let t = &mut entry.tournament;
    match t.reset() {
        Ok(()) => HttpResponse::Ok().json(t),
        Err(e) => error_response(&e),
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = ServerConfig::from_env();
    log::info!("Starting server at http://{}:{}", config.host, config.port);
    log::debug!("Config: {:?}", config);

    let state: AppState = Data::new(RwLock::new(HashMap::new()));

    // Background task: periodically drop tournaments nobody has touched for a while
    let state_cleanup = state.clone();
    let cleanup_interval = config.cleanup_interval;
    let inactivity_timeout = config.inactivity_timeout;
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity_timeout);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    let bind = (config.host.clone(), config.port);
    let config = Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_import_tournament)
            .service(api_create_tournament)
            .service(api_list_tournaments)
            .service(api_get_tournament)
            .service(api_delete_tournament)
            .service(api_rounds)
            .service(api_update_match)
            .service(api_schedule_match)
            .service(api_start_match)
            .service(api_pause_match)
            .service(api_reset_tournament)
    })
    .bind(bind)?
    .run()
    .await
}
