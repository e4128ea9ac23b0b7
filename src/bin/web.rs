//! Single binary JSON API for running padel tournaments.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default. Override with env: HOST, PORT.

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use padel_tournament_web::{
    current_round_matches, record_score, reshuffle_current_round, standings, start_round,
    MatchId, PlayerId, RoundConfig, Tournament, TournamentError, TournamentId,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: many tournaments by id. One lock spans registry, ledger
/// and round counter together; every mutation holds the write guard for its
/// whole read-modify-write cycle.
type AppState = Data<RwLock<HashMap<TournamentId, TournamentEntry>>>;

/// Tournaments not touched for this long are evicted.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct AddPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct ScoreBody {
    match_id: MatchId,
    score_team_1: i32,
    score_team_2: i32,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and player id.
#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: PlayerId,
}

/// Engine errors as JSON: unknown ids are 404, everything else 400.
fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        TournamentError::PlayerNotFound(_) | TournamentError::MatchNotFound(_) => {
            HttpResponse::NotFound().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

/// Run `f` on the tournament with the given id under the write lock,
/// touching its activity timestamp.
fn with_tournament<F>(state: &AppState, id: TournamentId, f: F) -> HttpResponse
where
    F: FnOnce(&mut Tournament) -> HttpResponse,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            f(&mut entry.tournament)
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-tournament-web",
    })
}

/// Create a new tournament (client stores the id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState) -> HttpResponse {
    let tournament = Tournament::new();
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = g.entry(id).or_insert(TournamentEntry {
        tournament,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(&entry.tournament)
}

/// Get a tournament by id (404 if not found).
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(&*t))
}

/// Register a player.
#[post("/api/tournaments/{id}/players")]
async fn api_add_player(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.add_player(body.name.as_str()) {
        Ok(_) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    })
}

/// Remove a player; their open matches in the active round are cancelled.
#[delete("/api/tournaments/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| match t.remove_player(path.player_id) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    })
}

/// Start the next round with the given courts / mode / format.
#[post("/api/tournaments/{id}/rounds")]
async fn api_start_round(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RoundConfig>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| match start_round(t, *body) {
        Ok(()) => HttpResponse::Ok().json(&*t),
        Err(e) => error_response(&e),
    })
}

/// Redraw the current round (only while it has no recorded results).
#[post("/api/tournaments/{id}/rounds/reshuffle")]
async fn api_reshuffle_round(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RoundConfig>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match reshuffle_current_round(t, *body) {
            Ok(()) => HttpResponse::Ok().json(&*t),
            Err(e) => error_response(&e),
        }
    })
}

/// Record or correct a match score.
#[put("/api/tournaments/{id}/matches/score")]
async fn api_record_score(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<ScoreBody>,
) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        match record_score(t, body.match_id, body.score_team_1, body.score_team_2) {
            Ok(()) => HttpResponse::Ok().json(&*t),
            Err(e) => error_response(&e),
        }
    })
}

/// Current standings, best first.
#[get("/api/tournaments/{id}/standings")]
async fn api_standings(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| HttpResponse::Ok().json(standings(t)))
}

/// Current round: matches with resolved names, plus the bye list.
#[get("/api/tournaments/{id}/rounds/current")]
async fn api_current_round(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    with_tournament(&state, path.id, |t| {
        HttpResponse::Ok().json(current_round_matches(t))
    })
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<TournamentId, TournamentEntry>::new()));

    // Background task: every 30 minutes, evict tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_start_round)
            .service(api_reshuffle_round)
            .service(api_record_score)
            .service(api_standings)
            .service(api_current_round)
    })
    .bind(bind)?
    .run()
    .await
}
