//! REST API over the organizer. Mounted by the `web` binary via [`configure`].

use crate::config::Config;
use crate::error::OrganizerError;
use crate::logic::{PlayerRef, RosterEntry, TournamentFilter};
use crate::models::{MatchId, NewTournament, PlayerId, Score, TournamentId};
use crate::organizer::Organizer;
use actix_web::{
    error::InternalError,
    get, post,
    http::StatusCode,
    web::{self, Data, Json, Path, Query},
    HttpResponse, Responder,
};
use chrono::{DateTime, Local, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

type AppState = Data<Organizer>;
type AppConfig = Data<Config>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct RegisterPlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct PlayerSearchQuery {
    #[serde(default)]
    search: String,
}

/// Either `player_id` or `player_name` must be given.
#[derive(Deserialize)]
struct AddPlayerBody {
    password: String,
    #[serde(default)]
    player_id: Option<PlayerId>,
    #[serde(default)]
    player_name: Option<String>,
    #[serde(default)]
    partner_id: Option<PlayerId>,
    #[serde(default)]
    skill_tier: Option<String>,
}

#[derive(Deserialize)]
struct ScheduleBody {
    password: String,
    start: DateTime<Utc>,
    /// Falls back to the configured default.
    #[serde(default)]
    match_minutes: Option<i64>,
}

#[derive(Deserialize)]
struct ResultBody {
    password: String,
    score1: u32,
    score2: u32,
}

/// Path segment: tournament id (e.g. /tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

/// Path segments: tournament id and match id.
#[derive(Deserialize)]
struct MatchPath {
    id: TournamentId,
    match_id: MatchId,
}

#[derive(Deserialize)]
struct PlayerPath {
    id: PlayerId,
}

fn status_of(e: &OrganizerError) -> StatusCode {
    use OrganizerError::*;
    match e {
        TournamentNotFound(_) | PlayerNotFound(_) | MatchNotFound(_) => StatusCode::NOT_FOUND,
        Validation(_) | EmptyRoster | TiedMatch(_) => StatusCode::BAD_REQUEST,
        Unauthorized => StatusCode::FORBIDDEN,
        ResultConflict(_) | AlreadyRegistered(_) | DuplicatePlayerName(_) => StatusCode::CONFLICT,
        Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(e: OrganizerError) -> HttpResponse {
    let status = status_of(&e);
    if status.is_server_error() {
        log::error!("{e}");
    }
    HttpResponse::build(status).json(json!({ "error": e.to_string() }))
}

/// Turn an extractor failure into the same `{"error": ...}` body the handlers use.
fn rejected<E: fmt::Debug + fmt::Display + 'static>(err: E, status: StatusCode) -> actix_web::Error {
    let response = HttpResponse::build(status).json(json!({ "error": err.to_string() }));
    InternalError::from_response(err, response).into()
}

/// Run an organizer command on the blocking pool; hashing and file I/O stay off the workers.
async fn run<T, F>(state: &AppState, success: StatusCode, command: F) -> HttpResponse
where
    F: FnOnce(&Organizer) -> Result<T, OrganizerError> + Send + 'static,
    T: Serialize + Send + 'static,
{
    let organizer = state.clone();
    match web::block(move || command(organizer.get_ref())).await {
        Ok(Ok(value)) => HttpResponse::build(success).json(value),
        Ok(Err(e)) => error_response(e),
        Err(e) => {
            log::error!("Organizer command did not complete: {e}");
            HttpResponse::InternalServerError().json(json!({ "error": "Internal server error" }))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "badminton-tournament-web",
    })
}

/// List tournaments: ?status=ongoing|recent|upcoming&search=...&limit=N
#[get("/tournaments")]
async fn api_list_tournaments(state: AppState, filter: Query<TournamentFilter>) -> HttpResponse {
    let today = Local::now().date_naive();
    let filter = filter.into_inner();
    run(&state, StatusCode::OK, move |o| o.list_tournaments(&filter, today)).await
}

#[post("/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<NewTournament>) -> HttpResponse {
    let request = body.into_inner();
    run(&state, StatusCode::CREATED, move |o| {
        o.create_tournament(request).map(|t| t.summary())
    })
    .await
}

/// Tournament with roster, player records and schedule (404 if not found).
#[get("/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let id = path.into_inner().id;
    run(&state, StatusCode::OK, move |o| o.tournament_details(&id)).await
}

#[post("/tournaments/{id}/add_player")]
async fn api_add_player(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<AddPlayerBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let player = match (body.player_id, body.player_name) {
        (Some(id), _) => PlayerRef::Id(id),
        (None, Some(name)) => PlayerRef::Name(name),
        (None, None) => {
            return error_response(OrganizerError::Validation(
                "player_id or player_name is required".to_string(),
            ))
        }
    };
    let entry = RosterEntry {
        player,
        partner: body.partner_id,
        skill_tier: body.skill_tier,
    };
    let id = path.into_inner().id;
    let password = body.password;
    run(&state, StatusCode::CREATED, move |o| {
        o.add_participant(&id, &password, entry)
    })
    .await
}

/// Replace the schedule (previous scores are discarded).
#[post("/tournaments/{id}/schedule")]
async fn api_generate_schedule(
    state: AppState,
    config: AppConfig,
    path: Path<TournamentPath>,
    body: Json<ScheduleBody>,
) -> HttpResponse {
    let body = body.into_inner();
    let duration = match body.match_minutes {
        Some(minutes) => match TimeDelta::try_minutes(minutes) {
            Some(d) => d,
            None => {
                return error_response(OrganizerError::Validation(
                    "match_minutes is out of range".to_string(),
                ))
            }
        },
        None => config.match_duration(),
    };
    let id = path.into_inner().id;
    run(&state, StatusCode::OK, move |o| {
        o.generate_schedule(&id, &body.password, body.start, duration)
    })
    .await
}

#[post("/tournaments/{id}/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<ResultBody>,
) -> HttpResponse {
    let MatchPath { id, match_id } = path.into_inner();
    let body = body.into_inner();
    let score = Score::new(body.score1, body.score2);
    run(&state, StatusCode::OK, move |o| {
        o.record_result(&id, &body.password, match_id, score)
    })
    .await
}

#[post("/players")]
async fn api_register_player(state: AppState, body: Json<RegisterPlayerBody>) -> HttpResponse {
    let name = body.into_inner().name;
    run(&state, StatusCode::CREATED, move |o| o.register_player(&name)).await
}

#[get("/players")]
async fn api_search_players(state: AppState, query: Query<PlayerSearchQuery>) -> HttpResponse {
    let search = query.into_inner().search;
    run(&state, StatusCode::OK, move |o| o.search_players(&search)).await
}

#[get("/players/{id}")]
async fn api_get_player(state: AppState, path: Path<PlayerPath>) -> HttpResponse {
    let id = path.id;
    run(&state, StatusCode::OK, move |o| o.player(id)).await
}

/// Register every route. Expects `Data<Organizer>` and `Data<Config>` in app data.
///
/// Malformed bodies and queries answer 400, malformed path ids 404, all with an `error` body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|err, _| rejected(err, StatusCode::BAD_REQUEST)),
    )
    .app_data(
        web::QueryConfig::default().error_handler(|err, _| rejected(err, StatusCode::BAD_REQUEST)),
    )
    .app_data(web::PathConfig::default().error_handler(|err, _| rejected(err, StatusCode::NOT_FOUND)))
    .service(api_health)
    .service(api_list_tournaments)
    .service(api_create_tournament)
    .service(api_get_tournament)
    .service(api_add_player)
    .service(api_generate_schedule)
    .service(api_record_result)
    .service(api_register_player)
    .service(api_search_players)
    .service(api_get_player);
}
