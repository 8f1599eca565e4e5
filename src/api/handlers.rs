use actix_web::{get, post, web, HttpResponse, Responder};

use crate::logic::service::{ActionError, BoardService};
use crate::models::request::{ActionRequest, ActionResponse};
use crate::models::Coordinate;

/// GET /api/game-state
/// Returns every plot as rows of `{state, lastWateredTime}`.
#[utoipa::path(
    context_path = "/api",
    responses(
        (status = 200, description = "The full board, row-major", body = Vec<Vec<crate::models::plot::PlotSnapshot>>),
    ),
    tag = "board",
)]
#[get("/game-state")]
pub async fn get_game_state(service: web::Data<BoardService>) -> impl Responder {
    HttpResponse::Ok().json(service.game_state())
}

/// POST /api/plant
/// Puts a seed in an empty plot.
#[utoipa::path(
    context_path = "/api",
    request_body = ActionRequest,
    responses(
        (status = 200, description = "Seed planted", body = ActionResponse),
        (status = 400, description = "Invalid coordinates or plot not empty", body = ActionResponse),
    ),
    tag = "plots",
)]
#[post("/plant")]
pub async fn post_plant(
    service: web::Data<BoardService>,
    body: web::Json<ActionRequest>,
) -> impl Responder {
    dispatch(&body, |row, col| service.plant(row, col))
}

/// POST /api/water
/// Waters a planted seed and starts its growth timer.
#[utoipa::path(
    context_path = "/api",
    request_body = ActionRequest,
    responses(
        (status = 200, description = "Plot watered, growth started", body = ActionResponse),
        (status = 400, description = "Invalid coordinates or nothing to water", body = ActionResponse),
    ),
    tag = "plots",
)]
#[post("/water")]
pub async fn post_water(
    service: web::Data<BoardService>,
    body: web::Json<ActionRequest>,
) -> impl Responder {
    dispatch(&body, |row, col| service.water(row, col))
}

/// POST /api/harvest
/// Harvests a grown plant, returning the plot to empty.
#[utoipa::path(
    context_path = "/api",
    request_body = ActionRequest,
    responses(
        (status = 200, description = "Plant harvested", body = ActionResponse),
        (status = 400, description = "Invalid coordinates or plant not ready", body = ActionResponse),
    ),
    tag = "plots",
)]
#[post("/harvest")]
pub async fn post_harvest(
    service: web::Data<BoardService>,
    body: web::Json<ActionRequest>,
) -> impl Responder {
    dispatch(&body, |row, col| service.harvest(row, col))
}

fn dispatch<F>(body: &ActionRequest, action: F) -> HttpResponse
where
    F: FnOnce(usize, usize) -> Result<String, ActionError>,
{
    match body.coordinate() {
        Some(Coordinate { row, col }) => respond(action(row, col)),
        None => respond(Err(ActionError::OutOfBounds)),
    }
}

fn respond(result: Result<String, ActionError>) -> HttpResponse {
    match result {
        Ok(message) => HttpResponse::Ok().json(ActionResponse::ok(message)),
        Err(err @ ActionError::Storage(_)) => {
            log::error!("{err}");
            HttpResponse::InternalServerError().json(ActionResponse::rejected(err.to_string()))
        }
        Err(err) => HttpResponse::BadRequest().json(ActionResponse::rejected(err.to_string())),
    }
}
