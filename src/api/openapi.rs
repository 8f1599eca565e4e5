use utoipa::OpenApi;

use crate::models::{
    plot::{PlotSnapshot, PlotState},
    request::{ActionRequest, ActionResponse},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sprout Farm API",
        description = "Tiny farming simulation: plant, water and harvest a fixed grid of plots. Growth is timer-driven and the board survives server restarts.",
        version = "1.0.0",
        license(name = "MIT"),
    ),
    paths(
        crate::api::handlers::get_game_state,
        crate::api::handlers::post_plant,
        crate::api::handlers::post_water,
        crate::api::handlers::post_harvest,
    ),
    components(schemas(PlotState, PlotSnapshot, ActionRequest, ActionResponse)),
    tags(
        (name = "board", description = "Board state — full game-state snapshot"),
        (name = "plots", description = "Plot actions — plant, water, harvest"),
    )
)]
pub struct ApiDoc;
