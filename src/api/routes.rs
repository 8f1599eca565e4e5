use actix_web::web;

use crate::api::handlers::{get_game_state, post_harvest, post_plant, post_water};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(get_game_state)
            .service(post_plant)
            .service(post_water)
            .service(post_harvest),
    );
}
