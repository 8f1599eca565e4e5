use actix_web::{middleware, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use sprout::api::openapi::ApiDoc;
use sprout::logic::service::{BoardService, STORAGE_DIR};
use sprout::models::request::ActionResponse;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Startup is the one place a persistence failure is fatal: serving with an
    // unknown board state is worse than not starting.
    let service = BoardService::new(STORAGE_DIR);
    service.initialize()?;

    let bind_addr = "0.0.0.0:8080";
    println!("🌱 Sprout farm started at http://{bind_addr}");
    println!("   GET  /api/game-state");
    println!("   POST /api/plant");
    println!("   POST /api/water");
    println!("   POST /api/harvest");
    println!("   ");
    println!("   📖 Swagger UI → http://{bind_addr}/swagger-ui/");
    println!("   📌 OpenAPI spec → http://{bind_addr}/api-docs/openapi.json");

    let service = web::Data::new(service);
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(service.clone())
            .configure(sprout::api::routes::configure)
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                let message = format!("Invalid request body: {err}");
                actix_web::error::InternalError::from_response(
                    err,
                    actix_web::HttpResponse::BadRequest()
                        .json(ActionResponse::rejected(message)),
                )
                .into()
            }))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(bind_addr)?
    .run()
    .await
}
