use actix_web::{web, App, HttpServer};
use actix_cors::Cors;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use log4rs::init_file;

use synthig::apis;
use synthig::apis::api_doc::ApiDoc;
use synthig::apis::schemas::AppState;
use synthig::configs::settings::GLOBAL_CONFIG;
use synthig::cores::image_models::build_provider;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    let config = &*GLOBAL_CONFIG;

    let config_path = format!("{}/src/configs/log4rs.yaml", env!("CARGO_MANIFEST_DIR"));
    init_file(&config_path, Default::default()).unwrap();

    // Set the port number
    let port = config.port;
    println!("Starting server on port {}", port);

    let state = web::Data::new(AppState {
        provider: build_provider(config),
    });

    // Start the HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin() // cors
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec!["Content-Type", "Authorization", "User-Agent"])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .configure(apis::models_api::image::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
