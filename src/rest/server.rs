use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpResponse, HttpServer};

use super::{api, errors, page, swagger};
use crate::config::APIConfig;
use crate::service::WalletService;

/// Registers every route of the gallery. Shared by the server and tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(page::index))
        .route("/docs/", web::get().to(swagger::ui))
        .route("/docs/swagger.yaml", web::get().to(swagger::spec))
        .route("/static/{file}", web::get().to(swagger::static_file))
        .service(
            web::scope("/api/v1")
                .route("/info", web::get().to(api::info))
                .route("/wallet", web::get().to(api::wallet_overview))
                .route("/wallet/nfts", web::get().to(api::wallet_nfts))
                .route("/assets/{unit}/name", web::get().to(api::asset_name)),
        );
}

pub async fn not_found() -> HttpResponse {
    errors::ApiError::NotFound.into()
}

fn cors(domain: &str) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec!["GET"])
        .max_age(3600);

    if domain == "*" {
        cors.allow_any_origin()
    } else {
        cors.allowed_origin(domain)
    }
}

pub async fn run_server(cfg: APIConfig, service: WalletService) -> std::io::Result<()> {
    info!(
        "starting HTTP server: address={}:{} wallet={}",
        cfg.listen_address,
        cfg.port,
        service.address()
    );

    let data = web::Data::new(service);
    let cors_domain = cfg.cors_domain.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(cors(&cors_domain))
            .app_data(data.clone())
            .configure(configure)
            .default_service(web::to(not_found))
    })
    .bind((cfg.listen_address.as_str(), cfg.port as u16))?
    .run()
    .await
}
