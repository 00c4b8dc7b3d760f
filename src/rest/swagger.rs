use actix_web::{web, HttpResponse, Responder};
use mime_guess::from_path;
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "docs/swagger/"]
struct Docs;

#[derive(RustEmbed)]
#[folder = "static/"]
struct Static;

fn handle_embedded_file<E: RustEmbed>(path: &str) -> HttpResponse {
    match E::get(path) {
        Some(content) => HttpResponse::Ok()
            .content_type(from_path(path).first_or_octet_stream().as_ref())
            .body(content.data.into_owned()),
        None => HttpResponse::NotFound().body("404 Not Found"),
    }
}

pub async fn ui() -> impl Responder {
    handle_embedded_file::<Docs>("index.html")
}

pub async fn spec() -> impl Responder {
    handle_embedded_file::<Docs>("swagger.yaml")
}

pub async fn static_file(path: web::Path<String>) -> impl Responder {
    handle_embedded_file::<Static>(&path)
}
