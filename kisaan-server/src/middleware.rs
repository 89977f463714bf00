use actix_cors::Cors;
use actix_web::http::header;

pub fn cors_middleware() -> Cors {
    Cors::default()
        .allow_any_origin() // the frontend dev server runs on a different port
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
        .max_age(3600)
}
