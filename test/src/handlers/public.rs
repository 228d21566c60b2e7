//! Public routes (no API key required).

use actix_web::{get, HttpResponse, Responder};
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
}

#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(Health { status: "up" })
}

/// Permitted by the middleware, so no key is checked or attached.
#[get("/hello")]
pub async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Hello, anonymous caller!")
}
