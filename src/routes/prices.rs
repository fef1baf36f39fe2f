use actix_web::{
    get,
    web::{self, ServiceConfig},
    HttpResponse, Responder,
};
use serde_json::json;

use crate::utils::coingecko::CoinGecko;
use crate::HISTORY_DAYS;

/// Where the frontend asset lives. Held in app data so the path can be
/// swapped out when exercising the routes.
pub struct StaticAssets {
    pub index_path: String,
}

impl Default for StaticAssets {
    fn default() -> Self {
        StaticAssets {
            index_path: "static/index.html".to_string(),
        }
    }
}

/// Proxies the upstream price payload untouched. Always 200; upstream
/// failures are reported in the body so the frontend can keep polling.
#[get("/api/prices")]
pub async fn prices(client: web::Data<CoinGecko>) -> impl Responder {
    match client.fetch_prices_raw().await {
        Ok(data) => HttpResponse::Ok().json(json!({ "ok": true, "data": data })),
        Err(err) => HttpResponse::Ok().json(json!({ "ok": false, "error": err.to_string() })),
    }
}

#[get("/api/history/{coin_id}")]
pub async fn history(client: web::Data<CoinGecko>, path: web::Path<String>) -> impl Responder {
    let coin_id = path.into_inner();
    match client.fetch_history(&coin_id, HISTORY_DAYS).await {
        Ok(series) => HttpResponse::Ok().json(json!({ "ok": true, "prices": series })),
        Err(err) => HttpResponse::Ok().json(json!({ "ok": false, "error": err.to_string() })),
    }
}

/// Serves the static frontend. A missing asset fails this request only.
#[get("/")]
pub async fn index(assets: web::Data<StaticAssets>) -> impl Responder {
    match std::fs::read_to_string(&assets.index_path) {
        Ok(html) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(html),
        Err(err) => {
            println!("Error reading {}: {}", assets.index_path, err);
            HttpResponse::InternalServerError().body("Frontend asset not found")
        }
    }
}

pub fn init(config: &mut ServiceConfig) {
    config.service(prices).service(history).service(index);
}
