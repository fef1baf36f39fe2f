use actix_cors::Cors;
use actix_web::{web::Data, App, HttpServer};

use coin_pulse::routes::{self, prices::StaticAssets};
use coin_pulse::utils::coingecko::CoinGecko;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let client = CoinGecko::init().expect("Failed to build CoinGecko client");
    let client_data = Data::new(client);

    println!("Price proxy listening on 0.0.0.0:3000");
    HttpServer::new(move || {
        App::new()
            .app_data(client_data.clone())
            .app_data(Data::new(StaticAssets::default()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET"])
                    .allow_any_header(),
            )
            .configure(routes::prices::init)
    })
    .bind(("0.0.0.0", 3000))
    .expect("Failed to bind Actix server")
    .run()
    .await?;

    Ok(())
}
