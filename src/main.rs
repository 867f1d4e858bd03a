use actix_identity::IdentityMiddleware;
use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use homie_stays::config::ServerConfig;
use homie_stays::db::establish_connection_pool;
use homie_stays::repository::DieselRepository;
use homie_stays::routes::bookings::{cancel_booking, create_booking, list_bookings};
use homie_stays::routes::properties::{
    list_properties, quote_stay, show_availability, show_property, update_pricing,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let secret_key = match config.secret_key.as_deref().map(|key| Key::try_from(key.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(e)) => {
            log::error!("SECRET_KEY is unusable: {e}");
            std::process::exit(1);
        }
        None => {
            log::warn!("SECRET_KEY not set, sessions will not survive a restart");
            Key::generate()
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let domain = config.domain.clone();

    log::info!("Listening on {}:{}", config.address, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(IdentityMiddleware::default())
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), secret_key.clone())
                    .cookie_secure(false) // set to true in prod
                    .cookie_domain(Some(format!(".{domain}")))
                    .build(),
            )
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api/v1")
                    .service(list_properties)
                    .service(show_property)
                    .service(show_availability)
                    .service(quote_stay)
                    .service(update_pricing)
                    .service(create_booking)
                    .service(list_bookings)
                    .service(cancel_booking),
            )
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((config.address.clone(), config.port))?
    .run()
    .await
}
