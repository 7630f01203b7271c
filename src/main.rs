use std::env;

use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use dotenvy::dotenv;
use tera::Tera;

use fenestra::config::ServerConfig;
use fenestra::db::establish_connection_pool;
use fenestra::middleware::RedirectUnauthorized;
use fenestra::repository::DieselRepository;
use fenestra::routes::api::{api_v1_quotes, api_v1_type_price, api_v1_type_tree, api_v1_types};
use fenestra::routes::auth::{login, logout, register, show_login};
use fenestra::routes::customers::{
    add_customer, edit_customer, remove_customer, show_customers, upload_customers,
};
use fenestra::routes::main::show_dashboard;
use fenestra::routes::manufacturing_types::{add_type, edit_type, remove_type, show_types};
use fenestra::routes::nodes::{add_node, add_subtree, delete_node, show_nodes};
use fenestra::routes::quotes::{
    add_quote, delete_quote, edit_quote, set_quote_status, show_quotes,
};

const DEFAULT_SESSION_TTL_MINUTES: i64 = 60 * 24;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let database_url = env::var("DATABASE_URL").unwrap_or("app.db".to_string());
    let port = env::var("PORT").unwrap_or("8080".to_string());
    let port = port.parse::<u16>().unwrap_or(8080);
    let address = env::var("ADDRESS").unwrap_or("127.0.0.1".to_string());

    let secret = match env::var("SECRET_KEY") {
        Ok(secret) if !secret.is_empty() => secret,
        _ => {
            log::error!("SECRET_KEY environment variable not set");
            std::process::exit(1);
        }
    };

    let session_ttl_minutes = env::var("SESSION_TTL_MINUTES")
        .ok()
        .and_then(|value| value.parse::<i64>().ok())
        .unwrap_or(DEFAULT_SESSION_TTL_MINUTES);

    let server_config = ServerConfig::new(&secret, session_ttl_minutes);

    let pool = match establish_connection_pool(&database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    // The flash cookie store needs a full signing key, derived from the
    // configured secret.
    let message_key = Key::derive_from(secret.as_bytes());
    let message_store = CookieMessageStore::builder(message_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = match Tera::new("templates/**/*") {
        Ok(t) => t,
        Err(e) => {
            log::error!("Parsing error(s): {e}");
            std::process::exit(1);
        }
    };

    HttpServer::new(move || {
        App::new()
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", "./assets"))
            .service(show_login)
            .service(login)
            .service(register)
            .service(
                web::scope("/api")
                    .service(api_v1_types)
                    .service(api_v1_type_tree)
                    .service(api_v1_type_price)
                    .service(api_v1_quotes),
            )
            .service(
                web::scope("")
                    .wrap(RedirectUnauthorized)
                    .service(show_dashboard)
                    .service(logout)
                    .service(show_types)
                    .service(add_type)
                    .service(edit_type)
                    .service(remove_type)
                    .service(show_nodes)
                    .service(add_node)
                    .service(add_subtree)
                    .service(delete_node)
                    .service(show_customers)
                    .service(add_customer)
                    .service(edit_customer)
                    .service(remove_customer)
                    .service(upload_customers)
                    .service(show_quotes)
                    .service(add_quote)
                    .service(set_quote_status)
                    .service(edit_quote)
                    .service(delete_quote),
            )
            .app_data(web::Data::new(tera.clone()))
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind((address, port))?
    .run()
    .await
}
