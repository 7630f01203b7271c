use actix_web::{HttpResponse, Responder, get, web};
use actix_web_flash_messages::IncomingFlashMessages;
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::main as main_service;

#[get("/")]
pub async fn show_dashboard(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match main_service::load_dashboard(repo.get_ref()) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "dashboard");
            context.insert("customer_count", &data.customer_count);
            context.insert("type_count", &data.type_count);
            context.insert("quote_counts", &data.quote_counts);
            context.insert("recent_quotes", &data.recent_quotes);
            render_template(&tera, "main/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load dashboard: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
