use std::fmt::Display;
use std::str::FromStr;

use actix_web::http::header;
use actix_web::{HttpResponse, Responder};
use actix_web_flash_messages::IncomingFlashMessages;
use serde::{Deserialize, Deserializer};
use tera::{Context, Tera};

use crate::domain::auth::AuthenticatedUser;

pub mod api;
pub mod auth;
pub mod customers;
pub mod main;
pub mod manufacturing_types;
pub mod nodes;
pub mod quotes;

/// Build the context every console template expects: flash messages, the
/// current user and the active menu entry.
pub fn base_context(
    flash_messages: &IncomingFlashMessages,
    user: &AuthenticatedUser,
    active_menu: &str,
) -> Context {
    let mut context = Context::new();
    let messages: Vec<(String, String)> = flash_messages
        .iter()
        .map(|message| (message.level().to_string(), message.content().to_string()))
        .collect();
    context.insert("flash_messages", &messages);
    context.insert("current_user", user);
    context.insert("active_menu", active_menu);
    context
}

/// Render a template or log the failure and return a 500.
pub fn render_template(tera: &Tera, name: &str, context: &Context) -> HttpResponse {
    match tera.render(name, context) {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(err) => {
            log::error!("Failed to render template {name}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// 303 redirect used after form submissions. The returned responder owns
/// its location header, so callers may pass borrowed, locally built paths.
pub fn redirect(location: &str) -> impl Responder + use<> {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location.to_string()))
        .finish()
}

/// Deserialize optional form fields where browsers submit empty strings.
pub fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw.parse::<T>().map(Some).map_err(serde::de::Error::custom),
    }
}
