use actix_web::cookie::{Cookie, SameSite, time};
use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::{Context, Tera};

use crate::AUTH_COOKIE;
use crate::config::ServerConfig;
use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::repository::DieselRepository;
use crate::routes::{redirect, render_template};
use crate::services::auth::{self as auth_service, ClientInfo};
use crate::services::ServiceError;

#[get("/login")]
pub async fn show_login(
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = Context::new();
    let messages: Vec<(String, String)> = flash_messages
        .iter()
        .map(|message| (message.level().to_string(), message.content().to_string()))
        .collect();
    context.insert("flash_messages", &messages);
    render_template(&tera, "auth/login.html", &context)
}

#[post("/login")]
pub async fn login(
    req: HttpRequest,
    form: web::Form<LoginForm>,
    repo: web::Data<DieselRepository>,
    config: web::Data<ServerConfig>,
) -> impl Responder {
    let client = ClientInfo {
        ip_address: req
            .connection_info()
            .realip_remote_addr()
            .map(str::to_string),
        user_agent: req
            .headers()
            .get("User-Agent")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    };

    match auth_service::login(repo.get_ref(), &config, form.into_inner(), client) {
        Ok(outcome) => {
            let cookie = Cookie::build(AUTH_COOKIE, outcome.token)
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax)
                .max_age(time::Duration::minutes(config.session_ttl_minutes))
                .finish();
            HttpResponse::SeeOther()
                .insert_header((actix_web::http::header::LOCATION, "/"))
                .cookie(cookie)
                .finish()
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Wrong email or password.").send();
            HttpResponse::SeeOther()
                .insert_header((actix_web::http::header::LOCATION, "/login"))
                .finish()
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            HttpResponse::SeeOther()
                .insert_header((actix_web::http::header::LOCATION, "/login"))
                .finish()
        }
        Err(err) => {
            log::error!("Failed to log in: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/logout")]
pub async fn logout(user: AuthenticatedUser, repo: web::Data<DieselRepository>) -> impl Responder {
    if let Err(err) = auth_service::logout(repo.get_ref(), &user.token) {
        log::error!("Failed to log out {}: {err}", user.email);
    }

    let mut removal = Cookie::new(AUTH_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();

    HttpResponse::SeeOther()
        .insert_header((actix_web::http::header::LOCATION, "/login"))
        .cookie(removal)
        .finish()
}

#[post("/register")]
pub async fn register(
    requester: Option<AuthenticatedUser>,
    form: web::Form<RegisterForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match auth_service::register(repo.get_ref(), requester.as_ref(), form.into_inner()) {
        Ok(user) => {
            FlashMessage::success(format!("Account for {} created.", user.email)).send();
            redirect("/login")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Only a superuser can register accounts.").send();
            redirect("/login")
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("An account with this email already exists.").send();
            redirect("/login")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/login")
        }
        Err(err) => {
            log::error!("Failed to register account: {err}");
            FlashMessage::error("Could not create the account.").send();
            redirect("/login")
        }
    }
}
