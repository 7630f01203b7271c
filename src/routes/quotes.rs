use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::quotes::{AddQuoteForm, EditQuoteForm, QuoteStatusForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::customers::{CustomersQuery, load_customers_page};
use crate::services::manufacturing_types::list_active_types;
use crate::services::quotes::{
    QuotesQuery, change_status, create_quote, load_quotes_page, remove_quote, update_quote,
};

#[get("/quotes")]
pub async fn show_quotes(
    params: web::Query<QuotesQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = match load_quotes_page(repo.get_ref(), params.0) {
        Ok(data) => data,
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            return HttpResponse::SeeOther()
                .insert_header((actix_web::http::header::LOCATION, "/quotes"))
                .finish();
        }
        Err(err) => {
            log::error!("Failed to list quotes: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    // The add-quote modal needs customers and active types to pick from.
    let customers = match load_customers_page(repo.get_ref(), CustomersQuery::default()) {
        Ok(page) => page.customers.items,
        Err(err) => {
            log::error!("Failed to list customers for the quote form: {err}");
            Vec::new()
        }
    };
    let types = match list_active_types(repo.get_ref()) {
        Ok(types) => types,
        Err(err) => {
            log::error!("Failed to list types for the quote form: {err}");
            Vec::new()
        }
    };

    let mut context = base_context(&flash_messages, &user, "quotes");
    context.insert("quotes", &data.quotes);
    context.insert("search", &data.search);
    context.insert("status", &data.status);
    context.insert("customers", &customers);
    context.insert("types", &types);
    render_template(&tera, "quotes/index.html", &context)
}

#[post("/quotes/add")]
pub async fn add_quote(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<AddQuoteForm>,
) -> impl Responder {
    match create_quote(repo.get_ref(), form.into_inner()) {
        Ok(quote) => {
            FlashMessage::success(format!("Quote #{} created.", quote.id)).send();
            redirect("/quotes")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Customer or type not found.").send();
            redirect("/quotes")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/quotes")
        }
        Err(err) => {
            log::error!("Failed to create quote: {err}");
            FlashMessage::error("Could not create the quote.").send();
            redirect("/quotes")
        }
    }
}

#[post("/quotes/status")]
pub async fn set_quote_status(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<QuoteStatusForm>,
) -> impl Responder {
    match change_status(repo.get_ref(), form.into_inner()) {
        Ok(quote) => {
            FlashMessage::success(format!(
                "Quote #{} is now {}.",
                quote.id,
                quote.status.as_str()
            ))
            .send();
            redirect("/quotes")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Quote not found.").send();
            redirect("/quotes")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/quotes")
        }
        Err(err) => {
            log::error!("Failed to change quote status: {err}");
            FlashMessage::error("Could not change the quote status.").send();
            redirect("/quotes")
        }
    }
}

#[post("/quotes/edit")]
pub async fn edit_quote(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<EditQuoteForm>,
) -> impl Responder {
    match update_quote(repo.get_ref(), form.into_inner()) {
        Ok(quote) => {
            FlashMessage::success(format!("Quote #{} updated.", quote.id)).send();
            redirect("/quotes")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Quote not found.").send();
            redirect("/quotes")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/quotes")
        }
        Err(err) => {
            log::error!("Failed to update quote: {err}");
            FlashMessage::error("Could not update the quote.").send();
            redirect("/quotes")
        }
    }
}

#[post("/quotes/{quote_id}/delete")]
pub async fn delete_quote(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let quote_id = path.into_inner();

    if !user.is_superuser {
        FlashMessage::error("Insufficient permissions.").send();
        return redirect("/quotes");
    }

    match remove_quote(repo.get_ref(), quote_id) {
        Ok(()) => {
            FlashMessage::success("Quote deleted.").send();
            redirect("/quotes")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Quote not found.").send();
            redirect("/quotes")
        }
        Err(err) => {
            log::error!("Failed to delete quote {quote_id}: {err}");
            FlashMessage::error("Could not delete the quote.").send();
            redirect("/quotes")
        }
    }
}
