use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::manufacturing_types::{AddManufacturingTypeForm, EditManufacturingTypeForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::manufacturing_types::{
    TypesQuery, create_type, delete_type, load_types_page, update_type,
};

#[get("/types")]
pub async fn show_types(
    params: web::Query<TypesQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_types_page(repo.get_ref(), params.0) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "types");
            context.insert("types", &data.types);
            context.insert("search", &data.search);
            context.insert("show_inactive", &data.show_inactive);
            render_template(&tera, "types/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list manufacturing types: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/types/add")]
pub async fn add_type(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<AddManufacturingTypeForm>,
) -> impl Responder {
    match create_type(repo.get_ref(), &user, form.into_inner()) {
        Ok(manufacturing_type) => {
            FlashMessage::success(format!("Type \u{201c}{}\u{201d} added.", manufacturing_type.name))
                .send();
            redirect("/types")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/types")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/types")
        }
        Err(err) => {
            log::error!("Failed to create manufacturing type: {err}");
            FlashMessage::error("Could not create the type.").send();
            redirect("/types")
        }
    }
}

#[post("/types/edit")]
pub async fn edit_type(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<EditManufacturingTypeForm>,
) -> impl Responder {
    match update_type(repo.get_ref(), &user, form.into_inner()) {
        Ok(manufacturing_type) => {
            FlashMessage::success(format!(
                "Type \u{201c}{}\u{201d} updated.",
                manufacturing_type.name
            ))
            .send();
            redirect("/types")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/types")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Type not found.").send();
            redirect("/types")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/types")
        }
        Err(err) => {
            log::error!("Failed to update manufacturing type: {err}");
            FlashMessage::error("Could not update the type.").send();
            redirect("/types")
        }
    }
}

#[post("/types/{type_id}/delete")]
pub async fn remove_type(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let type_id = path.into_inner();

    match delete_type(repo.get_ref(), &user, type_id) {
        Ok(()) => {
            FlashMessage::success("Type deleted.").send();
            redirect("/types")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/types")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Type not found.").send();
            redirect("/types")
        }
        Err(err) => {
            log::error!("Failed to delete manufacturing type {type_id}: {err}");
            FlashMessage::error("Could not delete the type.").send();
            redirect("/types")
        }
    }
}
