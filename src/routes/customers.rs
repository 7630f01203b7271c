use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::customers::{AddCustomerForm, EditCustomerForm, UploadCustomersMultipart};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::customers::{
    CustomersQuery, create_customer, delete_customer, import_customers, load_customers_page,
    update_customer,
};

#[get("/customers")]
pub async fn show_customers(
    params: web::Query<CustomersQuery>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    match load_customers_page(repo.get_ref(), params.0) {
        Ok(data) => {
            let mut context = base_context(&flash_messages, &user, "customers");
            context.insert("customers", &data.customers);
            context.insert("search", &data.search);
            render_template(&tera, "customers/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to list customers: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/customers/add")]
pub async fn add_customer(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<AddCustomerForm>,
) -> impl Responder {
    match create_customer(repo.get_ref(), form.into_inner()) {
        Ok(customer) => {
            FlashMessage::success(format!("Customer \u{201c}{}\u{201d} added.", customer.name))
                .send();
            redirect("/customers")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/customers")
        }
        Err(err) => {
            log::error!("Failed to create customer: {err}");
            FlashMessage::error("Could not create the customer.").send();
            redirect("/customers")
        }
    }
}

#[post("/customers/edit")]
pub async fn edit_customer(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<EditCustomerForm>,
) -> impl Responder {
    match update_customer(repo.get_ref(), form.into_inner()) {
        Ok(customer) => {
            FlashMessage::success(format!("Customer \u{201c}{}\u{201d} updated.", customer.name))
                .send();
            redirect("/customers")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Customer not found.").send();
            redirect("/customers")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/customers")
        }
        Err(err) => {
            log::error!("Failed to update customer: {err}");
            FlashMessage::error("Could not update the customer.").send();
            redirect("/customers")
        }
    }
}

#[post("/customers/{customer_id}/delete")]
pub async fn remove_customer(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let customer_id = path.into_inner();

    match delete_customer(repo.get_ref(), &user, customer_id) {
        Ok(()) => {
            FlashMessage::success("Customer deleted.").send();
            redirect("/customers")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/customers")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Customer not found.").send();
            redirect("/customers")
        }
        Err(err) => {
            log::error!("Failed to delete customer {customer_id}: {err}");
            FlashMessage::error("Could not delete the customer.").send();
            redirect("/customers")
        }
    }
}

#[post("/customers/upload")]
pub async fn upload_customers(
    _user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadCustomersMultipart>,
) -> impl Responder {
    let upload = match form.into_upload() {
        Ok(upload) => upload,
        Err(err) => {
            log::error!("Failed to read customers upload: {err}");
            FlashMessage::error("Could not read the uploaded file.").send();
            return redirect("/customers");
        }
    };

    match import_customers(repo.get_ref(), upload) {
        Ok(created) => {
            FlashMessage::success(format!("Imported {created} customers.")).send();
            redirect("/customers")
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect("/customers")
        }
        Err(err) => {
            log::error!("Failed to import customers: {err}");
            FlashMessage::error("Could not import the customers.").send();
            redirect("/customers")
        }
    }
}
