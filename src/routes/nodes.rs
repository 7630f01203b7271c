use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::auth::AuthenticatedUser;
use crate::forms::nodes::{AddNodeForm, AddSubtreeForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::configurations::load_manufacturing_type;
use crate::services::hierarchy::{
    create_node, create_subtree, load_tree, remove_subtree, render_ascii,
};

#[get("/types/{type_id}/nodes")]
pub async fn show_nodes(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let type_id = path.into_inner();

    let manufacturing_type = match load_manufacturing_type(repo.get_ref(), type_id) {
        Ok(manufacturing_type) => manufacturing_type,
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Type not found.").send();
            return HttpResponse::SeeOther()
                .insert_header((actix_web::http::header::LOCATION, "/types"))
                .finish();
        }
        Err(err) => {
            log::error!("Failed to load manufacturing type {type_id}: {err}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    match load_tree(repo.get_ref(), type_id) {
        Ok(tree) => {
            let ascii = render_ascii(&tree);
            let mut context = base_context(&flash_messages, &user, "types");
            context.insert("manufacturing_type", &manufacturing_type);
            context.insert("tree", &tree);
            context.insert("tree_ascii", &ascii);
            render_template(&tera, "nodes/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load node tree for type {type_id}: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/types/{type_id}/nodes/add")]
pub async fn add_node(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<AddNodeForm>,
) -> impl Responder {
    let type_id = path.into_inner();
    let nodes_page = format!("/types/{type_id}/nodes");

    let form = form.into_inner();
    let parent_node_id = form.parent_node_id;
    let draft = match form.into_node_draft() {
        Ok(draft) => draft,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(&nodes_page);
        }
    };

    match create_node(repo.get_ref(), &user, type_id, parent_node_id, draft) {
        Ok(node) => {
            FlashMessage::success(format!("Node \u{201c}{}\u{201d} added.", node.name)).send();
            redirect(&nodes_page)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect(&nodes_page)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Type or parent node not found.").send();
            redirect(&nodes_page)
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("A sibling with this slug already exists.").send();
            redirect(&nodes_page)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&nodes_page)
        }
        Err(err) => {
            log::error!("Failed to create node under type {type_id}: {err}");
            FlashMessage::error("Could not create the node.").send();
            redirect(&nodes_page)
        }
    }
}

#[post("/types/{type_id}/nodes/subtree")]
pub async fn add_subtree(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    form: web::Form<AddSubtreeForm>,
) -> impl Responder {
    let type_id = path.into_inner();
    let nodes_page = format!("/types/{type_id}/nodes");

    let (parent_node_id, spec) = match form.into_inner().into_parts() {
        Ok(parts) => parts,
        Err(err) => {
            FlashMessage::error(err.to_string()).send();
            return redirect(&nodes_page);
        }
    };

    match create_subtree(repo.get_ref(), &user, type_id, parent_node_id, &spec) {
        Ok(created) => {
            FlashMessage::success(format!("Subtree with {created} nodes added.")).send();
            redirect(&nodes_page)
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect(&nodes_page)
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Type or parent node not found.").send();
            redirect(&nodes_page)
        }
        Err(ServiceError::Conflict) => {
            FlashMessage::error("A sibling with this slug already exists.").send();
            redirect(&nodes_page)
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
            redirect(&nodes_page)
        }
        Err(err) => {
            log::error!("Failed to create subtree under type {type_id}: {err}");
            FlashMessage::error("Could not create the subtree.").send();
            redirect(&nodes_page)
        }
    }
}

#[post("/nodes/{node_id}/delete")]
pub async fn delete_node(
    path: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let node_id = path.into_inner();

    match remove_subtree(repo.get_ref(), &user, node_id) {
        Ok(removed) => {
            FlashMessage::success(format!("Removed {removed} nodes.")).send();
            redirect("/types")
        }
        Err(ServiceError::Unauthorized) => {
            FlashMessage::error("Insufficient permissions.").send();
            redirect("/types")
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Node not found.").send();
            redirect("/types")
        }
        Err(err) => {
            log::error!("Failed to delete node {node_id}: {err}");
            FlashMessage::error("Could not delete the node.").send();
            redirect("/types")
        }
    }
}
