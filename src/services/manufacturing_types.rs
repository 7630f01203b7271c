use serde::Deserialize;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::manufacturing_type::{ManufacturingType, ManufacturingTypeListQuery};
use crate::forms::manufacturing_types::{AddManufacturingTypeForm, EditManufacturingTypeForm};
use crate::pagination::{DEFAULT_ITEMS_PER_PAGE, Paginated};
use crate::repository::{ManufacturingTypeReader, ManufacturingTypeWriter};
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the types index page.
#[derive(Debug, Default, Deserialize)]
pub struct TypesQuery {
    pub search: Option<String>,
    pub page: Option<usize>,
    #[serde(default)]
    pub show_inactive: bool,
}

/// Data required to render the types index template.
pub struct TypesPageData {
    pub types: Paginated<ManufacturingType>,
    pub search: Option<String>,
    pub show_inactive: bool,
}

/// Loads the manufacturing types overview.
pub fn load_types_page<R>(repo: &R, query: TypesQuery) -> ServiceResult<TypesPageData>
where
    R: ManufacturingTypeReader + ?Sized,
{
    let TypesQuery {
        search,
        page,
        show_inactive,
    } = query;

    let page = page.unwrap_or(1);
    let mut list_query = ManufacturingTypeListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);

    if let Some(search_term) = search.as_ref() {
        list_query = list_query.search(search_term);
    }
    if show_inactive {
        list_query = list_query.include_inactive();
    }

    let (total, items) = repo
        .list_manufacturing_types(list_query)
        .map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(TypesPageData {
        types: Paginated::new(items, page, total_pages),
        search,
        show_inactive,
    })
}

/// All active types, for the API and the quote form dropdown.
pub fn list_active_types<R>(repo: &R) -> ServiceResult<Vec<ManufacturingType>>
where
    R: ManufacturingTypeReader + ?Sized,
{
    let (_, items) = repo
        .list_manufacturing_types(ManufacturingTypeListQuery::new())
        .map_err(ServiceError::from)?;
    Ok(items)
}

/// Creates a manufacturing type; superusers only.
pub fn create_type<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: AddManufacturingTypeForm,
) -> ServiceResult<ManufacturingType>
where
    R: ManufacturingTypeWriter + ?Sized,
{
    if !user.is_superuser {
        return Err(ServiceError::Unauthorized);
    }

    let new_type = form
        .into_new_manufacturing_type()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    repo.create_manufacturing_type(&new_type)
        .map_err(ServiceError::from)
}

/// Applies edits to a manufacturing type; superusers only.
pub fn update_type<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: EditManufacturingTypeForm,
) -> ServiceResult<ManufacturingType>
where
    R: ManufacturingTypeWriter + ?Sized,
{
    if !user.is_superuser {
        return Err(ServiceError::Unauthorized);
    }

    let type_id = form.id;
    let updates = form
        .into_update_manufacturing_type()
        .map_err(|err| ServiceError::Form(err.to_string()))?;
    repo.update_manufacturing_type(type_id, &updates)
        .map_err(ServiceError::from)
}

/// Deletes a manufacturing type and, via cascade, its hierarchy.
pub fn delete_type<R>(repo: &R, user: &AuthenticatedUser, type_id: i32) -> ServiceResult<()>
where
    R: ManufacturingTypeWriter + ?Sized,
{
    if !user.is_superuser {
        return Err(ServiceError::Unauthorized);
    }
    repo.delete_manufacturing_type(type_id)
        .map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::mock::{MockManufacturingTypeReader, MockManufacturingTypeWriter};

    fn regular_user() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: 2,
            email: "user@example.com".to_string(),
            username: "user".to_string(),
            is_superuser: false,
            token: "token".to_string(),
        }
    }

    #[test]
    fn mutations_require_superuser() {
        let writer = MockManufacturingTypeWriter::new();
        let user = regular_user();

        let form = AddManufacturingTypeForm {
            name: "Door".to_string(),
            description: None,
            base_category: "door".to_string(),
            base_price: "500".to_string(),
            base_weight_grams: None,
        };
        assert!(matches!(
            create_type(&writer, &user, form),
            Err(ServiceError::Unauthorized)
        ));
        assert!(matches!(
            delete_type(&writer, &user, 1),
            Err(ServiceError::Unauthorized)
        ));
    }

    #[test]
    fn page_query_toggles_inactive_types() {
        let mut reader = MockManufacturingTypeReader::new();
        reader
            .expect_list_manufacturing_types()
            .withf(|query| query.include_inactive)
            .returning(|_| Ok((0, Vec::new())));

        let query = TypesQuery {
            show_inactive: true,
            ..TypesQuery::default()
        };
        assert!(load_types_page(&reader, query).is_ok());
    }
}
