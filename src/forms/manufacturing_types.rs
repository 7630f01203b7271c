use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::manufacturing_type::{NewManufacturingType, UpdateManufacturingType};
use crate::forms::{parse_money_cents, sanitize_inline_text, sanitize_multiline_text};

const NAME_MAX_LEN: u64 = 128;
const CATEGORY_MAX_LEN: u64 = 64;

pub type TypeFormResult<T> = Result<T, TypeFormError>;

/// Errors that can occur while processing manufacturing type forms.
#[derive(Debug, Error)]
pub enum TypeFormError {
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("name cannot be empty")]
    EmptyName,
    #[error("invalid price `{value}`")]
    InvalidPrice { value: String },
    #[error("invalid weight `{value}`")]
    InvalidWeight { value: String },
}

/// Form payload emitted when submitting the "Add type" form.
///
/// `base_price` is a decimal money string as typed by the user; weight is
/// whole grams.
#[derive(Debug, Deserialize, Validate)]
pub struct AddManufacturingTypeForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: String,
    pub description: Option<String>,
    #[validate(length(min = 1, max = CATEGORY_MAX_LEN))]
    pub base_category: String,
    pub base_price: String,
    pub base_weight_grams: Option<String>,
}

impl AddManufacturingTypeForm {
    pub fn into_new_manufacturing_type(self) -> TypeFormResult<NewManufacturingType> {
        self.validate()?;

        let name = sanitize_inline_text(&self.name);
        if name.is_empty() {
            return Err(TypeFormError::EmptyName);
        }

        let base_category = sanitize_inline_text(&self.base_category).to_lowercase();

        let base_price_cents = parse_price(&self.base_price)?;
        let base_weight_grams = self
            .base_weight_grams
            .as_deref()
            .map(parse_weight)
            .transpose()?
            .unwrap_or(0);

        let mut new_type = NewManufacturingType::new(name, base_category)
            .base_price_cents(base_price_cents)
            .base_weight_grams(base_weight_grams);

        if let Some(description) = self
            .description
            .as_deref()
            .map(sanitize_multiline_text)
            .filter(|value| !value.is_empty())
        {
            new_type = new_type.with_description(description);
        }

        Ok(new_type)
    }
}

/// Form payload emitted when editing a manufacturing type.
#[derive(Debug, Deserialize, Validate)]
pub struct EditManufacturingTypeForm {
    pub id: i32,
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    /// Empty string clears the existing description.
    pub description: Option<String>,
    #[validate(length(min = 1, max = CATEGORY_MAX_LEN))]
    pub base_category: Option<String>,
    pub base_price: Option<String>,
    pub base_weight_grams: Option<String>,
    pub is_active: Option<bool>,
}

impl EditManufacturingTypeForm {
    pub fn into_update_manufacturing_type(self) -> TypeFormResult<UpdateManufacturingType> {
        self.validate()?;

        let mut updates = UpdateManufacturingType::new();

        if let Some(name) = self.name {
            let sanitized = sanitize_inline_text(&name);
            if sanitized.is_empty() {
                return Err(TypeFormError::EmptyName);
            }
            updates = updates.name(sanitized);
        }

        if let Some(description) = self.description {
            let sanitized = sanitize_multiline_text(&description);
            if sanitized.is_empty() {
                updates = updates.description(None::<String>);
            } else {
                updates = updates.description(Some(sanitized));
            }
        }

        if let Some(base_category) = self.base_category {
            updates = updates.base_category(sanitize_inline_text(&base_category).to_lowercase());
        }

        if let Some(base_price) = self.base_price {
            updates = updates.base_price_cents(parse_price(&base_price)?);
        }

        if let Some(base_weight_grams) = self.base_weight_grams {
            updates = updates.base_weight_grams(parse_weight(&base_weight_grams)?);
        }

        if let Some(is_active) = self.is_active {
            updates = updates.active(is_active);
        }

        Ok(updates)
    }
}

fn parse_price(input: &str) -> TypeFormResult<i64> {
    parse_money_cents(input)
        .filter(|cents| *cents >= 0)
        .ok_or_else(|| TypeFormError::InvalidPrice {
            value: input.trim().to_string(),
        })
}

fn parse_weight(input: &str) -> TypeFormResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .ok()
        .filter(|grams| *grams >= 0)
        .ok_or_else(|| TypeFormError::InvalidWeight {
            value: input.trim().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_form_parses_money_and_weight() {
        let form = AddManufacturingTypeForm {
            name: "  Tilt-turn  window ".to_string(),
            description: Some("Two-sash frame.\n\n\nTriple glazing.".to_string()),
            base_category: "Window".to_string(),
            base_price: "1299.50".to_string(),
            base_weight_grams: Some("24500".to_string()),
        };

        let new_type = form.into_new_manufacturing_type().expect("valid form");
        assert_eq!(new_type.name, "Tilt-turn window");
        assert_eq!(new_type.base_category, "window");
        assert_eq!(new_type.base_price_cents, 129950);
        assert_eq!(new_type.base_weight_grams, 24500);
        assert_eq!(
            new_type.description.as_deref(),
            Some("Two-sash frame.\n\nTriple glazing.")
        );
    }

    #[test]
    fn add_form_rejects_negative_price() {
        let form = AddManufacturingTypeForm {
            name: "Door".to_string(),
            description: None,
            base_category: "door".to_string(),
            base_price: "-5".to_string(),
            base_weight_grams: None,
        };
        assert!(matches!(
            form.into_new_manufacturing_type(),
            Err(TypeFormError::InvalidPrice { .. })
        ));
    }

    #[test]
    fn edit_form_clears_description_with_empty_string() {
        let form = EditManufacturingTypeForm {
            id: 3,
            name: None,
            description: Some("   ".to_string()),
            base_category: None,
            base_price: None,
            base_weight_grams: None,
            is_active: Some(false),
        };
        let updates = form.into_update_manufacturing_type().expect("valid form");
        assert_eq!(updates.description, Some(None));
        assert_eq!(updates.is_active, Some(false));
        assert!(updates.name.is_none());
    }
}
