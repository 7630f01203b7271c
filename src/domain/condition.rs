use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Boolean expression attached to an attribute node that decides whether the
/// node is shown, given the values already entered for sibling fields.
///
/// Stored as JSON: leaves carry `operator`, `field` and (where applicable)
/// `value`; `and`/`or` branches carry a `conditions` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operator", rename_all = "snake_case")]
pub enum DisplayCondition {
    Equals { field: String, value: String },
    NotEquals { field: String, value: String },
    Contains { field: String, value: String },
    IsEmpty { field: String },
    IsNotEmpty { field: String },
    And { conditions: Vec<DisplayCondition> },
    Or { conditions: Vec<DisplayCondition> },
}

impl DisplayCondition {
    /// Parse a condition from its JSON column representation.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Serialize the condition back into its JSON column representation.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Evaluate the condition against entered field values keyed by slug.
    ///
    /// Fields that were never entered compare as empty strings, so
    /// `is_empty` holds and `equals`/`contains` fail for them.
    pub fn evaluate(&self, fields: &HashMap<String, String>) -> bool {
        match self {
            Self::Equals { field, value } => lookup(fields, field) == value.as_str(),
            Self::NotEquals { field, value } => lookup(fields, field) != value.as_str(),
            Self::Contains { field, value } => lookup(fields, field).contains(value.as_str()),
            Self::IsEmpty { field } => lookup(fields, field).is_empty(),
            Self::IsNotEmpty { field } => !lookup(fields, field).is_empty(),
            Self::And { conditions } => conditions.iter().all(|c| c.evaluate(fields)),
            Self::Or { conditions } => conditions.iter().any(|c| c.evaluate(fields)),
        }
    }
}

fn lookup<'a>(fields: &'a HashMap<String, String>, field: &str) -> &'a str {
    fields.get(field).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn equals_matches_entered_value() {
        let condition = DisplayCondition::Equals {
            field: "frame_material".into(),
            value: "aluminium".into(),
        };

        assert!(condition.evaluate(&fields(&[("frame_material", "aluminium")])));
        assert!(!condition.evaluate(&fields(&[("frame_material", "pvc")])));
        assert!(!condition.evaluate(&fields(&[])));
    }

    #[test]
    fn contains_and_emptiness_operators() {
        let contains = DisplayCondition::Contains {
            field: "glazing".into(),
            value: "triple".into(),
        };
        assert!(contains.evaluate(&fields(&[("glazing", "triple_low_e")])));
        assert!(!contains.evaluate(&fields(&[("glazing", "double")])));

        let not_empty = DisplayCondition::IsNotEmpty {
            field: "color".into(),
        };
        assert!(not_empty.evaluate(&fields(&[("color", "ral_7016")])));
        assert!(!not_empty.evaluate(&fields(&[])));

        let empty = DisplayCondition::IsEmpty {
            field: "color".into(),
        };
        assert!(empty.evaluate(&fields(&[])));
        assert!(empty.evaluate(&fields(&[("color", "")])));
    }

    #[test]
    fn nested_and_or_evaluation() {
        let condition = DisplayCondition::And {
            conditions: vec![
                DisplayCondition::Equals {
                    field: "frame_material".into(),
                    value: "wood".into(),
                },
                DisplayCondition::Or {
                    conditions: vec![
                        DisplayCondition::Equals {
                            field: "finish".into(),
                            value: "lacquer".into(),
                        },
                        DisplayCondition::IsEmpty {
                            field: "finish".into(),
                        },
                    ],
                },
            ],
        };

        assert!(condition.evaluate(&fields(&[("frame_material", "wood")])));
        assert!(condition.evaluate(&fields(&[
            ("frame_material", "wood"),
            ("finish", "lacquer"),
        ])));
        assert!(!condition.evaluate(&fields(&[
            ("frame_material", "wood"),
            ("finish", "oil"),
        ])));
        assert!(!condition.evaluate(&fields(&[("frame_material", "pvc")])));
    }

    #[test]
    fn empty_branches_follow_boolean_identities() {
        let and = DisplayCondition::And { conditions: vec![] };
        let or = DisplayCondition::Or { conditions: vec![] };

        assert!(and.evaluate(&fields(&[])));
        assert!(!or.evaluate(&fields(&[])));
    }

    #[test]
    fn round_trips_through_json() {
        let raw = r#"{"operator":"or","conditions":[
            {"operator":"equals","field":"opening","value":"tilt_turn"},
            {"operator":"is_not_empty","field":"handle"}
        ]}"#;

        let condition = DisplayCondition::from_json(raw).expect("parse");
        assert!(condition.evaluate(&fields(&[("handle", "chrome")])));

        let serialized = condition.to_json().expect("serialize");
        let reparsed = DisplayCondition::from_json(&serialized).expect("reparse");
        assert_eq!(condition, reparsed);
    }

    #[test]
    fn unknown_operator_fails_parsing() {
        let raw = r#"{"operator":"regex","field":"color","value":".*"}"#;
        assert!(DisplayCondition::from_json(raw).is_err());
    }
}
