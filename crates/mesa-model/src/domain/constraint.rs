use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Placement constraint on a named host attribute.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Constraint {
    /// Host attribute the constraint applies to (e.g. `"host"`, `"rack"`, `"dedicated"`).
    pub name: String,
    pub constraint: TaskConstraint,
}

/// The two shapes a placement constraint can take.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum TaskConstraint {
    /// Task must (or, when `negated`, must not) land on a host whose attribute
    /// matches one of `values`.
    Value {
        #[serde(default)]
        negated: bool,
        values: BTreeSet<String>,
    },
    /// At most `limit` instances of the job may share one attribute value.
    Limit { limit: i32 },
}

impl TaskConstraint {
    /// Short symbolic name of the constraint shape, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            TaskConstraint::Value { .. } => "value",
            TaskConstraint::Limit { .. } => "limit",
        }
    }
}

impl Constraint {
    pub fn value<I, S>(name: impl Into<String>, negated: bool, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            constraint: TaskConstraint::Value {
                negated,
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    pub fn limit(name: impl Into<String>, limit: i32) -> Self {
        Self {
            name: name.into(),
            constraint: TaskConstraint::Limit { limit },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_constraint_collects_values() {
        let c = Constraint::value("dedicated", false, ["a", "b", "a"]);
        match c.constraint {
            TaskConstraint::Value { negated, values } => {
                assert!(!negated);
                assert_eq!(values.len(), 2);
            }
            TaskConstraint::Limit { .. } => panic!("expected value constraint"),
        }
    }

    #[test]
    fn serde_tags_constraint_shape() {
        let c = Constraint::limit("host", 1);
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains(r#""type":"limit""#));
        assert!(json.contains(r#""limit":1"#));

        let back: Constraint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
        assert_eq!(back.constraint.kind(), "limit");
    }
}
