//! Criteria module for building per-field filter predicates.
//!
//! A [`Criteria`] is an explicit list of `{column, match spec}` conditions
//! validated against an entity [`Schema`] at construction time. A single
//! interpreter turns the list into a SQL `WHERE` clause with dialect
//! placeholders and ordered bind parameters; all conditions are conjoined
//! with `AND`.

use crate::dialect::{CurrentDialect, Dialect};
use crate::entity::{ColumnKind, Schema};
use thiserror::Error;

/// A value bound into a generated statement, typed by the column it targets.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Text(String),
}

impl SqlValue {
    /// Ordering between values of the same kind; `None` across kinds.
    fn partial_cmp(&self, other: &SqlValue) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (SqlValue::Int(a), SqlValue::Int(b)) => Some(a.cmp(b)),
            (SqlValue::Text(a), SqlValue::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// One per-field match specification, as described by the filter syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchSpec {
    /// `field = value`
    Equals(SqlValue),

    /// `field IN (values…)`; the empty set matches nothing.
    In(Vec<SqlValue>),

    /// `min <= field <= max`, either bound optional. A range with
    /// `min > max` matches nothing rather than failing.
    Range {
        min: Option<SqlValue>,
        max: Option<SqlValue>,
    },

    /// `field IS NULL`
    IsNull,

    /// `field IS NOT NULL`
    IsNotNull,

    /// Case-insensitive substring match on a text field.
    Contains(String),
}

/// A validated `{column, spec}` pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: &'static str,
    pub spec: MatchSpec,
}

/// A conjunction of field conditions over one entity schema.
///
/// An empty criteria matches every row. Unknown fields, unknown operators and
/// values that do not parse for the column's type are rejected when the
/// criteria is built, never silently dropped.
#[derive(Debug)]
pub struct Criteria {
    schema: &'static Schema,
    conditions: Vec<Condition>,
}

/// Query-parameter keys that belong to pagination, not filtering.
pub const RESERVED_KEYS: &[&str] = &["page", "size", "sort"];

impl Criteria {
    /// Creates an empty criteria for the given schema.
    pub fn for_schema(schema: &'static Schema) -> Self {
        Self {
            schema,
            conditions: Vec::new(),
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Adds a condition on `field`, validating the field name against the
    /// schema.
    pub fn push(&mut self, field: &str, spec: MatchSpec) -> Result<(), CriteriaError> {
        let column = self
            .schema
            .column(field)
            .ok_or_else(|| CriteriaError::UnknownField {
                field: field.to_string(),
            })?;

        self.conditions.push(Condition {
            column: column.name,
            spec,
        });

        Ok(())
    }

    /// Builds a criteria from decoded query-string pairs.
    ///
    /// Keys follow the `field.operator` convention inherited from the
    /// original service: `equals`, `in` (comma-separated),
    /// `greaterThanOrEqual`, `lessThanOrEqual`, `specified` and `contains`.
    /// The reserved pagination keys (`page`, `size`, `sort`) are skipped.
    pub fn from_params<'a, I>(schema: &'static Schema, params: I) -> Result<Self, CriteriaError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut criteria = Criteria::for_schema(schema);

        for (key, value) in params {
            if RESERVED_KEYS.contains(&key) {
                continue;
            }

            let (field, operator) =
                key.rsplit_once('.')
                    .ok_or_else(|| CriteriaError::UnknownField {
                        field: key.to_string(),
                    })?;

            let column = schema
                .column(field)
                .ok_or_else(|| CriteriaError::UnknownField {
                    field: field.to_string(),
                })?;

            match operator {
                "equals" => {
                    let parsed = parse_value(column.kind, field, value)?;
                    criteria.push(field, MatchSpec::Equals(parsed))?;
                }
                "in" => {
                    let parsed = value
                        .split(',')
                        .map(|v| parse_value(column.kind, field, v))
                        .collect::<Result<Vec<_>, _>>()?;
                    criteria.push(field, MatchSpec::In(parsed))?;
                }
                "greaterThanOrEqual" => {
                    let parsed = parse_value(column.kind, field, value)?;
                    criteria.push_range_bound(field, Some(parsed), None)?;
                }
                "lessThanOrEqual" => {
                    let parsed = parse_value(column.kind, field, value)?;
                    criteria.push_range_bound(field, None, Some(parsed))?;
                }
                "specified" => {
                    let spec = match value {
                        "true" => MatchSpec::IsNotNull,
                        "false" => MatchSpec::IsNull,
                        _ => {
                            return Err(CriteriaError::InvalidValue {
                                field: field.to_string(),
                                value: value.to_string(),
                            });
                        }
                    };
                    criteria.push(field, spec)?;
                }
                "contains" => {
                    if column.kind != ColumnKind::Text {
                        return Err(CriteriaError::UnsupportedOperator {
                            field: field.to_string(),
                            operator: operator.to_string(),
                        });
                    }
                    criteria.push(field, MatchSpec::Contains(value.to_string()))?;
                }
                _ => {
                    return Err(CriteriaError::UnknownOperator {
                        operator: operator.to_string(),
                    });
                }
            }
        }

        Ok(criteria)
    }

    /// Adds or widens a range condition so that `greaterThanOrEqual` and
    /// `lessThanOrEqual` on the same field fold into one `Range` spec.
    fn push_range_bound(
        &mut self,
        field: &str,
        min: Option<SqlValue>,
        max: Option<SqlValue>,
    ) -> Result<(), CriteriaError> {
        let existing = self.conditions.iter_mut().find(|c| {
            c.column == field && matches!(c.spec, MatchSpec::Range { .. })
        });

        if let Some(condition) = existing {
            if let MatchSpec::Range {
                min: ref mut cur_min,
                max: ref mut cur_max,
            } = condition.spec
            {
                if let Some(min) = min {
                    *cur_min = Some(min);
                }
                if let Some(max) = max {
                    *cur_max = Some(max);
                }
            }
            Ok(())
        } else {
            self.push(field, MatchSpec::Range { min, max })
        }
    }

    /// Converts the criteria into a SQL `WHERE` clause and bound parameters.
    ///
    /// # Returns
    /// - `(String, Vec<SqlValue>)`: the clause (empty string when there are
    ///   no conditions) and the ordered parameters.
    pub fn to_sql(&self) -> (String, Vec<SqlValue>) {
        if self.conditions.is_empty() {
            return (String::new(), Vec::new());
        }

        let mut params = Vec::new();
        let clauses = self
            .conditions
            .iter()
            .map(|c| build_clause(c, &mut params))
            .collect::<Vec<_>>()
            .join(" AND ");

        (format!("WHERE {clauses}"), params)
    }
}

/// Parses a raw query-string value according to the column's type.
fn parse_value(kind: ColumnKind, field: &str, value: &str) -> Result<SqlValue, CriteriaError> {
    match kind {
        ColumnKind::Integer => value
            .parse::<i64>()
            .map(SqlValue::Int)
            .map_err(|_| CriteriaError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
            }),
        ColumnKind::Text => Ok(SqlValue::Text(value.to_string())),
        ColumnKind::Bytes => Err(CriteriaError::UnsupportedOperator {
            field: field.to_string(),
            operator: "value match on binary column".to_string(),
        }),
    }
}

fn build_clause(condition: &Condition, params: &mut Vec<SqlValue>) -> String {
    let column = condition.column;

    match &condition.spec {
        MatchSpec::Equals(value) => {
            params.push(value.clone());
            format!("{column} = {}", CurrentDialect::placeholder(params.len()))
        }
        MatchSpec::In(values) => {
            if values.is_empty() {
                return "1 = 0".to_string();
            }
            let placeholders = values
                .iter()
                .map(|v| {
                    params.push(v.clone());
                    CurrentDialect::placeholder(params.len())
                })
                .collect::<Vec<_>>()
                .join(", ");
            format!("{column} IN ({placeholders})")
        }
        MatchSpec::Range { min, max } => {
            if let (Some(min), Some(max)) = (min, max) {
                if min.partial_cmp(max) == Some(std::cmp::Ordering::Greater) {
                    return "1 = 0".to_string();
                }
            }

            let mut parts = Vec::new();
            if let Some(min) = min {
                params.push(min.clone());
                parts.push(format!(
                    "{column} >= {}",
                    CurrentDialect::placeholder(params.len())
                ));
            }
            if let Some(max) = max {
                params.push(max.clone());
                parts.push(format!(
                    "{column} <= {}",
                    CurrentDialect::placeholder(params.len())
                ));
            }

            match parts.len() {
                0 => "1 = 1".to_string(),
                1 => parts.remove(0),
                _ => format!("({})", parts.join(" AND ")),
            }
        }
        MatchSpec::IsNull => format!("{column} IS NULL"),
        MatchSpec::IsNotNull => format!("{column} IS NOT NULL"),
        MatchSpec::Contains(substr) => {
            params.push(SqlValue::Text(format!("%{substr}%")));
            CurrentDialect::contains_clause(column, params.len())
        }
    }
}

/// Errors raised while building a criteria from filter input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CriteriaError {
    #[error("unknown filter field: {field}")]
    UnknownField { field: String },

    #[error("unknown filter operator: {operator}")]
    UnknownOperator { operator: String },

    #[error("operator {operator} is not supported on field {field}")]
    UnsupportedOperator { field: String, operator: String },

    #[error("invalid value for field {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("invalid sort spec: {value}")]
    InvalidSort { value: String },
}

#[cfg(test)]
mod tests {
    use super::{Criteria, CriteriaError, MatchSpec, SqlValue};
    use crate::dialect::{CurrentDialect, Dialect};
    use crate::entity::IMAGE_SCHEMA;

    #[test]
    fn empty_criteria_matches_all() {
        let criteria = Criteria::for_schema(&IMAGE_SCHEMA);
        let (sql, params) = criteria.to_sql();

        assert_eq!("", sql);
        assert!(params.is_empty());
    }

    #[test]
    fn conjunction_of_equals_and_contains() {
        let criteria = Criteria::from_params(
            &IMAGE_SCHEMA,
            vec![("question_id.equals", "7"), ("title.contains", "cov")],
        )
        .unwrap();

        let (sql, params) = criteria.to_sql();

        assert_eq!(
            format!(
                "WHERE question_id = {} AND {}",
                CurrentDialect::placeholder(1),
                CurrentDialect::contains_clause("title", 2),
            ),
            sql
        );
        assert_eq!(
            vec![SqlValue::Int(7), SqlValue::Text("%cov%".to_string())],
            params
        );
    }

    #[test]
    fn in_set_binds_every_value() {
        let criteria =
            Criteria::from_params(&IMAGE_SCHEMA, vec![("question_id.in", "1,2,3")]).unwrap();

        let (sql, params) = criteria.to_sql();

        assert_eq!(
            format!(
                "WHERE question_id IN ({}, {}, {})",
                CurrentDialect::placeholder(1),
                CurrentDialect::placeholder(2),
                CurrentDialect::placeholder(3),
            ),
            sql
        );
        assert_eq!(3, params.len());
    }

    #[test]
    fn empty_in_set_matches_nothing() {
        let mut criteria = Criteria::for_schema(&IMAGE_SCHEMA);
        criteria
            .push("question_id", MatchSpec::In(Vec::new()))
            .unwrap();

        let (sql, params) = criteria.to_sql();

        assert_eq!("WHERE 1 = 0", sql);
        assert!(params.is_empty());
    }

    #[test]
    fn range_bounds_fold_into_one_condition() {
        let criteria = Criteria::from_params(
            &IMAGE_SCHEMA,
            vec![
                ("question_id.greaterThanOrEqual", "2"),
                ("question_id.lessThanOrEqual", "8"),
            ],
        )
        .unwrap();

        let (sql, params) = criteria.to_sql();

        assert_eq!(
            format!(
                "WHERE (question_id >= {} AND question_id <= {})",
                CurrentDialect::placeholder(1),
                CurrentDialect::placeholder(2),
            ),
            sql
        );
        assert_eq!(vec![SqlValue::Int(2), SqlValue::Int(8)], params);
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let criteria = Criteria::from_params(
            &IMAGE_SCHEMA,
            vec![
                ("question_id.greaterThanOrEqual", "9"),
                ("question_id.lessThanOrEqual", "3"),
            ],
        )
        .unwrap();

        let (sql, params) = criteria.to_sql();

        assert_eq!("WHERE 1 = 0", sql);
        assert!(params.is_empty());
    }

    #[test]
    fn specified_maps_to_null_checks() {
        let criteria = Criteria::from_params(
            &IMAGE_SCHEMA,
            vec![
                ("payload.specified", "true"),
                ("question_id.specified", "false"),
            ],
        )
        .unwrap();

        let (sql, params) = criteria.to_sql();

        assert_eq!("WHERE payload IS NOT NULL AND question_id IS NULL", sql);
        assert!(params.is_empty());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let result = Criteria::from_params(&IMAGE_SCHEMA, vec![("owner.equals", "x")]);

        assert_eq!(
            Err(CriteriaError::UnknownField {
                field: "owner".to_string()
            }),
            result.map(|_| ())
        );
    }

    #[test]
    fn bare_field_name_is_rejected() {
        let result = Criteria::from_params(&IMAGE_SCHEMA, vec![("title", "x")]);

        assert!(matches!(
            result,
            Err(CriteriaError::UnknownField { .. })
        ));
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let result = Criteria::from_params(&IMAGE_SCHEMA, vec![("title.startsWith", "x")]);

        assert_eq!(
            Err(CriteriaError::UnknownOperator {
                operator: "startsWith".to_string()
            }),
            result.map(|_| ())
        );
    }

    #[test]
    fn unparseable_integer_is_rejected() {
        let result = Criteria::from_params(&IMAGE_SCHEMA, vec![("question_id.equals", "seven")]);

        assert_eq!(
            Err(CriteriaError::InvalidValue {
                field: "question_id".to_string(),
                value: "seven".to_string()
            }),
            result.map(|_| ())
        );
    }

    #[test]
    fn contains_requires_a_text_column() {
        let result = Criteria::from_params(&IMAGE_SCHEMA, vec![("question_id.contains", "1")]);

        assert!(matches!(
            result,
            Err(CriteriaError::UnsupportedOperator { .. })
        ));
    }

    #[test]
    fn pagination_keys_are_skipped() {
        let criteria = Criteria::from_params(
            &IMAGE_SCHEMA,
            vec![("page", "0"), ("size", "20"), ("sort", "title,asc")],
        )
        .unwrap();

        assert!(criteria.is_empty());
    }
}
