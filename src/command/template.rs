//! Query template instantiation
//!
//! Positional parameters fill `?` placeholders left to right, quoted as
//! SQL string literals. Named parameters then replace the first `:key`
//! occurrence each, unquoted. A named parameter without a placeholder
//! aborts the whole instantiation.

use super::errors::{CommandError, CommandResult};
use super::parser::{NamedParameter, NAMED_DELIMITER};
use super::value::Value;

/// Positional placeholder
pub const POSITIONAL_PLACEHOLDER: char = '?';

/// What to do with `?` placeholders left over after all positionals are used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderPolicy {
    /// Leave them in the text
    Lenient,
    /// Fail with `CommandError::UnresolvedPlaceholder`
    Strict,
}

/// Quote a value as an SQL string literal
pub fn quote(value: &Value) -> String {
    format!("'{}'", value.to_string().replace('\'', "''"))
}

/// Substitute positional and named parameters into `template`
pub fn instantiate(
    template: &str,
    positionals: &[Value],
    named: &[NamedParameter],
    policy: PlaceholderPolicy,
) -> CommandResult<String> {
    let mut sql = String::with_capacity(template.len());
    let mut values = positionals.iter();
    let mut unresolved = 0;

    for ch in template.chars() {
        if ch != POSITIONAL_PLACEHOLDER {
            sql.push(ch);
            continue;
        }
        match values.next() {
            Some(value) => sql.push_str(&quote(value)),
            None => {
                unresolved += 1;
                sql.push(ch);
            }
        }
    }

    if unresolved > 0 && policy == PlaceholderPolicy::Strict {
        return Err(CommandError::UnresolvedPlaceholder(unresolved));
    }

    for parameter in named {
        let placeholder = format!("{}{}", NAMED_DELIMITER, parameter.key);
        match sql.find(&placeholder) {
            Some(at) => {
                sql.replace_range(at..at + placeholder.len(), &parameter.value.to_string());
            }
            None => {
                return Err(CommandError::UnresolvedParameter {
                    key: parameter.key.clone(),
                    partial: sql,
                });
            }
        }
    }

    Ok(sql)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_positional_substitution() {
        let sql = instantiate(
            "SELECT sql FROM t WHERE name = ?;",
            &[text("foo")],
            &[],
            PlaceholderPolicy::Lenient,
        )
        .unwrap();
        assert_eq!(sql, "SELECT sql FROM t WHERE name = 'foo';");
    }

    #[test]
    fn test_positionals_fill_in_order() {
        let sql = instantiate(
            "INSERT INTO t VALUES (?, ?, ?);",
            &[Value::Integer(1), Value::Float(2.5), text("x")],
            &[],
            PlaceholderPolicy::Strict,
        )
        .unwrap();
        assert_eq!(sql, "INSERT INTO t VALUES ('1', '2.5', 'x');");
    }

    #[test]
    fn test_substituted_text_not_rescanned() {
        let sql = instantiate("? ?", &[text("a?"), text("b")], &[], PlaceholderPolicy::Strict)
            .unwrap();
        assert_eq!(sql, "'a?' 'b'");
    }

    #[test]
    fn test_embedded_quote_doubled() {
        assert_eq!(quote(&text("O'Brien")), "'O''Brien'");
    }

    #[test]
    fn test_extra_positionals_ignored() {
        let sql = instantiate("SELECT ?;", &[text("a"), text("b")], &[], PlaceholderPolicy::Strict)
            .unwrap();
        assert_eq!(sql, "SELECT 'a';");
    }

    #[test]
    fn test_missing_positionals_lenient() {
        let sql = instantiate("SELECT ?, ?;", &[text("a")], &[], PlaceholderPolicy::Lenient)
            .unwrap();
        assert_eq!(sql, "SELECT 'a', ?;");
    }

    #[test]
    fn test_missing_positionals_strict() {
        let err = instantiate("SELECT ?, ?, ?;", &[text("a")], &[], PlaceholderPolicy::Strict)
            .unwrap_err();
        assert!(matches!(err, CommandError::UnresolvedPlaceholder(2)));
    }

    #[test]
    fn test_named_substitution_unquoted() {
        let sql = instantiate(
            "SELECT * FROM t WHERE id = :id LIMIT :n;",
            &[],
            &[
                NamedParameter::new("id", Value::Integer(7)),
                NamedParameter::new("n", Value::Integer(10)),
            ],
            PlaceholderPolicy::Strict,
        )
        .unwrap();
        assert_eq!(sql, "SELECT * FROM t WHERE id = 7 LIMIT 10;");
    }

    #[test]
    fn test_named_replaces_first_occurrence_only() {
        let sql = instantiate(
            ":x + :x",
            &[],
            &[NamedParameter::new("x", Value::Integer(1))],
            PlaceholderPolicy::Strict,
        )
        .unwrap();
        assert_eq!(sql, "1 + :x");
    }

    #[test]
    fn test_duplicate_named_keys_consume_successive_placeholders() {
        let sql = instantiate(
            ":x + :x",
            &[],
            &[
                NamedParameter::new("x", Value::Integer(1)),
                NamedParameter::new("x", Value::Integer(2)),
            ],
            PlaceholderPolicy::Strict,
        )
        .unwrap();
        assert_eq!(sql, "1 + 2");
    }

    #[test]
    fn test_unused_named_parameter_fails() {
        let err = instantiate(
            "SELECT ?;",
            &[text("a")],
            &[NamedParameter::new("x", Value::Integer(1))],
            PlaceholderPolicy::Lenient,
        )
        .unwrap_err();
        match err {
            CommandError::UnresolvedParameter { key, partial } => {
                assert_eq!(key, "x");
                assert_eq!(partial, "SELECT 'a';");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unused_named_parameter_stops_processing() {
        let err = instantiate(
            "SELECT :a, :c;",
            &[],
            &[
                NamedParameter::new("a", Value::Integer(1)),
                NamedParameter::new("b", Value::Integer(2)),
                NamedParameter::new("c", Value::Integer(3)),
            ],
            PlaceholderPolicy::Strict,
        )
        .unwrap_err();
        match err {
            CommandError::UnresolvedParameter { key, partial } => {
                assert_eq!(key, "b");
                assert_eq!(partial, "SELECT 1, :c;");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_float_parameters_quoted_as_rendered() {
        let sql = instantiate(
            "SELECT ?, ?, ?;",
            &[Value::coerce("nan"), Value::coerce("1e16"), Value::coerce("2")],
            &[],
            PlaceholderPolicy::Strict,
        )
        .unwrap();
        assert_eq!(sql, "SELECT 'nan', '1e+16', '2';");
    }
}
