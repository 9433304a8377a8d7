use crate::error::RowError;
use crate::types::Row;

/// Checks that every field in `fields` is a key of the row.
///
/// Fields are checked in slice order and the first missing one is reported.
pub fn schema_check(row: &Row, fields: &[&str]) -> Result<(), RowError> {
    match fields.iter().find(|field| !row.contains_key(**field)) {
        Some(missing) => Err(RowError::MissingField(missing.to_string())),
        None => Ok(()),
    }
}

/// Checks that no field in `fields` holds null.
///
/// A field that is absent altogether also fails, as `MissingField`.
pub fn null_check(row: &Row, fields: &[&str]) -> Result<(), RowError> {
    for field in fields {
        match row.get(*field) {
            None => return Err(RowError::MissingField(field.to_string())),
            Some(value) if value.is_null() => {
                return Err(RowError::NullField(field.to_string()))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{NOT_NULL_FIELDS, REQUIRED_SCHEMA_FIELDS};

    fn row(json: &str) -> Row {
        serde_json::from_str(json).unwrap()
    }

    fn complete_row() -> Row {
        row(r#"{"uid":"1","name":"A","gender":"F","email":"a@x.com","birthdate":"2000-01-01",
               "salary":1,"credit_score":700,"active":true,"modified_timestamp":"now"}"#)
    }

    #[test]
    fn test_schema_check_passes_complete_row() {
        assert_eq!(schema_check(&complete_row(), REQUIRED_SCHEMA_FIELDS), Ok(()));
    }

    #[test]
    fn test_schema_check_reports_first_missing_field() {
        let partial = row(r#"{"uid":"2","name":"B","modified_timestamp":"now"}"#);
        assert_eq!(
            schema_check(&partial, REQUIRED_SCHEMA_FIELDS),
            Err(RowError::MissingField("gender".to_string()))
        );
    }

    #[test]
    fn test_schema_check_accepts_null_values() {
        let mut r = complete_row();
        r.insert("email".to_string(), serde_json::Value::Null);
        assert_eq!(schema_check(&r, REQUIRED_SCHEMA_FIELDS), Ok(()));
    }

    #[test]
    fn test_null_check_reports_null_field() {
        let mut r = complete_row();
        r.insert("birthdate".to_string(), serde_json::Value::Null);
        r.insert("active".to_string(), serde_json::Value::Null);
        assert_eq!(
            null_check(&r, NOT_NULL_FIELDS),
            Err(RowError::NullField("birthdate".to_string()))
        );
    }

    #[test]
    fn test_null_check_treats_absent_field_as_missing() {
        let r = row(r#"{"uid":"1"}"#);
        assert_eq!(
            null_check(&r, &["uid", "nickname"]),
            Err(RowError::MissingField("nickname".to_string()))
        );
    }

    #[test]
    fn test_falsy_values_are_not_null() {
        let r = row(r#"{"uid":"","salary":0,"active":false,"tags":[]}"#);
        assert_eq!(null_check(&r, &["uid", "salary", "active", "tags"]), Ok(()));
    }
}
