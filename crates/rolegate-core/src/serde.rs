//! Request normalisation helpers.
//!
//! Form posts arrive with stray whitespace and empty strings for untouched
//! inputs. These deserializers trim strings and turn blank optionals into
//! `None` before validation ever sees them.

use serde::{Deserialize, Deserializer};

/// Trims surrounding whitespace from a required string. `null` reads as blank
/// so the field's own "required" rule reports it.
pub fn deserialize_trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.map(|s| s.trim().to_string()).unwrap_or_default())
}

/// Trims an optional string and maps a blank value to `None`.
pub fn deserialize_optional_trimmed<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Maps an empty optional string to `None` without trimming; used for secrets.
pub fn deserialize_optional_nonempty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Form {
        #[serde(deserialize_with = "deserialize_trimmed")]
        name: String,
        #[serde(default, deserialize_with = "deserialize_optional_trimmed")]
        role: Option<String>,
        #[serde(default, deserialize_with = "deserialize_optional_nonempty")]
        code: Option<String>,
    }

    #[test]
    fn test_trims_and_blanks() {
        let form: Form =
            serde_json::from_str(r#"{"name":"  Ann ","role":"   ","code":" x "}"#).unwrap();
        assert_eq!(form.name, "Ann");
        assert_eq!(form.role, None);
        assert_eq!(form.code.as_deref(), Some(" x "));
    }

    #[test]
    fn test_missing_and_null_optionals() {
        let form: Form = serde_json::from_str(r#"{"name":"Ann","role":null}"#).unwrap();
        assert_eq!(form.role, None);
        assert_eq!(form.code, None);
    }

    #[test]
    fn test_null_required_string_is_blank() {
        let form: Form = serde_json::from_str(r#"{"name":null}"#).unwrap();
        assert_eq!(form.name, "");
    }

    #[test]
    fn test_wrong_type_is_still_rejected() {
        assert!(serde_json::from_str::<Form>(r#"{"name":42}"#).is_err());
    }

    #[test]
    fn test_empty_secret_is_absent() {
        let form: Form = serde_json::from_str(r#"{"name":"Ann","code":""}"#).unwrap();
        assert_eq!(form.code, None);
    }
}
