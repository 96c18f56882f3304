use crate::error::ApiError;

/// Trim the `lang` query parameter and reject it when missing or blank
///
/// # Examples
/// ```
/// use lcp_api::validation::validate_language;
///
/// assert_eq!(validate_language(Some(" es ")).unwrap(), "es");
/// assert!(validate_language(Some("   ")).is_err());
/// assert!(validate_language(None).is_err());
/// ```
pub fn validate_language(raw: Option<&str>) -> Result<&str, ApiError> {
    let language = raw.map(str::trim).unwrap_or_default();
    if language.is_empty() {
        return Err(ApiError::MissingLanguage);
    }

    Ok(language)
}
