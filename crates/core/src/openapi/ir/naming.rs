//! Deterministic string-to-identifier transforms.
//!
//! Function names come from operation summaries (`"Delete Glossary"` ->
//! `deleteGlossary`), module names from tags (`"Glossary"` ->
//! `GlossaryService`). [`NameRegistry`] keeps function names unique inside
//! one module.

use std::collections::HashSet;

use crate::openapi::spec::HttpMethod;

use super::utils::{
    capitalize_first, escape_identifier, lowercase_first, sanitize_ts_identifier,
    strip_non_alphanumeric,
};

/// Request function name from free text: strip everything but letters and
/// digits, lower-case the first character. `None` when nothing is left.
pub fn to_function_name(summary: &str) -> Option<String> {
    let stripped = strip_non_alphanumeric(summary);
    if stripped.is_empty() {
        return None;
    }
    Some(escape_identifier(lowercase_first(&stripped)))
}

/// Download link function name: `get<Name>Link`.
pub fn to_link_function_name(summary: &str) -> Option<String> {
    let stripped = strip_non_alphanumeric(summary);
    if stripped.is_empty() {
        return None;
    }
    Some(format!("get{}Link", capitalize_first(&stripped)))
}

/// Module name of a tag: lower-case, strip, capitalize, suffix `Service`.
pub fn to_module_name(tag: &str) -> String {
    let stripped = strip_non_alphanumeric(&tag.to_lowercase());
    format!("{}Service", capitalize_first(&stripped))
}

/// Type identifier of a schema component. The raw name stays the file stem.
///
/// `Item-Output` -> `ItemOutput`
pub fn to_type_name(schema: &str) -> String {
    sanitize_ts_identifier(schema)
}

/// camelCase join of the alphanumeric runs of `text`.
///
/// `delete_glossary__id_` -> `deleteGlossaryId`
pub fn to_camel_case(text: &str) -> String {
    let mut result = String::new();
    for (i, part) in text
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|p| !p.is_empty())
        .enumerate()
    {
        if i == 0 {
            result.push_str(&lowercase_first(part));
        } else {
            result.push_str(&capitalize_first(part));
        }
    }
    result
}

/// Last-resort seed when neither summary nor operationId yields a name.
///
/// `GET /document/{id}/records` -> `getDocumentIdRecords`
pub fn fallback_seed(method: HttpMethod, path: &str) -> String {
    to_camel_case(&format!("{} {path}", method.as_str()))
}

/// A name handed out by [`NameRegistry::claim`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimedName {
    /// The unique name.
    pub name: String,
    /// The preferred name, when it was already taken.
    pub collided: Option<String>,
}

/// Function names already used in one module.
#[derive(Debug, Default)]
pub struct NameRegistry {
    taken: HashSet<String>,
}

impl NameRegistry {
    /// Mark `name` as taken without handing it out.
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_string());
    }

    /// Claim `preferred`; on collision try `alternative`, then `preferred`
    /// with a numeric suffix starting at 2.
    pub fn claim(&mut self, preferred: String, alternative: Option<String>) -> ClaimedName {
        if self.taken.insert(preferred.clone()) {
            return ClaimedName {
                name: preferred,
                collided: None,
            };
        }

        if let Some(alternative) = alternative
            && self.taken.insert(alternative.clone())
        {
            return ClaimedName {
                name: alternative,
                collided: Some(preferred),
            };
        }

        let mut suffix = 2usize;
        loop {
            let candidate = format!("{preferred}{suffix}");
            if self.taken.insert(candidate.clone()) {
                return ClaimedName {
                    name: candidate,
                    collided: Some(preferred),
                };
            }
            suffix += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_name() {
        assert_eq!(
            to_function_name("Delete Glossary").as_deref(),
            Some("deleteGlossary")
        );
        assert_eq!(
            to_function_name("Get Doc Records").as_deref(),
            Some("getDocRecords")
        );
        assert_eq!(
            to_function_name("List (all) items!").as_deref(),
            Some("listallitems")
        );
        assert_eq!(to_function_name("2FA Setup").as_deref(), Some("_2FASetup"));
        assert_eq!(to_function_name("Delete").as_deref(), Some("_delete"));
        assert_eq!(to_function_name(" -- "), None);
    }

    #[test]
    fn test_link_function_name() {
        assert_eq!(
            to_link_function_name("Download Xliff").as_deref(),
            Some("getDownloadXliffLink")
        );
        assert_eq!(
            to_link_function_name("download xliff").as_deref(),
            Some("getDownloadxliffLink")
        );
        assert_eq!(to_link_function_name(""), None);
    }

    #[test]
    fn test_module_name() {
        assert_eq!(to_module_name("Glossary"), "GlossaryService");
        assert_eq!(to_module_name("document"), "DocumentService");
        assert_eq!(to_module_name("Translation Memory"), "TranslationmemoryService");
        assert_eq!(to_module_name("GLOSSARY"), "GlossaryService");
    }

    #[test]
    fn test_type_name() {
        assert_eq!(to_type_name("Item"), "Item");
        assert_eq!(to_type_name("Item-Output"), "ItemOutput");
        assert_eq!(to_type_name("Body_upload_file_post"), "Body_upload_file_post");
        assert_eq!(to_type_name("app.models.User"), "appModelsUser");
        assert_eq!(to_type_name("2fa"), "_2fa");
    }

    #[test]
    fn test_camel_case_and_fallback() {
        assert_eq!(
            to_camel_case("delete_glossary_glossary__glossary_id__delete"),
            "deleteGlossaryGlossaryGlossaryIdDelete"
        );
        assert_eq!(
            fallback_seed(HttpMethod::Get, "/document/{id}/records"),
            "getDocumentIdRecords"
        );
    }

    #[test]
    fn test_registry_collisions() {
        let mut registry = NameRegistry::default();
        let first = registry.claim("getItem".into(), Some("getItemById".into()));
        assert_eq!(first.name, "getItem");
        assert_eq!(first.collided, None);

        let second = registry.claim("getItem".into(), Some("getItemById".into()));
        assert_eq!(second.name, "getItemById");
        assert_eq!(second.collided.as_deref(), Some("getItem"));

        let third = registry.claim("getItem".into(), Some("getItemById".into()));
        assert_eq!(third.name, "getItem2");

        let fourth = registry.claim("getItem".into(), None);
        assert_eq!(fourth.name, "getItem3");
    }

    #[test]
    fn test_registry_reserved_names() {
        let mut registry = NameRegistry::default();
        registry.reserve("content");
        let claimed = registry.claim("content".into(), None);
        assert_eq!(claimed.name, "content2");
        assert_eq!(claimed.collided.as_deref(), Some("content"));
    }
}
