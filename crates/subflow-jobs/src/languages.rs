//! Translation target language expansion.

use crate::options::{ALL_LANGUAGES, AUTO_LANGUAGE_CODE};
use async_trait::async_trait;
use subflow_common::Result;

/// Source of the language codes the translation service supports.
#[async_trait]
pub trait LanguageCatalog: Send + Sync {
    /// List every known language code.
    async fn list_language_codes(&self) -> Result<Vec<String>>;
}

/// A fixed list of language codes.
#[derive(Debug, Clone, Default)]
pub struct StaticLanguageCatalog {
    codes: Vec<String>,
}

impl StaticLanguageCatalog {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl LanguageCatalog for StaticLanguageCatalog {
    async fn list_language_codes(&self) -> Result<Vec<String>> {
        Ok(self.codes.clone())
    }
}

/// Whether the request is the `["all"]` directive.
pub fn requests_all_languages(requested: &[String]) -> bool {
    requested.len() == 1 && requested[0] == ALL_LANGUAGES
}

/// Codes never used as a translation target: the source language and `auto`.
pub fn excluded_language_codes(source_language: &str) -> Vec<String> {
    let mut excluded = vec![source_language.to_string()];
    if source_language != AUTO_LANGUAGE_CODE {
        excluded.push(AUTO_LANGUAGE_CODE.to_string());
    }
    excluded
}

/// Catalog codes minus the excluded set, in catalog order.
pub fn filter_language_codes(catalog_codes: Vec<String>, source_language: &str) -> Vec<String> {
    let excluded = excluded_language_codes(source_language);
    catalog_codes
        .into_iter()
        .filter(|code| !excluded.contains(code))
        .collect()
}

/// Expand `["all"]` into every catalog language except the source and `auto`.
///
/// Any other request is returned unchanged and the catalog is not consulted.
pub async fn expand_language_codes(
    requested: &[String],
    source_language: &str,
    catalog: &dyn LanguageCatalog,
) -> Result<Vec<String>> {
    if !requests_all_languages(requested) {
        return Ok(requested.to_vec());
    }

    let codes = catalog.list_language_codes().await?;
    Ok(filter_language_codes(codes, source_language))
}
