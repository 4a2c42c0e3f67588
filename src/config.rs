//! Search configuration.
//!
//! Controls how the [`ActionCreator`](crate::ActionCreator) builds requests.
//! Every field has a default, so an empty document is a valid configuration.
//!
//! ```toml
//! per_page = 50
//! sort = "stars"
//! order = "asc"
//! ```

use serde::Deserialize;

use crate::error::ConfigError;

/// Upper bound the search API accepts for `per_page`.
pub const MAX_PER_PAGE: u32 = 100;

const DEFAULT_PER_PAGE: u32 = 30;

/// Field results are sorted by. `None` in [`SearchConfig::sort`] means best match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Stars,
    Forks,
    HelpWantedIssues,
    Updated,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Stars => "stars",
            SortKey::Forks => "forks",
            SortKey::HelpWantedIssues => "help-wanted-issues",
            SortKey::Updated => "updated",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Results per page, `1..=MAX_PER_PAGE`.
    pub per_page: u32,
    pub sort: Option<SortKey>,
    pub order: SortOrder,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            per_page: DEFAULT_PER_PAGE,
            sort: None,
            order: SortOrder::default(),
        }
    }
}

impl SearchConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(ConfigError::Invalid(format!(
                "per_page must be between 1 and {MAX_PER_PAGE}, got {}",
                self.per_page
            )));
        }
        Ok(())
    }
}

/// Everything a [`SearchApi`](crate::SearchApi) needs to fetch one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub page: u32,
    pub per_page: u32,
    pub sort: Option<SortKey>,
    pub order: SortOrder,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>, page: u32, config: &SearchConfig) -> Self {
        Self {
            query: query.into(),
            page,
            per_page: config.per_page,
            sort: config.sort,
            order: config.order,
        }
    }
}
