//! Repository search domain model.
//!
//! These are the payloads carried by actions. Field names follow the
//! code-hosting search API so a response body deserialises directly.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SearchError;

/// Owner of a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub login: String,
}

/// A repository as returned by the search API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: User,
    pub html_url: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
}

/// Page cursors for a paginated search.
///
/// Built from the `Link` response header. Each field is the page number the
/// corresponding relation points at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub first: Option<u32>,
    pub prev: Option<u32>,
    pub next: Option<u32>,
    pub last: Option<u32>,
}

impl Pagination {
    /// Parse an RFC 8288 `Link` header.
    ///
    /// ```
    /// use fluxion::Pagination;
    ///
    /// let header = r#"<https://api.example.com/search?q=rust&page=2>; rel="next", <https://api.example.com/search?q=rust&page=9>; rel="last""#;
    /// let pagination = Pagination::from_link_header(header).unwrap();
    /// assert_eq!(pagination.next, Some(2));
    /// assert_eq!(pagination.last, Some(9));
    /// ```
    ///
    /// Returns `None` when the header names no page relation at all, which is
    /// what a single-page result looks like.
    pub fn from_link_header(header: &str) -> Option<Self> {
        let mut pagination = Pagination::default();
        let mut found = false;

        for (target, params) in links(header) {
            let Some(page) = page_param(target) else {
                continue;
            };

            for param in params.split(';') {
                let Some((key, value)) = param.split_once('=') else {
                    continue;
                };
                if !key.trim().eq_ignore_ascii_case("rel") {
                    continue;
                }
                // A single link may carry several space-separated relations.
                for rel in value.trim().trim_matches('"').split_whitespace() {
                    let slot = match rel {
                        "first" => &mut pagination.first,
                        "prev" => &mut pagination.prev,
                        "next" => &mut pagination.next,
                        "last" => &mut pagination.last,
                        _ => continue,
                    };
                    *slot = Some(page);
                    found = true;
                }
            }
        }

        found.then_some(pagination)
    }
}

/// Split a `Link` header into `(target, params)` pairs.
///
/// Links are located by their `<...>` delimiters rather than by commas, since
/// a target may itself contain commas. The params of a link run up to the
/// next `<`.
fn links(header: &str) -> impl Iterator<Item = (&str, &str)> {
    let mut rest = header;
    std::iter::from_fn(move || {
        let open = rest.find('<')?;
        let close = open + rest[open..].find('>')?;
        let target = &rest[open + 1..close];
        let after = &rest[close + 1..];
        let params_end = after.find('<').unwrap_or(after.len());
        let params = &after[..params_end];
        rest = &after[params_end..];
        Some((target, params))
    })
}

fn page_param(target: &str) -> Option<u32> {
    let url = Url::parse(target.trim()).ok()?;
    let page = url
        .query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok());
    page
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPage {
    pub repositories: Vec<Repository>,
    pub pagination: Option<Pagination>,
}

#[derive(Deserialize)]
struct SearchResponse {
    items: Vec<Repository>,
}

impl SearchPage {
    /// Decode a search response body together with its `Link` header.
    pub fn from_json(body: &str, link_header: Option<&str>) -> Result<Self, SearchError> {
        let response: SearchResponse = serde_json::from_str(body)?;
        Ok(Self {
            repositories: response.items,
            pagination: link_header.and_then(Pagination::from_link_header),
        })
    }
}


#[cfg(test)]
pub(crate) mod fixtures {
    use super::{Repository, User};

    pub(crate) fn repository(id: u64, full_name: &str) -> Repository {
        let (owner, name) = full_name.split_once('/').unwrap_or(("octocat", full_name));
        Repository {
            id,
            name: name.to_string(),
            full_name: full_name.to_string(),
            owner: User {
                id: id + 1000,
                login: owner.to_string(),
            },
            html_url: format!("https://github.com/{full_name}"),
            description: None,
            language: None,
            stargazers_count: 0,
        }
    }
}
