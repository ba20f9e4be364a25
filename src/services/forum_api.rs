//! HTTP client for the forum endpoints.
//!
//! Every endpoint returns a server-rendered HTML fragment (or, for
//! `/move_thread`, a redirect URL). Requests are best-effort: no retries,
//! failures are logged by the caller and leave prior UI state in place.

use gloo_net::http::Request;

/// Error type for forum API operations
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Request failed to reach the server (network error, timeout)
    Network(String),
    /// Server answered with a non-success status code
    Status(u16),
    /// Server answered 200 with an empty body where a fragment was expected
    EmptyFragment,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "Network error: {}", e),
            ApiError::Status(code) => write!(f, "Server returned status {}", code),
            ApiError::EmptyFragment => write!(f, "Server returned an empty fragment"),
        }
    }
}

impl std::error::Error for ApiError {}

/// A request for one page of the emoji grid, either the default paginated
/// listing or a filtered search. An empty search query is planned as
/// `Menu { page: 1 }` upstream, so `Search` always carries a non-empty query.
#[derive(Debug, Clone, PartialEq)]
pub enum GridRequest {
    Menu { page: u32 },
    Search { query: String },
}

impl GridRequest {
    /// Build the endpoint URL for this request
    pub fn url(&self, post_id: u64) -> String {
        match self {
            GridRequest::Menu { page } => {
                format!("/reaction_menu?page={}&post_id={}", page, post_id)
            }
            GridRequest::Search { query } => {
                format!(
                    "/search_emojis?search_string={}&post_id={}",
                    urlencoding::encode(query),
                    post_id
                )
            }
        }
    }
}

/// Encode key/value pairs as an `application/x-www-form-urlencoded` body
pub fn form_body(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

async fn get_fragment(url: &str) -> Result<String, ApiError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if body.trim().is_empty() {
        return Err(ApiError::EmptyFragment);
    }

    Ok(body)
}

async fn post_form(url: &str, pairs: &[(&str, &str)]) -> Result<String, ApiError> {
    let request = Request::post(url)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(form_body(pairs))
        .map_err(|e| ApiError::Network(e.to_string()))?;

    let response = request
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !response.ok() {
        return Err(ApiError::Status(response.status()));
    }

    response
        .text()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))
}

/// GET one page of the emoji grid (default listing or search)
pub async fn fetch_grid(post_id: u64, request: &GridRequest) -> Result<String, ApiError> {
    get_fragment(&request.url(post_id)).await
}

/// POST a reaction selection. Returns the updated reaction display fragment
/// for the post.
pub async fn submit_reaction(
    post_id: u64,
    reaction_type: &str,
    un_react: bool,
) -> Result<String, ApiError> {
    let post_id = post_id.to_string();
    let un_react = if un_react { "true" } else { "false" };
    post_form(
        "/reactions",
        &[
            ("post_id", post_id.as_str()),
            ("reaction_type", reaction_type),
            ("unReact", un_react),
        ],
    )
    .await
}

/// POST a new name for a custom emoji. Fire-and-forget; the response body
/// is discarded.
pub async fn rename_emoji(emoji_id: u64, new_name: &str) -> Result<(), ApiError> {
    let emoji_id = emoji_id.to_string();
    post_form(
        "/rename_emoji",
        &[("emoji_id", emoji_id.as_str()), ("new_name", new_name)],
    )
    .await?;
    Ok(())
}

/// POST a new title for a thread. Fire-and-forget.
pub async fn rename_thread(thread_id: u64, new_name: &str) -> Result<(), ApiError> {
    let thread_id = thread_id.to_string();
    post_form(
        "/rename_thread",
        &[("thread_id", thread_id.as_str()), ("new_name", new_name)],
    )
    .await?;
    Ok(())
}

/// POST a move of a thread into another category. The response body is the
/// URL the client should navigate to.
pub async fn move_thread(thread_id: u64, new_name: &str) -> Result<String, ApiError> {
    let thread_id = thread_id.to_string();
    let redirect = post_form(
        "/move_thread",
        &[("thread_id", thread_id.as_str()), ("new_name", new_name)],
    )
    .await?;

    let redirect = redirect.trim().to_string();
    if redirect.is_empty() {
        return Err(ApiError::EmptyFragment);
    }
    Ok(redirect)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_url() {
        let req = GridRequest::Menu { page: 3 };
        assert_eq!(req.url(42), "/reaction_menu?page=3&post_id=42");
    }

    #[test]
    fn test_search_url_encodes_query() {
        let req = GridRequest::Search {
            query: "cat face".to_string(),
        };
        assert_eq!(
            req.url(7),
            "/search_emojis?search_string=cat%20face&post_id=7"
        );
    }

    #[test]
    fn test_form_body() {
        let body = form_body(&[("post_id", "42"), ("reaction_type", "thumbs up")]);
        assert_eq!(body, "post_id=42&reaction_type=thumbs%20up");
    }

    #[test]
    fn test_form_body_empty_value() {
        assert_eq!(form_body(&[("new_name", "")]), "new_name=");
    }
}
