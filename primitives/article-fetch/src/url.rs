//! Items URL construction.

/// Public Qiita API root.
pub const DEFAULT_BASE_URL: &str = "https://qiita.com/api/v2";

/// Page requested from the items endpoint.
pub const DEFAULT_PAGE: u32 = 1;

/// Items per page requested from the items endpoint.
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Builds the items listing URL, appending `query` only when it is not blank.
///
/// The query is percent-encoded as given; no trimming or validation is applied.
pub fn build_items_url(base_url: &str, query: Option<&str>) -> String {
    let mut url = format!(
        "{}/items?page={DEFAULT_PAGE}&per_page={DEFAULT_PER_PAGE}",
        base_url.trim_end_matches('/')
    );

    if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
        url.push_str("&query=");
        url.push_str(&urlencoding::encode(query));
    }

    url
}
