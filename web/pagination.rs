use axum::http::{HeaderMap, HeaderName, HeaderValue, Uri, header};
use quizbank::page::Page;

/// Builds the `X-Total-Count` and `Link` headers for a paginated listing.
///
/// The `Link` header repeats the request's own query string with only the
/// `page` key rewritten, one entry per `first`/`last`/`next`/`prev` relation
/// that exists for the page.
pub fn pagination_headers<T>(uri: &Uri, page: &Page<T>) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Ok(value) = HeaderValue::from_str(&page.total.to_string()) {
        headers.insert(HeaderName::from_static("x-total-count"), value);
    }
    if let Ok(value) = HeaderValue::from_str(&link_header(uri, page)) {
        headers.insert(header::LINK, value);
    }

    headers
}

fn link_header<T>(uri: &Uri, page: &Page<T>) -> String {
    let last = page.total_pages().saturating_sub(1);

    let mut links = vec![
        format!("<{}>; rel=\"first\"", page_uri(uri, 0)),
        format!("<{}>; rel=\"last\"", page_uri(uri, last)),
    ];
    if page.has_next() {
        links.push(format!("<{}>; rel=\"next\"", page_uri(uri, page.page + 1)));
    }
    if page.has_prev() {
        links.push(format!("<{}>; rel=\"prev\"", page_uri(uri, page.page - 1)));
    }

    links.join(",")
}

fn page_uri(uri: &Uri, page: u32) -> String {
    let mut pairs: Vec<(String, String)> =
        serde_urlencoded::from_str(uri.query().unwrap_or_default()).unwrap_or_default();
    pairs.retain(|(key, _)| key != "page");
    pairs.push(("page".to_string(), page.to_string()));

    let query = serde_urlencoded::to_string(&pairs).unwrap_or_default();
    format!("{}?{}", uri.path(), query)
}
