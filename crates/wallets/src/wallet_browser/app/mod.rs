pub(crate) mod contents {
    const INDEX_HTML: &str = include_str!("index.html");

    const TOKEN_PLACEHOLDER: &str = "__SESSION_TOKEN__";

    /// The bridge page with the session token filled in.
    pub(crate) fn index_html(session_token: &str) -> String {
        INDEX_HTML.replace(TOKEN_PLACEHOLDER, session_token)
    }
}
