//! GET /sitemap.xml: public pages only, the workspace is never listed.
use std::fmt::Write;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};
use chrono::{NaiveDate, Utc};

use crate::state::AppState;

const ENTRIES: &[(&str, &str)] = &[("", "1.0"), ("/sign-in", "0.8"), ("/sign-up", "0.8")];

pub async fn sitemap(State(state): State<AppState>) -> impl IntoResponse {
    let xml = render(&state.site_url, Utc::now().date_naive());
    ([(header::CONTENT_TYPE, "application/xml")], xml)
}

pub fn render(site_url: &str, last_modified: NaiveDate) -> String {
    let base = site_url.trim_end_matches('/');
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for (path, priority) in ENTRIES {
        // Writing into a String cannot fail.
        let _ = write!(
            xml,
            "  <url>\n    <loc>{}</loc>\n    <lastmod>{}</lastmod>\n    \
             <changefreq>monthly</changefreq>\n    <priority>{}</priority>\n  </url>\n",
            escape(&format!("{base}{path}")),
            last_modified.format("%Y-%m-%d"),
            priority,
        );
    }

    xml.push_str("</urlset>\n");
    xml
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
