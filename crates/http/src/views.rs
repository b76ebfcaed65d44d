//! Server-rendered HTML pages.
//!
//! Every page is the shared layout with a title, optional flash messages and
//! a body. All user-supplied text goes through `escape_html`.

use std::fmt::Write as _;

use axum::response::Html;
use namebook_core::{NameRecord, Pagination, RankedName};
use namebook_service::{HomeSummary, ListPage, StatsOverview};

use crate::charts;
use crate::query_types::RegisterForm;

const LAYOUT: &str = include_str!("layout.html");

/// Banner shown when a read fell back to an empty result.
pub const DEGRADED_NOTICE: &str =
    "Could not load data from the database. The results below may be incomplete.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashKind {
    Success,
    Info,
    Warning,
    Error,
}

/// One-shot message rendered above the page body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub kind: FlashKind,
    pub message: String,
}

impl Flash {
    pub fn new(kind: FlashKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashKind::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashKind::Info, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(FlashKind::Error, message)
    }

    const fn css_class(&self) -> &'static str {
        match self.kind {
            FlashKind::Success => "flash flash-success",
            FlashKind::Info => "flash flash-info",
            FlashKind::Warning => "flash flash-warning",
            FlashKind::Error => "flash flash-error",
        }
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode a query string component. Unreserved characters pass through.
pub fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

fn render(title: &str, flashes: &[Flash], body: &str) -> Html<String> {
    let flash_html: String = flashes
        .iter()
        .map(|f| format!("<div class=\"{}\">{}</div>\n", f.css_class(), escape_html(&f.message)))
        .collect();
    let title = escape_html(title);

    // Fill each slot once, in layout order, so page content is never rescanned.
    let mut html = String::with_capacity(LAYOUT.len() + flash_html.len() + body.len());
    let mut rest = LAYOUT;
    for (slot, value) in [("{{title}}", title.as_str()), ("{{flash}}", &flash_html), ("{{body}}", body)] {
        if let Some((before, after)) = rest.split_once(slot) {
            html.push_str(before);
            html.push_str(value);
            rest = after;
        }
    }
    html.push_str(rest);
    Html(html)
}

fn ranking_table(ranking: &[RankedName]) -> String {
    if ranking.is_empty() {
        return "<p class=\"empty\">No searches recorded yet.</p>".to_owned();
    }
    let mut html = String::from(
        "<table>\n<thead><tr><th class=\"num\">#</th><th>Name</th><th class=\"num\">Searches</th></tr></thead>\n<tbody>\n",
    );
    for entry in ranking {
        let _ = writeln!(
            html,
            "<tr><td class=\"num\">{}</td><td>{}</td><td class=\"num\">{}</td></tr>",
            entry.rank,
            escape_html(&entry.name),
            entry.search_count
        );
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

fn names_table(records: &[NameRecord]) -> String {
    let mut html = String::from(
        "<table>\n<thead><tr><th>Name</th><th>Meaning</th><th>Origin</th><th>Why it was chosen</th><th class=\"num\">Searches</th></tr></thead>\n<tbody>\n",
    );
    for record in records {
        let _ = writeln!(
            html,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"num\">{}</td></tr>",
            escape_html(&record.name),
            escape_html(&record.meaning),
            escape_html(&record.origin),
            escape_html(record.choice_reason.as_deref().unwrap_or("")),
            record.search_count
        );
    }
    html.push_str("</tbody>\n</table>\n");
    html
}

pub fn home(summary: &HomeSummary, flashes: &[Flash]) -> Html<String> {
    let mut body = String::from("<h1>Namebook</h1>\n");
    let _ = writeln!(
        body,
        "<p><span class=\"total\">{}</span> <span class=\"muted\">names registered</span></p>",
        summary.total
    );
    body.push_str("<h2>Most searched</h2>\n");
    body.push_str(&ranking_table(&summary.top));
    render("Home", flashes, &body)
}

pub fn search(term: &str, results: &[NameRecord], flashes: &[Flash]) -> Html<String> {
    let mut body = String::from("<h1>Search by prefix</h1>\n");
    let _ = writeln!(
        body,
        "<form class=\"inline\" method=\"post\" action=\"/search\">\
         <input type=\"text\" name=\"term\" value=\"{}\" placeholder=\"First letters of a name\" autofocus>\
         <button type=\"submit\">Search</button></form>",
        escape_html(term)
    );
    if !results.is_empty() {
        body.push_str(&names_table(results));
    }
    render("Search", flashes, &body)
}

fn list_href(page: &ListPage, target: u32) -> String {
    let mut href = format!("/list?page={target}&perPage={}", page.pagination.per_page);
    if let Some(name) = &page.filter.name {
        let _ = write!(href, "&name={}", encode_component(name));
    }
    if let Some(origin) = &page.filter.origin {
        let _ = write!(href, "&origin={}", encode_component(origin));
    }
    href
}

fn pager(page: &ListPage) -> String {
    let Pagination { page: current, total, total_pages, .. } = page.pagination;
    let mut html = String::from("<nav class=\"pager\">");
    if page.pagination.has_previous() {
        let _ = write!(html, "<a href=\"{}\">&laquo; Previous</a>", escape_html(&list_href(page, current - 1)));
    }
    let _ = write!(
        html,
        "<span>Page {current} of {total_pages} <span class=\"muted\">({total} names)</span></span>"
    );
    if page.pagination.has_next() {
        let _ = write!(html, "<a href=\"{}\">Next &raquo;</a>", escape_html(&list_href(page, current + 1)));
    }
    html.push_str("</nav>\n");
    html
}

pub fn list(page: &ListPage, flashes: &[Flash]) -> Html<String> {
    let mut body = String::from("<h1>All names</h1>\n");
    let _ = writeln!(
        body,
        "<form class=\"inline\" method=\"get\" action=\"/list\">\
         <input type=\"text\" name=\"name\" value=\"{}\" placeholder=\"Name contains\">\
         <input type=\"text\" name=\"origin\" value=\"{}\" placeholder=\"Origin contains\">\
         <input type=\"hidden\" name=\"perPage\" value=\"{}\">\
         <button type=\"submit\">Filter</button></form>",
        escape_html(page.filter.name.as_deref().unwrap_or("")),
        escape_html(page.filter.origin.as_deref().unwrap_or("")),
        page.pagination.per_page
    );
    if page.items.is_empty() && page.filter.is_empty() {
        body.push_str("<p class=\"empty\">No names registered yet.</p>\n");
    } else if page.items.is_empty() {
        body.push_str("<p class=\"empty\">No names match.</p>\n");
    } else {
        body.push_str(&names_table(&page.items));
    }
    body.push_str(&pager(page));
    render("Browse", flashes, &body)
}

pub fn register(form: &RegisterForm, flashes: &[Flash]) -> Html<String> {
    let body = format!(
        "<h1>Register a name</h1>\n\
         <form class=\"stacked\" method=\"post\" action=\"/register\">\
         <label>Name <input type=\"text\" name=\"name\" value=\"{}\" required></label>\
         <label>Meaning <input type=\"text\" name=\"meaning\" value=\"{}\" required></label>\
         <label>Origin <input type=\"text\" name=\"origin\" value=\"{}\" required></label>\
         <label>Why it was chosen <textarea name=\"choiceReason\" rows=\"3\">{}</textarea></label>\
         <p><button type=\"submit\">Register</button></p></form>\n",
        escape_html(&form.name),
        escape_html(&form.meaning),
        escape_html(&form.origin),
        escape_html(form.choice_reason.as_deref().unwrap_or(""))
    );
    render("Register", flashes, &body)
}

pub fn top10(ranking: &[RankedName], flashes: &[Flash]) -> Html<String> {
    let body = format!("<h1>Top 10 most searched</h1>\n{}", ranking_table(ranking));
    render("Top 10", flashes, &body)
}

pub fn stats(overview: &StatsOverview, flashes: &[Flash]) -> Html<String> {
    let origin_bars: Vec<(String, u64)> =
        overview.origins.iter().map(|o| (o.origin.clone(), o.count)).collect();
    let top_bars: Vec<(String, u64)> =
        overview.top.iter().map(|r| (r.name.clone(), r.search_count)).collect();

    let mut body = String::from("<h1>Statistics</h1>\n<h2>Names by origin</h2>\n");
    body.push_str(&charts::horizontal_bars("Names by origin", &origin_bars));
    if !overview.origins.is_empty() {
        body.push_str(
            "<table>\n<thead><tr><th>Origin</th><th class=\"num\">Names</th></tr></thead>\n<tbody>\n",
        );
        for origin in &overview.origins {
            let _ = writeln!(
                body,
                "<tr><td>{}</td><td class=\"num\">{}</td></tr>",
                escape_html(&origin.origin),
                origin.count
            );
        }
        body.push_str("</tbody>\n</table>\n");
    }
    body.push_str("<h2>Top 5 most searched</h2>\n");
    body.push_str(&charts::vertical_bars("Top 5 most searched", &top_bars));
    body.push_str(&ranking_table(&overview.top));
    render("Statistics", flashes, &body)
}

#[cfg(test)]
mod tests {
    use namebook_core::{ListFilter, PageRequest};

    use super::*;

    #[test]
    fn escape_html_neutralises_markup() {
        assert_eq!(escape_html("<b>\"A&B\"</b>'"), "&lt;b&gt;&quot;A&amp;B&quot;&lt;/b&gt;&#39;");
    }

    #[test]
    fn encode_component_handles_spaces_and_unicode() {
        assert_eq!(encode_component("Ana Maria"), "Ana%20Maria");
        assert_eq!(encode_component("Zoë"), "Zo%C3%AB");
        assert_eq!(encode_component("a&b=c"), "a%26b%3Dc");
    }

    #[test]
    fn flash_messages_are_escaped() {
        let Html(page) = home(&HomeSummary::default(), &[Flash::error("<script>")]);
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<script>"));
        assert!(page.contains("flash-error"));
    }

    #[test]
    fn pager_links_keep_filters() {
        let page = ListPage {
            items: Vec::new(),
            pagination: Pagination::resolve(PageRequest::new(2, 10), 25),
            filter: ListFilter::new(Some("an a"), None),
        };
        let Html(html) = list(&page, &[]);
        assert!(html.contains("/list?page=1&amp;perPage=10&amp;name=an%20a"));
        assert!(html.contains("/list?page=3&amp;perPage=10&amp;name=an%20a"));
        assert!(html.contains("Page 2 of 3"));
    }

    #[test]
    fn empty_listing_tells_filtered_from_unfiltered() {
        let empty = |filter: ListFilter| ListPage {
            items: Vec::new(),
            pagination: Pagination::resolve(PageRequest::default(), 0),
            filter,
        };
        let Html(unfiltered) = list(&empty(ListFilter::default()), &[]);
        assert!(unfiltered.contains("No names registered yet."));
        let Html(filtered) = list(&empty(ListFilter::new(None, Some("Norse"))), &[]);
        assert!(filtered.contains("No names match."));
    }
}
