//! Dashboard HTML page handler for the second brain service.
//!
//! Read-only view of the stored memories. `?q=` and `?category=` narrow the
//! list with the same filter the capture surface uses.

use crate::routes::AppState;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use second_brain_types::{Category, CategoryFilter, Memory, filter_memories};
use serde::Deserialize;
use std::sync::Arc;

const VISIBLE_TAGS: usize = 3;

#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DashboardQuery>,
) -> impl IntoResponse {
    let query = params.q.unwrap_or_default();
    let filter: CategoryFilter = params
        .category
        .as_deref()
        .unwrap_or_default()
        .parse()
        .unwrap_or_default();

    let (memories, load_error) = match state.store.list_recent().await {
        Ok(m) => (m, false),
        Err(e) => {
            log::error!("Dashboard failed to load memories: {}", e);
            (Vec::new(), true)
        }
    };

    let visible = filter_memories(&memories, &query, filter);
    let html = render_page(&memories, &visible, &query, filter, load_error);

    ([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html)
}

fn render_page(
    all: &[Memory],
    visible: &[&Memory],
    query: &str,
    filter: CategoryFilter,
    load_error: bool,
) -> String {
    let mut chips = String::new();
    chips.push_str(&chip("All", query, filter == CategoryFilter::All));
    for category in Category::all() {
        chips.push_str(&chip(
            category.as_ref(),
            query,
            filter == CategoryFilter::Only(category),
        ));
    }

    let cards = if visible.is_empty() {
        r#"<div class="empty"><p>No memories match this view yet.</p></div>"#.to_string()
    } else {
        visible.iter().map(|m| render_card(m)).collect::<Vec<_>>().join("\n")
    };

    let count = if load_error {
        "Failed to load memories".to_string()
    } else {
        format!("{} memories", all.len())
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Second Brain</title>
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{ font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; background: #09090b; color: #e4e4e7; padding: 20px; }}
  h1 {{ color: #a78bfa; margin-bottom: 8px; }}
  .meta {{ color: #71717a; font-size: 0.85em; margin-bottom: 16px; }}
  form {{ margin-bottom: 12px; }}
  input {{ width: 100%; max-width: 480px; background: #18181b; border: 1px solid #3f3f46; color: #e4e4e7; border-radius: 8px; padding: 8px 12px; }}
  .chips {{ margin-bottom: 20px; }}
  .chip {{ display: inline-block; background: #27272a; color: #d4d4d8; padding: 4px 10px; border-radius: 12px; font-size: 0.8em; margin: 3px; text-decoration: none; }}
  .chip.active {{ background: #34d399; color: #09090b; }}
  .grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 12px; }}
  .card {{ background: #18181b; border: 1px solid #27272a; border-radius: 12px; padding: 14px; }}
  .card h3 {{ font-size: 0.95em; margin-bottom: 6px; }}
  .card .cat {{ float: right; font-size: 0.7em; background: #27272a; padding: 2px 8px; border-radius: 10px; color: #a1a1aa; }}
  .card p {{ font-size: 0.8em; color: #a1a1aa; line-height: 1.4; }}
  .card footer {{ margin-top: 10px; font-size: 0.7em; color: #71717a; }}
  .tag {{ background: #27272a; padding: 2px 6px; border-radius: 8px; margin-right: 4px; }}
  .empty {{ border: 1px dashed #3f3f46; border-radius: 12px; padding: 40px; text-align: center; color: #71717a; }}
</style>
</head>
<body>
  <h1>Second Brain</h1>
  <p class="meta">{count}</p>
  <form method="get" action="/">
    <input type="search" name="q" value="{query}" placeholder="Search titles, tags or notes">
    <input type="hidden" name="category" value="{category}">
  </form>
  <div class="chips">{chips}</div>
  <div class="grid">{cards}</div>
</body>
</html>"#,
        count = count,
        query = escape_html(query),
        category = escape_html(&filter.to_string()),
        chips = chips,
        cards = cards,
    )
}

fn chip(label: &str, query: &str, active: bool) -> String {
    format!(
        r#"<a class="chip{}" href="/?category={}&q={}">{}</a>"#,
        if active { " active" } else { "" },
        urlencoding::encode(label),
        urlencoding::encode(query),
        escape_html(label),
    )
}

fn render_card(m: &Memory) -> String {
    let mut tags: String = m
        .tags
        .iter()
        .take(VISIBLE_TAGS)
        .map(|t| format!(r#"<span class="tag">#{}</span>"#, escape_html(t)))
        .collect();
    if m.tags.len() > VISIBLE_TAGS {
        tags.push_str(&format!(
            r#"<span class="tag">+{} more</span>"#,
            m.tags.len() - VISIBLE_TAGS
        ));
    }

    let content = if m.content.is_empty() {
        "No additional note.".to_string()
    } else {
        escape_html(&m.content)
    };

    format!(
        r#"<article class="card"><span class="cat">{}</span><h3>{}</h3><p>{}</p><footer>{} <time>{}</time></footer></article>"#,
        m.category,
        escape_html(&m.title),
        content,
        tags,
        format_timestamp(&m.created_at),
    )
}

fn format_timestamp(raw: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|t| t.format("%b %-d, %H:%M").to_string())
        .unwrap_or_else(|_| escape_html(raw))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::store::fake::FakeTable;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use second_brain_types::MemoryDraft;
    use std::time::Instant;
    use tower::ServiceExt;

    async fn render(table: Arc<FakeTable>, uri: &str) -> (StatusCode, String) {
        let app = crate::routes::router(Arc::new(AppState {
            store: MemoryStore::new(table),
            start_time: Instant::now(),
        }));
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn seed(table: &Arc<FakeTable>) {
        let store = MemoryStore::new(table.clone());
        for (title, category, tags) in [
            ("Gym plan", Category::Body, vec!["body"]),
            ("AI script <draft>", Category::Ai, vec!["ai", "hook", "script", "offer"]),
        ] {
            let tags = tags.into_iter().map(String::from).collect();
            store
                .insert(MemoryDraft::new(title, category, tags, ""))
                .await
                .unwrap();
        }
    }

    #[tokio::test]
    async fn test_dashboard_lists_and_escapes() {
        let table = Arc::new(FakeTable::new());
        seed(&table).await;

        let (status, html) = render(table, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("2 memories"));
        assert!(html.contains("Gym plan"));
        assert!(html.contains("AI script &lt;draft&gt;"));
        assert!(!html.contains("<draft>"));
        assert!(html.contains("+1 more"));
        assert!(html.contains("No additional note."));
    }

    #[tokio::test]
    async fn test_dashboard_applies_filters() {
        let table = Arc::new(FakeTable::new());
        seed(&table).await;

        let (_, html) = render(table.clone(), "/?q=hook").await;
        assert!(html.contains("AI script"));
        assert!(!html.contains("Gym plan"));

        let (_, html) = render(table, "/?category=Books").await;
        assert!(html.contains("No memories match this view yet."));
    }

    #[tokio::test]
    async fn test_dashboard_survives_store_failure() {
        let table = Arc::new(FakeTable::new());
        table.set_failing(true);
        let (status, html) = render(table, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Failed to load memories"));
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp("2024-03-05T14:07:00+00:00"), "Mar 5, 14:07");
        assert_eq!(format_timestamp("yesterday"), "yesterday");
    }
}
