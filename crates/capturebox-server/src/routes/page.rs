//! Capture page at `/`.
//!
//! Each render carries a fresh [`SessionNote`]. The page itself only lays
//! out the note and loads the client script from `/static`; whatever the
//! script posts back arrives at the ingestion routes.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;

use capturebox_core::SessionNote;

use crate::state::AppState;

/// Build the page router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(capture_page))
}

async fn capture_page(State(state): State<Arc<AppState>>) -> Html<String> {
    let note = SessionNote::new(state.note_content.as_str());
    tracing::debug!(note_id = %note.id, "rendering capture page");
    Html(render(&note))
}

/// Fill the page template with an escaped note.
pub fn render(note: &SessionNote) -> String {
    CAPTURE_PAGE
        .replace("{{NOTE_ID}}", &escape_html(&note.id))
        .replace("{{NOTE_CONTENT}}", &escape_html(&note.content))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

const CAPTURE_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"/>
<meta name="viewport" content="width=device-width,initial-scale=1"/>
<title>Note {{NOTE_ID}}</title>
<link rel="stylesheet" href="/static/style.css"/>
</head>
<body>
<main class="note" data-note-id="{{NOTE_ID}}">
<h1>Note <code>{{NOTE_ID}}</code></h1>
<p class="note-content">{{NOTE_CONTENT}}</p>
</main>
<script src="/static/app.js" defer></script>
</body></html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_embeds_note_id() {
        let note = SessionNote::new("hello");
        let html = render(&note);
        assert!(html.contains(&format!("data-note-id=\"{}\"", note.id)));
        assert!(html.contains("<p class=\"note-content\">hello</p>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn render_escapes_content() {
        let note = SessionNote::new("<script>alert('x')</script> & co");
        let html = render(&note);
        assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
        assert!(!html.contains("<script>alert"));
    }
}
