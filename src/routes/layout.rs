//! Shared page shell: stylesheet, navigation bar and summary cards.

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::services::CurrentValues;

pub const HUMIDITY_COLOR: &str = "#818cf8";
pub const TEMPERATURE_COLOR: &str = "#4ade80";
pub const MOISTURE_COLOR: &str = "#fbbf24";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Dashboard,
    Report,
}

impl Page {
    fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/",
            Self::Report => "/report",
        }
    }

    fn nav_label(self) -> &'static str {
        match self {
            Self::Dashboard => "Home",
            Self::Report => "Report",
        }
    }
}

fn nav_bar(active: Page) -> String {
    let links: String = [Page::Dashboard, Page::Report]
        .into_iter()
        .map(|page| {
            let class = if page == active { "nav-link active" } else { "nav-link" };
            format!(
                r#"<a href="{}" class="{class}">{}</a>"#,
                page.path(),
                page.nav_label()
            )
        })
        .collect();

    format!(r#"<nav><div class="nav-inner">{links}</div></nav>"#)
}

/// Wrap a page body in the document shell.
pub fn render_page(active: Page, title: &str, body: &str) -> String {
    PAGE_HTML
        .replace("__TITLE__", title)
        .replace("__NAV__", &nav_bar(active))
        .replace("__BODY__", body)
}

/// Serialize a value for a `<script type="application/json">` block.
///
/// `<` is escaped so the payload can never close the script element.
pub fn embed_json<T: Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string(value)
        .map(|json| json.replace('<', "\\u003c"))
        .map_err(|e| AppError::Internal(e.to_string()))
}

/// The three "current value" cards. `tinted` gives each card its metric colour.
pub fn current_cards(current: &CurrentValues, tinted: bool) -> String {
    let cards = [
        ("humidity", "Current Humidity", current.humidity, "%", "tint-blue"),
        ("temperature", "Current Temperature", current.temperature, "°C", "tint-green"),
        ("moisture", "Current Soil Moisture", current.moisture, "%", "tint-yellow"),
    ];

    let cards: String = cards
        .into_iter()
        .map(|(id, title, value, unit, tint)| {
            let class = if tinted { format!("card {tint}") } else { "card".to_string() };
            format!(
                r#"<div class="{class}"><div class="card-title">{title}</div><div class="card-value"><span id="current-{id}">{value}</span>{unit}</div></div>"#
            )
        })
        .collect();

    format!(r#"<div class="grid">{cards}</div>"#)
}

const PAGE_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>__TITLE__</title>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
    <style>
        :root {
            --bg: #ffffff;
            --surface: #ffffff;
            --border: #e2e8f0;
            --text: #0f172a;
            --muted: #64748b;
            --accent: #0f172a;
        }
        * { box-sizing: border-box; margin: 0; padding: 0; }
        html, body { width: 100%; min-height: 100vh; }
        body { font-family: system-ui, -apple-system, sans-serif; background: var(--bg); color: var(--text); display: flex; flex-direction: column; }

        nav { border-bottom: 1px solid var(--border); }
        .nav-inner {
            max-width: 1200px;
            margin: 0 auto;
            padding: 0 1rem;
            height: 3.5rem;
            display: flex;
            align-items: center;
            gap: 1rem;
        }
        .nav-link {
            font-size: 0.875rem;
            font-weight: 500;
            color: var(--muted);
            text-decoration: none;
            transition: color 0.15s;
        }
        .nav-link:hover, .nav-link.active { color: var(--accent); }

        .container {
            width: 100%;
            max-width: 1200px;
            margin: 0 auto;
            padding: 1rem;
            display: flex;
            flex-direction: column;
            gap: 1.5rem;
        }
        header {
            display: flex;
            justify-content: space-between;
            align-items: center;
            flex-wrap: wrap;
            gap: 1rem;
        }
        h1 { font-size: 1.5rem; font-weight: 700; }

        .btn {
            padding: 0.5rem 1rem;
            border-radius: 0.375rem;
            font-size: 0.875rem;
            font-weight: 500;
            background: var(--accent);
            color: white;
            text-decoration: none;
        }
        .btn:hover { opacity: 0.9; }

        .grid {
            display: grid;
            grid-template-columns: repeat(3, minmax(0, 1fr));
            gap: 1rem;
        }
        @media (max-width: 768px) {
            .grid { grid-template-columns: 1fr; }
        }

        .card {
            background: var(--surface);
            border: 1px solid var(--border);
            border-radius: 0.5rem;
            padding: 1.25rem;
            box-shadow: 0 1px 2px rgba(0, 0, 0, 0.05);
        }
        .card.tint-blue { background: #eff6ff; }
        .card.tint-green { background: #f0fdf4; }
        .card.tint-yellow { background: #fefce8; }
        .card-title { font-size: 0.875rem; font-weight: 500; margin-bottom: 0.5rem; }
        .card-value { font-size: 1.5rem; font-weight: 700; }
        .card-heading { font-size: 1.125rem; font-weight: 600; }
        .card-subtitle { font-size: 0.875rem; color: var(--muted); margin-top: 0.25rem; }
        .card-header-row {
            display: flex;
            justify-content: space-between;
            align-items: center;
            margin-bottom: 1rem;
            gap: 1rem;
            flex-wrap: wrap;
        }
        .chart-box { position: relative; height: 300px; margin-top: 1rem; }
        .chart-box.tall { height: 400px; }

        select {
            width: 180px;
            padding: 0.5rem 0.75rem;
            border: 1px solid var(--border);
            border-radius: 0.375rem;
            font-size: 0.875rem;
            background: var(--surface);
        }
    </style>
</head>
<body>
__NAV__
__BODY__
</body>
</html>
"##;
