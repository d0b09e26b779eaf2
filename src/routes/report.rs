use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

use crate::common::AppState;
use crate::error::{AppError, AppResult};
use crate::routes::layout::{
    current_cards, embed_json, render_page, Page, HUMIDITY_COLOR, MOISTURE_COLOR,
    TEMPERATURE_COLOR,
};
use crate::services::view::{ReportSnapshot, ReportView};
use crate::services::window::TimeRange;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// Time range: 24h (default), 7d or 30d
    pub range: Option<String>,
}

impl ReportQuery {
    fn time_range(&self) -> AppResult<TimeRange> {
        self.range
            .as_deref()
            .map_or(Ok(TimeRange::default()), str::parse::<TimeRange>)
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}

/// Every window of one fetch, so the selector switches without a request.
#[derive(Serialize)]
struct ReportPayload {
    selected: TimeRange,
    snapshots: Vec<ReportSnapshot>,
}

/// Report page: range selector, combined chart and windowed current values.
pub async fn report_page(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let range = query.time_range()?;

    let mut view = ReportView::mount(state.source.as_ref(), state.zone).await;
    view.select_range(range);
    tracing::debug!(
        readings = view.readings().len(),
        in_window = view.filtered().len(),
        range = %range,
        "report_mounted"
    );

    let current = view.current();
    let payload = ReportPayload {
        selected: range,
        snapshots: view.snapshots(),
    };

    let options: String = TimeRange::ALL
        .into_iter()
        .map(|r| {
            let selected = if r == range { " selected" } else { "" };
            format!(r#"<option value="{}"{selected}>{}</option>"#, r.key(), r.label())
        })
        .collect();

    let body = REPORT_BODY
        .replace("__CARDS__", &current_cards(&current, false))
        .replace("__OPTIONS__", &options)
        .replace("__HUMIDITY_COLOR__", HUMIDITY_COLOR)
        .replace("__TEMPERATURE_COLOR__", TEMPERATURE_COLOR)
        .replace("__MOISTURE_COLOR__", MOISTURE_COLOR)
        .replace("__PAYLOAD__", &embed_json(&payload)?);

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Html(render_page(Page::Report, "Environmental Data Report", &body)),
    ))
}

/// Report snapshot for one time range
///
/// Filters the readings to the trailing window ending at the latest reading
/// and derives labels, series and current values from that window.
#[utoipa::path(
    get,
    path = "/api/report",
    params(ReportQuery),
    responses(
        (status = 200, description = "Report snapshot", body = ReportSnapshot),
        (status = 400, description = "Invalid range"),
    ),
    tag = "views"
)]
pub async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<ReportSnapshot>> {
    let range = query.time_range()?;

    let mut view = ReportView::mount(state.source.as_ref(), state.zone).await;
    view.select_range(range);

    Ok(Json(view.snapshot()))
}

const REPORT_BODY: &str = r##"<div class="container">
    <h1>Environmental Data Report</h1>

    __CARDS__

    <div class="card">
        <div class="card-header-row">
            <div>
                <div class="card-heading">Environmental Data Over Time</div>
                <p class="card-subtitle">Combined view of humidity, temperature, and soil moisture</p>
            </div>
            <select id="time-range" aria-label="Select time range">__OPTIONS__</select>
        </div>
        <div class="chart-box tall"><canvas id="report-chart"></canvas></div>
    </div>
</div>

<script id="report-data" type="application/json">__PAYLOAD__</script>
<script>
const payload = JSON.parse(document.getElementById('report-data').textContent);
const byRange = Object.fromEntries(payload.snapshots.map(s => [s.range, s]));

const chart = new Chart(document.getElementById('report-chart'), {
    type: 'line',
    data: { labels: [], datasets: [
        { label: 'Humidity', data: [], borderColor: '__HUMIDITY_COLOR__', yAxisID: 'y', tension: 0.4, pointRadius: 0 },
        { label: 'Temperature', data: [], borderColor: '__TEMPERATURE_COLOR__', yAxisID: 'y1', tension: 0.4, pointRadius: 0 },
        { label: 'Soil Moisture', data: [], borderColor: '__MOISTURE_COLOR__', yAxisID: 'y', tension: 0.4, pointRadius: 0 },
    ] },
    options: {
        responsive: true,
        maintainAspectRatio: false,
        interaction: { mode: 'index', intersect: false },
        plugins: { legend: { position: 'top' } },
        scales: {
            y: { type: 'linear', display: true, position: 'left', title: { display: true, text: 'Percentage (%)' } },
            y1: { type: 'linear', display: true, position: 'right', title: { display: true, text: 'Temperature (°C)' }, grid: { drawOnChartArea: false } },
        },
    },
});

function show(range) {
    const snapshot = byRange[range];
    if (!snapshot) return;

    chart.data.labels = snapshot.series.labels;
    chart.data.datasets[0].data = snapshot.series.humidity;
    chart.data.datasets[1].data = snapshot.series.temperature;
    chart.data.datasets[2].data = snapshot.series.moisture;
    chart.update();

    document.getElementById('current-humidity').textContent = snapshot.current.humidity;
    document.getElementById('current-temperature').textContent = snapshot.current.temperature;
    document.getElementById('current-moisture').textContent = snapshot.current.moisture;

    const url = new URL(window.location);
    url.searchParams.set('range', range);
    history.replaceState(null, '', url);
}

const selector = document.getElementById('time-range');
selector.addEventListener('change', () => show(selector.value));
show(payload.selected);
</script>"##;
