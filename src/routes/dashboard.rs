use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Json,
};

use crate::common::AppState;
use crate::error::AppResult;
use crate::routes::layout::{
    current_cards, embed_json, render_page, Page, HUMIDITY_COLOR, MOISTURE_COLOR,
    TEMPERATURE_COLOR,
};
use crate::services::view::{DashboardSnapshot, DashboardView};

/// Dashboard page: current values and one chart per metric.
pub async fn dashboard_page(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let view = DashboardView::mount(state.source.as_ref()).await;
    tracing::debug!(readings = view.readings().len(), "dashboard_mounted");

    let snapshot = view.snapshot();
    let body = DASHBOARD_BODY
        .replace("__CARDS__", &current_cards(&snapshot.current, true))
        .replace("__HUMIDITY_COLOR__", HUMIDITY_COLOR)
        .replace("__TEMPERATURE_COLOR__", TEMPERATURE_COLOR)
        .replace("__MOISTURE_COLOR__", MOISTURE_COLOR)
        .replace("__PAYLOAD__", &embed_json(&snapshot)?);

    Ok((
        [(header::CACHE_CONTROL, "no-store")],
        Html(render_page(Page::Dashboard, "IoT Environmental Dashboard", &body)),
    ))
}

/// Dashboard snapshot
///
/// Current values (last reading, or 0 when there are none) and the full
/// series for each metric.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Dashboard snapshot", body = DashboardSnapshot),
    ),
    tag = "views"
)]
pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardSnapshot> {
    let view = DashboardView::mount(state.source.as_ref()).await;
    Json(view.snapshot())
}

const DASHBOARD_BODY: &str = r##"<div class="container">
    <header>
        <h1>IoT Environmental Dashboard</h1>
        <a class="btn" href="/report">View Detailed Report</a>
    </header>

    __CARDS__

    <div class="grid">
        <div class="card">
            <div class="card-heading">Humidity</div>
            <p class="card-subtitle">24-hour humidity levels</p>
            <div class="chart-box"><canvas id="humidity-chart"></canvas></div>
        </div>
        <div class="card">
            <div class="card-heading">Temperature</div>
            <p class="card-subtitle">24-hour temperature readings</p>
            <div class="chart-box"><canvas id="temperature-chart"></canvas></div>
        </div>
        <div class="card">
            <div class="card-heading">Soil Moisture</div>
            <p class="card-subtitle">24-hour soil moisture levels</p>
            <div class="chart-box"><canvas id="moisture-chart"></canvas></div>
        </div>
    </div>
</div>

<script id="dashboard-data" type="application/json">__PAYLOAD__</script>
<script>
const snapshot = JSON.parse(document.getElementById('dashboard-data').textContent);

const chartOptions = {
    responsive: true,
    maintainAspectRatio: false,
    interaction: { intersect: false, mode: 'index' },
    plugins: { legend: { display: false } },
    scales: {
        x: { display: true, grid: { display: false } },
        y: { display: true, grid: { color: 'rgba(0, 0, 0, 0.1)' } },
    },
};

function lineChart(canvasId, values, color) {
    new Chart(document.getElementById(canvasId), {
        type: 'line',
        data: {
            labels: snapshot.series.labels,
            datasets: [{ data: values, borderColor: color, backgroundColor: color, tension: 0.4 }],
        },
        options: chartOptions,
    });
}

lineChart('humidity-chart', snapshot.series.humidity, '__HUMIDITY_COLOR__');
lineChart('temperature-chart', snapshot.series.temperature, '__TEMPERATURE_COLOR__');
lineChart('moisture-chart', snapshot.series.moisture, '__MOISTURE_COLOR__');
</script>"##;
