// Route table for the viewer session
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    detail_events, get_chart, get_details, get_hover, health_check, hover_chart, leave_hover, list_charts,
    refresh, set_hover,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/charts", get(list_charts))
        .route("/charts/:id", get(get_chart))
        .route("/charts/:id/hover", post(hover_chart))
        .route("/hover", get(get_hover).put(set_hover))
        .route("/hover/leave", post(leave_hover))
        .route("/details", get(get_details))
        .route("/details/events", get(detail_events))
        .route("/refresh", post(refresh))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dashboard_session::DashboardSession;
    use crate::application::sample_store::tests::{battery_at, thermal_at, FakeSource};
    use crate::domain::sample::SeriesSource;
    use crate::domain::telemetry::ChartKind;
    use crate::infrastructure::config::{
        ChartConfig, ChartsConfig, HoverSettings, SamplingSettings, SeriesConfig,
    };
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use futures::StreamExt;
    use tower::ServiceExt;

    async fn app() -> Router {
        let charts = ChartsConfig {
            charts: vec![ChartConfig {
                id: "current".to_string(),
                title: "Instantaneous current".to_string(),
                unit: Some("mAh".to_string()),
                kind: ChartKind::Line,
                source: SeriesSource::Battery,
                value_divisor: 100.0,
                fraction_digits: Some(1),
                series: vec![SeriesConfig {
                    id: "inst_curr".to_string(),
                    name: "Current".to_string(),
                    color: None,
                    field: "inst_curr".to_string(),
                }],
            }],
        };
        let session = DashboardSession::new(&SamplingSettings::default(), &HoverSettings::default(), charts);
        let source = FakeSource {
            battery: Some(battery_at(&[100, 200])),
            thermal: Some(thermal_at(&[95, 205])),
        };
        let state = Arc::new(AppState::new(session, Arc::new(source)));
        state.refresh().await;
        router(state)
    }

    fn pointer_move(chart: &str, timestamp: i64) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(format!("/charts/{}/hover", chart))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(format!(r#"{{"timestamp": {}}}"#, timestamp)))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .await
            .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_chart_is_not_found() {
        let app = app().await;

        let response = app.clone().oneshot(pointer_move("missing", 100)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(Request::get("/charts/missing").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_pointer_move_fills_detail_table() {
        let app = app().await;

        let response = app.clone().oneshot(pointer_move("current", 190)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let outcome = json_body(response).await;
        assert_eq!(outcome["outcome"], "forwarded");
        assert_eq!(outcome["changed"], true);

        let response = app
            .clone()
            .oneshot(Request::get("/details").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let table = json_body(response).await;
        assert_eq!(table["rows"][3]["value"], "-");
        assert_eq!(table["rows"][4]["value"], "-2.5");
        assert!(table["hint"].is_null());

        let response = app
            .oneshot(Request::get("/hover").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let hover = json_body(response).await;
        assert_eq!(hover["state"]["activeTimestamp"], 200);
        assert_eq!(hover["state"]["matchedThermal"]["timestamp"], 205);
    }

    #[tokio::test]
    async fn test_detail_events_start_with_current_table() {
        let response = app()
            .await
            .oneshot(Request::get("/details/events").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");

        let mut frames = response.into_body().into_data_stream();
        let first = frames.next().await.unwrap().unwrap();
        let text = String::from_utf8(first.to_vec()).unwrap();
        assert!(text.starts_with("event: details\n"));
        assert!(text.contains("Hover over a chart"));
    }
}
