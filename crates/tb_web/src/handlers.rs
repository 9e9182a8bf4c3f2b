use axum::{
    extract::State,
    response::{Html, IntoResponse},
    Form, Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tb_core::SummaryReport;

use crate::page::render_page;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TopicRequest {
    #[serde(default)]
    pub topic: String,
}

pub async fn index() -> Html<String> {
    Html(render_page(None))
}

pub async fn summarize_form(
    State(state): State<Arc<AppState>>,
    Form(request): Form<TopicRequest>,
) -> Html<String> {
    let report = state.pipeline.run(&request.topic).await;
    Html(render_page(Some(&report)))
}

pub async fn summarize_json(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TopicRequest>,
) -> Json<SummaryReport> {
    Json(state.pipeline.run(&request.topic).await)
}

pub async fn health() -> impl IntoResponse {
    "ok"
}
