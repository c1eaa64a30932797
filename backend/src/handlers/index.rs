//! Advisory page: weed detection plus city weather advice

use axum::{
    extract::{Multipart, State},
    response::{Html, IntoResponse, Response},
    Json,
};

use super::form::ReportForm;
use crate::error::AppResult;
use crate::views::{render_page, ReportView};
use crate::AppState;

/// Render the empty form
pub async fn index() -> Html<String> {
    Html(render_page(&ReportView::default()))
}

/// Handle a form submission and render the results page
///
/// A form that cannot be read is reported on the page itself, with the
/// error's status code.
pub async fn submit(State(state): State<AppState>, multipart: Multipart) -> Response {
    match ReportForm::from_multipart(multipart).await {
        Ok(form) => {
            let view = build_report(&state, form).await;
            Html(render_page(&view)).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, "Rejected form submission");
            let view = ReportView {
                form_error: Some(err.user_message()),
                ..Default::default()
            };
            (err.status(), Html(render_page(&view))).into_response()
        }
    }
}

/// Same as [`submit`] but returns the view as JSON
pub async fn api_report(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Json<ReportView>> {
    let form = ReportForm::from_multipart(multipart).await?;
    Ok(Json(build_report(&state, form).await))
}

/// Run detection and the city advisory independently and merge the results
pub async fn build_report(state: &AppState, form: ReportForm) -> ReportView {
    let mut view = ReportView::default();

    if let Some(image) = &form.image {
        match state.detection.detect(image).await {
            Ok(result) => view.result_image = Some(result.result_url),
            Err(err) => {
                tracing::warn!(error = %err, "Detection failed");
                view.detection_error = Some(err.user_message());
            }
        }
    }

    if let Some(city) = form.city() {
        let report = state.advisory.report_for(city).await;
        view = view.with_advisory(report);
    }

    view
}
