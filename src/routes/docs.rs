use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

/// Serve the Swagger UI backed by the generated OpenAPI document.
pub fn router(state: SharedState) -> Router<SharedState> {
    let ui: Router<SharedState> = SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", ApiDoc::openapi())
        .into();

    ui.with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::{Request, StatusCode}};

    use crate::routes::testing::{call, seeded_state};

    #[tokio::test]
    async fn openapi_document_lists_quiz_routes() {
        let request = Request::get("/api-doc/openapi.json")
            .body(Body::empty())
            .unwrap();
        let (status, body) = call(seeded_state().await, request).await;

        assert_eq!(status, StatusCode::OK);
        let paths = body["paths"].as_object().unwrap();
        for path in ["/questions", "/leaderboard", "/healthcheck"] {
            assert!(paths.contains_key(path), "missing {path}");
        }
        assert!(paths["/leaderboard"]["post"].is_object());
    }
}
