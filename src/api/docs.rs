//! OpenAPI document and the Swagger UI page that renders it.

use axum::{response::Html, Json};
use utoipa::OpenApi;

use super::tasks;
use super::types::{CreatedResponse, ErrorResponse, MessageResponse};
use crate::task::{Task, TaskInput};

/// Path the OpenAPI document is served at.
pub const OPENAPI_PATH: &str = "/swagger/doc.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Task API",
        version = "1.0",
        description = "Task management API: create, list, update and delete tasks."
    ),
    paths(
        tasks::create_task,
        tasks::get_tasks,
        tasks::update_task,
        tasks::delete_task,
    ),
    components(schemas(Task, TaskInput, CreatedResponse, MessageResponse, ErrorResponse)),
    tags((name = "tasks", description = "Task management"))
)]
pub struct ApiDoc;

/// GET /swagger/doc.json
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /swagger, /swagger/index.html
pub async fn swagger_ui() -> Html<String> {
    Html(format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>Task API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {{
      window.ui = SwaggerUIBundle({{ url: "{}", dom_id: "#swagger-ui" }});
    }};
  </script>
</body>
</html>
"##,
        OPENAPI_PATH
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_task_routes() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = &doc["paths"];

        assert!(paths["/tasks"]["get"].is_object());
        assert!(paths["/tasks"]["post"].is_object());
        assert!(paths["/tasks/{id}"]["put"].is_object());
        assert!(paths["/tasks/{id}"]["delete"].is_object());
        assert!(doc["components"]["schemas"]["Task"].is_object());
    }

    #[tokio::test]
    async fn test_swagger_page_mounts_into_its_container() {
        let Html(page) = swagger_ui().await;

        assert!(page.contains(r#"<div id="swagger-ui"></div>"#));
        assert!(page.contains(r##"dom_id: "#swagger-ui""##));
        assert!(page.contains(&format!(r#"url: "{}""#, OPENAPI_PATH)));
        assert!(page.trim_end().ends_with("</html>"));
    }
}
