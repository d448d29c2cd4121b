use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::server::api;
use crate::server::AppState;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    fn json(body: String) -> Self {
        Self {
            status_code: 200,
            status_text: "OK",
            content_type: "application/json",
            body,
        }
    }
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

/// Route one request. `path` may carry a query string.
pub fn route_request(state: &AppState, method: &str, path: &str, body: &str) -> HttpResponse {
    let route = path.split('?').next().unwrap_or(path);
    let result = match (method, route) {
        ("GET", "/") => {
            return HttpResponse {
                status_code: 200,
                status_text: "OK",
                content_type: "text/html; charset=utf-8",
                body: index_html(),
            }
        }
        ("GET", "/api/health") => api::health_payload(),
        ("GET", "/api/reference") => api::reference_payload(&state.reference),
        ("GET", "/api/resolve") => api::resolve_payload(&state.reference, path),
        ("POST", "/api/ingest") => api::ingest_rows_payload(state, body),
        ("POST", "/api/ingest/csv") => api::ingest_csv_payload(state, body),
        ("GET", "/api/records") => api::records_payload(state, path),
        ("GET", "/api/summary") => api::summary_payload(state, path),
        ("GET", "/api/pivot") => api::pivot_payload(state, path),
        ("GET", "/api/detail") => api::detail_payload(state, path),
        ("GET", "/api/filters") => api::filters_payload(state),
        ("GET", "/api/export.csv") => {
            return match api::export_csv_payload(state, path) {
                Ok(body) => HttpResponse {
                    status_code: 200,
                    status_text: "OK",
                    content_type: "text/csv; charset=utf-8",
                    body,
                },
                Err(err) => api_error_response(&err),
            }
        }
        _ => return error_response(404, "Not Found", "Route not found"),
    };

    match result {
        Ok(payload) => HttpResponse::json(payload),
        Err(err) => api_error_response(&err),
    }
}

fn api_error_response(err: &api::ApiError) -> HttpResponse {
    let (status_code, status_text) = err.status();
    if status_code >= 500 {
        tracing::error!(error = %err, "request failed");
    }
    match err {
        api::ApiError::Ingest(ingest) => HttpResponse {
            status_code,
            status_text,
            content_type: "application/json",
            body: api::ingest_error_body(ingest),
        },
        other => error_response(status_code, status_text, &other.to_string()),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="ru">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Sales Pivot API Console</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 900px; margin: 24px auto; padding: 0 12px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    textarea { width: 100%; min-height: 120px; box-sizing: border-box; }
    button { margin-top: 12px; padding: 8px 14px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 180px; }
  </style>
</head>
<body>
  <h1>Sales Pivot Local API</h1>

  <div class="card">
    <strong>Ingest CSV</strong>
    <textarea id="csv">город,товар,количество,сумма
Москва,Товар A,3,300
Казань,Товар B,2,200</textarea>
    <div><button id="ingest-btn">POST /api/ingest/csv</button></div>
  </div>

  <div class="card">
    <button id="summary-btn">GET /api/summary</button>
    <button id="pivot-btn">GET /api/pivot</button>
    <a href="/api/export.csv">Export CSV</a>
  </div>

  <pre id="output">Ready.</pre>

  <script>
    const output = document.getElementById('output');
    async function request(path, options) {
      output.textContent = 'Loading…';
      const response = await fetch(path, options);
      output.textContent = 'HTTP ' + response.status + '\n' + await response.text();
    }
    document.getElementById('ingest-btn').addEventListener('click', () => {
      request('/api/ingest/csv', { method: 'POST', body: document.getElementById('csv').value });
    });
    document.getElementById('summary-btn').addEventListener('click', () => request('/api/summary'));
    document.getElementById('pivot-btn').addEventListener('click', () => request('/api/pivot'));
  </script>
</body>
</html>
"#
    .to_string()
}
