//! Request dispatch module
//!
//! Entry point for HTTP request processing: resolves the path in the
//! route table and builds the matching fixed response.

use crate::config::AppState;
use crate::logger;
use crate::response;
use crate::routes::Route;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Main entry point for HTTP request handling.
///
/// The method is deliberately ignored: POST `/api/hello` answers the
/// same as GET, and unknown paths get the welcome page rather than 404.
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let access_log = state.config.logging.access_log;
    if access_log {
        logger::log_request(req.method(), req.uri(), req.version());
    }

    Ok(dispatch(req.uri().path(), &state, access_log))
}

/// Map a request path to its response. Pure except for the timestamp
/// in the API payload.
fn dispatch(path: &str, state: &AppState, access_log: bool) -> Response<Full<Bytes>> {
    match state.routes.resolve(path) {
        Route::ApiHello => {
            let json = response::hello_json();
            if access_log {
                logger::log_response(json.len());
            }
            response::build_json_response(json)
        }
        Route::Welcome => {
            let html = response::WELCOME_PAGE;
            if access_log {
                logger::log_response(html.len());
            }
            response::build_html_response(html)
        }
    }
}
