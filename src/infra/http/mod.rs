mod admin;
mod middleware;
mod public;

pub use public::{HttpState, build_router};

use axum::http::{HeaderValue, header::CACHE_CONTROL};
use axum::response::Response;

fn set_no_store(response: &mut Response) {
    let value = HeaderValue::from_static("no-store");
    response.headers_mut().insert(CACHE_CONTROL, value);
}
