// Text-in, text-out HTTP on top of `window.fetch`. Everything that goes wrong is a `SyncError`.

use festival_board::SyncError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

use crate::web_document::web_window;


pub async fn get_text(url: &str) -> Result<String, SyncError> {
    request_text("GET", url, None).await
}

pub async fn put_text(url: &str, body: &str) -> Result<String, SyncError> {
    request_text("PUT", url, Some(body)).await
}

async fn request_text(method: &str, url: &str, body: Option<&str>) -> Result<String, SyncError> {
    let init = web_sys::RequestInit::new();
    init.set_method(method);
    if let Some(body) = body {
        init.set_body(&JsValue::from_str(body));
    }
    let window = web_window().map_err(transport_error)?;
    let response = JsFuture::from(window.fetch_with_str_and_init(url, &init))
        .await
        .map_err(transport_error)?;
    let response: web_sys::Response = response.dyn_into().map_err(transport_error)?;
    if !response.ok() {
        return Err(SyncError::HttpStatus(response.status()));
    }
    let text = JsFuture::from(response.text().map_err(transport_error)?)
        .await
        .map_err(transport_error)?;
    text.as_string()
        .ok_or_else(|| SyncError::Json("response body is not text".to_owned()))
}

fn transport_error(err: JsValue) -> SyncError {
    SyncError::Transport(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
