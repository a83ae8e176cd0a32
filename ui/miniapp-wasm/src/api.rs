//! Browser `fetch` transport for the backend client.
//!
//! `base_url()` reads `<meta name="tma-api-base">`, falling back to the
//! deployed backend.

use crate::dom;
use async_trait::async_trait;
use tma_client::{ApiRequest, ApiResponse, ClientConfig, HttpTransport, TransportError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response, Url};

const BASE_URL_META: &str = "meta[name=\"tma-api-base\"]";

pub fn base_url() -> Option<String> {
    dom::query(BASE_URL_META)?
        .get_attribute("content")
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

pub fn client_config() -> ClientConfig {
    match base_url() {
        Some(url) => ClientConfig::new(url),
        None => ClientConfig::default(),
    }
}

fn js_message(err: &JsValue) -> String {
    if let Some(err) = err.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn dispatch(err: JsValue) -> TransportError {
    TransportError::Dispatch(js_message(&err))
}

fn no_response(err: JsValue) -> TransportError {
    TransportError::NoResponse(js_message(&err))
}

fn request_url(request: &ApiRequest) -> Result<String, JsValue> {
    if request.query.is_empty() {
        return Ok(request.url.clone());
    }
    let url = Url::new(&request.url)?;
    let params = url.search_params();
    for (key, value) in &request.query {
        params.append(key, value);
    }
    Ok(url.href())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FetchTransport;

impl FetchTransport {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait(?Send)]
impl HttpTransport for FetchTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let window = gloo_utils::window();
        if !window.navigator().on_line() {
            return Err(TransportError::Offline);
        }

        let url = request_url(&request).map_err(dispatch)?;
        let opts = RequestInit::new();
        opts.set_method(request.method.as_str());
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new().map_err(dispatch)?;
        for (name, value) in &request.headers {
            headers.set(name, value).map_err(dispatch)?;
        }
        opts.set_headers(&headers);
        if let Some(body) = &request.body {
            opts.set_body(&JsValue::from_str(body));
        }

        let js_request = Request::new_with_str_and_init(&url, &opts).map_err(dispatch)?;
        let resp_value = JsFuture::from(window.fetch_with_request(&js_request))
            .await
            .map_err(no_response)?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| TransportError::NoResponse("response is not a Response".to_string()))?;

        let text = JsFuture::from(resp.text().map_err(no_response)?)
            .await
            .map_err(no_response)?;

        Ok(ApiResponse {
            status: resp.status(),
            status_text: resp.status_text(),
            body: text.as_string().unwrap_or_default(),
        })
    }
}

/// Write a result (JSON or error) into a `<pre>` element.
pub fn set_result(el: &web_sys::Element, value: &serde_json::Value) {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
    dom::remove_class(el, "error");
    el.set_text_content(Some(&pretty));
}

/// Write an error string into a `<pre>` element.
pub fn set_result_error(el: &web_sys::Element, msg: &str) {
    dom::add_class(el, "error");
    el.set_text_content(Some(msg));
}
