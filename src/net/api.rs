//! Contact form submission.
//!
//! Client-side (hydrate): a `POST` through `gloo-net` with a `FormData`
//! body. Elsewhere the call fails immediately; there is no server to reach.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures map to [`FolioError::Network`] and non-2xx replies to
//! [`FolioError::Status`]. The runtime turns either into the failure notice.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::error::FolioError;

/// Shown after the endpoint accepts the message.
pub const SUCCESS_NOTICE: &str = "Thank you for your message! I will get back to you soon.";
/// Shown for any transport or status failure.
pub const FAILURE_NOTICE: &str = "Sorry, there was a problem sending your message. Please try again later.";

/// Notice text for a finished submission.
#[must_use]
pub fn notice_for(result: &Result<(), FolioError>) -> &'static str {
    if result.is_ok() { SUCCESS_NOTICE } else { FAILURE_NOTICE }
}

#[cfg(any(test, feature = "hydrate"))]
fn check_status(status: u16) -> Result<(), FolioError> {
    if (200..300).contains(&status) { Ok(()) } else { Err(FolioError::Status { status }) }
}

/// Post `fields` to `endpoint` as multipart form data.
///
/// # Errors
///
/// Returns [`FolioError::Network`] if the request could not be sent and
/// [`FolioError::Status`] if the endpoint answered with a non-2xx status.
pub async fn submit_form(endpoint: &str, fields: &[(String, String)]) -> Result<(), FolioError> {
    #[cfg(feature = "hydrate")]
    {
        let body = web_sys::FormData::new()?;
        for (name, value) in fields {
            body.append_with_str(name, value)?;
        }
        post_form_data(endpoint, body).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = fields;
        Err(FolioError::Network(format!("cannot reach {endpoint} outside the browser")))
    }
}

/// Snapshot of `form` as the browser would submit it: selects, checked
/// boxes only, no disabled controls, file inputs included.
///
/// # Errors
///
/// Returns [`FolioError::Js`] if `form` is not a `<form>` element or the
/// browser refuses to build the data set.
#[cfg(feature = "hydrate")]
pub fn form_data(form: &web_sys::Element) -> Result<web_sys::FormData, FolioError> {
    use wasm_bindgen::JsCast;

    let form = form.dyn_ref::<web_sys::HtmlFormElement>().ok_or_else(|| FolioError::Js("not a form".into()))?;
    Ok(web_sys::FormData::new_with_form(form)?)
}

/// Post an already built `FormData` body to `endpoint`.
///
/// # Errors
///
/// Same as [`submit_form`].
#[cfg(feature = "hydrate")]
pub async fn post_form_data(endpoint: &str, body: web_sys::FormData) -> Result<(), FolioError> {
    let resp = gloo_net::http::Request::post(endpoint)
        .header("Accept", "application/json")
        .body(body)
        .map_err(|e| FolioError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| FolioError::Network(e.to_string()))?;
    check_status(resp.status())
}
