//! Saving downloaded binaries through a temporary object URL.

use devicehub_domain::firmware::FirmwareBinary;
use gloo_timers::future::TimeoutFuture;
use js_sys::{Array, Uint8Array};
use leptos::task::spawn_local;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Hand `binary` to the browser as a file download.
pub fn save_binary(binary: &FirmwareBinary) -> Result<(), JsValue> {
    let parts = Array::of1(&Uint8Array::from(binary.bytes.as_slice()));
    let options = BlobPropertyBag::new();
    options.set_type("application/octet-stream");
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&binary.file_name);
    anchor.click();

    // the download starts asynchronously; keep the URL alive until then
    spawn_local(async move {
        TimeoutFuture::new(0).await;
        if let Err(err) = Url::revoke_object_url(&url) {
            tracing::warn!(error = ?err, "failed to revoke object url");
        }
    });
    Ok(())
}
