//! Browser side effects that are not catalog service calls.

use gloo::utils::{document, window};
use js_sys::Array;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::features::catalog::export::CsvExport;

const CSV_MIME: &str = "text/csv;charset=utf-8";

/// Offer a rendered export as a file download.
pub(crate) fn download(export: &CsvExport) -> Result<(), JsValue> {
    let parts = Array::of1(&JsValue::from_str(&export.contents));
    let options = BlobPropertyBag::new();
    options.set_type(CSV_MIME);
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document().create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(&export.file_name);
    anchor.style().set_property("display", "none")?;
    let body = document()
        .body()
        .ok_or_else(|| JsValue::from_str("document has no body"))?;
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Url::revoke_object_url(&url)
}

/// Write `text` to the clipboard. Returns whether the browser accepted it.
pub(crate) async fn copy_text(text: &str) -> bool {
    let promise = window().navigator().clipboard().write_text(text);
    JsFuture::from(promise).await.is_ok()
}
