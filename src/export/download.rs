use super::{ExportReceipt, ExportSink, Permission, SinkKind, encode_jpeg};
use crate::capture::CapturedImage;
use crate::error::ExportError;
use crate::util::time::timestamp_millis;

/// Hands the capture to the browser as a JPEG file download. No permission model.
#[derive(Debug, Default)]
pub struct DownloadSink;

impl DownloadSink {
    pub fn new() -> Self {
        Self
    }

    pub fn file_name() -> String {
        format!("sticker-{}.jpeg", timestamp_millis())
    }
}

impl ExportSink for DownloadSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Download
    }

    fn permission(&self) -> Permission {
        Permission::Granted
    }

    fn request_permission(&self) -> Permission {
        Permission::Granted
    }

    fn export(&self, capture: &CapturedImage) -> Result<ExportReceipt, ExportError> {
        let bytes = encode_jpeg(capture)?;
        let file_name = Self::file_name();
        trigger_download(&file_name, &bytes)?;
        log::info!("Downloaded {} ({} bytes)", file_name, bytes.len());
        Ok(ExportReceipt {
            location: file_name,
            bytes_written: bytes.len(),
        })
    }
}

/// How long the object URL stays valid after the download starts
#[cfg(target_arch = "wasm32")]
const REVOKE_DELAY_MS: i32 = 10_000;

#[cfg(target_arch = "wasm32")]
fn trigger_download(file_name: &str, bytes: &[u8]) -> Result<(), ExportError> {
    use eframe::wasm_bindgen::JsCast as _;

    let browser = |err: eframe::wasm_bindgen::JsValue| ExportError::Browser(format!("{err:?}"));

    let window = web_sys::window().ok_or_else(|| ExportError::Browser("no window".to_owned()))?;
    let document = window
        .document()
        .ok_or_else(|| ExportError::Browser("no document".to_owned()))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/jpeg");
    let blob =
        web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(browser)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob).map_err(browser)?;

    let anchor = document
        .create_element("a")
        .map_err(browser)?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| ExportError::Browser("created element is not an anchor".to_owned()))?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    // The browser fetches the blob after `click` returns, so the URL has to outlive this call.
    let revoke = eframe::wasm_bindgen::closure::Closure::once_into_js(move || {
        if let Err(err) = web_sys::Url::revoke_object_url(&url) {
            log::warn!("Failed to revoke download URL: {:?}", err);
        }
    });
    window
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            revoke.unchecked_ref(),
            REVOKE_DELAY_MS,
        )
        .map_err(browser)?;
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn trigger_download(_file_name: &str, _bytes: &[u8]) -> Result<(), ExportError> {
    Err(ExportError::Unsupported("Browser download"))
}
