use js_sys::{Array, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

use crate::dom::create_element;

/// Hands a byte payload to the user as a file
pub trait FileSaver {
    fn save(&self, filename: &str, bytes: &[u8], mime: &str) -> Result<(), String>;
}

/// Blob + object URL + temporary `<a download>` click
#[derive(Clone, Default)]
pub struct BrowserFileSaver;

impl BrowserFileSaver {
    fn trigger(&self, filename: &str, bytes: &[u8], mime: &str) -> Result<(), JsValue> {
        let array = Uint8Array::from(bytes);
        let parts = Array::of1(&array.buffer());
        let options = BlobPropertyBag::new();
        options.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)?;

        let url = Url::create_object_url_with_blob(&blob)?;
        let anchor: HtmlAnchorElement = create_element("a")?.dyn_into()?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.click();
        Url::revoke_object_url(&url)?;
        Ok(())
    }
}

impl FileSaver for BrowserFileSaver {
    fn save(&self, filename: &str, bytes: &[u8], mime: &str) -> Result<(), String> {
        log::info!("💾 [DOWNLOAD] Saving {} ({} bytes)", filename, bytes.len());
        self.trigger(filename, bytes, mime)
            .map_err(|e| format!("Download failed: {:?}", e))
    }
}

/// Mime type guessed from the file extension
pub fn mime_for(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "md" || ext == "markdown" => "text/markdown",
        Some(ext) if ext == "csv" => "text/csv",
        Some(ext) if ext == "json" => "application/json",
        Some(ext) if ext == "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
