//! Reading user-selected files.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use contracts::domain::common::ImageSource;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Event, File, HtmlInputElement};

/// First file chosen in an `<input type="file">` change event
pub fn selected_file(ev: &Event) -> Option<File> {
    ev.target()
        .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
        .and_then(|input| input.files())
        .and_then(|files| files.get(0))
}

/// Clear the input so picking the same file again fires `change`
pub fn reset_input(ev: &Event) {
    if let Some(input) = ev.target().and_then(|t| t.dyn_into::<HtmlInputElement>().ok()) {
        input.set_value("");
    }
}

pub async fn read_text(file: &File) -> Result<String, String> {
    let value = JsFuture::from(file.text())
        .await
        .map_err(|e| format!("ファイルを読み込めません: {:?}", e))?;
    value
        .as_string()
        .ok_or_else(|| "ファイルをテキストとして読み込めません".to_string())
}

/// File contents as a `data:` URI suitable for an image field
pub async fn read_data_uri(file: &File) -> Result<String, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("ファイルを読み込めません: {:?}", e))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(encode_data_uri(&file.type_(), &bytes))
}

pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    ImageSource::inline(mime, &STANDARD.encode(bytes)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_data_uri() {
        assert_eq!(encode_data_uri("image/png", b"abc"), "data:image/png;base64,YWJj");
        assert_eq!(
            encode_data_uri("", &[0xff]),
            "data:application/octet-stream;base64,/w=="
        );
    }
}
