use serde::{Deserialize, Serialize};

/// Image reference of a restaurant logo or a menu photo.
///
/// Persisted as a plain string so existing JSON stays readable: `""` for
/// none, an `http(s)` URL, or a `data:` URI for an uploaded file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ImageSource {
    #[default]
    None,
    Url(String),
    Inline(String),
}

impl ImageSource {
    /// Build the stored value from a form: an uploaded file wins over the URL field
    pub fn resolve(url: &str, inline: Option<String>) -> Self {
        match inline {
            Some(data) if !data.trim().is_empty() => ImageSource::Inline(data),
            _ => ImageSource::from(url.to_string()),
        }
    }

    /// Value usable in an `<img src>`
    pub fn src(&self) -> Option<&str> {
        match self {
            ImageSource::None => None,
            ImageSource::Url(s) | ImageSource::Inline(s) => Some(s),
        }
    }

    /// URL text for the edit form; inline data is never echoed into the URL field
    pub fn url_field(&self) -> String {
        match self {
            ImageSource::Url(s) => s.clone(),
            _ => String::new(),
        }
    }

    pub fn is_inline(&self) -> bool {
        matches!(self, ImageSource::Inline(_))
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ImageSource::None)
    }

    /// Build a `data:` URI from a mime type and base64 payload
    pub fn inline(mime: &str, base64_payload: &str) -> Self {
        let mime = if mime.is_empty() { "application/octet-stream" } else { mime };
        ImageSource::Inline(format!("data:{};base64,{}", mime, base64_payload))
    }
}

impl From<String> for ImageSource {
    fn from(value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            ImageSource::None
        } else if trimmed.starts_with("data:") {
            ImageSource::Inline(trimmed.to_string())
        } else {
            ImageSource::Url(trimmed.to_string())
        }
    }
}

impl From<Option<String>> for ImageSource {
    fn from(value: Option<String>) -> Self {
        value.map(ImageSource::from).unwrap_or_default()
    }
}

impl From<ImageSource> for String {
    fn from(value: ImageSource) -> Self {
        match value {
            ImageSource::None => String::new(),
            ImageSource::Url(s) | ImageSource::Inline(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_wins_over_url() {
        let src = ImageSource::resolve("https://example.com/a.png", Some("data:image/png;base64,AAAA".into()));
        assert!(src.is_inline());
        assert_eq!(src.url_field(), "");
    }

    #[test]
    fn test_blank_upload_falls_back_to_url() {
        let src = ImageSource::resolve("https://example.com/a.png", Some(String::new()));
        assert_eq!(src, ImageSource::Url("https://example.com/a.png".into()));
    }

    #[test]
    fn test_parse_from_json_string() {
        let v: ImageSource = serde_json::from_str("\"data:image/jpeg;base64,xx\"").unwrap();
        assert!(v.is_inline());
        let v: ImageSource = serde_json::from_str("\"\"").unwrap();
        assert!(v.is_none());
        let v: ImageSource = serde_json::from_str("null").unwrap();
        assert!(v.is_none());
    }

    #[test]
    fn test_serializes_back_to_plain_string() {
        let json = serde_json::to_string(&ImageSource::Url("https://x/y.png".into())).unwrap();
        assert_eq!(json, "\"https://x/y.png\"");
        assert_eq!(serde_json::to_string(&ImageSource::None).unwrap(), "\"\"");
    }

    #[test]
    fn test_inline_builder_defaults_mime() {
        assert_eq!(
            ImageSource::inline("", "QQ=="),
            ImageSource::Inline("data:application/octet-stream;base64,QQ==".into())
        );
    }
}
