use std::path::Path;

// Split a `data:<mime>;base64,<payload>` URI into its MIME type and base64
// payload. Bare base64 input is assumed to be a JPEG.
pub fn split_data_uri(payload: &str) -> (String, String) {
    if let Some(rest) = payload.strip_prefix("data:") {
        if let Some((header, data)) = rest.split_once(',') {
            let mime = header.strip_suffix(";base64").unwrap_or(header);
            if !mime.is_empty() {
                return (mime.to_string(), data.to_string());
            }
            return ("image/jpeg".to_string(), data.to_string());
        }
    }
    ("image/jpeg".to_string(), payload.to_string())
}

// Build the data URI used to carry generated images back to the caller.
pub fn compose_data_uri(mime_type: &str, data: &str) -> String {
    format!("data:{};base64,{}", mime_type, data)
}

// Guess the MIME type of an upload from its file extension. Unknown
// extensions fall back to JPEG to match the endpoint's bare-base64 default.
pub fn mime_from_extension(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "image/jpeg",
    }
}
