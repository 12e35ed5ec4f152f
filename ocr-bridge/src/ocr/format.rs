use base64::{engine::general_purpose::STANDARD, Engine};

/// Tag reported when the header cannot be classified.
pub const DEFAULT_FORMAT: &str = "png";

/// Number of base64 characters decoded for sniffing. Magic bytes live in the
/// first few bytes, so the rest of the payload is never decoded here.
const HEADER_PREFIX_CHARS: usize = 8192;

/// Result of sniffing an image header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatGuess {
    pub format: String,
    /// True when the header could not be classified and [`DEFAULT_FORMAT`] was used.
    pub defaulted: bool,
}

impl FormatGuess {
    fn detected(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
            defaulted: false,
        }
    }

    fn fallback() -> Self {
        Self {
            format: DEFAULT_FORMAT.to_string(),
            defaulted: true,
        }
    }
}

/// Best-effort format tag for a base64 image (`"jpg"`, `"png"`, `"gif"`, ...).
///
/// Never fails; anything unrecognizable is reported as `"png"`.
pub fn detect_image_format(image_base64: &str) -> String {
    guess_format(image_base64).format
}

/// Like [`detect_image_format`] but also reports whether the fallback was used.
pub fn guess_format(image_base64: &str) -> FormatGuess {
    let payload = strip_data_uri(image_base64);

    let header = match decode_header(payload) {
        Some(bytes) => bytes,
        None => return FormatGuess::fallback(),
    };

    match classify(&header) {
        Some(format) => FormatGuess::detected(format),
        None => FormatGuess::fallback(),
    }
}

/// Drops a `data:<mime>;base64,` prefix if there is one.
fn strip_data_uri(input: &str) -> &str {
    match input.split_once(',') {
        Some((header, data)) if header.starts_with("data:") => data,
        _ => input,
    }
}

fn decode_header(payload: &str) -> Option<Vec<u8>> {
    let mut prefix: String = payload
        .chars()
        .take(HEADER_PREFIX_CHARS)
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    // A truncated prefix must still end on a quantum boundary.
    prefix.truncate(prefix.len() / 4 * 4);
    if prefix.is_empty() {
        return None;
    }

    STANDARD.decode(prefix.as_bytes()).ok()
}

fn classify(header: &[u8]) -> Option<String> {
    let kind = infer::get(header)
        .filter(|kind| kind.matcher_type() == infer::MatcherType::Image)?;

    let tag = match kind.extension() {
        "jpeg" => "jpg",
        "tif" => "tiff",
        other => other,
    };
    Some(tag.to_string())
}
