//! `data:<mime>;base64,<payload>` encoding and parsing.
//!
//! The uploaded file arrives in this form, and the parser splits it at the
//! first `:`, `;` and `,` only. Any other delimiter scheme is rejected.

use crate::error::{Result, SilkStudioError};
use crate::image::types::EncodedImage;
use base64::Engine;

/// Builds a data URI from a MIME type and raw bytes.
pub fn encode(mime_type: &str, data: &[u8]) -> String {
    format!(
        "data:{};base64,{}",
        mime_type,
        base64::engine::general_purpose::STANDARD.encode(data)
    )
}

/// Splits a data URI into its MIME type and base64 payload without decoding.
pub fn split(uri: &str) -> Result<(&str, &str)> {
    let colon = uri
        .find(':')
        .ok_or_else(|| SilkStudioError::Decode("data URI is missing ':'".into()))?;
    let semicolon = uri
        .find(';')
        .ok_or_else(|| SilkStudioError::Decode("data URI is missing ';'".into()))?;
    let comma = uri
        .find(',')
        .ok_or_else(|| SilkStudioError::Decode("data URI is missing ','".into()))?;

    if semicolon < colon || comma < semicolon {
        return Err(SilkStudioError::Decode(
            "data URI delimiters out of order".into(),
        ));
    }

    let mime_type = &uri[colon + 1..semicolon];
    if mime_type.is_empty() {
        return Err(SilkStudioError::Decode("data URI has empty MIME type".into()));
    }

    Ok((mime_type, &uri[comma + 1..]))
}

/// Parses a data URI into an [`EncodedImage`], validating the payload.
pub fn parse(uri: &str) -> Result<EncodedImage> {
    let (mime_type, payload) = split(uri)?;
    EncodedImage::from_base64(mime_type, payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode() {
        assert_eq!(encode("image/png", &[1, 2, 3]), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_split_extracts_mime_and_payload() {
        let (mime, payload) = split("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        assert_eq!(mime, "image/jpeg");
        assert_eq!(payload, "/9j/4AAQ");
    }

    #[test]
    fn test_parse_reproduces_bytes() {
        let bytes: Vec<u8> = (0..=255).collect();
        let image = parse(&encode("image/webp", &bytes)).unwrap();
        assert_eq!(image.mime_type(), "image/webp");
        assert_eq!(image.data(), bytes.as_slice());
    }

    #[test]
    fn test_parse_rejects_missing_delimiters() {
        assert!(parse("image/png;base64,AQID").is_err());
        assert!(parse("data:image/png,AQID").is_err());
        assert!(parse("data:image/png;base64").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_mime() {
        let err = parse("data:;base64,AQID").unwrap_err();
        assert!(matches!(err, SilkStudioError::Decode(_)));
    }

    #[test]
    fn test_parse_rejects_bad_payload() {
        assert!(parse("data:image/png;base64,@@@").is_err());
    }
}
