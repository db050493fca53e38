//! Input decoding: BOM handling and transcoding to UTF-8 using chardetng and `encoding_rs`.

use std::borrow::Cow;

use chardetng::EncodingDetector;
use simdutf8::basic::from_utf8;

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// How the input bytes were turned into UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// Already valid UTF-8, no BOM.
    Utf8,
    /// Valid UTF-8 preceded by a byte order mark (stripped).
    Utf8Bom,
    /// Transcoded from the named encoding.
    Transcoded(&'static str),
}

/// UTF-8 bytes ready for the CSV reader, plus where they came from.
#[derive(Debug, Clone)]
pub struct Decoded<'a> {
    pub bytes: Cow<'a, [u8]>,
    pub source: SourceEncoding,
}

/// Check if the given bytes are valid UTF-8.
///
/// Uses SIMD-accelerated validation for performance.
pub fn is_utf8(data: &[u8]) -> bool {
    from_utf8(data).is_ok()
}

/// Skip the UTF-8 BOM if present and return the remaining data.
pub fn skip_bom(data: &[u8]) -> &[u8] {
    data.strip_prefix(&UTF8_BOM[..]).unwrap_or(data)
}

/// Decode raw input into UTF-8.
///
/// UTF-16 is recognised by its BOM (chardetng does not guess it). Anything
/// else that fails UTF-8 validation goes through chardetng, which covers the
/// Windows code pages, ISO-8859 variants and the common CJK encodings.
pub fn decode(data: &[u8]) -> Decoded<'_> {
    if let [0xFF, 0xFE, ..] = data {
        return transcode(encoding_rs::UTF_16LE, data);
    }
    if let [0xFE, 0xFF, ..] = data {
        return transcode(encoding_rs::UTF_16BE, data);
    }

    let stripped = skip_bom(data);
    if is_utf8(stripped) {
        let source = if stripped.len() == data.len() {
            SourceEncoding::Utf8
        } else {
            SourceEncoding::Utf8Bom
        };
        return Decoded {
            bytes: Cow::Borrowed(stripped),
            source,
        };
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let encoding = detector.guess(None, true);

    if encoding == encoding_rs::UTF_8 {
        // Mostly UTF-8 with a few bad bytes: let the lossy decoder replace them.
        let text = String::from_utf8_lossy(stripped).into_owned();
        return Decoded {
            bytes: Cow::Owned(text.into_bytes()),
            source: SourceEncoding::Utf8,
        };
    }

    transcode(encoding, data)
}

fn transcode(encoding: &'static encoding_rs::Encoding, data: &[u8]) -> Decoded<'static> {
    // `decode` sniffs and removes any BOM itself.
    let (text, _, _) = encoding.decode(data);
    Decoded {
        bytes: Cow::Owned(text.into_owned().into_bytes()),
        source: SourceEncoding::Transcoded(encoding.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_utf8() {
        assert!(is_utf8(b"Hello, World!"));
        assert!(is_utf8("こんにちは".as_bytes()));
        assert!(!is_utf8(&[0x80, 0x81, 0x82]));
    }

    #[test]
    fn test_plain_utf8_is_borrowed() {
        let decoded = decode(b"a,b\n1,2\n");
        assert_eq!(decoded.source, SourceEncoding::Utf8);
        assert!(matches!(decoded.bytes, Cow::Borrowed(_)));
        assert_eq!(&decoded.bytes[..], b"a,b\n1,2\n");
    }

    #[test]
    fn test_bom_is_stripped() {
        let data = [0xEF, 0xBB, 0xBF, b'i', b'd'];
        let decoded = decode(&data);
        assert_eq!(decoded.source, SourceEncoding::Utf8Bom);
        assert_eq!(&decoded.bytes[..], b"id");
    }

    #[test]
    fn test_utf16_le() {
        let data: &[u8] = &[0xFF, 0xFE, b'H', 0x00, b'i', 0x00];
        let decoded = decode(data);
        assert_eq!(decoded.source, SourceEncoding::Transcoded("UTF-16LE"));
        assert_eq!(&decoded.bytes[..], b"Hi");
    }

    #[test]
    fn test_windows1251_is_transcoded() {
        // "Привет" in Windows-1251
        let data: &[u8] = &[0xCF, 0xF0, 0xE8, 0xE2, 0xE5, 0xF2];
        let decoded = decode(data);
        assert!(matches!(decoded.source, SourceEncoding::Transcoded(_)));
        assert!(is_utf8(&decoded.bytes));
    }
}
