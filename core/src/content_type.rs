//! MIME content types.
//!
//! # Design
//! A `ContentType` is an immutable `type/subtype` pair. The well-known types
//! are associated constants so they cost nothing until used; `custom` covers
//! everything else. The same table backs `lookup`, which lets configuration
//! name a content type by its constant name (`"JSON"`, `"PDF"`, ...).
//!
//! No validation is performed on either half or on the charset passed to
//! `value_encoded`.

use std::borrow::Cow;
use std::fmt;

const APPLICATION_TYPE: &str = "application";
const AUDIO_TYPE: &str = "audio";
const IMAGE_TYPE: &str = "image";
const TEXT_TYPE: &str = "text";
const VIDEO_TYPE: &str = "video";
const WILDCARD: &str = "*";

/// A MIME `type/subtype` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentType {
    type_: Cow<'static, str>,
    subtype: Cow<'static, str>,
}

impl ContentType {
    const fn from_static(type_: &'static str, subtype: &'static str) -> Self {
        Self {
            type_: Cow::Borrowed(type_),
            subtype: Cow::Borrowed(subtype),
        }
    }

    /// Any pair not covered by the constants, e.g. `custom("foo", "bar")`.
    pub fn custom(type_: impl Into<String>, subtype: impl Into<String>) -> Self {
        Self {
            type_: Cow::Owned(type_.into()),
            subtype: Cow::Owned(subtype.into()),
        }
    }

    pub fn type_(&self) -> &str {
        &self.type_
    }

    pub fn subtype(&self) -> &str {
        &self.subtype
    }

    /// `"type/subtype"`, suitable for a `Content-Type` header.
    pub fn value(&self) -> String {
        format!("{}/{}", self.type_, self.subtype)
    }

    /// `"type/subtype; charset:ENCODING"`.
    pub fn value_encoded(&self, encoding: &str) -> String {
        format!("{}; charset:{encoding}", self.value())
    }

    /// Resolve a constant by its name, e.g. `lookup("OCTET_STREAM")`.
    pub fn lookup(name: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, t, s)| Self::from_static(*t, *s))
    }

    /// Every named constant, in table order.
    pub fn registry() -> impl Iterator<Item = (&'static str, ContentType)> {
        REGISTRY
            .iter()
            .map(|(n, t, s)| (*n, Self::from_static(*t, *s)))
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.type_, self.subtype)
    }
}

impl From<ContentType> for String {
    fn from(content_type: ContentType) -> Self {
        content_type.value()
    }
}

impl From<&ContentType> for String {
    fn from(content_type: &ContentType) -> Self {
        content_type.value()
    }
}

macro_rules! content_types {
    ($($name:ident => ($type_:expr, $subtype:expr),)+) => {
        impl ContentType {
            $(pub const $name: ContentType = ContentType::from_static($type_, $subtype);)+
        }

        const REGISTRY: &[(&str, &str, &str)] = &[
            $((stringify!($name), $type_, $subtype),)+
        ];
    };
}

content_types! {
    ANY_TYPE => (WILDCARD, WILDCARD),
    ANY_TEXT_TYPE => (TEXT_TYPE, WILDCARD),
    ANY_IMAGE_TYPE => (IMAGE_TYPE, WILDCARD),
    ANY_AUDIO_TYPE => (AUDIO_TYPE, WILDCARD),
    ANY_VIDEO_TYPE => (VIDEO_TYPE, WILDCARD),
    ANY_APPLICATION_TYPE => (APPLICATION_TYPE, WILDCARD),
    CACHE_MANIFEST => (TEXT_TYPE, "cache-manifest"),
    CSS => (TEXT_TYPE, "css"),
    CSV => (TEXT_TYPE, "csv"),
    HTML => (TEXT_TYPE, "html"),
    I_CALENDAR => (TEXT_TYPE, "calendar"),
    PLAIN_TEXT => (TEXT_TYPE, "plain"),
    TEXT_JAVASCRIPT => (TEXT_TYPE, "javascript"),
    TSV => (TEXT_TYPE, "tab-separated-values"),
    VCARD => (TEXT_TYPE, "vcard"),
    WML => (TEXT_TYPE, "vnd.wap.wml"),
    XML => (TEXT_TYPE, "xml"),
    BMP => (IMAGE_TYPE, "bmp"),
    CRW => (IMAGE_TYPE, "x-canon-crw"),
    GIF => (IMAGE_TYPE, "gif"),
    ICO => (IMAGE_TYPE, "vnd.microsoft.icon"),
    JPEG => (IMAGE_TYPE, "jpeg"),
    PNG => (IMAGE_TYPE, "png"),
    PSD => (IMAGE_TYPE, "vnd.adobe.photoshop"),
    SVG => (IMAGE_TYPE, "svg+xml"),
    TIFF => (IMAGE_TYPE, "tiff"),
    WEBP => (IMAGE_TYPE, "webp"),
    MP4_AUDIO => (AUDIO_TYPE, "mp4"),
    MPEG_AUDIO => (AUDIO_TYPE, "mpeg"),
    OGG_AUDIO => (AUDIO_TYPE, "ogg"),
    WEBM_AUDIO => (AUDIO_TYPE, "webm"),
    MP4_VIDEO => (VIDEO_TYPE, "mp4"),
    MPEG_VIDEO => (VIDEO_TYPE, "mpeg"),
    OGG_VIDEO => (VIDEO_TYPE, "ogg"),
    QUICKTIME => (VIDEO_TYPE, "quicktime"),
    WEBM_VIDEO => (VIDEO_TYPE, "webm"),
    WMV => (VIDEO_TYPE, "x-ms-wmv"),
    APPLICATION_XML => (APPLICATION_TYPE, "xml"),
    ATOM => (APPLICATION_TYPE, "atom+xml"),
    BZIP2 => (APPLICATION_TYPE, "x-bzip2"),
    DART => (APPLICATION_TYPE, "dart"),
    APPLE_PASSBOOK => (APPLICATION_TYPE, "vnd.apple.pkpass"),
    EOT => (APPLICATION_TYPE, "vnd.ms-fontobject"),
    EPUB => (APPLICATION_TYPE, "epub+zip"),
    FORM_DATA => (APPLICATION_TYPE, "x-www-form-urlencoded"),
    KEY_ARCHIVE => (APPLICATION_TYPE, "pkcs12"),
    APPLICATION_BINARY => (APPLICATION_TYPE, "binary"),
    GZIP => (APPLICATION_TYPE, "x-gzip"),
    JAVASCRIPT => (APPLICATION_TYPE, "javascript"),
    JSON => (APPLICATION_TYPE, "json"),
    MANIFEST_JSON => (APPLICATION_TYPE, "manifest+json"),
    KML => (APPLICATION_TYPE, "vnd.google-earth.kml+xml"),
    KMZ => (APPLICATION_TYPE, "vnd.google-earth.kmz"),
    MBOX => (APPLICATION_TYPE, "mbox"),
    APPLE_MOBILE_CONFIG => (APPLICATION_TYPE, "x-apple-aspen-config"),
    MICROSOFT_EXCEL => (APPLICATION_TYPE, "vnd.ms-excel"),
    MICROSOFT_POWERPOINT => (APPLICATION_TYPE, "vnd.ms-powerpoint"),
    MICROSOFT_WORD => (APPLICATION_TYPE, "msword"),
    OCTET_STREAM => (APPLICATION_TYPE, "octet-stream"),
    OGG_CONTAINER => (APPLICATION_TYPE, "ogg"),
    OOXML_DOCUMENT => (APPLICATION_TYPE, "vnd.openxmlformats-officedocument.wordprocessingml.document"),
    OOXML_PRESENTATION => (APPLICATION_TYPE, "vnd.openxmlformats-officedocument.presentationml.presentation"),
    OOXML_SHEET => (APPLICATION_TYPE, "vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
    OPENDOCUMENT_GRAPHICS => (APPLICATION_TYPE, "vnd.oasis.opendocument.graphics"),
    OPENDOCUMENT_PRESENTATION => (APPLICATION_TYPE, "vnd.oasis.opendocument.presentation"),
    OPENDOCUMENT_SPREADSHEET => (APPLICATION_TYPE, "vnd.oasis.opendocument.spreadsheet"),
    OPENDOCUMENT_TEXT => (APPLICATION_TYPE, "vnd.oasis.opendocument.text"),
    PDF => (APPLICATION_TYPE, "pdf"),
    POSTSCRIPT => (APPLICATION_TYPE, "postscript"),
    PROTOBUF => (APPLICATION_TYPE, "protobuf"),
    RDF_XML => (APPLICATION_TYPE, "rdf+xml"),
    RTF => (APPLICATION_TYPE, "rtf"),
    SFNT => (APPLICATION_TYPE, "font-sfnt"),
    SHOCKWAVE_FLASH => (APPLICATION_TYPE, "x-shockwave-flash"),
    SKETCHUP => (APPLICATION_TYPE, "vnd.sketchup.skp"),
    TAR => (APPLICATION_TYPE, "x-tar"),
    WOFF => (APPLICATION_TYPE, "font-woff"),
    XHTML => (APPLICATION_TYPE, "xhtml+xml"),
    XRD => (APPLICATION_TYPE, "xrd+xml"),
    ZIP => (APPLICATION_TYPE, "zip"),
}
