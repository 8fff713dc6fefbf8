//! Escaping of entity values before they are turned into link markup.
//!
//! [`describe_entity`](super::summary::describe_entity) concatenates display
//! names and profile paths into `<a>`/`<span>` markup as they are.
//! [`describe_sanitized_entity`](super::summary::describe_sanitized_entity)
//! escapes them with a [`Sanitizer`] first.

use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

/// Bytes that cannot appear as they are in a link: controls, whitespace and
/// anything that ends a quoted attribute or opens markup. Path and query
/// delimiters are kept so a URL still points where it did.
const URL_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'\\')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'^');

pub trait Sanitizer {
    /// Escape text placed between tags.
    fn encode_for_html(&self, value: &str) -> String;
    /// Escape text placed inside a quoted attribute, such as `href`.
    fn encode_for_html_attribute(&self, value: &str) -> String;
    /// Percent-encode a URL or path so it stays a usable URL.
    fn encode_for_url(&self, value: &str) -> String;
}

/// Escapes markup with `ammonia::clean_text`, which makes a value safe both
/// as text and as a quoted attribute, and URLs with `percent_encoding`.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmmoniaSanitizer;

impl Sanitizer for AmmoniaSanitizer {
    fn encode_for_html(&self, value: &str) -> String {
        ammonia::clean_text(value)
    }
    fn encode_for_html_attribute(&self, value: &str) -> String {
        ammonia::clean_text(value)
    }
    fn encode_for_url(&self, value: &str) -> String {
        utf8_percent_encode(value, URL_ENCODE_SET).to_string()
    }
}
