use crate::compat::{Cow, String};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Parameter component encode set.
/// Everything except ASCII alphanumerics and `-`, `_`, `.` is encoded;
/// space is handled separately and becomes `+`.
pub const COMPONENT_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// Page name encode set.
/// Like `COMPONENT_SET` but keeps `/` so nested pages stay readable.
pub const PAGE_SET: &AsciiSet = &COMPONENT_SET.remove(b'/');

/// Write an encoded parameter component into `buffer` (space becomes `+`)
pub fn encode_component_into(buffer: &mut String, input: &str) {
    buffer.reserve(input.len());

    for (i, part) in input.split(' ').enumerate() {
        if i > 0 {
            buffer.push('+');
        }
        for chunk in utf8_percent_encode(part, COMPONENT_SET) {
            buffer.push_str(chunk);
        }
    }
}

/// Encode a parameter component (`a b&c` -> `a+b%26c`)
pub fn encode_component(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    encode_component_into(&mut result, input);
    result
}

/// Write an encoded page name into `buffer`
pub fn encode_page_into(buffer: &mut String, input: &str) {
    for chunk in utf8_percent_encode(input, PAGE_SET) {
        buffer.push_str(chunk);
    }
}

/// Decode a parameter component. `+` is a space; invalid escapes pass
/// through untouched and invalid UTF-8 is replaced.
pub fn decode_component(input: &str) -> Cow<'_, str> {
    if !input.bytes().any(|b| b == b'+' || b == b'%') {
        return Cow::Borrowed(input);
    }

    let spaced: Cow<'_, str> = if input.contains('+') {
        Cow::Owned(input.replace('+', " "))
    } else {
        Cow::Borrowed(input)
    };

    let decoded = percent_encoding::percent_decode_str(&spaced).decode_utf8_lossy();
    Cow::Owned(decoded.into_owned())
}
