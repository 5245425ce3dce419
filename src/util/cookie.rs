//! `document.cookie` parsing.
//!
//! The server writes cookies with Python's `SimpleCookie` rules: values with
//! characters outside its legal set are wrapped in double quotes, with `"`
//! and `\` backslash-escaped and non-ASCII bytes written as `\ooo` octal.

#[cfg(test)]
#[path = "cookie_test.rs"]
mod cookie_test;

/// Look up `name` in a `document.cookie` style header and decode its value.
#[must_use]
pub fn cookie_value(header: &str, name: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| key.trim() == name)
        .map(|(_, value)| unquote(value.trim()))
}

/// Read the browser's cookie string.
#[must_use]
pub fn document_cookies() -> Option<String> {
    #[cfg(feature = "csr")]
    {
        use wasm_bindgen::JsCast;

        let document = web_sys::window()?.document()?;
        document.dyn_into::<web_sys::HtmlDocument>().ok()?.cookie().ok()
    }
    #[cfg(not(feature = "csr"))]
    {
        None
    }
}

fn unquote(value: &str) -> String {
    let Some(inner) = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
    else {
        return value.to_owned();
    };

    let bytes = inner.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 1 < bytes.len() {
            if let Some(byte) = octal_byte(&bytes[i + 1..]) {
                out.push(byte);
                i += 4;
            } else {
                out.push(bytes[i + 1]);
                i += 2;
            }
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn octal_byte(digits: &[u8]) -> Option<u8> {
    let digits = digits.get(..3)?;
    if !digits.iter().all(|d| (b'0'..=b'7').contains(d)) {
        return None;
    }
    let value = digits
        .iter()
        .fold(0u16, |acc, d| acc * 8 + u16::from(d - b'0'));
    u8::try_from(value).ok()
}
