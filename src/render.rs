//! JSON response rendering.
//!
//! Output is two-space indented, keeps object keys in the order the server
//! sent them, leaves `<`, `>` and `&` unescaped, and ends with a newline.
//! Numbers are written back with the digits the server sent.

use std::io::Write;

use serde_json::Value;

use crate::error::{Error, Result};

/// Decodes a response body. An empty (or whitespace-only) body is `None`.
pub fn decode(body: &[u8]) -> Result<Option<Value>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }

    Ok(Some(serde_json::from_slice(body)?))
}

pub fn write_json<W: Write>(writer: &mut W, value: &Value) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value).map_err(|e| {
        if e.is_io() {
            Error::Output(e.into())
        } else {
            Error::Decode(e)
        }
    })?;
    writeln!(writer).map_err(Error::Output)
}

/// Decodes `body` and writes it to `writer`. Nothing is written for an empty body.
pub fn render<W: Write>(writer: &mut W, body: &[u8]) -> Result<()> {
    match decode(body)? {
        Some(value) => write_json(writer, &value),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn render_str(body: &str) -> String {
        let mut out = Vec::new();
        render(&mut out, body.as_bytes()).expect("render");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn pretty_prints_with_two_spaces() {
        let out = render_str(r#"{"a":1,"b":[true,null,"x"]}"#);
        assert_eq!(
            out,
            "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null,\n    \"x\"\n  ]\n}\n"
        );
    }

    #[test]
    fn keeps_key_order() {
        let out = render_str(r#"{"z":1,"a":2,"m":3}"#);
        assert_eq!(out, "{\n  \"z\": 1,\n  \"a\": 2,\n  \"m\": 3\n}\n");
    }

    #[test]
    fn html_characters_are_not_escaped() {
        let out = render_str(r#"{"html":"<a href=\"/x?a=1&b=2\">link</a>"}"#);
        assert!(out.contains(r#""<a href=\"/x?a=1&b=2\">link</a>""#), "{out}");
    }

    #[test]
    fn empty_body_renders_nothing() {
        assert_eq!(render_str(""), "");
        assert_eq!(render_str("  \n"), "");
    }

    #[test]
    fn scalar_bodies_render() {
        assert_eq!(render_str("null"), "null\n");
        assert_eq!(render_str("\"hi\""), "\"hi\"\n");
        assert_eq!(render_str("42"), "42\n");
    }

    #[test]
    fn numbers_keep_their_precision() {
        let out = render_str(
            r#"{"id":123456789012345678901234,"pi":3.141592653589793238462643383279,"n":1.50}"#,
        );
        assert_eq!(
            out,
            "{\n  \"id\": 123456789012345678901234,\n  \"pi\": 3.141592653589793238462643383279,\n  \"n\": 1.50\n}\n"
        );
    }

    #[test]
    fn non_json_body_is_a_protocol_error() {
        let mut out = Vec::new();
        let err = render(&mut out, b"<html>oops</html>").expect_err("not json");
        assert_eq!(err.kind(), ErrorKind::Protocol);
        assert!(out.is_empty());
    }
}
