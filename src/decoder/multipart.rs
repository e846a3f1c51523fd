//! Minimal multipart/form-data reader.
//!
//! Only what the statements response needs: boundary extraction, splitting
//! the body into parts and reading `Content-Disposition` / `Content-Type`
//! from each part's headers.

use regex::Regex;
use std::sync::OnceLock;

const CRLF_CRLF: &[u8] = b"\r\n\r\n";
const LF_LF: &[u8] = b"\n\n";

/// A single part of a multipart body. Fields the part did not declare are
/// `None`; `data` is `None` only when the part has no header/body separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartPart {
    pub name: Option<String>,
    pub filename: Option<String>,
    pub content_type: Option<String>,
    pub data: Option<Vec<u8>>,
}

fn boundary_regex() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| {
        Regex::new(r#"(?i)(?:^|;)\s*boundary\s*=\s*(?:"([^"]+)"|([^;\s]+))"#)
            .expect("static boundary pattern")
    })
}

/// Extract the boundary token from a content-type value such as
/// `multipart/form-data; boundary="XYZ"`.
pub fn get_boundary(content_type: &str) -> Option<String> {
    let caps = boundary_regex().captures(content_type)?;
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| m.as_str().to_owned())
        .filter(|b| !b.is_empty())
}

/// Split `body` into parts delimited by `--boundary`.
///
/// Delimiters are recognised only at the start of a line. Anything before
/// the first delimiter (the preamble) is ignored, as is anything after the
/// closing `--boundary--`. A body that ends without a closing delimiter ends
/// its last part at end of input.
pub fn parse(body: &[u8], boundary: &str) -> Vec<MultipartPart> {
    let delimiter = format!("--{}", boundary).into_bytes();
    let mut parts = Vec::new();

    let Some(mut cursor) = find_delimiter(body, &delimiter, 0) else {
        return parts;
    };

    loop {
        let after = cursor + delimiter.len();
        if body[after..].starts_with(b"--") {
            break;
        }
        let Some(content_start) = skip_line(body, after) else {
            break;
        };

        let next = find_delimiter(body, &delimiter, content_start);
        let content_end = next.unwrap_or(body.len());
        let raw = trim_line_break(&body[content_start..content_end]);
        parts.push(parse_part(raw));

        match next {
            Some(position) => cursor = position,
            None => break,
        }
    }

    parts
}

/// Position of the next delimiter that starts a line, at or after `from`.
fn find_delimiter(body: &[u8], delimiter: &[u8], from: usize) -> Option<usize> {
    let mut start = from;
    while start + delimiter.len() <= body.len() {
        let offset = body[start..]
            .windows(delimiter.len())
            .position(|window| window == delimiter)?;
        let position = start + offset;
        if position == 0 || body[position - 1] == b'\n' {
            return Some(position);
        }
        start = position + 1;
    }
    None
}

/// Skip transport padding up to and including the end of the delimiter line.
fn skip_line(body: &[u8], from: usize) -> Option<usize> {
    body[from..]
        .iter()
        .position(|b| *b == b'\n')
        .map(|offset| from + offset + 1)
}

/// Drop the line break that belongs to the following delimiter.
fn trim_line_break(raw: &[u8]) -> &[u8] {
    raw.strip_suffix(b"\r\n")
        .or_else(|| raw.strip_suffix(b"\n"))
        .unwrap_or(raw)
}

fn parse_part(raw: &[u8]) -> MultipartPart {
    let (head, data) = split_head(raw);
    let mut part = MultipartPart {
        data: data.map(|d| d.to_vec()),
        ..MultipartPart::default()
    };

    let head = String::from_utf8_lossy(head);
    for line in head.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "content-disposition" => {
                part.name = disposition_param(value, "name");
                part.filename = disposition_param(value, "filename");
            }
            "content-type" => {
                part.content_type = Some(value.to_owned()).filter(|v| !v.is_empty());
            }
            _ => {}
        }
    }
    part
}

/// Split a raw part into headers and body on the first blank line.
fn split_head(raw: &[u8]) -> (&[u8], Option<&[u8]>) {
    // part without headers: body starts right after the empty line
    if let Some(rest) = raw.strip_prefix(b"\r\n").or_else(|| raw.strip_prefix(b"\n")) {
        return (&[], Some(rest));
    }
    let crlf = find(raw, CRLF_CRLF).map(|p| (p, CRLF_CRLF.len()));
    let lf = find(raw, LF_LF).map(|p| (p, LF_LF.len()));
    let separator = match (crlf, lf) {
        (Some(a), Some(b)) => Some(if a.0 <= b.0 { a } else { b }),
        (a, b) => a.or(b),
    };
    match separator {
        Some((position, len)) => (&raw[..position], Some(&raw[position + len..])),
        None => (raw, None),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn disposition_param_regex() -> &'static Regex {
    static PARAM: OnceLock<Regex> = OnceLock::new();
    PARAM.get_or_init(|| {
        Regex::new(r#";\s*([^\s=;]+)\s*=\s*(?:"((?:[^"\\]|\\.)*)"|([^;\s]*))"#)
            .expect("static disposition parameter pattern")
    })
}

/// Read `key="value"` (or unquoted `key=value`) from a Content-Disposition
/// value. Quoted values may contain `;`. `name` does not match `filename`.
fn disposition_param(value: &str, key: &str) -> Option<String> {
    disposition_param_regex()
        .captures_iter(value)
        .find(|caps| caps[1].eq_ignore_ascii_case(key))
        .and_then(|caps| {
            caps.get(2)
                .map(|quoted| quoted.as_str().replace("\\\"", "\"").replace("\\\\", "\\"))
                .or_else(|| caps.get(3).map(|bare| bare.as_str().to_owned()))
        })
}
