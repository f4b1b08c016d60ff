//! Argument decoder for closed tool blocks
//!
//! A tool body is a flat sequence of `<key>value</key>` elements. Values are
//! opaque text. Malformed elements are reported and skipped; they never stop
//! the elements after them from decoding.

use super::markers::{MarkerSet, is_identifier, is_identifier_byte};
use crate::segment::Parameters;

/// Longest fragment quoted verbatim in a decode error
const MAX_FRAGMENT_CHARS: usize = 48;

/// Decode a tool block into parameters and per-element errors.
///
/// `raw` may be the whole block including the `<tool_name>` wrapper, or the
/// bare body; the wrapper is stripped when present.
pub fn decode(tool_name: &str, raw: &str) -> (Parameters, Vec<String>) {
    let open = format!("<{}>", tool_name);
    let close = MarkerSet::tool_close(tool_name);
    let body = raw.strip_prefix(open.as_str()).unwrap_or(raw);
    let body = body.strip_suffix(close.as_str()).unwrap_or(body);
    decode_body(body)
}

/// A tag-shaped token: `<ident>` or `</ident>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tag<'a> {
    name: &'a str,
    closing: bool,
    start: usize,
    end: usize,
}

/// Parse a tag-shaped token starting exactly at `start`
fn tag_at(body: &str, start: usize) -> Option<Tag<'_>> {
    let bytes = body.as_bytes();
    if bytes.get(start) != Some(&b'<') {
        return None;
    }
    let closing = bytes.get(start + 1) == Some(&b'/');
    let name_start = start + 1 + usize::from(closing);
    let name_len = bytes[name_start..]
        .iter()
        .take_while(|b| is_identifier_byte(**b))
        .count();
    let name_end = name_start + name_len;
    if name_len == 0 || bytes.get(name_end) != Some(&b'>') {
        return None;
    }
    Some(Tag {
        name: &body[name_start..name_end],
        closing,
        start,
        end: name_end + 1,
    })
}

/// Find the next tag-shaped token at or after `from`
fn next_tag(body: &str, from: usize) -> Option<Tag<'_>> {
    let mut search = from;
    while let Some(offset) = body[search..].find('<') {
        let at = search + offset;
        if let Some(tag) = tag_at(body, at) {
            return Some(tag);
        }
        search = at + 1;
    }
    None
}

fn fragment(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(MAX_FRAGMENT_CHARS).collect();
    if chars.next().is_some() {
        format!("{}...", head)
    } else {
        head
    }
}

fn decode_body(body: &str) -> (Parameters, Vec<String>) {
    let mut parameters = Parameters::new();
    let mut errors = Vec::new();
    let mut pos = 0;

    while pos < body.len() {
        let rest = &body[pos..];
        pos += rest.len() - rest.trim_start().len();
        if pos >= body.len() {
            break;
        }
        let rest = &body[pos..];

        if !rest.starts_with('<') {
            let end = rest.find('<').map_or(body.len(), |i| pos + i);
            errors.push(format!(
                "unexpected text outside a parameter element: '{}'",
                fragment(body[pos..end].trim_end())
            ));
            pos = end;
            continue;
        }

        let Some(gt) = rest.find('>') else {
            errors.push(format!("unterminated tag '{}'", fragment(rest)));
            break;
        };
        if let Some(lt) = rest[1..gt].find('<') {
            errors.push(format!("unterminated tag '{}'", fragment(&rest[..lt + 1])));
            pos += lt + 1;
            continue;
        }

        let inner = &rest[1..gt];
        let tag_end = pos + gt + 1;

        if let Some(name) = inner.strip_prefix('/') {
            errors.push(format!("unexpected closing tag '</{}>'", fragment(name)));
            pos = tag_end;
            continue;
        }

        if !is_identifier(inner) {
            errors.push(format!("invalid parameter name '{}'", fragment(inner)));
            let close = format!("</{}>", inner);
            pos = match body[tag_end..].find(close.as_str()) {
                Some(i) => tag_end + i + close.len(),
                None => body[tag_end..].find('<').map_or(body.len(), |i| tag_end + i),
            };
            continue;
        }

        let key = inner;
        match next_tag(body, tag_end) {
            Some(tag) if tag.closing && tag.name == key => {
                parameters.insert(key, &body[tag_end..tag.start]);
                pos = tag.end;
            }
            Some(tag) if tag.closing => {
                errors.push(format!(
                    "closing tag '</{}>' does not match '<{}>'",
                    tag.name, key
                ));
                pos = tag.end;
            }
            Some(tag) => {
                errors.push(format!(
                    "unmatched open tag '<{}>' before '<{}>'",
                    key, tag.name
                ));
                pos = tag.start;
            }
            None => {
                errors.push(format!(
                    "unmatched open tag '<{}>' with trailing '{}'",
                    key,
                    fragment(&body[tag_end..])
                ));
                pos = body.len();
            }
        }
    }

    (parameters, errors)
}
