//! Tolerant HTML scanning for anchors and tables.
//!
//! Tag detection is case-insensitive and works on raw markup without building
//! a DOM. Only what the web strategy needs is extracted: anchor `href`s and
//! the first `<table>` of a page.

use crate::types::Table;

/// `href` of every `<a>` element, in document order, entity-decoded.
///
/// Anchors without an `href` attribute are skipped.
pub fn anchor_hrefs(html: &str) -> Vec<String> {
    let lower = html.to_ascii_lowercase();
    let mut hrefs = Vec::new();
    let mut pos = 0;
    while let Some(start) = find_tag(&lower, "a", pos) {
        let Some(end) = tag_end(html, start) else {
            pos = start + 1;
            continue;
        };
        if let Some(href) = attr_value(&html[start..end], "href") {
            hrefs.push(decode_entities(href.trim()));
        }
        pos = end;
    }
    hrefs
}

/// Parse the first `<table>` element of the document, if any.
///
/// A leading row made only of `<th>` cells becomes the header; repeated
/// header names get `.1`, `.2`, ... suffixes. Without a header, columns are
/// numbered `0..n` by the widest row. Rows without cells are dropped. A table
/// nested inside a cell is folded into that cell's text.
pub fn first_table(html: &str) -> Option<Table> {
    let lower = html.to_ascii_lowercase();
    let start = find_tag(&lower, "table", 0)?;
    let body_start = tag_end(html, start)?;
    let body_end = table_close(&lower, body_start).unwrap_or(html.len());
    let masked = mask_nested_tables(html, &lower, body_start, body_end);

    let mut rows: Vec<(bool, Vec<String>)> = Vec::new();
    let mut pos = body_start;
    while let Some(row_start) = find_tag(&masked[..body_end], "tr", pos) {
        let Some(content_start) = tag_end(html, row_start).filter(|&i| i <= body_end) else {
            break;
        };
        let row_end = find_tag(&masked[..body_end], "tr", content_start).unwrap_or(body_end);
        let cells = parse_cells(&html[content_start..row_end], &masked[content_start..row_end]);
        if !cells.is_empty() {
            let all_header = cells.iter().all(|(is_th, _)| *is_th);
            rows.push((all_header, cells.into_iter().map(|(_, text)| text).collect()));
        }
        pos = row_end;
    }

    let mut rows = rows.into_iter().peekable();
    let has_header = matches!(rows.peek(), Some((true, _)));
    let header = if has_header {
        rows.next().map(|(_, cells)| unique_names(cells))
    } else {
        None
    };
    let body: Vec<Vec<String>> = rows.map(|(_, cells)| cells).collect();

    let columns = header.unwrap_or_else(|| {
        let width = body.iter().map(Vec::len).max().unwrap_or(0);
        (0..width).map(|i| i.to_string()).collect()
    });
    let mut table = Table::new(columns);
    for row in body {
        table.push_row(row);
    }
    Some(table)
}

/// Start of the `</table` matching a table whose body begins at `from`.
fn table_close(lower: &str, from: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut pos = from;
    loop {
        let close = pos + lower[pos..].find("</table")?;
        match find_tag(lower, "table", pos).filter(|&open| open < close) {
            Some(open) => {
                depth += 1;
                pos = open + 1;
            }
            None if depth == 0 => return Some(close),
            None => {
                depth -= 1;
                pos = close + 1;
            }
        }
    }
}

/// Copy of `lower` with every table nested in `body_start..body_end` blanked
/// out. Offsets are unchanged, so positions found in the copy index `html`.
fn mask_nested_tables(html: &str, lower: &str, body_start: usize, body_end: usize) -> String {
    let mut masked = String::with_capacity(lower.len());
    let mut copied = 0;
    let mut pos = body_start;
    while let Some(open) = find_tag(&lower[..body_end], "table", pos) {
        let inner = tag_end(html, open).unwrap_or(body_end).min(body_end);
        let close = table_close(&lower[..body_end], inner).unwrap_or(body_end);
        let end = lower[close..body_end]
            .find('>')
            .map(|i| close + i + 1)
            .unwrap_or(body_end);
        masked.push_str(&lower[copied..open]);
        masked.push_str(&" ".repeat(end - open));
        copied = end;
        pos = end;
    }
    masked.push_str(&lower[copied..]);
    masked
}

/// Suffix repeated names with `.1`, `.2`, ... until each is unique.
fn unique_names(names: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let mut candidate = name.clone();
        let mut n = 0;
        while out.contains(&candidate) {
            n += 1;
            candidate = format!("{}.{}", name, n);
        }
        out.push(candidate);
    }
    out
}

/// Cells of one row segment as `(is_header_cell, text)`.
fn parse_cells(html: &str, lower: &str) -> Vec<(bool, String)> {
    let mut cells = Vec::new();
    let mut pos = 0;
    loop {
        let td = find_tag(lower, "td", pos);
        let th = find_tag(lower, "th", pos);
        let (start, is_th) = match (td, th) {
            (Some(d), Some(h)) if h < d => (h, true),
            (Some(d), _) => (d, false),
            (None, Some(h)) => (h, true),
            (None, None) => break,
        };
        let Some(content_start) = tag_end(html, start) else {
            break;
        };
        let next_cell = [
            lower[content_start..].find("</td"),
            lower[content_start..].find("</th"),
            find_tag(&lower[content_start..], "td", 0),
            find_tag(&lower[content_start..], "th", 0),
        ]
        .into_iter()
        .flatten()
        .min()
        .map(|i| content_start + i)
        .unwrap_or(html.len());

        cells.push((is_th, clean_text(&html[content_start..next_cell])));
        pos = next_cell;
    }
    cells
}

/// Strip tags, decode entities and collapse whitespace.
fn clean_text(fragment: &str) -> String {
    decode_entities(&strip_tags(fragment))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Remove every `<...>` tag from a fragment.
pub fn strip_tags(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for ch in fragment.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

/// Decode the common named entities and numeric character references.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').filter(|&semi| semi <= 10).and_then(|semi| {
            let entity = &rest[1..semi];
            let ch = match entity {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some(' '),
                _ => entity
                    .strip_prefix("#x")
                    .or_else(|| entity.strip_prefix("#X"))
                    .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                    .or_else(|| entity.strip_prefix('#').and_then(|d| d.parse().ok()))
                    .and_then(char::from_u32),
            };
            ch.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Position of the next `<name` tag opener at or after `from`.
///
/// `lower` must be ASCII-lowercased. The name must be followed by whitespace,
/// `>` or `/`, so `<th` does not match `<thead`.
fn find_tag(lower: &str, name: &str, from: usize) -> Option<usize> {
    let bytes = lower.as_bytes();
    let mut pos = from;
    while pos < lower.len() {
        let rel = lower[pos..].find('<')?;
        let start = pos + rel;
        let name_end = start + 1 + name.len();
        if lower.get(start + 1..name_end) == Some(name) {
            match bytes.get(name_end) {
                Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => {
                    return Some(start)
                }
                None => return Some(start),
                _ => {}
            }
        }
        pos = start + 1;
    }
    None
}

/// Index just past the `>` closing the tag that opens at `start`.
///
/// A quote opens a quoted value only right after `=`, so quoted values may
/// contain `>` while a stray apostrophe in an unquoted value does not.
fn tag_end(html: &str, start: usize) -> Option<usize> {
    let mut quote: Option<char> = None;
    let mut after_eq = false;
    for (i, ch) in html[start..].char_indices() {
        match (quote, ch) {
            (Some(q), c) if c == q => {
                quote = None;
                after_eq = false;
            }
            (Some(_), _) => {}
            (None, '>') => return Some(start + i + 1),
            (None, '"' | '\'') if after_eq => quote = Some(ch),
            (None, c) if c.is_whitespace() => {}
            (None, c) => after_eq = c == '=',
        }
    }
    None
}

/// Value of attribute `name` inside a single opening tag.
fn attr_value<'a>(tag: &'a str, name: &str) -> Option<&'a str> {
    let inner = tag.trim_start_matches('<').trim_end_matches('>');
    // Skip the tag name.
    let mut rest = inner.trim_start_matches(|c: char| !c.is_whitespace());
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_whitespace() || c == '/');
        if rest.is_empty() {
            return None;
        }
        let key_len = rest
            .find(|c: char| c.is_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let key = &rest[..key_len];
        rest = rest[key_len..].trim_start();

        let value = if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            let (value, remaining) = match after_eq.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    let close = body.find(q).unwrap_or(body.len());
                    (&body[..close], body.get(close + 1..).unwrap_or(""))
                }
                _ => {
                    let end = after_eq
                        .find(|c: char| c.is_whitespace())
                        .unwrap_or(after_eq.len());
                    (&after_eq[..end], &after_eq[end..])
                }
            };
            rest = remaining;
            Some(value)
        } else {
            None
        };

        if key.eq_ignore_ascii_case(name) {
            return Some(value.unwrap_or(""));
        }
    }
}
