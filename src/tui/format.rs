//! Display helpers: HTML bodies to plain text, dates, hosts and widths.

use std::fmt;

use chrono::{DateTime, Local, TimeZone};
use scraper::{ElementRef, Html, Node};
use unicode_width::UnicodeWidthChar;
use url::Url;

use crate::api::Item;

// ============================================================================
// HTML
// ============================================================================

/// Flattens a comment/about HTML fragment into wrapped-ready plain text.
///
/// Paragraphs become blank-line separated, `<pre>` keeps its whitespace,
/// links collapse to their text and entities are decoded.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut output = String::new();
    convert_children(&mut output, fragment.root_element(), false);
    normalize_lines(&output)
}

fn convert_children(output: &mut String, element: ElementRef<'_>, preformatted: bool) {
    for child in element.children() {
        match child.value() {
            Node::Element(_) => {
                if let Some(el) = ElementRef::wrap(child) {
                    convert_element(output, el, preformatted);
                }
            }
            Node::Text(text) => {
                if preformatted {
                    output.push_str(text);
                } else {
                    push_collapsed(output, text);
                }
            }
            _ => {}
        }
    }
}

fn convert_element(output: &mut String, element: ElementRef<'_>, preformatted: bool) {
    match element.value().name() {
        "p" => {
            ensure_blank_line(output);
            convert_children(output, element, preformatted);
        }
        "pre" => {
            ensure_blank_line(output);
            convert_children(output, element, true);
            ensure_blank_line(output);
        }
        "br" => output.push('\n'),
        "script" | "style" => {}
        _ => convert_children(output, element, preformatted),
    }
}

/// Appends `text` with runs of whitespace collapsed to one space.
fn push_collapsed(output: &mut String, text: &str) {
    let starts_with_space = text.starts_with(char::is_whitespace);
    let ends_with_space = text.ends_with(char::is_whitespace);
    let words: Vec<&str> = text.split_whitespace().collect();

    if starts_with_space && !output.is_empty() && !output.ends_with(char::is_whitespace) {
        output.push(' ');
    }
    output.push_str(&words.join(" "));
    if ends_with_space && !words.is_empty() {
        output.push(' ');
    }
}

fn ensure_blank_line(output: &mut String) {
    let trimmed = output.trim_end_matches([' ', '\t']).len();
    output.truncate(trimmed);
    if output.is_empty() || output.ends_with("\n\n") {
        return;
    }
    if output.ends_with('\n') {
        output.push('\n');
    } else {
        output.push_str("\n\n");
    }
}

fn normalize_lines(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut blank_run = 0;
    for line in s.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        result.push_str(line);
        result.push('\n');
    }
    result.trim_matches('\n').to_string()
}

// ============================================================================
// Dates and numbers
// ============================================================================

/// Formats unix seconds in local time, e.g. `4/4/2007, 7:16 PM`.
pub fn format_date(unix: i64) -> String {
    format_date_in(unix, &Local)
}

pub fn format_date_in<Tz: TimeZone>(unix: i64, tz: &Tz) -> String
where
    Tz::Offset: fmt::Display,
{
    match DateTime::from_timestamp(unix, 0) {
        Some(utc) => utc
            .with_timezone(tz)
            .format("%-m/%-d/%Y, %-I:%M %p")
            .to_string(),
        None => "an unknown date".to_string(),
    }
}

/// `1234567` → `1,234,567`.
pub fn thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

// ============================================================================
// Items
// ============================================================================

/// Host part of a story link without a leading `www.`.
pub fn host(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    let host = url.host_str()?;
    Some(host.trim_start_matches("www.").to_string())
}

/// `by pg on 4/4/2007, 7:16 PM with 71 comments`
pub fn meta_line(item: &Item) -> String {
    let mut line = format!("by {}", item.by.as_deref().unwrap_or("[deleted]"));
    if let Some(time) = item.time {
        line.push_str(" on ");
        line.push_str(&format_date(time));
    }
    if let Some(count) = item.descendants {
        line.push_str(&format!(" with {count} comments"));
    }
    line
}

/// Wraps `text` to `width` columns, keeping blank lines between paragraphs.
pub fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return Vec::new();
    }
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        lines.extend(
            textwrap::wrap(paragraph, &options)
                .into_iter()
                .map(|line| line.into_owned()),
        );
    }
    lines
}

/// Cuts `s` to `max_width` terminal columns, ending in `…` when shortened.
pub fn truncate(s: &str, max_width: usize) -> String {
    let total: usize = s.chars().filter_map(UnicodeWidthChar::width).sum();
    if total <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max_width - 1 {
            break;
        }
        width += w;
        out.push(c);
    }
    out.push('…');
    out
}
