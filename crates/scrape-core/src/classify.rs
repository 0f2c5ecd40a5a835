//! Bracketed diagnostic line recognition.
//!
//! ffmpeg prefixes every log line from a component with a tag such as
//! `[dshow @ 000001f0c2a8e6c0]`. Capability entries are the tagged lines
//! that carry `key=value` pairs; everything else is noise.

use std::borrow::Cow;

use devscan_common::error::{DevscanError, DevscanResult};

/// Outcome of running one recognizer over one piece of text.
#[derive(Debug, Clone, PartialEq)]
pub enum Classified<T> {
    /// The text had the expected shape and decoded cleanly.
    Matched(T),
    /// The text is not what this recognizer looks for.
    Skipped,
    /// The text had the expected shape but its content did not decode.
    Malformed(String),
}

impl<T> Classified<T> {
    pub fn matched(self) -> Option<T> {
        match self {
            Self::Matched(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_))
    }
}

/// What a tagged line must contain beyond its tag to count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRule {
    /// At least one `=` (audio capability lines).
    Assignment,
    /// An `=` and an opening parenthesis (video capability lines, which end
    /// with a `(range, colorspace, location)` group).
    AssignmentWithGroup,
}

/// What to do with a `Malformed` capability line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinePolicy {
    /// Fail the whole probe.
    #[default]
    Strict,
    /// Log and drop the line.
    Lenient,
}

impl LinePolicy {
    pub fn from_strict(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Lenient
        }
    }
}

/// Recognize a bracketed diagnostic line and return its content with the
/// tag removed.
///
/// Never yields `Malformed`: a line either carries a capability entry or it
/// is noise.
pub fn classify_line(line: &str, rule: LineRule) -> Classified<&str> {
    let Some(remainder) = strip_tag(line) else {
        return Classified::Skipped;
    };

    let qualifies = match rule {
        LineRule::Assignment => remainder.contains('='),
        LineRule::AssignmentWithGroup => remainder.contains('=') && remainder.contains('('),
    };

    if qualifies {
        Classified::Matched(remainder)
    } else {
        Classified::Skipped
    }
}

/// Text after the last `"] "` of a line that starts with `[`.
fn strip_tag(line: &str) -> Option<&str> {
    if !line.starts_with('[') {
        return None;
    }
    let remainder = match line.rfind("] ") {
        Some(pos) => &line[pos + 2..],
        None => &line[line.find(']')? + 1..],
    };
    Some(remainder.trim())
}

/// Collapse `\r\n` and bare `\r` into `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains('\r') {
        Cow::Owned(text.replace("\r\n", "\n").replace('\r', "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Run `parse` over every qualifying line of `text`, in order.
///
/// Malformed lines abort with a [`DevscanError::Parse`] under
/// [`LinePolicy::Strict`] and are dropped under [`LinePolicy::Lenient`].
pub fn scrape_lines<T>(
    text: &str,
    rule: LineRule,
    policy: LinePolicy,
    parse: impl Fn(&str) -> Classified<T>,
) -> DevscanResult<Vec<T>> {
    let text = normalize_newlines(text);
    let mut parsed = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let Classified::Matched(remainder) = classify_line(line, rule) else {
            continue;
        };

        match parse(remainder) {
            Classified::Matched(value) => parsed.push(value),
            Classified::Skipped => {}
            Classified::Malformed(reason) => match policy {
                LinePolicy::Strict => return Err(DevscanError::parse(idx + 1, reason)),
                LinePolicy::Lenient => {
                    tracing::debug!(line = idx + 1, %reason, "Dropping malformed capability line");
                }
            },
        }
    }

    Ok(parsed)
}
