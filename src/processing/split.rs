//! Regex splitting that keeps the matched delimiters

use regex::Regex;

/// One span of a split: either text between matches or a match itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Piece<'a> {
    Text(&'a str),
    Delimiter(&'a str),
}

impl<'a> Piece<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Piece::Text(s) | Piece::Delimiter(s) => s,
        }
    }
}

/// A delimiter together with the text that follows it, up to the next
/// delimiter. The leading segment of a text has no marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub marker: Option<&'a str>,
    pub body: &'a str,
}

impl Segment<'_> {
    pub fn len(&self) -> usize {
        self.marker.map_or(0, str::len) + self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.len());
        if let Some(marker) = self.marker {
            text.push_str(marker);
        }
        text.push_str(self.body);
        text
    }
}

/// Split `text` on `pattern`, returning text and delimiter spans in order.
///
/// Concatenating every piece reproduces `text`. Empty text spans (between
/// adjacent matches, or at either end) are not emitted.
pub fn split_with_delimiters<'a>(pattern: &Regex, text: &'a str) -> Vec<Piece<'a>> {
    let mut pieces = Vec::new();
    let mut last = 0;

    for m in pattern.find_iter(text) {
        if m.start() > last {
            pieces.push(Piece::Text(&text[last..m.start()]));
        }
        if !m.as_str().is_empty() {
            pieces.push(Piece::Delimiter(m.as_str()));
        }
        last = m.end();
    }

    if last < text.len() {
        pieces.push(Piece::Text(&text[last..]));
    }

    pieces
}

/// Split `text` on `pattern`, attaching each delimiter to the text that
/// follows it.
pub fn split_keep_delimiter<'a>(pattern: &Regex, text: &'a str) -> Vec<Segment<'a>> {
    let mut segments: Vec<Segment<'a>> = Vec::new();

    for piece in split_with_delimiters(pattern, text) {
        match piece {
            Piece::Delimiter(marker) => segments.push(Segment {
                marker: Some(marker),
                body: "",
            }),
            Piece::Text(body) => match segments.last_mut() {
                Some(segment) if segment.body.is_empty() => segment.body = body,
                _ => segments.push(Segment { marker: None, body }),
            },
        }
    }

    segments
}
