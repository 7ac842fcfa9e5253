//! Small hand-written line lexer for the script format.
//!
//! At this stage we *only* walk physical lines and split them into a
//! command prefix and payload. No command is interpreted here – the parser
//! owns all state (topic, object capture, comment blocks).
//
//  Grammar excerpts (informal):
//
//      document ::= line*
//      line     ::= WS* (comment | content) WS* NEWLINE
//      content  ::= CMD WS* payload (" //" comment)?
//      comment  ::= "//" .* | "#" .* | "/*" .* | .* "*/"
//
//  Blank lines are discarded before anything else looks at them.

use super::ast::{Command, Line};

/// A non-blank physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicalLine<'a> {
    /// Position in the source line array.
    pub index: usize,
    /// The line exactly as written.
    pub raw: &'a str,
    /// The line with surrounding whitespace removed, never empty.
    pub text: &'a str,
}

impl PhysicalLine<'_> {
    /// 1-based line number for diagnostics.
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comment {
    /// `// …`
    Line,
    /// `# …`, still accepted but deprecated.
    Hash,
    /// `/* …` opening a block that continues on later lines.
    BlockStart,
    /// `/* … */` on one line.
    BlockInline,
    /// `… */`
    BlockEnd,
}

#[derive(Clone)]
pub struct Lexer<'a> {
    lines: &'a [&'a str],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(lines: &'a [&'a str]) -> Self {
        Self::starting_at(lines, 0)
    }

    /// Lexer that resumes at `index`; used by the lookahead scan.
    pub fn starting_at(lines: &'a [&'a str], index: usize) -> Self {
        Self { lines, pos: index }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = PhysicalLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.lines.len() {
            let index = self.pos;
            self.pos += 1;

            let raw = self.lines[index];
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }
            return Some(PhysicalLine { index, raw, text });
        }
        None
    }
}

/// Recognise comment syntax on a stripped line (outside object blocks).
pub fn comment_kind(text: &str) -> Option<Comment> {
    if text.starts_with("//") {
        Some(Comment::Line)
    } else if text.starts_with('#') {
        Some(Comment::Hash)
    } else if text.starts_with("/*") {
        if text.contains("*/") {
            Some(Comment::BlockInline)
        } else {
            Some(Comment::BlockStart)
        }
    } else if text.contains("*/") {
        Some(Comment::BlockEnd)
    } else {
        None
    }
}

/// True for the line that ends an object block (`< object` / `<object`),
/// optionally followed by a ` //` comment.
pub fn is_object_close(text: &str) -> bool {
    strip_inline_comment(text)
        .strip_prefix('<')
        .is_some_and(|rest| rest.trim_start() == "object")
}

/// Cut a trailing ` //` comment off `text`.
fn strip_inline_comment(text: &str) -> &str {
    match text.find(" //") {
        Some(idx) => text[..idx].trim_end(),
        None => text,
    }
}

/// Split a stripped content line into command prefix and payload.
///
/// A trailing ` //comment` is cut off the payload. Returns `None` for a
/// line that has nothing after its prefix.
pub fn split_line(text: &str) -> Option<Line<'_>> {
    let mut chars = text.chars();
    let prefix = chars.next()?;
    let payload = strip_inline_comment(chars.as_str().trim());
    if payload.is_empty() {
        return None;
    }

    Some(Line {
        prefix,
        command: Command::from_char(prefix),
        payload,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_blank_lines() {
        let src = vec!["", "+ hello", "   ", "\t- hi there  "];
        let lines: Vec<_> = Lexer::new(&src).collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].index, 1);
        assert_eq!(lines[0].number(), 2);
        assert_eq!(lines[1].raw, "\t- hi there  ");
        assert_eq!(lines[1].text, "- hi there");
    }

    #[test]
    fn test_starting_at() {
        let src = vec!["+ a", "- b", "", "- c"];
        let texts: Vec<_> = Lexer::starting_at(&src, 1).map(|l| l.text).collect();
        assert_eq!(texts, vec!["- b", "- c"]);
    }

    #[test]
    fn test_comment_kinds() {
        let test_cases = vec![
            ("// plain", Some(Comment::Line)),
            ("# old style", Some(Comment::Hash)),
            ("/* open", Some(Comment::BlockStart)),
            ("/* open and shut */", Some(Comment::BlockInline)),
            ("close */", Some(Comment::BlockEnd)),
            ("+ hello", None),
            ("- see http://example.com", None),
        ];

        for (input, expected) in test_cases {
            assert_eq!(comment_kind(input), expected, "input: {input}");
        }
    }

    #[test]
    fn test_object_close() {
        assert!(is_object_close("< object"));
        assert!(is_object_close("<object"));
        assert!(is_object_close("< object // end of rev"));
        assert!(is_object_close("<object //"));
        assert!(!is_object_close("< topic"));
        assert!(!is_object_close("if (a < object) {"));
    }

    #[test]
    fn test_split_line() {
        let test_cases = vec![
            (
                "+ hello bot",
                Some(Line {
                    prefix: '+',
                    command: Some(Command::Trigger),
                    payload: "hello bot",
                }),
            ),
            (
                "-   spaced out",
                Some(Line {
                    prefix: '-',
                    command: Some(Command::Response),
                    payload: "spaced out",
                }),
            ),
            (
                "+ hi // greeting",
                Some(Line {
                    prefix: '+',
                    command: Some(Command::Trigger),
                    payload: "hi",
                }),
            ),
            (
                "? what",
                Some(Line {
                    prefix: '?',
                    command: None,
                    payload: "what",
                }),
            ),
            (
                "+ hi //",
                Some(Line {
                    prefix: '+',
                    command: Some(Command::Trigger),
                    payload: "hi",
                }),
            ),
            (
                "+ hi //note",
                Some(Line {
                    prefix: '+',
                    command: Some(Command::Trigger),
                    payload: "hi",
                }),
            ),
            (
                "- see http://example.com",
                Some(Line {
                    prefix: '-',
                    command: Some(Command::Response),
                    payload: "see http://example.com",
                }),
            ),
            ("+", None),
            ("^   ", None),
        ];

        for (input, expected) in test_cases {
            assert_eq!(split_line(input), expected, "input: {input}");
        }
    }
}
