//! Folds `^` continuation and `%` previous-context lines into the logical
//! line that precedes them.

use super::ast::Command;
use super::lexer::{Lexer, split_line};
use crate::config::Concat;
use crate::model::CRLF;

/// Result of completing one logical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Merged {
    /// Payload with every continuation appended.
    pub line: String,
    /// `%` payload found right after a `+` line.
    pub previous: Option<String>,
    /// Physical lines absorbed into this one.
    pub consumed: usize,
}

/// Scan forward from `index` and merge the lines that belong to it.
///
/// The scan stops at the first following line that is neither `%` nor `^`,
/// or that carries no payload. Blank lines are transparent. An `> object`
/// header never merges: the lines after it are opaque code.
pub fn lookahead(
    lines: &[&str],
    index: usize,
    cmd: Command,
    payload: &str,
    concat: Concat,
) -> Merged {
    let mut merged = Merged {
        line: payload.to_string(),
        previous: None,
        consumed: 0,
    };

    if cmd == Command::LabelOpen && payload.split_whitespace().next() == Some("object") {
        return merged;
    }

    for candidate in Lexer::starting_at(lines, index + 1) {
        let Some(look) = split_line(candidate.text) else {
            break;
        };
        let look_cmd = match look.command {
            Some(c @ (Command::Previous | Command::Continue)) => c,
            _ => break,
        };

        if cmd == Command::Trigger && look_cmd == Command::Previous {
            merged.previous = Some(look.payload.to_string());
            merged.consumed += 1;
            break;
        }

        if cmd == Command::Define {
            if look_cmd != Command::Continue {
                break;
            }
            merged.line.push_str(CRLF);
            merged.line.push_str(look.payload);
            merged.consumed += 1;
            continue;
        }

        // `%` after anything but a trigger is left for its own turn.
        if look_cmd == Command::Continue {
            merged.line.push_str(concat.separator());
            merged.line.push_str(look.payload);
            merged.consumed += 1;
        }
    }

    merged
}
