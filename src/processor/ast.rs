//! Line-level vocabulary: what a single content line *is* before it is
//! applied to the document tree.

/// The command prefix of a content line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `! type name = value` – definitions and parser options.
    Define,

    /// `> begin`, `> topic name …`, `> object name lang`.
    LabelOpen,

    /// `< begin`, `< topic`, `< object`.
    LabelClose,

    /// `+ pattern`
    Trigger,

    /// `- text`
    Response,

    /// `* a == b => text`
    Condition,

    /// `% pattern` – what the bot must have said last.
    Previous,

    /// `^ more text` – continues the line above.
    Continue,

    /// `@ pattern` – reuse another trigger's replies.
    Redirect,
}

impl Command {
    pub fn from_char(c: char) -> Option<Self> {
        let cmd = match c {
            '!' => Command::Define,
            '>' => Command::LabelOpen,
            '<' => Command::LabelClose,
            '+' => Command::Trigger,
            '-' => Command::Response,
            '*' => Command::Condition,
            '%' => Command::Previous,
            '^' => Command::Continue,
            '@' => Command::Redirect,
            _ => return None,
        };
        Some(cmd)
    }

    pub fn as_char(self) -> char {
        match self {
            Command::Define => '!',
            Command::LabelOpen => '>',
            Command::LabelClose => '<',
            Command::Trigger => '+',
            Command::Response => '-',
            Command::Condition => '*',
            Command::Previous => '%',
            Command::Continue => '^',
            Command::Redirect => '@',
        }
    }
}

/// A stripped content line split into its prefix and payload.
///
/// `command` is `None` for an unrecognised prefix; `prefix` keeps the raw
/// character for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line<'a> {
    pub prefix: char,
    pub command: Option<Command>,
    pub payload: &'a str,
}
