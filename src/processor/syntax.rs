//! Lightweight lexical checks on a merged content line.
//!
//! Nothing here stops the parse; a failed check only produces a message
//! for the caller to report.

use once_cell::sync::Lazy;
use regex::Regex;

use super::ast::Command;
use crate::config::ParserOptions;

static DEFINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.+(?:\s+.+)?\s*=\s*.+?$").unwrap());
static PIPE_EDGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"=\s?\||\|\s?$").unwrap());
static TOPIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_\-\s]").unwrap());
static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\-\s]").unwrap());
static UTF8_PATTERN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z\\.]").unwrap());
static PATTERN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9(|)\[\]*_#@{}<>=\s]").unwrap());
static CONDITION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.+?\s*(?:==|eq|!=|ne|<>|<|<=|>|>=)\s*.+?=>.+?$").unwrap()
});

pub type SyntaxResult = Result<(), &'static str>;

/// Check `line` (the payload, continuations already folded in) for `cmd`.
pub fn check_syntax(cmd: Command, line: &str, options: &ParserOptions) -> SyntaxResult {
    match cmd {
        Command::Define => check_define(line),
        Command::LabelOpen => check_label(line, options.force_case),
        Command::Trigger | Command::Previous | Command::Redirect => {
            check_pattern(line, options.utf8)
        }
        Command::Condition => {
            if CONDITION_RE.is_match(line) {
                Ok(())
            } else {
                Err("Invalid format for *Condition: should be like '* value symbol value => response'")
            }
        }
        Command::LabelClose | Command::Response | Command::Continue => Ok(()),
    }
}

fn check_define(line: &str) -> SyntaxResult {
    if !DEFINE_RE.is_match(line) {
        return Err(
            "Invalid format for !Definition line: must be '! type name = value' OR '! type = value'",
        );
    }
    if line.starts_with("array") {
        if PIPE_EDGE_RE.is_match(line) {
            return Err("Piped arrays can't begin or end with a |");
        }
        if line.contains("||") {
            return Err("Piped arrays can't include blank entries");
        }
    }
    Ok(())
}

fn check_label(line: &str, force_case: bool) -> SyntaxResult {
    let mut parts = line.split_whitespace();
    let kind = parts.next().unwrap_or_default();
    let rest = parts.collect::<Vec<_>>().join(" ");

    match kind {
        "begin" if !rest.is_empty() => Err("The 'begin' label takes no additional arguments"),
        "topic" if !force_case && TOPIC_RE.is_match(&rest) => {
            Err("Topics should be lowercased and contain only letters and numbers")
        }
        "topic" if NAME_RE.is_match(&rest) => {
            Err("Topics should contain only letters and numbers in forceCase mode")
        }
        "object" if NAME_RE.is_match(&rest) => Err("Objects can only contain numbers and letters"),
        _ => Ok(()),
    }
}

fn check_pattern(line: &str, utf8: bool) -> SyntaxResult {
    if utf8 {
        if UTF8_PATTERN_RE.is_match(line) {
            return Err(
                "Triggers can't contain uppercase letters, backslashes or dots in UTF-8 mode",
            );
        }
    } else if PATTERN_RE.is_match(line) {
        return Err(
            "Triggers may only contain lowercase letters, numbers, and these symbols: ( | ) [ ] * _ # @ { } < > =",
        );
    }

    let (mut parens, mut square, mut curly, mut angle) = (0i32, 0i32, 0i32, 0i32);
    for c in line.chars() {
        match c {
            '(' => parens += 1,
            ')' => parens -= 1,
            '[' => square += 1,
            ']' => square -= 1,
            '{' => curly += 1,
            '}' => curly -= 1,
            '<' => angle += 1,
            '>' => angle -= 1,
            _ => {}
        }
    }

    if parens != 0 {
        return Err("Unmatched parenthesis brackets");
    }
    if square != 0 {
        return Err("Unmatched square brackets");
    }
    if curly != 0 {
        return Err("Unmatched curly brackets");
    }
    if angle != 0 {
        return Err("Unmatched angle brackets");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascii() -> ParserOptions {
        ParserOptions::default()
    }

    #[test]
    fn test_define() {
        let test_cases = vec![
            ("version = 2.0", Ok(())),
            ("var name = Aiden", Ok(())),
            ("array colors = red|green|blue", Ok(())),
            ("var name =", Err("Invalid format for !Definition line: must be '! type name = value' OR '! type = value'")),
            ("= value", Err("Invalid format for !Definition line: must be '! type name = value' OR '! type = value'")),
            ("array colors = |red|green", Err("Piped arrays can't begin or end with a |")),
            ("array colors = red|green|", Err("Piped arrays can't begin or end with a |")),
            ("array colors = red||green", Err("Piped arrays can't include blank entries")),
        ];

        for (input, expected) in test_cases {
            assert_eq!(check_syntax(Command::Define, input, &ascii()), expected, "input: {input}");
        }
    }

    #[test]
    fn test_labels() {
        let test_cases = vec![
            ("begin", Ok(())),
            ("begin now", Err("The 'begin' label takes no additional arguments")),
            ("topic sales includes support", Ok(())),
            ("topic Sales", Err("Topics should be lowercased and contain only letters and numbers")),
            ("topic sales!", Err("Topics should be lowercased and contain only letters and numbers")),
            ("object encode_b64 javascript", Ok(())),
            ("object Encode Perl", Ok(())),
            ("object enc.ode javascript", Err("Objects can only contain numbers and letters")),
        ];

        for (input, expected) in test_cases {
            assert_eq!(check_syntax(Command::LabelOpen, input, &ascii()), expected, "input: {input}");
        }
    }

    #[test]
    fn test_topic_force_case() {
        let opts = ParserOptions {
            force_case: true,
            ..ParserOptions::default()
        };
        assert_eq!(check_syntax(Command::LabelOpen, "topic Sales", &opts), Ok(()));
        assert_eq!(
            check_syntax(Command::LabelOpen, "topic sa.les", &opts),
            Err("Topics should contain only letters and numbers in forceCase mode")
        );
    }

    #[test]
    fn test_patterns_ascii() {
        let test_cases = vec![
            ("hello bot", Ok(())),
            ("my name is *", Ok(())),
            ("(hi|hello) [there] {weight=2}", Ok(())),
            ("i am <bot name>", Ok(())),
            ("Hello", Err("Triggers may only contain lowercase letters, numbers, and these symbols: ( | ) [ ] * _ # @ { } < > =")),
            ("what's up", Err("Triggers may only contain lowercase letters, numbers, and these symbols: ( | ) [ ] * _ # @ { } < > =")),
            ("(hi|hello", Err("Unmatched parenthesis brackets")),
            ("hi [there", Err("Unmatched square brackets")),
            ("hi {weight=2", Err("Unmatched curly brackets")),
            ("hi <bot name", Err("Unmatched angle brackets")),
        ];

        for (input, expected) in test_cases {
            assert_eq!(check_syntax(Command::Trigger, input, &ascii()), expected, "input: {input}");
        }
        assert!(check_syntax(Command::Redirect, "Hi", &ascii()).is_err());
        assert!(check_syntax(Command::Previous, "who (are you", &ascii()).is_err());
    }

    #[test]
    fn test_patterns_utf8() {
        let opts = ParserOptions {
            utf8: true,
            ..ParserOptions::default()
        };
        let test_cases = vec![
            ("bonjour ça va", Ok(())),
            ("what's up", Ok(())),
            ("Hello", Err("Triggers can't contain uppercase letters, backslashes or dots in UTF-8 mode")),
            ("end.", Err("Triggers can't contain uppercase letters, backslashes or dots in UTF-8 mode")),
            ("a\\b", Err("Triggers can't contain uppercase letters, backslashes or dots in UTF-8 mode")),
            ("(ça|va", Err("Unmatched parenthesis brackets")),
        ];

        for (input, expected) in test_cases {
            assert_eq!(check_syntax(Command::Trigger, input, &opts), expected, "input: {input}");
        }
    }

    #[test]
    fn test_conditions() {
        let test_cases = vec![
            ("<get name> == undefined => What's your name?", Ok(())),
            ("<get age> >= 18 => You're an adult.", Ok(())),
            ("<get mood> ne happy => Cheer up!", Ok(())),
            ("name is bob => hi", Err("Invalid format for *Condition: should be like '* value symbol value => response'")),
            ("just some text", Err("Invalid format for *Condition: should be like '* value symbol value => response'")),
        ];

        for (input, expected) in test_cases {
            assert_eq!(check_syntax(Command::Condition, input, &ascii()), expected, "input: {input}");
        }
    }

    #[test]
    fn test_unchecked_commands() {
        for cmd in [Command::Response, Command::Continue, Command::LabelClose] {
            assert_eq!(check_syntax(cmd, "Anything. Goes! (", &ascii()), Ok(()));
        }
    }
}
