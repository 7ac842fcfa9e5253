//! Parser that walks the lexer's lines and builds the `Document` tree.

use crate::config::{Concat, ParserOptions};
use crate::error::ParseError;
use crate::model::{
    BEGIN_TOPIC, CRLF, DEFAULT_TOPIC, Document, ObjectMacro, RS_VERSION, Trigger, UNDEF,
};

use super::ast::Command;
use super::lexer::{Comment, Lexer, PhysicalLine, comment_kind, is_object_close, split_line};
use super::lookahead::lookahead;
use super::report::{Reporter, TracingReporter};
use super::syntax::check_syntax;

/// Callback for strict-mode syntax errors.
pub type ErrorHook<'r> = &'r mut dyn FnMut(&str);

/// Parse `text` into a document, logging through `tracing`.
pub fn parse(
    source: &str,
    text: &str,
    options: &ParserOptions,
    on_error: Option<ErrorHook<'_>>,
) -> Result<Document, ParseError> {
    let mut reporter = TracingReporter;
    parse_with(source, text, options, &mut reporter, on_error)
}

/// Same as [`parse`] with a caller-supplied reporter.
pub fn parse_with(
    source: &str,
    text: &str,
    options: &ParserOptions,
    reporter: &mut dyn Reporter,
    on_error: Option<ErrorHook<'_>>,
) -> Result<Document, ParseError> {
    let lines: Vec<&str> = text.lines().collect();
    let mut p = Parser::new(source, &lines, options, reporter, on_error);
    p.parse()?;
    Ok(p.doc)
}

/// Options a document sets for itself with `! local name = value`.
#[derive(Debug, Clone, Copy)]
struct LocalOptions {
    concat: Concat,
}

/// Where `-`, `*` and `@` lines attach.
#[derive(Debug, Clone)]
struct TriggerRef {
    topic: String,
    index: usize,
}

#[derive(Debug)]
struct ObjectCapture {
    name: String,
    language: String,
    code: Vec<String>,
}

#[derive(Clone, Copy)]
enum Relation {
    Includes,
    Inherits,
}

struct Parser<'a, 'r, 'e> {
    source: &'a str,
    lines: &'a [&'a str],
    options: &'a ParserOptions,
    reporter: &'r mut dyn Reporter,
    on_error: Option<ErrorHook<'e>>,

    doc: Document,
    local: LocalOptions,
    topic: String,
    current: Option<TriggerRef>,
    in_comment: bool,
    object: Option<ObjectCapture>,
}

impl<'a, 'r, 'e> Parser<'a, 'r, 'e> {
    fn new(
        source: &'a str,
        lines: &'a [&'a str],
        options: &'a ParserOptions,
        reporter: &'r mut dyn Reporter,
        on_error: Option<ErrorHook<'e>>,
    ) -> Self {
        Self {
            source,
            lines,
            options,
            reporter,
            on_error,
            doc: Document::default(),
            local: LocalOptions {
                concat: options.concat,
            },
            topic: DEFAULT_TOPIC.to_string(),
            current: None,
            in_comment: false,
            object: None,
        }
    }

    fn parse(&mut self) -> Result<(), ParseError> {
        let lines = self.lines;

        for line in Lexer::new(lines) {
            if self.object.is_some() {
                self.capture_object_line(line);
                continue;
            }
            if self.skip_comment(line) {
                continue;
            }

            let n = line.number();
            let Some(content) = split_line(line.text) else {
                self.warn(&format!("Weird single-character line '{}' found", line.text), n);
                continue;
            };
            let Some(cmd) = content.command else {
                self.warn(&format!("Unknown command '{}'", content.prefix), n);
                continue;
            };

            let merged = lookahead(lines, line.index, cmd, content.payload, self.local.concat);
            if let Err(msg) = check_syntax(cmd, &merged.line, self.options) {
                self.syntax_error(msg, cmd, &merged.line, n);
            }
            self.say(&format!("Cmd: {}; line: {}", cmd.as_char(), merged.line));

            match cmd {
                Command::Define => self.define(&merged.line, n)?,
                Command::LabelOpen => self.open_label(&merged.line, n),
                Command::LabelClose => self.close_label(&merged.line, n),
                Command::Trigger => self.add_trigger(merged.line, merged.previous),
                Command::Response => match self.current_trigger() {
                    Some(t) => t.reply.push(merged.line),
                    None => self.warn("Response found before trigger", n),
                },
                Command::Condition => match self.current_trigger() {
                    Some(t) => t.condition.push(merged.line),
                    None => self.warn("Condition found before trigger", n),
                },
                Command::Redirect => match self.current_trigger() {
                    Some(t) => t.redirect = Some(merged.line),
                    None => self.warn("Redirect found before trigger", n),
                },
                // Already folded into the line they follow.
                Command::Previous | Command::Continue => {}
            }
        }

        if let Some(obj) = self.object.take() {
            self.warn(
                &format!("Object '{}' was never closed and has been discarded", obj.name),
                self.lines.len(),
            );
        }
        Ok(())
    }

    /* ------------------------------------------------------------------ */
    /*  Line classification                                               */
    /* ------------------------------------------------------------------ */

    fn capture_object_line(&mut self, line: PhysicalLine<'_>) {
        if !is_object_close(line.text) {
            if let Some(obj) = self.object.as_mut() {
                obj.code.push(line.raw.to_string());
            }
            return;
        }

        let Some(obj) = self.object.take() else {
            return;
        };
        if obj.name.is_empty() {
            self.warn("Object without a name has been discarded", line.number());
            return;
        }
        self.say(&format!("End of object '{}' ({} lines)", obj.name, obj.code.len()));
        self.doc.objects.push(ObjectMacro {
            name: obj.name,
            language: obj.language,
            code: obj.code,
        });
    }

    /// True if the line is a comment or sits inside a `/* … */` block.
    fn skip_comment(&mut self, line: PhysicalLine<'_>) -> bool {
        if self.in_comment {
            if line.text.contains("*/") {
                self.in_comment = false;
            }
            return true;
        }

        match comment_kind(line.text) {
            Some(Comment::Line | Comment::BlockInline) => true,
            Some(Comment::Hash) => {
                self.warn(
                    "Using the # symbol for comments is deprecated",
                    line.number(),
                );
                true
            }
            Some(Comment::BlockStart) => {
                self.in_comment = true;
                true
            }
            Some(Comment::BlockEnd) => {
                self.in_comment = false;
                true
            }
            None => false,
        }
    }

    /* ------------------------------------------------------------------ */
    /*  Command handlers                                                  */
    /* ------------------------------------------------------------------ */

    fn define(&mut self, line: &str, n: usize) -> Result<(), ParseError> {
        let (left, value) = match line.split_once('=') {
            Some((left, value)) => (left.trim(), value.trim()),
            None => (line.trim(), ""),
        };
        let (kind, name) = match left.split_once(char::is_whitespace) {
            Some((kind, name)) => (kind, name.trim()),
            None => (left, ""),
        };

        let value = if kind == "array" {
            value.to_string()
        } else {
            value.replace(CRLF, "")
        };

        if kind == "version" {
            return self.check_version(&value, n);
        }
        if name.is_empty() {
            self.warn("Undefined variable name", n);
            return Ok(());
        }
        if value.is_empty() {
            self.warn("Undefined variable value", n);
            return Ok(());
        }

        if kind == "local" {
            self.say(&format!("\tSet local parser option {name} = {value}"));
            self.set_local(name, &value, n);
            return Ok(());
        }

        let begin = &mut self.doc.begin;
        match kind {
            "global" => {
                begin.global.insert(name.to_string(), value);
            }
            "var" => {
                begin.var.insert(name.to_string(), value);
            }
            "array" => {
                begin.array.insert(name.to_string(), split_array(&value));
            }
            "sub" => {
                begin.sub.insert(name.to_string(), value);
            }
            "person" => {
                begin.person.insert(name.to_string(), value);
            }
            other => self.warn(&format!("Unknown definition type '{other}'"), n),
        }
        Ok(())
    }

    fn check_version(&mut self, value: &str, n: usize) -> Result<(), ParseError> {
        let declared = match value.parse::<f64>() {
            Ok(v) => v,
            Err(_) => {
                self.warn(&format!("Invalid version number '{value}'"), n);
                return Ok(());
            }
        };
        if declared > RS_VERSION {
            self.warn(
                &format!("Unsupported document version {value}. We only support {RS_VERSION:.1}"),
                n,
            );
            return Err(ParseError::UnsupportedVersion {
                declared: value.to_string(),
                supported: RS_VERSION,
                file: self.source.to_string(),
                line: n,
            });
        }
        Ok(())
    }

    fn set_local(&mut self, name: &str, value: &str, n: usize) {
        match name {
            "concat" => match value.parse::<Concat>() {
                Ok(concat) => self.local.concat = concat,
                Err(e) => {
                    self.warn(&format!("{e}; joining continuations directly"), n);
                    self.local.concat = Concat::None;
                }
            },
            other => self.warn(&format!("Unknown local option '{other}'"), n),
        }
    }

    fn open_label(&mut self, line: &str, n: usize) {
        let mut tokens = line.split_whitespace();
        let kind = tokens.next().unwrap_or_default();
        let name = tokens.next().unwrap_or_default();
        let fields: Vec<&str> = tokens.collect();

        let (kind, name) = if kind == "begin" {
            self.say("Found the BEGIN block.");
            ("topic", BEGIN_TOPIC)
        } else {
            (kind, name)
        };

        match kind {
            "topic" => {
                if name.is_empty() {
                    self.warn("Topic label without a name", n);
                    return;
                }
                self.say(&format!("Set topic to {name}"));
                self.current = None;
                self.topic = name.to_string();
                self.doc.init_topic(name);

                let mut mode: Option<Relation> = None;
                for field in fields {
                    match field {
                        "includes" => mode = Some(Relation::Includes),
                        "inherits" => mode = Some(Relation::Inherits),
                        other => {
                            let Some(relation) = mode else {
                                continue;
                            };
                            self.doc.init_topic(other);
                            let topic = self.doc.init_topic(name);
                            let set = match relation {
                                Relation::Includes => &mut topic.includes,
                                Relation::Inherits => &mut topic.inherits,
                            };
                            set.insert(other.to_string());
                        }
                    }
                }
            }
            "object" => {
                let language = match fields.first() {
                    Some(lang) => lang.to_lowercase(),
                    None => {
                        self.warn(
                            "Trying to parse unknown programming language (assuming it's JavaScript)",
                            n,
                        );
                        "javascript".to_string()
                    }
                };
                self.say(&format!("Start of object '{name}' ({language})"));
                self.object = Some(ObjectCapture {
                    name: name.to_string(),
                    language,
                    code: Vec::new(),
                });
            }
            other => self.warn(&format!("Unknown label type '{other}'"), n),
        }
    }

    fn close_label(&mut self, line: &str, n: usize) {
        match line {
            "begin" | "topic" => {
                self.say("End of topic, back to random");
                self.topic = DEFAULT_TOPIC.to_string();
            }
            // Objects are closed by the capture loop; this only clears the flag.
            "object" => self.object = None,
            other => self.warn(&format!("Unknown label type '{other}'"), n),
        }
    }

    fn add_trigger(&mut self, pattern: String, previous: Option<String>) {
        self.say(&format!("Trigger pattern: {pattern}"));
        let topic = self.doc.init_topic(&self.topic);
        topic.triggers.push(Trigger {
            trigger: pattern,
            previous,
            ..Trigger::default()
        });
        self.current = Some(TriggerRef {
            topic: self.topic.clone(),
            index: topic.triggers.len() - 1,
        });
    }

    fn current_trigger(&mut self) -> Option<&mut Trigger> {
        let r = self.current.as_ref()?;
        self.doc.topics.get_mut(&r.topic)?.triggers.get_mut(r.index)
    }

    /* ------------------------------------------------------------------ */
    /*  Diagnostics                                                       */
    /* ------------------------------------------------------------------ */

    fn syntax_error(&mut self, err: &str, cmd: Command, line: &str, n: usize) {
        let msg = format!(
            "Syntax error: {err} at {} line {n} near {} {line}",
            self.source,
            cmd.as_char()
        );
        if self.options.strict {
            if let Some(hook) = self.on_error.as_deref_mut() {
                hook(&msg);
                return;
            }
        }
        self.warn(&format!("{msg} (in topic {})", self.topic), n);
    }

    fn say(&mut self, message: &str) {
        self.reporter.say(message);
    }

    fn warn(&mut self, message: &str, n: usize) {
        self.reporter.warn(message, self.source, n);
    }
}

/// Split an `! array` value into its items.
///
/// Each `<crlf>`-separated segment splits on `|` when it has one, otherwise
/// on whitespace; `\s` stands for a literal space.
fn split_array(value: &str) -> Vec<String> {
    if value == UNDEF {
        return vec![UNDEF.to_string()];
    }

    let mut fields = Vec::new();
    for segment in value.split(CRLF) {
        if segment.contains('|') {
            fields.extend(segment.split('|').map(str::trim));
        } else {
            fields.extend(segment.split_whitespace());
        }
    }

    fields
        .into_iter()
        .map(|f| f.replace("\\s", " "))
        .filter(|f| !f.is_empty())
        .collect()
}
