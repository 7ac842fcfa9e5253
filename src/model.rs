// language-level constants shared by the parser and its consumers
pub const RS_VERSION: f64 = 2.0;

/// Topic every trigger lands in until a `> topic` label says otherwise.
pub const DEFAULT_TOPIC: &str = "random";

/// Name the `> begin` label is sugar for.
pub const BEGIN_TOPIC: &str = "__begin__";

/// Marker joining `!` continuation lines; array splitting breaks on it
/// before splitting on `|` or whitespace.
pub const CRLF: &str = "<crlf>";

/// Value that asks the engine to delete a definition.
pub const UNDEF: &str = "<undef>";

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Entire document as it comes out of the parser.
///
/// Maps are ordered so that two parses of the same text compare equal and
/// serialize byte-for-byte the same.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub begin: Begin,
    pub topics: BTreeMap<String, Topic>,
    pub objects: Vec<ObjectMacro>,
}

/// ─────────────────────────────────────────────────────
/// `! type name = value` tables
/// ─────────────────────────────────────────────────────
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Begin {
    pub global: BTreeMap<String, String>,
    pub var: BTreeMap<String, String>,
    pub sub: BTreeMap<String, String>,
    pub person: BTreeMap<String, String>,
    pub array: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub includes: BTreeSet<String>,
    pub inherits: BTreeSet<String>,
    /// Matching priority order == document order.
    pub triggers: Vec<Trigger>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub trigger: String,
    pub reply: Vec<String>,
    pub condition: Vec<String>,
    pub redirect: Option<String>,
    /// Pattern the bot's last reply must match; `None` means unconditional.
    pub previous: Option<String>,
}

/// A `> object name lang` … `< object` block, kept as opaque source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMacro {
    pub name: String,
    pub language: String,
    pub code: Vec<String>,
}

impl Document {
    /// Returns the topic, creating an empty entry the first time it is named.
    pub fn init_topic(&mut self, name: &str) -> &mut Topic {
        self.topics.entry(name.to_string()).or_default()
    }
}
