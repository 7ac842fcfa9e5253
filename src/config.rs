use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Separator inserted when a `^` line is folded into the line above it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Concat {
    #[default]
    None,
    Newline,
    Space,
}

impl Concat {
    pub fn separator(self) -> &'static str {
        match self {
            Concat::None => "",
            Concat::Newline => "\n",
            Concat::Space => " ",
        }
    }
}

impl FromStr for Concat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Concat::None),
            "newline" => Ok(Concat::Newline),
            "space" => Ok(Concat::Space),
            other => Err(format!("unknown concat mode `{other}`")),
        }
    }
}

impl fmt::Display for Concat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Concat::None => "none",
            Concat::Newline => "newline",
            Concat::Space => "space",
        };
        f.write_str(s)
    }
}

/// Knobs that shape one parse call.
///
/// `concat` is only the starting value: a document may override it for
/// itself with `! local concat = …`, which never leaks into the next parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserOptions {
    /// Route syntax errors to the caller's error callback.
    pub strict: bool,
    /// Allow non-ASCII triggers (only uppercase, `\` and `.` are rejected).
    pub utf8: bool,
    /// Accept uppercase letters in topic names.
    pub force_case: bool,
    pub concat: Concat,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            strict: true,
            utf8: false,
            force_case: false,
            concat: Concat::None,
        }
    }
}

/// Parse a JSON config file into `ParserOptions`.
///
/// The top level must be an object; missing keys keep their defaults and
/// unknown keys are rejected so typos do not go unnoticed.
pub fn load_options(json: &str) -> Result<ParserOptions> {
    let root: Value = serde_json::from_str(json)?;

    let obj = root
        .as_object()
        .ok_or_else(|| anyhow!("config must be a JSON object"))?;

    for key in obj.keys() {
        match key.as_str() {
            "strict" | "utf8" | "force_case" | "concat" => {}
            other => return Err(anyhow!("unknown config key `{other}`")),
        }
    }

    let options: ParserOptions = serde_json::from_value(root)?;
    tracing::debug!(?options, "parser options loaded");
    Ok(options)
}
