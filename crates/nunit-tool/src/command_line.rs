//! Command line assembly
//!
//! Arguments are kept as a typed list so the same command line can be passed
//! to the process verbatim and rendered, quoted, for the build log.

use serde::Serialize;
use std::fmt;
use std::path::Path;

/// One command line argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Argument {
    /// A bare switch such as `-nologo`
    Switch { switch: String },
    /// A positional file name
    File { path: String },
    /// A switch immediately followed by its value, e.g. `-xml=out.xml`
    SwitchWithValue { switch: String, value: String },
}

impl Argument {
    /// Text handed to the process
    pub fn raw(&self) -> String {
        match self {
            Self::Switch { switch } => switch.clone(),
            Self::File { path } => path.clone(),
            Self::SwitchWithValue { switch, value } => format!("{}{}", switch, value),
        }
    }

    /// Text shown in logs, quoted where the shell would split it
    pub fn rendered(&self) -> String {
        match self {
            Self::Switch { switch } => switch.clone(),
            Self::File { path } => quote_if_needed(path),
            Self::SwitchWithValue { switch, value } => {
                format!("{}{}", switch, quote_if_needed(value))
            }
        }
    }
}

/// Ordered command line builder
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CommandLineBuilder {
    arguments: Vec<Argument>,
}

impl CommandLineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bare switch
    pub fn append_switch(&mut self, switch: impl Into<String>) -> &mut Self {
        self.arguments.push(Argument::Switch {
            switch: switch.into(),
        });
        self
    }

    /// Append each file name as its own positional argument, preserving order
    pub fn append_file_names<I, P>(&mut self, files: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for file in files {
            self.arguments.push(Argument::File {
                path: file.as_ref().to_string_lossy().into_owned(),
            });
        }
        self
    }

    /// Append `switch` + `value` when the value is present and non-empty
    pub fn append_switch_if_not_empty(
        &mut self,
        switch: impl Into<String>,
        value: Option<&str>,
    ) -> &mut Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.arguments.push(Argument::SwitchWithValue {
                switch: switch.into(),
                value: value.to_string(),
            });
        }
        self
    }

    pub fn arguments(&self) -> &[Argument] {
        &self.arguments
    }

    /// Arguments as handed to the process, one entry per argument
    pub fn to_args(&self) -> Vec<String> {
        self.arguments.iter().map(Argument::raw).collect()
    }

    pub fn len(&self) -> usize {
        self.arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arguments.is_empty()
    }
}

impl fmt::Display for CommandLineBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, argument) in self.arguments.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(&argument.rendered())?;
        }
        Ok(())
    }
}

/// Quote text containing whitespace or quotes; embedded quotes are escaped
pub fn quote_if_needed(text: &str) -> String {
    let needs_quotes = text.is_empty() || text.chars().any(|c| c.is_whitespace() || c == '"');
    if !needs_quotes {
        return text.to_string();
    }
    format!("\"{}\"", text.replace('"', "\\\""))
}
