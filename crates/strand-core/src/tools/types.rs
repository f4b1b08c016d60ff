//! Tool-related type definitions

use crate::error::StrandResult;
use crate::parser::ToolWhitelist;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Result status of a tool execution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
    /// Accepted but not finished, e.g. an order awaiting a fill
    Pending,
}

/// Uniform result of a tool execution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolOutcome {
    pub tool_name: String,
    pub status: ToolStatus,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ToolOutcome {
    /// Create a successful outcome
    pub fn success(tool_name: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            tool_name: tool_name.into(),
            status: ToolStatus::Success,
            data: Some(data),
            message: None,
        }
    }

    /// Create an error outcome
    pub fn error(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            status: ToolStatus::Error,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Create a pending outcome
    pub fn pending(tool_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            status: ToolStatus::Pending,
            data: None,
            message: Some(message.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == ToolStatus::Success
    }

    pub fn is_error(&self) -> bool {
        self.status == ToolStatus::Error
    }
}

/// One documented parameter of a tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    pub description: String,
    #[serde(default = "default_required")]
    pub required: bool,
}

fn default_required() -> bool {
    true
}

impl ParameterSpec {
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: false,
        }
    }
}

/// Description of a tool a handler can execute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, parameter: ParameterSpec) -> Self {
        self.parameters.push(parameter);
        self
    }
}

/// Ordered set of tool specs exposed for one market
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCatalog {
    specs: Vec<ToolSpec>,
}

impl ToolCatalog {
    pub fn new(specs: Vec<ToolSpec>) -> Self {
        Self { specs }
    }

    pub fn specs(&self) -> &[ToolSpec] {
        &self.specs
    }

    pub fn get(&self, name: &str) -> Option<&ToolSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|spec| spec.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Whitelist of every tool name in the catalog
    pub fn whitelist(&self) -> StrandResult<ToolWhitelist> {
        ToolWhitelist::new(self.names())
    }

    /// Render the "Available Tools" block used when assembling prompts
    pub fn describe(&self) -> String {
        let mut out = String::from("Available Tools:\n");
        for spec in &self.specs {
            let _ = writeln!(out, "- {}: {}", spec.name, spec.description);
            if !spec.parameters.is_empty() {
                let params: Vec<String> = spec
                    .parameters
                    .iter()
                    .map(|p| {
                        if p.required {
                            format!("{} ({})", p.name, p.description)
                        } else {
                            format!("{} ({}, optional)", p.name, p.description)
                        }
                    })
                    .collect();
                let _ = writeln!(out, "  Parameters: {}", params.join(", "));
            }
        }
        out
    }
}
