//! Askama rendering of a [`SessionProfile`] into the notebook artifacts.
//!
//! The profile is flattened into small view structs first so the templates
//! only place lines; all Python quoting and chain layout happens here.

mod templates;

pub use templates::{render_readme, render_spark_init};

use crate::session::{ConfigSection, ConfigValue, EnvLookup, LookupDefault, StorageBackend};

/// Importable module name of the initialization artifact.
pub const MODULE_NAME: &str = "spark_init";
/// Session factory defined by the initialization module.
pub const FACTORY_FN: &str = "get_spark_session";
/// Delta table helper defined by the initialization module.
pub const DELTA_HELPER_FN: &str = "get_delta_table";

const README_TITLE: &str = "JupyterHub Spark Environment";

#[derive(Debug)]
pub(crate) struct LookupView {
    binding: &'static str,
    variable: &'static str,
    default_expr: String,
}

impl LookupView {
    fn from_lookup(lookup: &EnvLookup) -> Self {
        let default_expr = match &lookup.default {
            LookupDefault::Literal(value) => py_str(value, '\''),
            LookupDefault::LocalAddress => "socket.gethostbyname(socket.gethostname())".to_string(),
        };
        Self {
            binding: lookup.binding.ident(),
            variable: lookup.variable,
            default_expr,
        }
    }
}

#[derive(Debug)]
pub(crate) struct SectionView {
    comments: Vec<String>,
    guarded: bool,
    guard: &'static str,
    indent: &'static str,
    lines: Vec<String>,
}

impl SectionView {
    fn from_section(section: &ConfigSection) -> Option<Self> {
        let lines = chain_lines(section);
        if lines.is_empty() {
            return None;
        }
        Some(Self {
            comments: section.comments.clone(),
            guarded: section.guard.is_some(),
            guard: section.guard.map(|flag| flag.param_name()).unwrap_or(""),
            indent: if section.guard.is_some() {
                "        "
            } else {
                "    "
            },
            lines,
        })
    }
}

#[derive(Debug)]
pub(crate) struct StorageView {
    label: &'static str,
    example_uri: String,
}

impl From<StorageBackend> for StorageView {
    fn from(backend: StorageBackend) -> Self {
        Self {
            label: backend.label(),
            example_uri: backend.example_uri(),
        }
    }
}

/// Quote `value` as a Python string literal.
pub(crate) fn py_str(value: &str, quote: char) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace(quote, &format!("\\{quote}"));
    format!("{quote}{escaped}{quote}")
}

fn value_expr(value: &ConfigValue) -> String {
    match value {
        ConfigValue::Literal(literal) => py_str(literal, '"'),
        ConfigValue::Variable(binding) => binding.ident().to_string(),
    }
}

/// One `builder.config(...)` chain per section, continued with backslashes.
pub(crate) fn chain_lines(section: &ConfigSection) -> Vec<String> {
    let mut calls: Vec<String> = section
        .entries
        .iter()
        .map(|entry| format!(".config({}, {})", py_str(&entry.key, '"'), value_expr(&entry.value)))
        .collect();
    if section.enable_hive_support {
        calls.push(".enableHiveSupport()".to_string());
    }

    let last = calls.len().saturating_sub(1);
    calls
        .into_iter()
        .enumerate()
        .map(|(i, call)| {
            let lead = if i == 0 { "builder = builder" } else { "    " };
            let continuation = if i < last { " \\" } else { "" };
            format!("{lead}{call}{continuation}")
        })
        .collect()
}
