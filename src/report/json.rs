//! JSON output of the raw extraction records.

use serde::Serialize;

use super::{Formatter, RenderContext};
use crate::analysis::{ConstantPath, MethodInfo};
use crate::error::Result;

/// JSON report structure.
#[derive(Serialize)]
pub struct JsonReport<'a> {
    pub version: &'static str,
    pub constant: &'a ConstantPath,
    pub methods: &'a [MethodInfo],
}

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn generate(&self, ctx: &RenderContext<'_>) -> Result<String> {
        let report = JsonReport {
            version: env!("CARGO_PKG_VERSION"),
            constant: ctx.constant,
            methods: ctx.methods,
        };
        let mut json = serde_json::to_string_pretty(&report)?;
        json.push('\n');
        Ok(json)
    }
}
