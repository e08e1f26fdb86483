//! Minitest skeletons.

use super::{render_template, Formatter, RenderContext};
use crate::error::Result;

pub struct MinitestFormatter;

impl Formatter for MinitestFormatter {
    fn name(&self) -> &'static str {
        "minitest"
    }

    fn generate(&self, ctx: &RenderContext<'_>) -> Result<String> {
        render_template("minitest/class.tmpl", ctx)
    }
}
