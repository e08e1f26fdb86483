//! RSpec skeletons.

use super::{render_template, Formatter, RenderContext};
use crate::error::Result;

pub struct RSpecFormatter;

impl Formatter for RSpecFormatter {
    fn name(&self) -> &'static str {
        "rspec"
    }

    fn generate(&self, ctx: &RenderContext<'_>) -> Result<String> {
        render_template("rspec/class.tmpl", ctx)
    }
}
