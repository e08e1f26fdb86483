//! Output formatting for extraction results.
//!
//! Supports three output formats:
//! - Minitest: test class skeleton with one `test_` method per method
//! - RSpec: `describe` skeleton with one example group per method
//! - JSON: the raw records for programmatic consumption
//!
//! Formatters are pure: they receive a [`RenderContext`] and return text. The
//! Ruby skeletons are minijinja templates embedded at build time.

mod json;
mod minitest;
mod rspec;

pub use json::{JsonFormatter, JsonReport};
pub use minitest::MinitestFormatter;
pub use rspec::RSpecFormatter;

use minijinja::{AutoEscape, Environment};
use serde::Serialize;

use crate::analysis::{Analysis, ConstantPath, MethodInfo};
use crate::error::{Error, Result};

/// Name of the formatter used when none is configured.
pub const DEFAULT_FORMATTER: &str = "minitest";

/// All available formatter names.
pub const FORMATTER_NAMES: &[&str] = &["minitest", "rspec", "json"];

/// Everything a formatter needs, passed explicitly. Also the template context.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RenderContext<'a> {
    pub constant: &'a ConstantPath,
    pub methods: &'a [MethodInfo],
    /// Emit `# Branches:` / `# Comparisons:` comments in each stub.
    pub annotate: bool,
}

impl<'a> RenderContext<'a> {
    pub fn new(analysis: &'a Analysis) -> Self {
        Self {
            constant: &analysis.constant,
            methods: &analysis.methods,
            annotate: true,
        }
    }

    pub fn annotate(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }
}

/// A test skeleton style.
pub trait Formatter: Send + Sync {
    /// The name used to select this formatter (e.g., "rspec").
    fn name(&self) -> &'static str;

    /// Render the output file contents.
    fn generate(&self, ctx: &RenderContext<'_>) -> Result<String>;
}

/// Look up a formatter by name.
pub fn formatter_for(name: &str) -> Result<Box<dyn Formatter>> {
    match name {
        "minitest" => Ok(Box::new(MinitestFormatter)),
        "rspec" => Ok(Box::new(RSpecFormatter)),
        "json" => Ok(Box::new(JsonFormatter)),
        _ => Err(Error::UnknownFormatter(
            name.to_string(),
            FORMATTER_NAMES.join(", "),
        )),
    }
}

/// Templates, keyed by the name `{% include %}` refers to them by.
const TEMPLATES: &[(&str, &str)] = &[
    ("annotations.tmpl", include_str!("../templates/annotations.tmpl")),
    ("minitest/class.tmpl", include_str!("../templates/minitest/class.tmpl")),
    ("minitest/method.tmpl", include_str!("../templates/minitest/method.tmpl")),
    ("rspec/class.tmpl", include_str!("../templates/rspec/class.tmpl")),
    ("rspec/method.tmpl", include_str!("../templates/rspec/method.tmpl")),
];

/// Build the template environment.
///
/// Block tags on their own line leave no trace in the output, and templates
/// keep their final newline.
fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_filter("single_line", single_line);
    for &(name, source) in TEMPLATES {
        env.add_template(name, source)?;
    }
    Ok(env)
}

/// Escape line breaks so an annotation stays on its comment line.
fn single_line(text: String) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}

/// Render the named template with `ctx` as its context.
pub(crate) fn render_template(name: &str, ctx: &RenderContext<'_>) -> Result<String> {
    let env = environment()?;
    let template = env.get_template(name)?;
    Ok(template.render(ctx)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{BranchInfo, BranchKind, ComparisonInfo, ComparisonOperator};

    fn constant(path: &str) -> ConstantPath {
        ConstantPath {
            path: path.to_string(),
            nested: false,
            compact: false,
        }
    }

    fn render(name: &str, methods: &[MethodInfo], annotate: bool) -> String {
        let constant = constant("Calculator");
        let ctx = RenderContext {
            constant: &constant,
            methods,
            annotate,
        };
        render_template(name, &ctx).unwrap()
    }

    fn check_method() -> MethodInfo {
        MethodInfo {
            name: "check".to_string(),
            branches: vec![
                BranchInfo {
                    kind: BranchKind::If,
                    condition: "value > 0".to_string(),
                },
                BranchInfo {
                    kind: BranchKind::Case,
                    condition: String::new(),
                },
            ],
            comparisons: vec![ComparisonInfo::new(
                ComparisonOperator::Greater,
                "value".to_string(),
                "0".to_string(),
            )],
        }
    }

    #[test]
    fn test_all_templates_load() {
        let env = environment().unwrap();
        for (name, _) in TEMPLATES {
            assert!(env.get_template(name).is_ok(), "{}", name);
        }
    }

    #[test]
    fn test_annotations() {
        let out = render("minitest/class.tmpl", &[check_method()], true);
        assert!(out.contains(
            "  def test_check\n    # Branches: if (value > 0), case\n    # Comparisons: value > 0\n    skip"
        ));
    }

    #[test]
    fn test_annotations_disabled_or_empty() {
        let plain = render("minitest/class.tmpl", &[check_method()], false);
        assert!(plain.contains("  def test_check\n    skip \"Not implemented yet\"\n"));

        let empty = render("rspec/class.tmpl", &[MethodInfo::named("plain")], true);
        assert!(empty.contains("  describe \"#plain\" do\n    it \"works correctly\" do\n"));
    }

    #[test]
    fn test_methods_are_separated_by_blank_lines() {
        let methods = [MethodInfo::named("first"), MethodInfo::named("second")];
        let out = render("minitest/class.tmpl", &methods, true);
        assert!(out.contains("  end\n\n  def test_second\n"));
        assert!(out.ends_with("  end\nend\n"));
        assert!(!out.contains("\n\n\n"));
    }

    #[test]
    fn test_multiline_condition_stays_commented() {
        let method = MethodInfo {
            name: "x".to_string(),
            branches: vec![BranchInfo {
                kind: BranchKind::If,
                condition: "v == \"one\ntwo\r\"".to_string(),
            }],
            comparisons: vec![ComparisonInfo::new(
                ComparisonOperator::Equal,
                "v".to_string(),
                "\"one\ntwo\r\"".to_string(),
            )],
        };

        for name in ["minitest/class.tmpl", "rspec/class.tmpl"] {
            let out = render(name, std::slice::from_ref(&method), true);
            assert!(out.contains("    # Branches: if (v == \"one\\ntwo\\r\")\n"));
            assert!(out.contains("    # Comparisons: v == \"one\\ntwo\\r\"\n"));
            for line in out.lines() {
                assert!(!line.starts_with("two"), "uncommented line in {}: {:?}", name, line);
            }
        }
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("a\nb\r\n".to_string()), r"a\nb\r\n");
        assert_eq!(single_line("plain".to_string()), "plain");
    }

    #[test]
    fn test_formatter_lookup() {
        for name in FORMATTER_NAMES {
            assert_eq!(formatter_for(name).unwrap().name(), *name);
        }
        let err = formatter_for("xunit").err().unwrap();
        assert!(matches!(err, Error::UnknownFormatter(ref n, _) if n == "xunit"));
        assert!(err.to_string().contains("minitest, rspec, json"));
    }
}
