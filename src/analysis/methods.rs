//! Method enumeration for the target class/module.

use tracing::debug;

use super::branches::analyze_branches;
use super::comparisons::analyze_comparisons;
use super::facts::MethodInfo;
use crate::syntax::Node;

/// List the methods declared directly in `target`, in declaration order.
///
/// Methods of nested declarations are not included. A node that is not a
/// class/module, or one without a body, yields an empty list.
pub fn enumerate_methods(target: &Node) -> Vec<MethodInfo> {
    let Some(decl) = target.as_declaration() else {
        return Vec::new();
    };

    let methods: Vec<MethodInfo> = decl
        .statements()
        .iter()
        .filter_map(|node| match node {
            Node::Def(def) => Some(MethodInfo {
                name: def.name.clone(),
                branches: analyze_branches(def),
                comparisons: analyze_comparisons(def),
            }),
            _ => None,
        })
        .collect();

    debug!(
        target = %decl.name,
        count = methods.len(),
        "enumerated methods"
    );
    methods
}
