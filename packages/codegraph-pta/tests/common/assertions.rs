//! Custom assertions for test verification
//!
//! Domain-specific checks over call graphs and analysis results.

use codegraph_pta::shared::models::{MethodId, Program, StmtId};
use codegraph_pta::MethodCallGraph;

/// Assert the exact callee set of a call site, ignoring order
pub fn assert_callees(cg: &MethodCallGraph, call_site: StmtId, expected: &[MethodId]) {
    let mut actual: Vec<MethodId> = cg.callees_of(call_site).collect();
    actual.sort();
    actual.dedup();
    let mut expected = expected.to_vec();
    expected.sort();
    assert_eq!(
        actual, expected,
        "Unexpected callees at call site #{}",
        call_site.0
    );
}

/// Assert that every method in `methods` is reachable
pub fn assert_reachable(program: &Program, cg: &MethodCallGraph, methods: &[MethodId]) {
    for &method in methods {
        assert!(
            cg.is_reachable(method),
            "Expected {} to be reachable",
            program.method_signature(method)
        );
    }
}

/// Assert that no method in `methods` is reachable
pub fn assert_unreachable(program: &Program, cg: &MethodCallGraph, methods: &[MethodId]) {
    for &method in methods {
        assert!(
            !cg.is_reachable(method),
            "Expected {} to be unreachable",
            program.method_signature(method)
        );
    }
}
