//! Points-to and call graph integration tests
//!
//! Whole-program runs over the shared fixtures: dispatch precision against
//! CHA, context sensitivity, heap abstraction, recursion and fatal errors.

#[path = "../common/mod.rs"]
mod common;
use common::*;

use codegraph_pta::config::{ContextSensitivity, PtaConfig};
use codegraph_pta::shared::models::{
    CallKind, MethodModifiers, MethodRef, ProgramBuilder, Type,
};
use codegraph_pta::{AnalysisError, CallGraphBuilder, ChaBuilder, PointerAnalysis};
use pretty_assertions::assert_eq;

fn analyze_with(program: &codegraph_pta::Program, context: ContextSensitivity) -> codegraph_pta::PointerAnalysisResult {
    PointerAnalysis::new(PtaConfig::default().with_context(context))
        .analyze(program)
        .expect("analysis succeeds")
}

// ═══════════════════════════════════════════════════════════════════════════
// CALL GRAPH: CHA vs pointer analysis
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn cha_resolves_every_override() {
    let f = fixture_dispatch();
    let cg = ChaBuilder::new().build(&f.program).unwrap();

    assert_callees(&cg, f.call_site, &[f.a_m, f.b_m, f.c_m]);
    assert_reachable(&f.program, &cg, &[f.main, f.a_m, f.b_m, f.c_m]);
    assert_eq!(cg.edge_count(), 3);
}

#[test]
fn pta_resolves_only_the_allocated_type() {
    let f = fixture_dispatch();
    for context in [
        ContextSensitivity::Insensitive,
        ContextSensitivity::CallSite { k: 1 },
        ContextSensitivity::Object { k: 2 },
        ContextSensitivity::Type { k: 1 },
    ] {
        let result = analyze_with(&f.program, context);
        let cg = result.call_graph();

        assert_callees(cg, f.call_site, &[f.b_m]);
        assert_reachable(&f.program, cg, &[f.main, f.b_m]);
        assert_unreachable(&f.program, cg, &[f.a_m, f.c_m]);
    }
}

#[test]
fn pta_call_graph_is_subset_of_cha() {
    let f = fixture_boxes();
    let cha = ChaBuilder::new().build(&f.program).unwrap();
    let pta = analyze_with(&f.program, ContextSensitivity::Object { k: 1 });

    for edge in pta.call_graph().edges() {
        assert!(cha.contains_edge(edge), "PTA edge missing from CHA: {:?}", edge);
    }
    assert!(pta.call_graph().reachable_count() <= cha.reachable_count());
}

#[test]
fn pta_implements_call_graph_builder() {
    let f = fixture_dispatch();
    let builder = PointerAnalysis::new(PtaConfig::default());
    let cg = builder.build(&f.program).unwrap();
    assert_callees(&cg, f.call_site, &[f.b_m]);
}

// ═══════════════════════════════════════════════════════════════════════════
// CONTEXT SENSITIVITY
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn container_precision_by_policy() {
    let f = fixture_boxes();
    // (policy, separates the two boxes)
    let cases = [
        (ContextSensitivity::Insensitive, false),
        (ContextSensitivity::CallSite { k: 1 }, true),
        (ContextSensitivity::Object { k: 1 }, true),
        // both boxes are allocated in the same class
        (ContextSensitivity::Type { k: 1 }, false),
    ];

    for (context, separates) in cases {
        let result = analyze_with(&f.program, context);
        if separates {
            assert_eq!(result.allocation_sites(f.r1), vec![f.o1_site], "{:?}", context);
            assert_eq!(result.allocation_sites(f.r2), vec![f.o2_site], "{:?}", context);
            assert!(!result.may_alias(f.r1, f.r2), "{:?}", context);
        } else {
            assert_eq!(result.allocation_sites(f.r1), vec![f.o1_site, f.o2_site], "{:?}", context);
            assert!(result.may_alias(f.r1, f.r2), "{:?}", context);
        }
    }
}

#[test]
fn object_sensitivity_analyzes_set_once_per_receiver() {
    let f = fixture_boxes();
    let result = analyze_with(&f.program, ContextSensitivity::Object { k: 1 });
    let contexts = result.contexts_of(f.set_this);

    assert_eq!(contexts.len(), 2);
    for ctx in contexts {
        assert_eq!(result.cs_points_to(ctx, f.set_this).len(), 1);
        assert_eq!(result.manager().context_of(ctx).depth(), 1);
    }
}

#[test]
fn recursion_terminates_with_bounded_contexts() {
    let f = fixture_recursion();
    for k in 1..=3 {
        let result = analyze_with(&f.program, ContextSensitivity::CallSite { k });

        assert_eq!(result.allocation_sites(f.result), vec![f.alloc_site]);
        assert_eq!(result.allocation_sites(f.param), vec![f.alloc_site]);
        assert!(result.call_graph().is_reachable(f.rec));
        for ctx in result.contexts_of(f.param) {
            assert!(result.manager().context_of(ctx).depth() <= k);
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HEAP ABSTRACTION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn static_fields_flow_across_methods() {
    let f = fixture_heap();
    let result = analyze_with(&f.program, ContextSensitivity::Insensitive);
    assert_eq!(result.allocation_sites(f.static_read), vec![f.alloc_site]);
}

#[test]
fn array_elements_are_index_insensitive() {
    let f = fixture_heap();
    let result = analyze_with(&f.program, ContextSensitivity::Object { k: 1 });

    assert_eq!(result.allocation_sites(f.array), vec![f.array_site]);
    assert_eq!(result.allocation_sites(f.element), vec![f.alloc_site]);
    assert!(!result.may_alias(f.array, f.element));
}

#[test]
fn heap_model_has_one_object_per_site() {
    let f = fixture_boxes();
    let insensitive = analyze_with(&f.program, ContextSensitivity::Insensitive);
    let sensitive = analyze_with(&f.program, ContextSensitivity::Object { k: 2 });

    // b1, b2, o1, o2
    assert_eq!(insensitive.heap_model().len(), 4);
    assert_eq!(sensitive.heap_model().len(), 4);
    assert_eq!(insensitive.stats().reachable_methods, sensitive.stats().reachable_methods);
}

// ========== EDGE CASES ==========

#[test]
fn arity_mismatch_is_fatal() {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A", None);
    let callee = b.add_method(a, "f", &[("p", Type::INT), ("q", Type::INT)], Type::Void, MethodModifiers::STATIC);
    let main = b.add_method(a, "main", &[], Type::Void, MethodModifiers::STATIC);
    let x = b.add_var(main, "x", Type::INT);
    b.assign_int(main, x, 1);
    let callee_ref = b.method_ref(callee);
    b.invoke(main, None, CallKind::Static, callee_ref, None, &[x]);
    b.add_entry_method(main);
    let program = b.build().unwrap();

    let err = PointerAnalysis::new(PtaConfig::default())
        .analyze(&program)
        .unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::ArityMismatch { expected: 2, found: 1, .. }
    ));
}

#[test]
fn unresolved_static_call_is_fatal() {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A", None);
    let main = b.add_method(a, "main", &[], Type::Void, MethodModifiers::STATIC);
    b.invoke(main, None, CallKind::Static, MethodRef::new(a, "missing()"), None, &[]);
    b.add_entry_method(main);
    let program = b.build().unwrap();

    let err = PointerAnalysis::new(PtaConfig::default())
        .analyze(&program)
        .unwrap_err();
    match err {
        AnalysisError::UnresolvedMethod { class, subsignature } => {
            assert_eq!(class, "A");
            assert_eq!(subsignature, "missing()");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(matches!(
        ChaBuilder::new().build(&program),
        Err(AnalysisError::UnresolvedMethod { .. })
    ));
}

#[test]
fn unreached_code_has_empty_points_to() {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A", None);
    let dead = b.add_method(a, "dead", &[], Type::Void, MethodModifiers::STATIC);
    let o = b.add_var(dead, "o", Type::class(a));
    b.alloc(dead, o, Type::class(a));
    let main = b.add_method(a, "main", &[], Type::Void, MethodModifiers::STATIC);
    b.add_entry_method(main);
    let program = b.build().unwrap();

    let result = analyze_with(&program, ContextSensitivity::Insensitive);
    assert!(result.points_to(o).is_empty());
    assert!(!result.call_graph().is_reachable(dead));
    assert_eq!(result.call_graph().reachable_count(), 1);
}

#[test]
fn iteration_limit_aborts_solver() {
    let f = fixture_boxes();
    let err = PointerAnalysis::new(PtaConfig::default().with_max_iterations(Some(1)))
        .analyze(&f.program)
        .unwrap_err();
    assert!(matches!(err, AnalysisError::IterationLimit { limit: 1, .. }));
}
