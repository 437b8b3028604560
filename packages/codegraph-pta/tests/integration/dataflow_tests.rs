//! Dataflow integration tests
//!
//! Constant propagation within one method and across the ICFG built from
//! both call graph algorithms.

#[path = "../common/mod.rs"]
mod common;
use common::*;

use codegraph_pta::config::{DataflowConfig, PtaConfig};
use codegraph_pta::features::dataflow::{CfgNode, IcfgEdge};
use codegraph_pta::{
    AnalysisError, CallGraphBuilder, ChaBuilder, ConstantPropagationAnalyzer, Icfg, IcfgNode,
    PointerAnalysis, Value,
};

fn analyzer() -> ConstantPropagationAnalyzer {
    ConstantPropagationAnalyzer::new(DataflowConfig::default())
}

// ═══════════════════════════════════════════════════════════════════════════
// INTRAPROCEDURAL
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn straight_line_folding() {
    let f = fixture_arithmetic();
    let result = analyzer().analyze_method(&f.program, f.method).unwrap();
    let exit = result.in_fact(CfgNode::Exit);

    assert_eq!(exit.get(f.z), Value::Constant(3));
    // p is a parameter, so z * p is unknown
    assert_eq!(exit.get(f.w), Value::NotAConstant);
    // division by a constant zero yields no value and no fault
    assert_eq!(exit.get(f.q), Value::Undefined);
}

#[test]
fn branch_merge_loses_constant() {
    let f = fixture_diamond();
    let result = analyzer().analyze_method(&f.program, f.method).unwrap();

    assert_eq!(result.in_fact(CfgNode::Stmt(f.merge)).get(f.x), Value::NotAConstant);
    assert_eq!(result.out_fact(CfgNode::Stmt(f.merge)).get(f.y), Value::NotAConstant);
}

// ═══════════════════════════════════════════════════════════════════════════
// ICFG CONSTRUCTION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn icfg_call_site_edges() {
    let f = fixture_dispatch();
    let cg = ChaBuilder::new().build(&f.program).unwrap();
    let icfg = Icfg::build(&f.program, &cg);
    let call = IcfgNode::Stmt(f.call_site);

    assert!(icfg.is_call_site(call));
    let mut callees = icfg.callees_of(f.call_site);
    callees.sort();
    assert_eq!(callees, vec![f.a_m, f.b_m, f.c_m]);
    assert_eq!(icfg.return_sites_of(f.call_site), vec![IcfgNode::Stmt(f.after_call)]);

    // every callee exit returns to the statement after the call
    let returns: Vec<_> = icfg
        .in_edges(IcfgNode::Stmt(f.after_call))
        .into_iter()
        .filter(|(_, edge)| matches!(edge, IcfgEdge::Return { .. }))
        .map(|(source, _)| source)
        .collect();
    assert_eq!(returns.len(), 3);
    assert!(returns.contains(&Icfg::exit_of(f.b_m)));
    assert_eq!(icfg.method_of(call), Some(f.main));
}

#[test]
fn icfg_follows_pta_call_graph() {
    let f = fixture_dispatch();
    let cg = PointerAnalysis::new(PtaConfig::default()).build(&f.program).unwrap();
    let icfg = Icfg::build(&f.program, &cg);

    assert_eq!(icfg.callees_of(f.call_site), vec![f.b_m]);
    assert!(icfg.contains(Icfg::entry_of(f.b_m)));
    assert!(!icfg.contains(Icfg::entry_of(f.a_m)));
    assert_eq!(icfg.methods().len(), 2);
}

// ═══════════════════════════════════════════════════════════════════════════
// INTERPROCEDURAL
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn constant_through_identity_call() {
    let f = fixture_identity(false);
    let cg = ChaBuilder::new().build(&f.program).unwrap();
    let icfg = Icfg::build(&f.program, &cg);
    let result = analyzer().analyze_icfg(&f.program, &icfg).unwrap();

    assert_eq!(result.in_fact(IcfgNode::Stmt(f.last)).get(f.x), Value::Constant(7));
}

#[test]
fn callee_facts_merge_across_call_sites() {
    let f = fixture_identity(true);
    let cg = ChaBuilder::new().build(&f.program).unwrap();
    let icfg = Icfg::build(&f.program, &cg);
    let result = analyzer().analyze_icfg(&f.program, &icfg).unwrap();
    let at_end = result.in_fact(IcfgNode::Stmt(f.last));

    // id(7) and id(8) share one callee fact
    assert_eq!(at_end.get(f.x), Value::NotAConstant);
    assert_eq!(at_end.get(f.y.unwrap()), Value::NotAConstant);
}

#[test]
fn dispatch_precision_reaches_constants() {
    let f = fixture_dispatch();

    let cha = ChaBuilder::new().build(&f.program).unwrap();
    let cha_icfg = Icfg::build(&f.program, &cha);
    let cha_result = analyzer().analyze_icfg(&f.program, &cha_icfg).unwrap();
    assert_eq!(
        cha_result.in_fact(IcfgNode::Stmt(f.after_call)).get(f.result),
        Value::NotAConstant
    );

    let pta = PointerAnalysis::new(PtaConfig::default()).build(&f.program).unwrap();
    let pta_icfg = Icfg::build(&f.program, &pta);
    let pta_result = analyzer().analyze_icfg(&f.program, &pta_icfg).unwrap();
    assert_eq!(
        pta_result.in_fact(IcfgNode::Stmt(f.after_call)).get(f.result),
        Value::Constant(2)
    );
}

// ========== EDGE CASES ==========

#[test]
fn unreached_method_stays_bottom() {
    let f = fixture_dispatch();
    let pta = PointerAnalysis::new(PtaConfig::default()).build(&f.program).unwrap();
    let icfg = Icfg::build(&f.program, &pta);
    let result = analyzer().analyze_icfg(&f.program, &icfg).unwrap();

    assert!(result.out_fact(Icfg::exit_of(f.c_m)).is_empty());
}

#[test]
fn dataflow_iteration_limit() {
    let f = fixture_diamond();
    let err = ConstantPropagationAnalyzer::new(DataflowConfig::default().with_max_iterations(Some(1)))
        .analyze_method(&f.program, f.method)
        .unwrap_err();
    assert!(matches!(err, AnalysisError::IterationLimit { limit: 1, .. }));
}
