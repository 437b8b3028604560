//! Whole-program pipeline tests
//!
//! Config loading → call graph → ICFG → constant propagation, driven
//! through [`WholeProgramAnalyzer`].

#[path = "../common/mod.rs"]
mod common;
use common::*;

use codegraph_pta::config::{
    AnalysisConfig, CallGraphAlgorithm, ConfigError, ContextSensitivity, Preset, MAX_CONTEXT_DEPTH,
};
use codegraph_pta::shared::models::{MethodModifiers, ProgramBuilder, Type};
use codegraph_pta::{AnalysisError, AnalysisReport, Value, WholeProgramAnalyzer};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::Write;

// ═══════════════════════════════════════════════════════════════════════════
// PRESETS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn presets_drive_call_graph_choice() {
    init_tracing();
    let f = fixture_dispatch();
    // (preset, value of x after the virtual call)
    let cases = [
        (Preset::Fast, Value::NotAConstant),
        (Preset::Balanced, Value::Constant(2)),
        (Preset::Thorough, Value::Constant(2)),
    ];

    for (preset, expected) in cases {
        let result = WholeProgramAnalyzer::new(AnalysisConfig::preset(preset))
            .run(&f.program)
            .unwrap();
        assert_eq!(result.value_before(f.after_call, f.result), expected, "{preset}");
        assert_eq!(
            result.pointer_analysis().is_some(),
            preset.call_graph() == CallGraphAlgorithm::Pta
        );
    }
}

#[test]
fn report_summarizes_run() {
    let f = fixture_dispatch();
    let result = WholeProgramAnalyzer::new(AnalysisConfig::default())
        .run(&f.program)
        .unwrap();
    let report = result.report();

    assert_eq!(report.call_graph, CallGraphAlgorithm::Pta);
    assert_eq!(report.reachable_methods, 2);
    assert_eq!(report.call_edges, 1);
    // main: entry, 3 stmts, exit; B.m: entry, 2 stmts, exit
    assert_eq!(report.icfg_nodes, 9);
    let stats = report.pta.as_ref().expect("pta stats");
    assert_eq!(stats.reachable_methods, 2);

    let json = report.to_json().unwrap();
    let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, report);
}

#[test]
fn cha_report_omits_pta_stats() {
    let f = fixture_dispatch();
    let result = WholeProgramAnalyzer::new(AnalysisConfig::preset(Preset::Fast))
        .run(&f.program)
        .unwrap();
    let report = result.report();

    assert_eq!(report.reachable_methods, 4);
    assert_eq!(report.call_edges, 3);
    assert!(report.pta.is_none());
    assert!(!report.to_json().unwrap().contains("\"pta\""));
}

// ═══════════════════════════════════════════════════════════════════════════
// YAML CONFIG
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn yaml_file_configures_run() {
    init_tracing();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "version: 1\npreset: fast\noverrides:\n  call_graph: pta\n  pta:\n    context:\n      kind: call_site\n      k: 2"
    )
    .unwrap();

    let config = AnalysisConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.preset, Preset::Fast);
    assert_eq!(config.call_graph, CallGraphAlgorithm::Pta);
    assert_eq!(config.pta.context, ContextSensitivity::CallSite { k: 2 });

    let f = fixture_boxes();
    let result = WholeProgramAnalyzer::new(config).run(&f.program).unwrap();
    let pta = result.pointer_analysis().expect("pta result");
    assert_eq!(pta.allocation_sites(f.r1), vec![f.o1_site]);
}

#[test]
fn invalid_yaml_config_is_rejected() {
    let too_deep = format!(
        "version: 1\npreset: balanced\noverrides:\n  pta:\n    context:\n      kind: object\n      k: {}\n",
        MAX_CONTEXT_DEPTH + 1
    );
    assert!(matches!(
        AnalysisConfig::from_yaml_str(&too_deep),
        Err(ConfigError::Range { .. })
    ));
    assert!(matches!(
        AnalysisConfig::from_yaml_str("version: 2\npreset: fast\n"),
        Err(ConfigError::UnsupportedVersion { found: 2, .. })
    ));
    assert!(matches!(
        AnalysisConfig::from_yaml_str("preset: fast\n"),
        Err(ConfigError::MissingVersion)
    ));
}

// ========== EDGE CASES ==========

#[test]
fn run_rejects_invalid_config() {
    let f = fixture_dispatch();
    let config = AnalysisConfig::default().pta(|c| c.with_context(ContextSensitivity::Type { k: 0 }));
    let err = WholeProgramAnalyzer::new(config).run(&f.program).unwrap_err();
    assert!(matches!(err, AnalysisError::Config(_)));
}

#[test]
fn program_without_entry_fails() {
    let mut b = ProgramBuilder::new();
    let a = b.add_class("A", None);
    b.add_method(a, "m", &[], Type::Void, MethodModifiers::STATIC);
    let program = b.build().unwrap();

    for preset in [Preset::Fast, Preset::Balanced] {
        let err = WholeProgramAnalyzer::new(AnalysisConfig::preset(preset))
            .run(&program)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::NoEntryMethod), "{preset}");
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PROPERTY TESTS
// ═══════════════════════════════════════════════════════════════════════════

fn context_strategy() -> impl Strategy<Value = ContextSensitivity> {
    let k = 1usize..=MAX_CONTEXT_DEPTH;
    prop_oneof![
        Just(ContextSensitivity::Insensitive),
        k.clone().prop_map(|k| ContextSensitivity::CallSite { k }),
        k.clone().prop_map(|k| ContextSensitivity::Object { k }),
        k.prop_map(|k| ContextSensitivity::Type { k }),
    ]
}

fn config_strategy() -> impl Strategy<Value = AnalysisConfig> {
    (
        prop_oneof![Just(Preset::Fast), Just(Preset::Balanced), Just(Preset::Thorough)],
        prop_oneof![Just(CallGraphAlgorithm::Cha), Just(CallGraphAlgorithm::Pta)],
        context_strategy(),
        proptest::option::of(1usize..100_000),
        proptest::option::of(1usize..100_000),
    )
        .prop_map(|(preset, call_graph, context, pta_limit, dataflow_limit)| {
            AnalysisConfig::preset(preset)
                .call_graph(call_graph)
                .pta(|c| c.with_context(context).with_max_iterations(pta_limit))
                .dataflow(|c| c.with_max_iterations(dataflow_limit))
        })
}

proptest! {
    #[test]
    fn yaml_export_reloads_identically(config in config_strategy()) {
        let yaml = config.to_yaml().unwrap();
        let loaded = AnalysisConfig::from_yaml_str(&yaml).unwrap();
        prop_assert_eq!(loaded, config);
    }
}
