//! Tests for API types and utilities

use crate::*;
use std::path::PathBuf;
use std::time::Duration;

#[test]
fn test_record_json_shape() {
    let record = ClassRecord::new("GeneratorRainbow")
        .with_root_class("ColProc")
        .with_base_classes(vec!["Generator".to_string()])
        .with_constructor(ConstructorSignature::new(vec![ParameterDescriptor::new(
            "Variable < uint32_t > *",
            "length",
        )]));

    let value = serde_json::to_value(&record).unwrap();
    assert_eq!(value["className"], "GeneratorRainbow");
    assert_eq!(value["rootClass"], "ColProc");
    assert_eq!(value["baseClass"][0], "Generator");
    assert_eq!(
        value["constructors"][0]["arguments"][0]["type"],
        "Variable < uint32_t > *"
    );
    assert_eq!(value["constructors"][0]["arguments"][0]["name"], "length");
}

#[test]
fn test_record_key_order() {
    let record = ClassRecord::new("A");
    let text = serde_json::to_string(&record).unwrap();
    assert_eq!(
        text,
        r#"{"className":"A","rootClass":"","baseClass":[],"constructors":[]}"#
    );
}

#[test]
fn test_parameter_key_order() {
    let text = serde_json::to_string(&ParameterDescriptor::new("int", "x")).unwrap();
    assert_eq!(text, r#"{"type":"int","name":"x"}"#);
}

#[test]
fn test_constructor_arity() {
    assert_eq!(ConstructorSignature::default().arity(), 0);
    let sig = ConstructorSignature::new(vec![
        ParameterDescriptor::new("int", "a"),
        ParameterDescriptor::new("float", "b"),
    ]);
    assert_eq!(sig.arity(), 2);
}

#[test]
fn test_scan_config_default() {
    let config = ScanConfig::default();
    assert_eq!(config.header_extensions, vec![".h".to_string()]);
    assert!(config.include_paths.is_empty());
    assert!(!config.parallel);
    assert!(config.parse.incomplete);
    assert!(config.parse.skip_function_bodies);
    assert!(config.parse.follow_includes);
}

#[test]
fn test_scan_config_presets() {
    let strict = ScanConfig::strict();
    assert!(!strict.parse.incomplete);

    let fast = ScanConfig::fast();
    assert!(fast.parallel);
    assert!(!fast.parse.follow_includes);
}

#[test]
fn test_scan_config_builders() {
    let config = ScanConfig::default()
        .with_parallel(true)
        .with_max_file_size(1024)
        .with_include_paths(["include", "third_party"])
        .with_header_extensions(["h", ".hpp"]);

    assert!(config.parallel);
    assert_eq!(config.max_file_size, 1024);
    assert_eq!(
        config.include_paths,
        vec![PathBuf::from("include"), PathBuf::from("third_party")]
    );
    assert_eq!(config.header_extensions, vec![".h", ".hpp"]);
}

#[test]
fn test_scan_config_serde_roundtrip() {
    let config = ScanConfig::strict().with_include_paths(["inc"]);
    let json = serde_json::to_string(&config).unwrap();
    let back: ScanConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(config, back);
}

#[test]
fn test_metrics_rates() {
    let mut metrics = ScanMetrics::default();
    assert_eq!(metrics.success_rate(), 0.0);
    assert_eq!(metrics.avg_parse_time(), Duration::ZERO);

    metrics.files_attempted = 4;
    metrics.files_parsed = 2;
    metrics.total_parse_time = Duration::from_millis(100);
    assert_eq!(metrics.success_rate(), 0.5);
    assert_eq!(metrics.avg_parse_time(), Duration::from_millis(50));
}

#[test]
fn test_metrics_merge() {
    let mut a = ScanMetrics {
        files_attempted: 1,
        files_parsed: 1,
        candidates_seen: 3,
        ..Default::default()
    };
    let b = ScanMetrics {
        files_attempted: 2,
        files_failed: 1,
        classes_admitted: 5,
        ..Default::default()
    };
    a.merge(&b);
    assert_eq!(a.files_attempted, 3);
    assert_eq!(a.files_failed, 1);
    assert_eq!(a.candidates_seen, 3);
    assert_eq!(a.classes_admitted, 5);
}

#[test]
fn test_diagnostic_display() {
    let diag = Diagnostic::error("a.h", 3, 7, "expected ';'");
    assert_eq!(diag.to_string(), "a.h:3:7: error: expected ';'");

    let warn = Diagnostic::warning("b.h", 1, 1, "'x.h' file not found");
    assert_eq!(warn.severity, Severity::Warning);
    assert_eq!(warn.to_string(), "b.h:1:1: warning: 'x.h' file not found");
}

#[test]
fn test_class_like_kinds() {
    assert!(DeclKind::ClassDecl.is_class_like());
    assert!(DeclKind::ClassTemplate.is_class_like());
    assert!(DeclKind::StructDecl.is_class_like());
    assert!(!DeclKind::Constructor.is_class_like());
    assert!(!DeclKind::Namespace.is_class_like());
}
