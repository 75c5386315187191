use super::*;

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_config_matches_flipbook_defaults() {
    let config = AnnotationConfig::default();
    assert_eq!(config.namespace, "flipbook");
    assert_eq!(config.default_tool, Tool::Highlighter);
    assert_eq!(config.brush, BrushLimits { default: 40.0, min: 1.0, max: 100.0 });
    assert_eq!(config.resize_debounce_ms, 150);
    assert_eq!(config.swatches.len(), 4);
    assert_eq!(config.swatches[0].highlight, Color::rgba(255, 255, 0, 0.2));
    assert!(config.validate().is_ok());
}

#[test]
fn default_highlights_are_translucent_and_pens_opaque() {
    for swatch in AnnotationConfig::default().swatches {
        assert!(swatch.pen.is_opaque());
        assert!(!swatch.highlight.is_opaque());
    }
}

// =============================================================
// from_json
// =============================================================

#[test]
fn empty_object_yields_defaults() {
    assert_eq!(AnnotationConfig::from_json("{}").unwrap(), AnnotationConfig::default());
}

#[test]
fn partial_json_overrides_only_given_fields() {
    let config = AnnotationConfig::from_json(r#"{"namespace":"phys101","brush":{"max":60}}"#).unwrap();
    assert_eq!(config.namespace, "phys101");
    assert_eq!(config.brush.max, 60.0);
    assert_eq!(config.brush.default, 40.0);
    assert_eq!(config.default_tool, Tool::Highlighter);
}

#[test]
fn swatches_parse_from_css_strings() {
    let raw = r##"{"swatches":[{"pen":"#ff0000","highlight":"rgba(255, 0, 0, 0.25)"}],"default_tool":"pen"}"##;
    let config = AnnotationConfig::from_json(raw).unwrap();
    assert_eq!(config.swatches[0].pen, Color::rgba(255, 0, 0, 1.0));
    assert_eq!(config.swatches[0].highlight, Color::rgba(255, 0, 0, 0.25));
    assert_eq!(config.default_tool, Tool::Pen);
}

#[test]
fn malformed_json_is_rejected() {
    assert!(matches!(AnnotationConfig::from_json("{"), Err(ConfigError::Json(_))));
}

#[test]
fn bad_swatch_color_is_rejected() {
    let raw = r##"{"swatches":[{"pen":"chartreuse-ish","highlight":"#fff"}]}"##;
    assert!(matches!(AnnotationConfig::from_json(raw), Err(ConfigError::Json(_))));
}

#[test]
fn empty_namespace_is_rejected() {
    assert!(matches!(AnnotationConfig::from_json(r#"{"namespace":"  "}"#), Err(ConfigError::EmptyNamespace)));
}

#[test]
fn empty_swatches_are_rejected() {
    assert!(matches!(AnnotationConfig::from_json(r#"{"swatches":[]}"#), Err(ConfigError::NoSwatches)));
}

#[test]
fn inverted_brush_limits_are_rejected() {
    let err = AnnotationConfig::from_json(r#"{"brush":{"min":50,"default":40,"max":100}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::BrushLimits { .. }));
}

#[test]
fn zero_brush_min_is_rejected() {
    let err = AnnotationConfig::from_json(r#"{"brush":{"min":0,"default":40,"max":100}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::BrushLimits { .. }));
}

// =============================================================
// Helpers
// =============================================================

#[test]
fn brush_clamp_bounds_and_non_finite() {
    let brush = BrushLimits::default();
    assert_eq!(brush.clamp(500.0), 100.0);
    assert_eq!(brush.clamp(0.0), 1.0);
    assert_eq!(brush.clamp(12.5), 12.5);
    assert_eq!(brush.clamp(f64::NAN), 40.0);
}

#[test]
fn swatch_lookup_by_pen_color() {
    let config = AnnotationConfig::default();
    let pen = config.swatches[2].pen;
    assert_eq!(config.swatch_index_for_pen(&pen), Some(2));
    assert_eq!(config.swatch_index_for_pen(&Color::rgba(1, 2, 3, 1.0)), None);
}
