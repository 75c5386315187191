use super::*;
use crate::store::MemoryStore;

fn kv_with(entries: &[(&str, &str)]) -> MemoryStore {
    let mut kv = MemoryStore::new();
    for (k, v) in entries {
        kv.set(k, v).unwrap();
    }
    kv
}

// =============================================================
// Keys
// =============================================================

#[test]
fn keys_are_namespaced() {
    assert_eq!(tool_key("flipbook"), "flipbook-lastDrawMode");
    assert_eq!(color_key("flipbook"), "flipbook-lastColor");
    assert_eq!(brush_key("flipbook"), "flipbook-lastBrushSize");
}

// =============================================================
// Load
// =============================================================

#[test]
fn empty_store_yields_defaults() {
    let config = AnnotationConfig::default();
    let prefs = Preferences::load(&MemoryStore::new(), &config);
    assert_eq!(prefs, Preferences::defaults(&config));
    assert_eq!(prefs.tool, Tool::Highlighter);
    assert_eq!(prefs.brush_size, 40.0);
}

#[test]
fn stored_values_are_restored() {
    let config = AnnotationConfig::default();
    let pen = config.swatches[1].pen.to_css();
    let kv = kv_with(&[
        ("flipbook-lastDrawMode", "pen"),
        ("flipbook-lastColor", pen.as_str()),
        ("flipbook-lastBrushSize", "25"),
    ]);
    let prefs = Preferences::load(&kv, &config);
    assert_eq!(prefs, Preferences { tool: Tool::Pen, swatch_index: 1, brush_size: 25.0 });
}

#[test]
fn unknown_tool_falls_back_to_config_default() {
    let config = AnnotationConfig { default_tool: Tool::Eraser, ..AnnotationConfig::default() };
    let kv = kv_with(&[("flipbook-lastDrawMode", "lasso")]);
    assert_eq!(Preferences::load(&kv, &config).tool, Tool::Eraser);
}

#[test]
fn unknown_color_falls_back_to_first_swatch() {
    let config = AnnotationConfig::default();
    let kv = kv_with(&[("flipbook-lastColor", "#123456")]);
    assert_eq!(Preferences::load(&kv, &config).swatch_index, 0);
    let kv = kv_with(&[("flipbook-lastColor", "not a color")]);
    assert_eq!(Preferences::load(&kv, &config).swatch_index, 0);
}

#[test]
fn brush_size_is_clamped_or_defaulted() {
    let config = AnnotationConfig::default();
    let kv = kv_with(&[("flipbook-lastBrushSize", "900")]);
    assert_eq!(Preferences::load(&kv, &config).brush_size, 100.0);
    let kv = kv_with(&[("flipbook-lastBrushSize", "fat")]);
    assert_eq!(Preferences::load(&kv, &config).brush_size, 40.0);
}

#[test]
fn other_namespace_is_ignored() {
    let config = AnnotationConfig { namespace: "other".into(), ..AnnotationConfig::default() };
    let kv = kv_with(&[("flipbook-lastDrawMode", "pen")]);
    assert_eq!(Preferences::load(&kv, &config).tool, Tool::Highlighter);
}

// =============================================================
// Save
// =============================================================

#[test]
fn save_then_load_round_trips() {
    let config = AnnotationConfig::default();
    let mut kv = MemoryStore::new();
    save_tool(&mut kv, "flipbook", Tool::Eraser);
    save_color(&mut kv, "flipbook", &config.swatches[3]);
    save_brush_size(&mut kv, "flipbook", 12.5);
    let prefs = Preferences::load(&kv, &config);
    assert_eq!(prefs, Preferences { tool: Tool::Eraser, swatch_index: 3, brush_size: 12.5 });
}

#[test]
fn tool_is_stored_by_name() {
    let mut kv = MemoryStore::new();
    save_tool(&mut kv, "flipbook", Tool::Highlighter);
    assert_eq!(kv.get("flipbook-lastDrawMode"), Some("highlight".to_string()));
}

#[test]
fn save_failure_is_swallowed() {
    let mut kv = MemoryStore::with_quota(4);
    save_tool(&mut kv, "flipbook", Tool::Pen);
    assert_eq!(kv.get("flipbook-lastDrawMode"), None);
}

// =============================================================
// Tool config
// =============================================================

#[test]
fn to_tool_config_resolves_swatch() {
    let config = AnnotationConfig::default();
    let prefs = Preferences { tool: Tool::Pen, swatch_index: 2, brush_size: 30.0 };
    let tools = prefs.to_tool_config(&config);
    assert_eq!(tools.swatch, config.swatches[2]);
    assert_eq!(tools.tool, Tool::Pen);
    assert_eq!(tools.brush_size, 30.0);
}

#[test]
fn to_tool_config_clamps_out_of_range_index() {
    let config = AnnotationConfig::default();
    let prefs = Preferences { tool: Tool::Pen, swatch_index: 99, brush_size: 30.0 };
    assert_eq!(prefs.to_tool_config(&config).swatch_index, 3);
}
