use approx::assert_relative_eq;
use lampshade_core::{PrintSettings, PrinterSpecs, ProfileKind, ShapeParameters};
use lampshade_toolpath::{compare_profiles, format_comparison_table, Pipeline, RunReport};

#[test]
fn test_default_shade_end_to_end() {
    let shape = ShapeParameters::new(30.0, 25.0, 50.0, ProfileKind::Linear).unwrap();
    let output = Pipeline::new(shape, PrinterSpecs::default(), PrintSettings::default())
        .run()
        .unwrap();

    assert!(output.printability.is_printable());
    assert_relative_eq!(output.analysis.max_overhang_angle, 5.71, epsilon = 0.01);
    assert_eq!(output.spiral.len(), 250 * 64);
    assert_eq!(output.stats().z_clamps, 0);

    // Roughly 250 laps of a ~27.5mm radius circle
    let expected_distance = 250.0 * 2.0 * std::f64::consts::PI * 27.5;
    let ratio = output.stats().total_distance / expected_distance;
    assert!(ratio > 0.98 && ratio < 1.02, "ratio = {}", ratio);

    let minutes = output.stats().total_distance / 1500.0 * 1.1;
    assert_relative_eq!(output.analysis.print_time_minutes, minutes, epsilon = 1e-9);
    assert_relative_eq!(
        output.analysis.material_grams,
        output.analysis.volume_mm3 / 1000.0 * 1.24,
        epsilon = 1e-9
    );
}

#[test]
fn test_report_serializes() {
    let shape = ShapeParameters::new(20.0, 20.0, 2.0, ProfileKind::Convex).unwrap();
    let pipeline = Pipeline::new(shape, PrinterSpecs::default(), PrintSettings::default());
    let output = pipeline.run().unwrap();
    let report = pipeline.report(&output);

    let json = serde_json::to_string_pretty(&report).unwrap();
    assert!(json.contains("\"profile\": \"convex\""));
    let parsed: RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.stats, report.stats);
    assert_eq!(parsed.overhang_warning, None);
}

#[test]
fn test_comparison_table_lists_all_profiles() {
    let shape = ShapeParameters::new(30.0, 25.0, 6.0, ProfileKind::Linear).unwrap();
    let pipeline = Pipeline::new(shape, PrinterSpecs::default(), PrintSettings::default());
    let rows = compare_profiles(&pipeline, &ProfileKind::ALL);
    let table = format_comparison_table(&rows);

    for name in ["Linear", "Concave", "Convex", "Sinusoidal"] {
        assert!(table.contains(name), "missing {}", name);
    }
    assert!(!table.contains("failed"));
}
