use lampshade_core::{
    ExtrusionMode, Point2, PrintSettings, PrinterSpecs, ProfileKind, ShapeParameters,
};
use lampshade_geometry::build_layers;
use lampshade_toolpath::{build_spiral, ExtrusionModel, GCodeValidator, GCodeWriter};

fn move_lines(text: &str) -> Vec<&str> {
    text.lines()
        .filter(|l| l.starts_with("G1 X") && l.contains(" E"))
        .collect()
}

fn z_of(line: &str) -> f64 {
    line.split_whitespace()
        .find_map(|w| w.strip_prefix('Z'))
        .and_then(|v| v.parse().ok())
        .unwrap()
}

#[test]
fn test_emitted_document_validates() {
    let shape = ShapeParameters::new(30.0, 25.0, 10.0, ProfileKind::Convex).unwrap();
    let printer = PrinterSpecs::default();
    let settings = PrintSettings::default();

    let layers = build_layers(&shape, printer.bed_center, settings.num_points, 0.2).unwrap();
    let spiral = build_spiral(&layers, 0.2).unwrap();
    let doc = GCodeWriter::new(&shape, &printer, &settings)
        .generate(&spiral)
        .unwrap();

    let moves = move_lines(doc.text());
    assert_eq!(moves.len(), spiral.len() - 1);
    assert!(moves.windows(2).all(|w| z_of(w[1]) >= z_of(w[0])));

    let summary = GCodeValidator::for_printer(&printer)
        .validate_text(doc.text())
        .unwrap();
    assert_eq!(summary.extruding_moves, moves.len());
    assert!((summary.total_extrusion - doc.stats().total_extrusion).abs() < 0.02);

    let expected_rate = ExtrusionModel::from_settings(&printer, &settings)
        .unwrap()
        .e_per_mm();
    assert!((summary.max_extrusion_rate - expected_rate).abs() < expected_rate * 0.05);
}

#[test]
fn test_absolute_mode_validates_too() {
    let shape = ShapeParameters::new(20.0, 20.0, 2.0, ProfileKind::Linear).unwrap();
    let printer = PrinterSpecs::default();
    let settings = PrintSettings {
        extrusion_mode: ExtrusionMode::Absolute,
        num_points: 32,
        ..Default::default()
    };

    let layers = build_layers(&shape, Point2::new(105.0, 105.0), 32, 0.2).unwrap();
    let spiral = build_spiral(&layers, 0.2).unwrap();
    let doc = GCodeWriter::new(&shape, &printer, &settings)
        .generate(&spiral)
        .unwrap();

    assert!(doc.text().contains("M82"));
    let summary = GCodeValidator::for_printer(&printer)
        .validate_text(doc.text())
        .unwrap();
    assert!((summary.total_extrusion - doc.stats().total_extrusion).abs() < 1e-4);
}

#[test]
fn test_write_to_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("out").join("shade.gcode");

    let shape = ShapeParameters::new(15.0, 15.0, 1.0, ProfileKind::Linear).unwrap();
    let printer = PrinterSpecs::default();
    let settings = PrintSettings::default();
    let layers = build_layers(&shape, printer.bed_center, 16, 0.2).unwrap();
    let spiral = build_spiral(&layers, 0.2).unwrap();
    let doc = GCodeWriter::new(&shape, &printer, &settings)
        .generate(&spiral)
        .unwrap();

    doc.write_to(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, doc.text());
    assert_eq!(written.len(), doc.stats().file_size);

    // Overwrite in place leaves a single file behind
    doc.write_to(&path).unwrap();
    let entries = std::fs::read_dir(path.parent().unwrap()).unwrap().count();
    assert_eq!(entries, 1);
}
