use anyhow::Context;
use lampshade::{init_logging, run, Config, BUILD_DATE, VERSION};
use std::path::PathBuf;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_logging()?;
    info!("lampshade {} ({})", VERSION, BUILD_DATE);

    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => Config::load_from_file(&path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => {
            let path = Config::default_path().ok().filter(|p| p.exists());
            match path {
                Some(path) => Config::load_from_file(&path)
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => Config::default(),
            }
        }
    };

    let outcome = run(&config)?;
    let analysis = &outcome.output.analysis;

    println!("G-code: {}", outcome.gcode_path.display());
    if let Some(report) = &outcome.report_path {
        println!("Report: {}", report.display());
    }
    println!(
        "Max overhang: {:.1} deg at z={:.1}mm",
        analysis.max_overhang_angle, analysis.max_overhang_z
    );
    println!("Volume: {:.0} mm3", analysis.volume_mm3);
    println!("Print time: {:.1} min", analysis.print_time_minutes);
    println!("Material: {:.1} g", analysis.material_grams);

    if let Some(table) = &outcome.comparison {
        println!();
        println!("{}", table);
    }

    Ok(())
}
