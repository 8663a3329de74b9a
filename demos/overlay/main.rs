mod gltf;
mod svg;

use trajectoid::{build, Signal, TrajectoidConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Two tones sampled for one second
    let signal = Signal::tones(&[(1.0, 50.0), (1.0, 120.0)], 1000.0, 1.0)?;
    let trajectoids = build(&signal, &TrajectoidConfig::default())?;

    println!("Running SVG examples...");
    svg::run(&trajectoids)?;
    println!("Running GLTF examples...");
    gltf::run(&trajectoids)?;
    Ok(())
}
