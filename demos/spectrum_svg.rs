use plotters::prelude::*;
use trajectoid::{build, Signal, TrajectoidConfig};

// Usage: cargo run --example spectrum_svg [config.json]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => TrajectoidConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => TrajectoidConfig::default(),
    };
    let signal = Signal::tones(&[(1.0, 50.0), (1.0, 120.0), (0.3, 310.0)], 1000.0, 1.0)?;
    let trajectoids = build(&signal, &config)?;
    let figure = trajectoids.spectrum_figure()?;

    let filename = "spectrum.svg";
    let root = SVGBackend::new(filename, (1024, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let y_max = figure
        .series
        .iter()
        .filter_map(|s| s.y_range())
        .fold(0.0f64, |m, (_, hi)| m.max(hi));
    let x_max = signal.sampling_rate() / 2.0;

    let mut chart = ChartBuilder::on(&root)
        .caption(&figure.title, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..x_max, 0.0..y_max * 1.05)?;

    chart
        .configure_mesh()
        .x_desc("Frequency [Hz]")
        .y_desc("Magnitude")
        .draw()?;

    for series in &figure.series {
        let (r, g, b) = series.color().to_rgb8();
        let color = RGBColor(r, g, b).mix(series.color().a as f64);
        chart
            .draw_series(LineSeries::new(
                series.x().iter().copied().zip(series.y().iter().copied()),
                color.stroke_width(1),
            ))?
            .label(series.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    println!("Output saved to {}", filename);
    Ok(())
}
