use plotters::prelude::*;
use trajectoid::{Color as LayerColor, Figure, Trajectoids};

fn rgb(color: LayerColor) -> RGBColor {
    let (r, g, b) = color.to_rgb8();
    RGBColor(r, g, b)
}

fn draw_series(figure: &Figure, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    let Some(((x0, x1), (y0, y1))) = figure.series_bounds() else {
        return Ok(());
    };
    let pad = 0.05 * (y1 - y0).max(1e-9);

    let root = SVGBackend::new(filename, (1024, 480)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&figure.title, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(x0..x1, (y0 - pad)..(y1 + pad))?;

    chart.configure_mesh().draw()?;

    for series in &figure.series {
        let color = rgb(series.color()).mix(series.color().a as f64);
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

fn draw_meshes(figure: &Figure, filename: &str) -> Result<(), Box<dyn std::error::Error>> {
    if figure.meshes.is_empty() {
        return Ok(());
    }
    let mut min = [f64::INFINITY; 3];
    let mut max = [f64::NEG_INFINITY; 3];
    for layer in &figure.meshes {
        for v in &layer.mesh.vertices {
            for k in 0..3 {
                min[k] = min[k].min(v[k]);
                max[k] = max[k].max(v[k]);
            }
        }
    }

    let root = SVGBackend::new(filename, (1024, 768)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&figure.title, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(30)
        .y_label_area_size(30)
        .build_cartesian_3d(min[0]..max[0], min[1]..max[1], min[2]..max[2])?;

    chart.configure_axes().draw()?;

    for layer in &figure.meshes {
        let color = rgb(layer.color).mix(0.15);
        let vertices = &layer.mesh.vertices;
        chart
            .draw_series(layer.mesh.faces.iter().map(|face| {
                let poly: Vec<(f64, f64, f64)> = face
                    .iter()
                    .map(|&i| (vertices[i][0], vertices[i][1], vertices[i][2]))
                    .collect();
                Polygon::new(poly, color.filled())
            }))?
            .label(layer.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
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

pub fn run(trajectoids: &Trajectoids) -> Result<(), Box<dyn std::error::Error>> {
    draw_series(&trajectoids.reconstruction_figure()?, "overlay_reconstruction.svg")?;
    draw_meshes(&trajectoids.hull_figure(), "overlay_rounded_hull.svg")?;
    draw_meshes(&trajectoids.star_figure(), "overlay_star_body.svg")?;
    Ok(())
}
