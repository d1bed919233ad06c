//! Generate a tessellation and write it out as a colored SVG.
//!
//! Run with: cargo run --example svg_demo

use std::fs::File;
use std::io::BufWriter;

use rust_circle_tessellation::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = TessellationConfigBuilder::new()
        .seed(1337)
        .canvas_size(CanvasSize::Medium)
        .radius_range(16.0, 64.0)?
        .build()?;

    println!(
        "Generating {}x{} tessellation (seed {})...",
        config.width(),
        config.height(),
        config.seed
    );

    let tess = Tessellation::generate(config)?;

    println!("  disks:          {}", tess.disk_count());
    println!("  triangles:      {}", tess.triangle_count());
    println!("  closed loops:   {}", tess.loops().len());
    println!("  unclosed edges: {}", tess.unclosed_edges().len());

    let field = PerlinColorField::new(config.color_seed, config.width(), config.height());
    let options = RenderOptions {
        fill: FillMode::Gradient,
        ..Default::default()
    };
    let doc = render(&tess, &field, &options);

    let file = File::create("out.svg")?;
    doc.write_to(&mut BufWriter::new(file))?;

    println!("Wrote out.svg");
    Ok(())
}
