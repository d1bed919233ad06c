//! Render a tessellation with its debug overlays: hollow disk outlines and
//! the colored dead-edge loops the closer filled.
//!
//! Run with: cargo run --example debug_overlay

use std::fs::File;
use std::io::BufWriter;

use rust_circle_tessellation::*;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let config = TessellationConfigBuilder::new()
        .seed(1337)
        .canvas_size(CanvasSize::Medium)
        .build()?;

    let tess = Tessellation::generate(config)?;

    println!(
        "{} disks, {} triangles, {} loops",
        tess.disk_count(),
        tess.triangle_count(),
        tess.loops().len()
    );
    for (i, l) in tess.loops().iter().enumerate() {
        println!("  loop {}: {} edges", i, l.len());
    }

    let field = PerlinColorField::new(config.color_seed, config.width(), config.height());
    let options = RenderOptions {
        fill: FillMode::Solid,
        draw_disks: true,
        draw_loops: true,
    };
    let doc = render(&tess, &field, &options);

    let file = File::create("debug.svg")?;
    doc.write_to(&mut BufWriter::new(file))?;

    println!("Wrote debug.svg");
    Ok(())
}
