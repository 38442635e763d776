use image::ImageReader;
use setlens::paint::paint_rings;
use setlens::{parse, render_instructions, RenderParams};

#[cfg(feature = "tracing")]
use setlens::core::init_tracing;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    init_tracing(false);

    let mut args = std::env::args().skip(1);
    let (Some(response), Some(photo)) = (args.next(), args.next()) else {
        eprintln!("Usage: render_overlay <response.json> <photo> [out.png]");
        return Ok(());
    };
    let out = args.next().unwrap_or_else(|| "overlay.png".to_string());

    let snapshot = parse(&std::fs::read_to_string(response)?)?;
    let rings = render_instructions(&snapshot, &RenderParams::default());

    let mut img = ImageReader::open(photo)?.decode()?.to_rgb8();
    paint_rings(&mut img, &rings);
    img.save(&out)?;

    println!(
        "{} cards, {} sets, {} rings -> {out}",
        snapshot.len(),
        snapshot.groups().len(),
        rings.len()
    );
    Ok(())
}
