use camino::Utf8PathBuf;
use miette::{IntoDiagnostic, WrapErr, miette};
use shadowcard::{Density, Edges, Px, Size, render_svg};
use std::fs;

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
        std::process::exit(1);
    }

    match args[1].as_str() {
        "preview" => preview(&args[2..]),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            usage();
            std::process::exit(1);
        }
    }
}

fn usage() {
    eprintln!("Usage: cargo xtask <command>");
    eprintln!("Commands:");
    eprintln!("  preview <style-file> [--width W] [--height H] [--density D] [--padding P] [--png OUT]");
    eprintln!("      Render a style file to SVG on stdout, or to a PNG file");
}

struct PreviewArgs {
    style: Utf8PathBuf,
    width: f32,
    height: f32,
    density: f32,
    padding: f32,
    png: Option<Utf8PathBuf>,
}

fn parse_preview_args(args: &[String]) -> miette::Result<PreviewArgs> {
    let mut parsed = PreviewArgs {
        style: Utf8PathBuf::new(),
        width: 320.0,
        height: 180.0,
        density: 1.0,
        padding: 24.0,
        png: None,
    };
    let mut style = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| miette!("{flag} needs a value"))
        };
        let number = |flag: &str, v: String| {
            v.parse::<f32>()
                .into_diagnostic()
                .wrap_err_with(|| format!("{flag} expects a number, got `{v}`"))
        };
        match arg.as_str() {
            "--width" => parsed.width = number("--width", value("--width")?)?,
            "--height" => parsed.height = number("--height", value("--height")?)?,
            "--density" => parsed.density = number("--density", value("--density")?)?,
            "--padding" => parsed.padding = number("--padding", value("--padding")?)?,
            "--png" => parsed.png = Some(Utf8PathBuf::from(value("--png")?)),
            other if other.starts_with("--") => return Err(miette!("unknown flag {other}")),
            other => style = Some(Utf8PathBuf::from(other)),
        }
    }

    parsed.style = style.ok_or_else(|| miette!("missing <style-file>"))?;
    Ok(parsed)
}

fn preview(args: &[String]) -> miette::Result<()> {
    let args = parse_preview_args(args)?;
    let source = fs::read_to_string(&args.style)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {}", args.style))?;

    let density = Density::try_new(args.density).into_diagnostic()?;
    let bounds = Size::new(Px(args.width), Px(args.height));
    let svg = render_svg(&source, bounds, Edges::splat(Px(args.padding)), density)?;

    match args.png {
        None => {
            print!("{}", svg);
            Ok(())
        }
        Some(out) => {
            let png = rasterize(&svg)?;
            fs::write(&out, png)
                .into_diagnostic()
                .wrap_err_with(|| format!("writing {}", out))?;
            eprintln!("Wrote {}", out);
            Ok(())
        }
    }
}

/// Rasterize on a light gray backdrop so white cards and their shadows show up
fn rasterize(svg: &str) -> miette::Result<Vec<u8>> {
    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options).into_diagnostic()?;
    let size = tree.size().to_int_size();

    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| miette!("cannot allocate a {}x{} pixmap", size.width(), size.height()))?;
    pixmap.fill(tiny_skia::Color::from_rgba8(0xEE, 0xEE, 0xEE, 0xFF));

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap.encode_png().into_diagnostic()
}
