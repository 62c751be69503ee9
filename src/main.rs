use clap::Parser;
use std::path::PathBuf;

use svg2fourier::output::Drawing;
use svg2fourier::{analyze, analyze_svg, svg, FourierConfig, Segmentation};

#[derive(Parser)]
#[command(
    name = "svg2fourier",
    about = "SVG path outlines to epicycle Fourier coefficients"
)]
struct Cli {
    /// Input SVG file
    #[arg(short, long)]
    input: PathBuf,

    /// Treat the input file as raw path data instead of an SVG document
    #[arg(long)]
    raw: bool,

    /// Rotating vectors computed per subpath
    #[arg(short = 'n', long, default_value = "200")]
    coefficients: usize,

    /// Give every segment an equal parameter range instead of
    /// weighting by arc length (pen speed varies with segment length)
    #[arg(long)]
    equal_split: bool,

    /// Arc-length sampling step for cubic segments
    #[arg(long, default_value = "0.01")]
    step: f64,

    /// Output JSON path (stdout if omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let config = FourierConfig {
        coefficients: cli.coefficients,
        segmentation: if cli.equal_split {
            Segmentation::Equal
        } else {
            Segmentation::ByDistance
        },
        dt: cli.step,
    };

    let content = std::fs::read_to_string(&cli.input)?;
    let analysis = if cli.raw {
        analyze(&content, &config)?
    } else {
        if let Some((width, height)) = svg::dimensions(&content) {
            eprintln!("  Source      {}x{} pt", width, height);
        }
        analyze_svg(&content, &config)?
    };

    let segments: usize = analysis.paths.iter().map(|p| p.len()).sum();
    let bounds = analysis.bounds;
    eprintln!(
        "  Parse       {} subpaths \u{2192} {} segments",
        analysis.paths.len(),
        segments,
    );
    eprintln!(
        "  Bounds      x [{:.2}, {:.2}]  y [{:.2}, {:.2}]",
        bounds.x0, bounds.x1, bounds.y0, bounds.y1,
    );
    eprintln!(
        "  Coeffs      {} per subpath ({})",
        config.coefficients,
        if cli.equal_split { "equal split" } else { "by distance" },
    );

    let drawing = Drawing::from(&analysis);
    let json = if cli.pretty {
        serde_json::to_string_pretty(&drawing)?
    } else {
        serde_json::to_string(&drawing)?
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, json)?;
            eprintln!("  \u{2713} {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
