use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "metamorph", version)]
struct Cli {
    /// Log warp/blend spans and diagnostics at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Morph image1 into image2 and write the frame at time t.
    Frame(MorphArgs),
    /// Only warp one image towards the feature geometry at time t (no blending).
    Warp(WarpArgs),
    /// Only cross-dissolve the two images at time t (no warping).
    Blend(BlendArgs),
    /// Convert a correspondence file between the text and JSON layouts.
    Lines(LinesArgs),
}

#[derive(Args, Debug)]
struct MorphArgs {
    /// First image (t = 0).
    #[arg(long)]
    image1: PathBuf,

    /// Second image (t = 1).
    #[arg(long)]
    image2: PathBuf,

    /// Correspondence file (`.txt` layout or `.json`).
    #[arg(long)]
    lines: PathBuf,

    /// Time in [0, 1]; out-of-range values are clamped.
    #[arg(long, allow_hyphen_values = true)]
    t: f64,

    /// Output image; format follows the extension.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    shape: ShapeArgs,

    #[command(flatten)]
    threading: ThreadingArgs,
}

#[derive(Args, Debug)]
struct WarpArgs {
    /// Image to warp; its features are the first segment of each pair.
    #[arg(long)]
    image: PathBuf,

    /// Correspondence file (`.txt` layout or `.json`).
    #[arg(long)]
    lines: PathBuf,

    /// Time in [0, 1]; out-of-range values are clamped.
    #[arg(long, allow_hyphen_values = true)]
    t: f64,

    /// Output image; format follows the extension.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    shape: ShapeArgs,

    #[command(flatten)]
    threading: ThreadingArgs,
}

#[derive(Args, Debug)]
struct ShapeArgs {
    /// Anti-singularity offset (> 0).
    #[arg(long, default_value_t = 0.5)]
    a: f64,

    /// Distance falloff exponent (>= 0).
    #[arg(long, default_value_t = 1.0)]
    b: f64,

    /// Length weighting exponent (>= 0).
    #[arg(long, default_value_t = 0.2)]
    p: f64,

    /// Measure distance past a feature's end to its end point instead of its start point.
    #[arg(long)]
    nearest_endpoint: bool,
}

#[derive(Args, Debug)]
struct ThreadingArgs {
    /// Warp rows in parallel.
    #[arg(long)]
    parallel: bool,

    /// Worker threads when --parallel is set (defaults to rayon's choice).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Args, Debug)]
struct BlendArgs {
    /// First image.
    #[arg(long)]
    image1: PathBuf,

    /// Second image.
    #[arg(long)]
    image2: PathBuf,

    /// Time in [0, 1]: 0 gives image1, 1 gives image2.
    #[arg(long, allow_hyphen_values = true)]
    t: f64,

    /// Output image; format follows the extension.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct LinesArgs {
    /// Correspondence file to read.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Correspondence file to write (`.json` for JSON, anything else for text).
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Warp(args) => cmd_warp(args),
        Command::Blend(args) => cmd_blend(args),
        Command::Lines(args) => cmd_lines(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_frame(args: MorphArgs) -> anyhow::Result<()> {
    let (img1, img2) = load_pair(&args.image1, &args.image2)?;
    let corr = metamorph::load_correspondences(&args.lines)?;
    let (seg1, seg2) = corr.split();
    tracing::info!(pairs = corr.len(), "read correspondences");

    let t = clamp_t(args.t);
    let params = warp_params(&args.shape);
    let threading = threading_opts(&args.threading);
    tracing::info!(
        t,
        a = params.a,
        b = params.b,
        p = params.p,
        "morphing {} into {}",
        args.image1.display(),
        args.image2.display()
    );

    let frame = metamorph::morph_with(&img1, &img2, &seg1, &seg2, t, &params, &threading)?;
    write_output(&frame, &args.out)
}

fn cmd_warp(args: WarpArgs) -> anyhow::Result<()> {
    let img = metamorph::load_image(&args.image, 4)?;
    let corr = metamorph::load_correspondences(&args.lines)?;
    let (seg1, seg2) = corr.split();

    let t = clamp_t(args.t);
    let params = warp_params(&args.shape);
    let threading = threading_opts(&args.threading);

    let warped = metamorph::distort_with(&img, &seg1, &seg2, t, &params, &threading)?;
    write_output(&warped, &args.out)
}

fn cmd_blend(args: BlendArgs) -> anyhow::Result<()> {
    let (img1, img2) = load_pair(&args.image1, &args.image2)?;
    let t = clamp_t(args.t);
    let blended = metamorph::blend(&img1, &img2, 1.0 - t)?;
    write_output(&blended, &args.out)
}

fn cmd_lines(args: LinesArgs) -> anyhow::Result<()> {
    let corr = metamorph::load_correspondences(&args.in_path)?;
    ensure_parent_dir(&args.out)?;
    metamorph::write_correspondences(&corr, &args.out)?;
    eprintln!("wrote {} ({} pairs)", args.out.display(), corr.len());
    Ok(())
}

// Both inputs are forced to RGBA so differently encoded files stay blend-compatible.
fn load_pair(
    path1: &Path,
    path2: &Path,
) -> anyhow::Result<(metamorph::PixelBuffer, metamorph::PixelBuffer)> {
    let img1 = metamorph::load_image(path1, 4)?;
    let img2 = metamorph::load_image(path2, 4)?;
    if !img1.same_dims_as(&img2) {
        anyhow::bail!(
            "both input images must have the same dimensions ({}x{} vs {}x{})",
            img1.width(),
            img1.height(),
            img2.width(),
            img2.height()
        );
    }
    tracing::info!(
        width = img1.width(),
        height = img1.height(),
        channels = img1.channels(),
        "loaded input images"
    );
    Ok((img1, img2))
}

fn clamp_t(t: f64) -> f64 {
    if t.is_nan() {
        tracing::warn!("time t is NaN: using 0");
        return 0.0;
    }
    if !(0.0..=1.0).contains(&t) {
        let clamped = t.clamp(0.0, 1.0);
        tracing::warn!(t, clamped, "time t out of range: clamping to [0, 1]");
        return clamped;
    }
    t
}

fn warp_params(shape: &ShapeArgs) -> metamorph::WarpParams {
    metamorph::WarpParams {
        a: shape.a,
        b: shape.b,
        p: shape.p,
        distance: if shape.nearest_endpoint {
            metamorph::SegmentDistance::NearestEndpoint
        } else {
            metamorph::SegmentDistance::StartEndpoint
        },
    }
}

fn threading_opts(args: &ThreadingArgs) -> metamorph::Threading {
    metamorph::Threading {
        parallel: args.parallel,
        threads: args.threads,
    }
}

fn write_output(img: &metamorph::PixelBuffer, out: &Path) -> anyhow::Result<()> {
    ensure_parent_dir(out)?;
    metamorph::save_image(img, out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}
