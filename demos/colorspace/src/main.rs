use argh::FromArgs;
use ndarray::Array3;

use chromata::imgproc::{
    color::{convert_colorspace, Colorspace},
    filter::{gaussian, BorderMode, GaussianOptions},
};

#[derive(FromArgs)]
/// Convert a synthetic RGB gradient through a colorspace and back
struct Args {
    /// the colorspace to go through
    #[argh(option, default = "String::from(\"HSV\")")]
    colorspace: String,

    /// the image width
    #[argh(option, default = "640")]
    width: usize,

    /// the image height
    #[argh(option, default = "480")]
    height: usize,

    /// the sigma of the gaussian smoothing
    #[argh(option, default = "1.5")]
    sigma: f64,

    /// the border mode of the gaussian smoothing
    #[argh(option, default = "String::from(\"nearest\")")]
    mode: String,

    /// the number of worker threads, all cores by default
    #[argh(option)]
    threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let space: Colorspace = args.colorspace.parse()?;
    let mode: BorderMode = args.mode.parse()?;

    // horizontal red ramp, vertical green ramp, constant blue
    let (w, h) = (args.width, args.height);
    let rgb = Array3::<u8>::from_shape_fn((h, w, 3), |(y, x, c)| match c {
        0 => (x * 255 / w.max(1)) as u8,
        1 => (y * 255 / h.max(1)) as u8,
        _ => 128,
    });
    log::info!("created a {}x{} RGB gradient", w, h);

    let converted = convert_colorspace(&rgb, Colorspace::Rgb, space, -1)?;
    let back = convert_colorspace(&converted, space, Colorspace::Rgb, -1)?;

    let reference = rgb.mapv(|v| v as f32 / 255.0);
    let max_err = (&back - &reference)
        .iter()
        .fold(0.0f32, |acc, v| acc.max(v.abs()));
    log::info!("RGB -> {} -> RGB max abs error: {:e}", space, max_err);

    let options = GaussianOptions::default()
        .with_mode(mode)
        .with_channel_axis(-1isize);
    let smooth = gaussian(&back, args.sigma, &options)?;
    let mean_change = (&smooth - &back).mapv(f32::abs).mean().unwrap_or(0.0);
    log::info!(
        "gaussian sigma={} mode={} mean abs change: {:e}",
        args.sigma,
        mode,
        mean_change
    );

    println!("{space}: round-trip max error {max_err:e}, smoothing mean change {mean_change:e}");

    Ok(())
}
