extern crate clap;
extern crate mandel;
extern crate num;
extern crate num_cpus;
extern crate rand;

use clap::{App, Arg, ArgMatches};
use num::Complex;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::str::FromStr;

use mandel::{render, RenderConfig, RenderOptions, Shader, TileOrder, Window};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f32>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const TILE: &str = "tile";
const SAMPLES: &str = "samples";
const FILTER_SIZE: &str = "filter-size";
const ITERATIONS: &str = "iterations";
const ORIGIN: &str = "origin";
const EXTENT: &str = "extent";
const SHADER: &str = "shader";
const THREADS: &str = "threads";
const BATCH: &str = "batch";
const SEED: &str = "seed";
const ORDERED: &str = "ordered";
const DUMP_SAMPLING: &str = "dump-sampling-data";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mandel")
        .version("0.1.0")
        .about("Supersampled, Mitchell-filtered Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (.png for PNG, anything else for text PPM)"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("675x250")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(TILE)
                .required(false)
                .long(TILE)
                .takes_value(true)
                .default_value("16x16")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse tile size"))
                .help("Size of a scheduling tile"),
        )
        .arg(
            Arg::with_name(SAMPLES)
                .required(false)
                .long(SAMPLES)
                .short("n")
                .takes_value(true)
                .default_value("1024")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        65536,
                        "Could not parse sample count",
                        "Sample count must be between 1 and 65536",
                    )
                })
                .help("Subpixel samples per pixel"),
        )
        .arg(
            Arg::with_name(FILTER_SIZE)
                .required(false)
                .long(FILTER_SIZE)
                .takes_value(true)
                .default_value("2")
                .help("Reconstruction filter support width, in pixels"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("256")
                .validator(move |s| {
                    validate_range(
                        &s,
                        22,
                        200_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 22 and 200000",
                    )
                })
                .help("Escape-iteration cap"),
        )
        .arg(
            Arg::with_name(ORIGIN)
                .required(false)
                .long(ORIGIN)
                .takes_value(true)
                .default_value("-0.4,-0.683")
                .validator(|s| validate_pair::<f32>(&s, ',', "Could not parse window origin"))
                .help("Origin corner of the plane window"),
        )
        .arg(
            Arg::with_name(EXTENT)
                .required(false)
                .long(EXTENT)
                .takes_value(true)
                .default_value("0.265,0.1")
                .validator(|s| validate_pair::<f32>(&s, ',', "Could not parse window extent"))
                .help("Extent of the plane window"),
        )
        .arg(
            Arg::with_name(SHADER)
                .required(false)
                .long(SHADER)
                .takes_value(true)
                .default_value("gradient")
                .possible_values(&["gradient", "grayscale"])
                .help("Color-mapping strategy"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of worker threads (default: all cores)"),
        )
        .arg(
            Arg::with_name(BATCH)
                .required(false)
                .long(BATCH)
                .short("b")
                .takes_value(true)
                .default_value("27")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        100_000,
                        "Could not parse batch size",
                        "Batch size must be between 1 and 100000",
                    )
                })
                .help("Tiles dispatched to a worker per batch"),
        )
        .arg(
            Arg::with_name(SEED)
                .required(false)
                .long(SEED)
                .takes_value(true)
                .validator(|s| {
                    u64::from_str(&s)
                        .map(|_| ())
                        .map_err(|_| "Could not parse shuffle seed".to_string())
                })
                .help("Seed for the tile shuffle (default: random)"),
        )
        .arg(
            Arg::with_name(ORDERED)
                .required(false)
                .long(ORDERED)
                .help("Dispatch tiles in grid order instead of shuffling"),
        )
        .arg(
            Arg::with_name(DUMP_SAMPLING)
                .required(false)
                .long(DUMP_SAMPLING)
                .help("Also write halton23.dat, mitchell_1d.dat and mitchell_2d.dat"),
        )
        .get_matches()
}

fn dump_sampling_data(samples: usize, filter_size: f32) -> std::io::Result<()> {
    let mut positions = BufWriter::new(File::create("halton23.dat")?);
    mandel::diagnostics::write_sample_positions(&mut positions, samples, filter_size)?;

    let mut curve = BufWriter::new(File::create("mitchell_1d.dat")?);
    mandel::diagnostics::write_filter_curve(&mut curve)?;

    let mut weights = BufWriter::new(File::create("mitchell_2d.dat")?);
    mandel::diagnostics::write_sample_weights(&mut weights, samples, filter_size)?;

    Ok(())
}

fn main() {
    let matches = args();

    let size = parse_pair(matches.value_of(SIZE).unwrap(), 'x')
        .expect("Error parsing image dimensions");
    let tile = parse_pair(matches.value_of(TILE).unwrap(), 'x')
        .expect("Error parsing tile dimensions");
    let origin =
        parse_complex(matches.value_of(ORIGIN).unwrap()).expect("Error parsing window origin");
    let extent =
        parse_complex(matches.value_of(EXTENT).unwrap()).expect("Error parsing window extent");

    let samples = usize::from_str(matches.value_of(SAMPLES).unwrap())
        .expect("Could not parse sample count");
    let filter_size = f32::from_str(matches.value_of(FILTER_SIZE).unwrap())
        .expect("Could not parse filter size");
    let iterations = u32::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count");
    let shader = Shader::from_str(matches.value_of(SHADER).unwrap())
        .expect("Could not parse shader");
    let threads = match matches.value_of(THREADS) {
        Some(s) => usize::from_str(s).expect("Could not parse thread count"),
        None => num_cpus::get(),
    };
    let tiles_per_batch = usize::from_str(matches.value_of(BATCH).unwrap())
        .expect("Could not parse batch size");

    let tile_order = if matches.is_present(ORDERED) {
        TileOrder::Sequential
    } else {
        let seed = match matches.value_of(SEED) {
            Some(s) => u64::from_str(s).expect("Could not parse shuffle seed"),
            None => rand::random(),
        };
        TileOrder::Shuffled { seed }
    };

    let options = RenderOptions {
        width: size.0,
        height: size.1,
        tile_width: tile.0,
        tile_height: tile.1,
        samples,
        filter_size,
        iterations,
        window: Window::new(origin.re, origin.im, extent.re, extent.im),
        shader,
        threads,
        tiles_per_batch,
        tile_order,
    };

    if matches.is_present(DUMP_SAMPLING) {
        if let Err(e) = dump_sampling_data(options.samples, options.filter_size) {
            eprintln!("Could not write sampling data: {}", e);
            std::process::exit(1);
        }
    }

    let config = match RenderConfig::new(options) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Bad configuration: {}", e);
            std::process::exit(1);
        }
    };

    eprintln!(
        "Rendering {}x{} on {} threads.",
        config.width, config.height, config.threads
    );
    let buffer = render(&config);

    let outfile = matches.value_of(OUTPUT).unwrap();
    let result = if Path::new(outfile).extension().map_or(false, |e| e == "png") {
        mandel::output::save_png(outfile, config.width, config.height, &buffer)
    } else {
        let mut out = BufWriter::new(File::create(outfile).expect("Could not create output file"));
        mandel::output::write_ppm(&mut out, config.width, config.height, &buffer)
    };

    if let Err(e) = result {
        eprintln!("Could not write {}: {}", outfile, e);
        std::process::exit(1);
    }
}
