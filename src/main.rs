// src/main.rs

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Parser;

use oneeuro::replay::{self, DEFAULT_TOLERANCE};

#[derive(Parser)]
#[command(version, about = "1€ フィルタのリプレイと参照データ検証", long_about = None)]
struct Args {
    /// フィルタパラメータの YAML ファイル
    #[arg(short, long, default_value = "config/filter_parameters.yaml")]
    config: PathBuf,
    /// 入力サンプルの CSV ファイル (timestamp,value[,expected])
    #[arg(short, long)]
    input: PathBuf,
    /// フィルタ結果の出力先 CSV ファイル
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// 参照値との許容誤差
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,
    /// Level of verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let mut log_config = simplelog::ConfigBuilder::new();
    log_config.set_target_level(log::LevelFilter::Off);
    log_config.set_location_level(log::LevelFilter::Off);

    let log_level = match args.verbose {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    simplelog::TermLogger::init(
        log_level,
        log_config.build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    // パラメータとサンプルの読み込み
    let params = replay::load_filter_parameters(&args.config)?;
    log::info!("Parameters loaded from {}", args.config.display());

    let samples = replay::read_samples(File::open(&args.input)?)?;
    log::info!("{} samples read from {}", samples.len(), args.input.display());

    // フィルタの適用
    let mut filter = params.build()?;
    let records = replay::run(&mut filter, &samples)?;

    if let Some(path) = &args.output {
        replay::write_records(BufWriter::new(File::create(path)?), &records)?;
        log::info!("Filtered samples written to {}", path.display());
    }

    // 参照値との比較
    let summary = replay::verify(&records, args.tolerance)?;
    if summary.compared > 0 {
        log::info!(
            "{}/{} samples match reference (max error {:.3e})",
            summary.compared,
            summary.samples,
            summary.max_error
        );
    } else {
        log::info!("No reference values to compare");
    }

    Ok(())
}
