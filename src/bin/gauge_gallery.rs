//! gauge-gallery: render the demo gauge set to PNG files.
//!
//! Every gauge follows one shared value source, the way the demo window
//! drives them all from a single slider.
//!
//! Run: `gauge-gallery --value 12.5 --out-dir gallery`

use anyhow::{Context, Result};
use clap::Parser;
use gaugeviz::prelude::*;
use log::info;
use std::path::PathBuf;

/// Range of the shared value slider.
const SLIDER_RANGE: (f64, f64) = (-22.0, 22.0);

/// Render the demo gauge set to PNG files
#[derive(Parser, Debug)]
#[command(name = "gauge-gallery")]
#[command(version)]
#[command(about = "Render the demo gauge set to PNG files", long_about = None)]
struct Cli {
    /// Value shown on every gauge (slider range -22..22)
    #[arg(short, long, default_value_t = 0.0, allow_negative_numbers = true)]
    value: f64,

    /// Directory the PNG files are written to
    #[arg(short, long, default_value = "gallery")]
    out_dir: PathBuf,

    /// Additional gauge configuration (YAML), rendered as custom.png
    #[arg(short, long)]
    config: Option<PathBuf>,
}

struct Entry {
    name: &'static str,
    config: GaugeConfig,
    supplied_text: Option<&'static str>,
}

impl Entry {
    fn new(name: &'static str, config: GaugeConfig) -> Self {
        Self { name, config, supplied_text: None }
    }
}

fn gallery() -> Vec<Entry> {
    vec![
        Entry::new(
            "roll_large",
            GaugeConfig::radial()
                .range(-24.0, 24.0)
                .major_tick_step(4.0)
                .minor_ticks_per_major(5)
                .wedge_size(2.0)
                .label_suffix("°")
                .box_length(500)
                .arc_width(30.0),
        ),
        Entry::new(
            "roll_coarse",
            GaugeConfig::radial()
                .range(-22.0, 23.0)
                .major_tick_step(8.0)
                .minor_ticks_per_major(0)
                .wedge_size(30.0)
                .label_suffix("°"),
        ),
        Entry {
            supplied_text: Some("Noice!"),
            ..Entry::new(
                "roll_supplied_text",
                GaugeConfig::radial()
                    .range(-100.0, 100.0)
                    .major_tick_step(20.0)
                    .minor_ticks_per_major(2)
                    .wedge_size(1.0),
            )
        },
        Entry::new(
            "roll_unit",
            GaugeConfig::radial()
                .range(-1.0, 1.0)
                .major_tick_step(0.1)
                .minor_ticks_per_major(1)
                .box_length(350)
                .arc_width(50.0),
        ),
        Entry::new("pitch_tall", GaugeConfig::linear().height(500).label_suffix("°")),
        Entry::new(
            "pitch_wide",
            GaugeConfig::linear().track_width(100).label_suffix("°").major_tick_step(3.0).minor_ticks_per_major(3),
        ),
        Entry::new(
            "pitch_unit",
            GaugeConfig::linear()
                .range(-1.0, 1.0)
                .label_suffix("° deg")
                .major_tick_step(0.5)
                .minor_ticks_per_major(2),
        ),
    ]
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut entries = gallery();
    if let Some(path) = &cli.config {
        let config =
            GaugeConfig::load(path).with_context(|| format!("loading gauge config {}", path.display()))?;
        entries.push(Entry::new("custom", config));
    }

    let source = ValueSource::new(0.0, SLIDER_RANGE.0, SLIDER_RANGE.1)?;
    let mut gauges = Vec::with_capacity(entries.len());
    for entry in entries {
        let mut gauge = Gauge::new(entry.config).with_context(|| format!("building gauge '{}'", entry.name))?;
        if let Some(text) = entry.supplied_text {
            gauge = gauge.with_supplied_text(SharedText::new(text));
        }
        let bound = gauge.bind(&source).with_context(|| format!("binding gauge '{}'", entry.name))?;
        gauges.push((entry.name, bound));
    }

    source.set(cli.value).context("setting the shared value")?;

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("creating output directory {}", cli.out_dir.display()))?;
    let encoder = PngEncoder::new();
    for (name, bound) in &gauges {
        let gauge = bound.borrow();
        let path = cli.out_dir.join(format!("{name}.png"));
        encoder.write_to_file(&gauge.snapshot()?, &path).with_context(|| format!("writing {}", path.display()))?;
        info!("{name}: value {} -> {}", gauge.value(), path.display());
    }

    println!("Rendered {} gauges to {}", gauges.len(), cli.out_dir.display());
    Ok(())
}
