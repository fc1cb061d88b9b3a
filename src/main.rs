use anyhow::Context;
use clap::Parser;
use pdf_calendar::{render, CalendarConfig, CalendarData, PdfSurface};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdf-calendar")]
#[command(version)]
#[command(about = "Render a yearly calendar to PDF", long_about = None)]
struct Cli {
    /// Calendar configuration file; data files are read from its directory
    #[arg(value_name = "CONFIG", default_value = "calendar.ini")]
    config: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = CalendarConfig::load(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    let data = CalendarData::load(&config.dir, config.general.skip_bitmaps)
        .with_context(|| format!("loading calendar data from {}", config.dir.display()))?;

    log::info!("Creating {} calendar", config.general.year);
    let font_dir = config.font_dir();
    let mut surface = PdfSurface::new(config.page, &config.general.title, font_dir.as_deref());
    surface.info.subject(format!("Calendar for {}", config.general.year));
    let pages = render(&config, &data, &mut surface).context("composing calendar")?;

    let output = config.output_path();
    log::info!("Outputting {} pages to {}", pages, output.display());
    let file = File::create(&output).with_context(|| format!("creating {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    surface
        .write(&mut writer)
        .with_context(|| format!("writing {}", output.display()))?;

    log::info!("Done");
    Ok(())
}
