//! Chart renderer — classifies a GeoJSON dataset by a categorical field
//! and writes two PNGs to the output directory: a choropleth (map.png)
//! and a ranked column chart (column.png). Filenames are fixed and
//! overwritten on each run.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use plotters::prelude::*;

use choro_core::pipeline::{color_for_label, run, PipelineRun};
use choro_core::{PipelineConfig, PipelineError, Rgb};

const MAP_SIZE: (u32, u32) = (1024, 768);
const COLUMN_SIZE: (u32, u32) = (900, 600);

// ── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "render", about = "Render choropleth + ranked column chart from a GeoJSON dataset")]
struct Args {
    /// Input GeoJSON file.
    #[arg(short, long)]
    input: String,

    /// Name of the categorical attribute field.
    #[arg(short, long)]
    field: String,

    /// Number of categories kept before folding into "*Other".
    #[arg(short = 'k', long, default_value = "10")]
    top_k: usize,

    /// Output directory for map.png and column.png (created if absent).
    #[arg(short, long, default_value = "output")]
    output: String,

    /// Comma-separated hex colors, rank order, last entry used for
    /// "*Other". Omit for the built-in palette.
    #[arg(long)]
    palette: Option<String>,

    /// Print the aggregated count table as JSON on stdout.
    #[arg(long)]
    summary: bool,
}

fn parse_palette(spec: &str) -> Result<Vec<Rgb>> {
    spec.split(',')
        .map(|s| Rgb::from_hex(s.trim()).map_err(Into::into))
        .collect::<Result<Vec<_>>>()
        .context("parsing --palette")
}

// ── Drawing helpers ──────────────────────────────────────────────────────────

fn plot_color(rgb: Rgb) -> RGBColor {
    let Rgb([r, g, b]) = rgb;
    RGBColor(r, g, b)
}

fn draw_err<E: std::error::Error>(e: E) -> PipelineError {
    PipelineError::Render(e.to_string())
}

/// Choropleth: every polygon filled with its label's color, black outlines,
/// viewport spanning the collection bounding box with a small margin.
fn render_map(path: &Path, out: &PipelineRun, cfg: &PipelineConfig) -> Result<(), PipelineError> {
    let (min_lon, max_lon, min_lat, max_lat) = out
        .features
        .bbox()
        .ok_or_else(|| PipelineError::Render("no drawable geometry in dataset".into()))?;
    let pad_lon = ((max_lon - min_lon) * 0.02).max(0.01);
    let pad_lat = ((max_lat - min_lat) * 0.02).max(0.01);

    let root = BitMapBackend::new(path, MAP_SIZE).into_drawing_area();
    root.fill(&RGBColor(173, 216, 230)).map_err(draw_err)?; // light-blue water

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(format!("Features by {}", cfg.field), ("sans-serif", 30))
        .build_cartesian_2d(
            min_lon - pad_lon..max_lon + pad_lon,
            min_lat - pad_lat..max_lat + pad_lat,
        )
        .map_err(draw_err)?;

    for feature in &out.features.features {
        let label = feature.category_label.as_deref().unwrap_or_default();
        let fill = plot_color(color_for_label(cfg, &out.reduction, label));
        for rings in &feature.geometry.polygons {
            // Fill the exterior ring; interior rings draw as outlines only.
            if let Some(exterior) = rings.first() {
                chart
                    .draw_series(std::iter::once(Polygon::new(exterior.clone(), fill.filled())))
                    .map_err(draw_err)?;
            }
            for ring in rings {
                let mut closed = ring.clone();
                if let Some(&first) = closed.first() {
                    closed.push(first);
                }
                chart
                    .draw_series(std::iter::once(PathElement::new(closed, BLACK)))
                    .map_err(draw_err)?;
            }
        }
    }

    root.present().map_err(draw_err)
}

/// Ranked column chart over the aggregated table, bars in aggregator order
/// and sharing the map's label → color assignment.
fn render_column(path: &Path, out: &PipelineRun, cfg: &PipelineConfig) -> Result<(), PipelineError> {
    let table = &out.table;
    let y_max = table.iter().map(|c| c.count).max().unwrap_or(0).max(1);

    let root = BitMapBackend::new(path, COLUMN_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(10)
        .caption(format!("Feature count by {}", cfg.field), ("sans-serif", 30))
        .x_label_area_size(90)
        .y_label_area_size(60)
        .build_cartesian_2d((0..table.len()).into_segmented(), 0..y_max + y_max / 10 + 1)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(table.len().max(1))
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) if *i < table.len() => table[*i].label.clone(),
            _ => String::new(),
        })
        .y_desc("features")
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(table.iter().enumerate().map(|(i, row)| {
            let fill = plot_color(color_for_label(cfg, &out.reduction, &row.label));
            Rectangle::new(
                [(SegmentValue::Exact(i), 0), (SegmentValue::Exact(i + 1), row.count)],
                fill.filled(),
            )
        }))
        .map_err(draw_err)?;

    root.present().map_err(draw_err)
}

// ── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();

    let palette = match &args.palette {
        Some(spec) => parse_palette(spec)?,
        None => Vec::new(),
    };
    let cfg = PipelineConfig::new(&args.input, &args.field, args.top_k, &args.output, palette)?;

    println!("Loading {} (field {:?}, top-{})…", args.input, args.field, args.top_k);
    let out = run(&cfg)?;
    println!(
        "Classified {} features into {} categories ({} in *Other)",
        out.features.len(),
        out.table.len(),
        out.reduction.other_count
    );

    if args.summary {
        println!("{}", serde_json::to_string_pretty(&out.table)?);
    }

    if out.features.is_empty() {
        println!("Dataset is empty; nothing to render.");
        return Ok(());
    }

    fs::create_dir_all(&cfg.output_dir)
        .with_context(|| format!("cannot create {}", cfg.output_dir.display()))?;

    if out.features.bbox().is_some() {
        let map_path = cfg.output_dir.join("map.png");
        render_map(&map_path, &out, &cfg)?;
        println!("Wrote {}", map_path.display());
    } else {
        println!("No polygon geometry in dataset; skipping map.png.");
    }

    let column_path = cfg.output_dir.join("column.png");
    render_column(&column_path, &out, &cfg)?;
    println!("Wrote {}", column_path.display());

    Ok(())
}
