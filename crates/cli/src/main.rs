use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod gtfs;
mod provenance;
mod voronoi;
mod zones;

use provenance::Payload;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Voronoi stop zones from GTFS feeds")]
struct Cmd {
    /// Optional run tag; propagated to provenance sidecars and logs
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build one finite Voronoi zone per stop and write a GeoJSON-style file
    Zones {
        /// GTFS feed: zip archive or extracted directory
        #[arg(long)]
        feed: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Far-point distance in coordinate units (default: 100 × stop spread)
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Load and clean GTFS tables, logging their shapes
    Load {
        #[arg(long)]
        feed: PathBuf,
        /// Table keys to load (default: all known tables)
        #[arg(long, value_delimiter = ',')]
        files: Vec<String>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Zones { feed, out, radius } => zones(&feed, &out, radius, cmd.tag),
        Action::Load { feed, files } => load(&feed, &files),
        Action::Report => report(cmd.tag),
    }
}

fn zones(feed: &Path, out: &Path, radius: Option<f64>, tag: Option<String>) -> Result<()> {
    tracing::info!(feed = %feed.display(), out = %out.display(), radius = ?radius, tag = ?tag, "zones");
    let table = gtfs::Feed::open(feed).table("stops")?;
    let stops = zones::stops_from_frame(&table)?;
    tracing::info!(rows = table.height(), stops = stops.len(), "stops_parsed");

    let built = zones::build_zones(&stops, radius)?;
    let doc = zones::to_feature_collection(&built);

    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;

    let payload = Payload::new(serde_json::json!({
        "action": "zones",
        "feed": feed.to_string_lossy(),
        "radius": radius,
        "stops": stops.len(),
        "zones": built.len(),
    }))
    .with_tag(tag);
    let prov = provenance::write_sidecar(out, payload)?;
    tracing::info!(zones = built.len(), provenance = %prov.display(), "zones_written");
    Ok(())
}

fn load(feed: &Path, files: &[String]) -> Result<()> {
    tracing::info!(feed = %feed.display(), files = ?files, "load");
    let tables = gtfs::load_feed(feed, files)?;
    for (key, df) in &tables {
        tracing::info!(table = key.as_str(), rows = df.height(), cols = df.width(), "table_shape");
    }
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let payload = Payload::new(serde_json::json!({})).with_tag(tag);
    let obj = provenance::document(&payload, &[]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
