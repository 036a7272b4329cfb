//! GTFS feed loading and cleaning.
//!
//! A feed is either a zip archive or an extracted directory; in both, files
//! may sit below a folder prefix (`gtfs/stops.txt`). Every table is read with
//! all columns as strings, then column names and values are whitespace-stripped
//! and, when all listed columns are present, narrowed to the columns downstream
//! code uses.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::*;
use ::zip::ZipArchive;

/// A known GTFS table and the columns kept from it (`None` = all).
#[derive(Clone, Copy, Debug)]
pub struct TableSpec {
    pub key: &'static str,
    pub file: &'static str,
    pub columns: Option<&'static [&'static str]>,
}

pub const TABLES: &[TableSpec] = &[
    TableSpec {
        key: "shapes",
        file: "shapes.txt",
        columns: None,
    },
    TableSpec {
        key: "fare_rules",
        file: "fare_rules.txt",
        columns: None,
    },
    TableSpec {
        key: "fare_attributes",
        file: "fare_attributes.txt",
        columns: Some(&["fare_id", "price"]),
    },
    TableSpec {
        key: "stop_times",
        file: "stop_times.txt",
        columns: Some(&[
            "trip_id",
            "arrival_time",
            "departure_time",
            "stop_id",
            "stop_sequence",
            "stop_headsign",
        ]),
    },
    TableSpec {
        key: "routes",
        file: "routes.txt",
        columns: Some(&[
            "route_id",
            "route_long_name",
            "route_short_name",
            "route_type",
            "route_color",
        ]),
    },
    TableSpec {
        key: "trips",
        file: "trips.txt",
        columns: Some(&[
            "route_id",
            "trip_id",
            "route_variant",
            "trip_headsign",
            "trip_short_name",
            "direction_id",
            "shape_id",
        ]),
    },
    TableSpec {
        key: "stops",
        file: "stops.txt",
        columns: Some(&["stop_id", "stop_name", "stop_lat", "stop_lon", "zone_id"]),
    },
];

pub fn table_for(key: &str) -> Option<&'static TableSpec> {
    TABLES.iter().find(|t| t.key == key)
}

/// Where a feed's tables come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Feed {
    Dir(PathBuf),
    Zip(PathBuf),
}

impl Feed {
    /// A regular file is read as a zip archive, anything else as a directory.
    pub fn open(path: &Path) -> Self {
        if path.is_file() {
            Feed::Zip(path.to_path_buf())
        } else {
            Feed::Dir(path.to_path_buf())
        }
    }

    /// Load one known table by key.
    pub fn table(&self, key: &str) -> Result<DataFrame> {
        let table = table_for(key).with_context(|| format!("unknown GTFS table '{key}'"))?;
        match self {
            Feed::Dir(root) => load_table(&find_in_feed(root, table.file)?, table.columns),
            Feed::Zip(path) => {
                let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
                let mut archive = ZipArchive::new(file)
                    .with_context(|| format!("reading zip archive {}", path.display()))?;
                load_zip_table(&mut archive, table.file, table.columns)
            }
        }
    }
}

/// Locate `file` anywhere under `root` by path suffix (component-wise).
///
/// When several files match, the lexicographically first path wins so the
/// choice does not depend on directory iteration order. Symlinked
/// directories are not followed.
pub fn find_in_feed(root: &Path, file: &str) -> Result<PathBuf> {
    let target = Path::new(file.trim_matches('/'));
    let mut found = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries =
            fs::read_dir(&dir).with_context(|| format!("reading feed dir {}", dir.display()))?;
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                stack.push(path);
            } else if path.ends_with(target) {
                found.push(path);
            }
        }
    }
    found.sort();
    found
        .into_iter()
        .next()
        .with_context(|| format!("could not find '{}' in feed {}", file, root.display()))
}

/// Name of the archive entry ending in `file` (component-wise), skipping directories.
pub fn find_in_zip<R: Read + Seek>(archive: &mut ZipArchive<R>, file: &str) -> Result<String> {
    let target = Path::new(file.trim_matches('/'));
    let mut found = Vec::new();
    for i in 0..archive.len() {
        let entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        if Path::new(entry.name()).ends_with(target) {
            found.push(entry.name().to_string());
        }
    }
    found.sort();
    found
        .into_iter()
        .next()
        .with_context(|| format!("could not find '{file}' in zip archive"))
}

/// Read one CSV table, strip whitespace, and select `columns` if all are present.
pub fn load_table(path: &Path, columns: Option<&[&str]>) -> Result<DataFrame> {
    tracing::info!(path = %path.display(), "loading_table");
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(0))
        .finish()
        .and_then(|lf| lf.collect())
        .with_context(|| format!("reading {}", path.display()))?;
    clean_table(df, columns, &path.display().to_string())
}

/// Read the archive entry for `file` the same way as `load_table`.
pub fn load_zip_table<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    file: &str,
    columns: Option<&[&str]>,
) -> Result<DataFrame> {
    let name = find_in_zip(archive, file)?;
    tracing::info!(entry = name.as_str(), "loading_table");
    let mut bytes = Vec::new();
    archive
        .by_name(&name)?
        .read_to_end(&mut bytes)
        .with_context(|| format!("reading zip entry {name}"))?;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .with_context(|| format!("parsing zip entry {name}"))?;
    clean_table(df, columns, &name)
}

fn clean_table(mut df: DataFrame, columns: Option<&[&str]>, source: &str) -> Result<DataFrame> {
    tracing::info!(source, rows = df.height(), "loaded_table");
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.trim().to_string())
        .collect();
    df.set_column_names(names)?;
    let mut df = df
        .lazy()
        .with_columns([col("*").str().strip_chars(lit(NULL))])
        .collect()?;

    if let Some(cols) = columns {
        if cols.iter().all(|c| df.get_column_index(c).is_some()) {
            df = df.select(cols.iter().copied())?;
        } else {
            tracing::warn!(source, "missing selected columns, keeping full table");
        }
    }
    tracing::info!(source, cols = df.width(), "finished_table");
    Ok(df)
}

/// Load the tables named by `keys` (all known tables when empty) from a zip or directory feed.
///
/// Unknown keys are skipped with a warning; a known table missing from the feed is an error.
pub fn load_feed(root: &Path, keys: &[String]) -> Result<BTreeMap<String, DataFrame>> {
    let feed = Feed::open(root);
    let keys: Vec<&str> = if keys.is_empty() {
        TABLES.iter().map(|t| t.key).collect()
    } else {
        keys.iter().map(String::as_str).collect()
    };
    let mut out = BTreeMap::new();
    for key in keys {
        if table_for(key).is_none() {
            tracing::warn!(key, "not a recognized GTFS table key");
            continue;
        }
        out.insert(key.to_string(), feed.table(key)?);
    }
    Ok(out)
}
