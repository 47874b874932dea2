use std::path::Path;

use anyhow::Context;
use log::{error, warn};
use serde::Deserialize;

use crate::pipeline::constants::{META_INFO_PATH, OUTPUT_DIR_SUFFIX, SAMPLE_ID_SEPARATOR};
use crate::pipeline::workdir::{entry_name, is_dir, list_entries};
use crate::runtime::Error;

pub const SUMMARY_HEADER: [&str; 2] = ["SRA_ID", "MappingPercentage"];

/// One line of the result CSV
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryRow {
    pub sample_id: String,
    pub mapping_percentage: String,
}

/// The part of the quantifier metadata we care about
#[derive(Deserialize)]
struct MetaInfo {
    percent_mapped: serde_json::Number,
}

/// Sample id is everything before the first separator of the output directory name
pub fn sample_id_from_dir_name(name: &str) -> &str {
    name.split(SAMPLE_ID_SEPARATOR).next().unwrap_or(name)
}

fn read_mapping_percentage(path: &Path) -> Result<String, Error> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| Error::file_not_valid(path, Some(e.to_string())))?;
    let meta: MetaInfo = serde_json::from_str(&text)
        .map_err(|e| Error::file_not_valid(path, Some(e.to_string())))?;
    Ok(meta.percent_mapped.to_string())
}

/// Scan `dir` for quantifier output directories and pull the mapping rate out of each.
/// Directories without readable metadata are logged and left out.
pub fn collect_summary(dir: &Path) -> Vec<SummaryRow> {
    let entries = match list_entries(dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Could not list {} for the result summary: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut rows = Vec::new();
    for entry in entries.iter().filter(|e| is_dir(e)) {
        let Some(name) = entry_name(entry) else {
            continue;
        };
        if !name.ends_with(OUTPUT_DIR_SUFFIX) {
            continue;
        }

        let meta_path = META_INFO_PATH
            .iter()
            .fold(entry.path().to_path_buf(), |p, part| p.join(part));
        if !meta_path.is_file() {
            error!("meta info does not exist in {}, please check manually...", name);
            continue;
        }

        match read_mapping_percentage(&meta_path) {
            Ok(mapping_percentage) => rows.push(SummaryRow {
                sample_id: sample_id_from_dir_name(name).to_string(),
                mapping_percentage,
            }),
            Err(e) => warn!("Skipping {} in summary: {}", name, e),
        }
    }
    rows
}

/// Write the result CSV. The header is written even when there are no rows.
pub fn write_summary(path: &Path, rows: &[SummaryRow]) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Could not create {}", path.display()))?;
    writer.write_record(SUMMARY_HEADER)?;
    for row in rows {
        writer.write_record([&row.sample_id, &row.mapping_percentage])?;
    }
    writer.flush()?;
    Ok(())
}
