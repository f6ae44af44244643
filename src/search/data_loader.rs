use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::food_types::FoodRecord;

// Expected column headers, after trimming and lower-casing.
const FOOD_COL: &str = "food";
const LEGACY_NAME_COL: &str = "name";
const CALORIES_COL: &str = "calories";
const PROTEIN_COL: &str = "protein_g";
const FAT_COL: &str = "fat_g";
const CARBS_COL: &str = "carbs_g";

fn normalize_header(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Parses a macro cell. Blank, unparseable, negative or non-finite values
/// come back as `None` and are stored as zero by the caller.
fn parse_macro(cell: Option<&str>) -> Option<f64> {
    let value = cell?.trim().parse::<f64>().ok()?;
    (value.is_finite() && value >= 0.0).then_some(value)
}

pub fn load_food_table(csv_path: &Path) -> Result<Vec<FoodRecord>> {
    if !csv_path.exists() {
        return Err(anyhow::anyhow!("Nutrition CSV file not found at: {:?}", csv_path));
    }

    let file = std::fs::File::open(csv_path)
        .with_context(|| format!("Failed to open nutrition CSV file at {:?}", csv_path))?;
    read_food_table(file)
}

/// Reads the reference table from any CSV source.
///
/// The food column may be called `food` or, in older exports, `name`. Macro
/// columns that are absent, and cells that cannot be read, default to zero.
/// Rows without a name are skipped, as are later rows repeating a name that
/// was already loaded. A header-only file is a valid, empty table.
pub fn read_food_table<R: Read>(reader: R) -> Result<Vec<FoodRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()
        .context("Failed to read nutrition CSV header")?
        .iter()
        .map(normalize_header)
        .collect();
    let column = |name: &str| headers.iter().position(|h| h == name);

    let food_idx = column(FOOD_COL)
        .or_else(|| column(LEGACY_NAME_COL))
        .ok_or_else(|| anyhow::anyhow!("Column '{}' (or '{}') not found", FOOD_COL, LEGACY_NAME_COL))?;

    let macro_columns = [
        (CALORIES_COL, column(CALORIES_COL)),
        (PROTEIN_COL, column(PROTEIN_COL)),
        (FAT_COL, column(FAT_COL)),
        (CARBS_COL, column(CARBS_COL)),
    ];
    for (name, idx) in &macro_columns {
        if idx.is_none() {
            tracing::warn!(column = name, "nutrition column missing; values default to 0");
        }
    }
    let [calories_idx, protein_idx, fat_idx, carbs_idx] = macro_columns.map(|(_, idx)| idx);

    let mut first_rows: HashMap<String, usize> = HashMap::new();
    let mut foods = Vec::new();
    for (row_index, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("Failed to read record at row index {}", row_index))?;

        let name = record.get(food_idx).unwrap_or_default().trim().to_string();
        if name.is_empty() {
            continue;
        }
        if let Some(first_row) = first_rows.get(&name) {
            tracing::warn!(row = row_index, first_row, food = %name, "duplicate food name skipped");
            continue;
        }
        first_rows.insert(name.clone(), row_index);

        let read = |idx: Option<usize>, label: &str| -> f64 {
            let Some(idx) = idx else { return 0.0 };
            let cell = record.get(idx);
            parse_macro(cell).unwrap_or_else(|| {
                if cell.is_some_and(|c| !c.trim().is_empty()) {
                    tracing::warn!(row = row_index, food = %name, column = label, value = ?cell, "unreadable value; using 0");
                }
                0.0
            })
        };

        let calories = read(calories_idx, CALORIES_COL);
        let protein_g = read(protein_idx, PROTEIN_COL);
        let fat_g = read(fat_idx, FAT_COL);
        let carbs_g = read(carbs_idx, CARBS_COL);

        foods.push(FoodRecord {
            name,
            calories,
            protein_g,
            fat_g,
            carbs_g,
        });
    }

    if foods.is_empty() {
        tracing::warn!("nutrition table is empty; every lookup will miss");
    }

    Ok(foods)
}
