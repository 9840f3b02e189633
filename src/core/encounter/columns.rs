//! Stat Column Layout
//!
//! Columns share one row whose widths always add up to 100 percent.

use super::error::EncounterError;
use super::types::StatColumn;

pub const FULL_WIDTH: f64 = 100.0;

/// Append a column, taking its share evenly from the existing ones.
pub fn add(columns: &[StatColumn], new_column: StatColumn) -> Vec<StatColumn> {
    if columns.is_empty() {
        return vec![StatColumn {
            percent_width: FULL_WIDTH,
            ..new_column
        }];
    }

    let existing = columns.len() as f64;
    let new_width = FULL_WIDTH / (existing + 1.0);
    let shrink_by = new_width / existing;

    let mut updated: Vec<StatColumn> = columns
        .iter()
        .map(|c| StatColumn {
            percent_width: c.percent_width - shrink_by,
            ..c.clone()
        })
        .collect();
    updated.push(StatColumn {
        percent_width: new_width,
        ..new_column
    });
    updated
}

/// Drop a column and hand its width evenly to the rest.
pub fn remove(columns: &[StatColumn], column_id: &str) -> Result<Vec<StatColumn>, EncounterError> {
    let removed = columns
        .iter()
        .find(|c| c.id == column_id)
        .ok_or_else(|| EncounterError::ColumnNotFound(column_id.to_string()))?;
    if columns.len() == 1 {
        return Err(EncounterError::LastColumn);
    }

    let grow_by = removed.percent_width / (columns.len() - 1) as f64;
    Ok(columns
        .iter()
        .filter(|c| c.id != column_id)
        .map(|c| StatColumn {
            percent_width: c.percent_width + grow_by,
            ..c.clone()
        })
        .collect())
}

/// Even out the non-home columns.
///
/// The home column keeps its width (or the whole row when it is alone) and
/// the others split what is left. If several columns claim to be home, the
/// first one wins.
pub fn equalize(columns: &[StatColumn]) -> Vec<StatColumn> {
    let home = columns.iter().position(|c| c.is_home_column);
    let others = columns.len() - usize::from(home.is_some());

    let home_width = match home {
        Some(_) if others == 0 => FULL_WIDTH,
        Some(i) => columns[i].percent_width,
        None => 0.0,
    };
    let share = if others == 0 {
        0.0
    } else {
        (FULL_WIDTH - home_width) / others as f64
    };

    columns
        .iter()
        .enumerate()
        .map(|(i, c)| StatColumn {
            percent_width: if Some(i) == home { home_width } else { share },
            ..c.clone()
        })
        .collect()
}

/// Sum of all widths.
pub fn total_width(columns: &[StatColumn]) -> f64 {
    columns.iter().map(|c| c.percent_width).sum()
}
