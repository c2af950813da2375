//! Group-aware train/validation/test splitting.
//!
//! Rows are never assigned individually: every distinct value of the grouping
//! column (scenario if present, else template) lands in exactly one split.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::context::GenContext;
use crate::dataset::Table;
use crate::error::{DatagenError, Result};
use crate::sample::Label;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupColumn {
    Scenario,
    Template,
}

impl GroupColumn {
    pub fn name(self) -> &'static str {
        match self {
            GroupColumn::Scenario => "scenario_id",
            GroupColumn::Template => "template_id",
        }
    }

    /// Prefer `scenario_id`, fall back to `template_id`.
    pub fn detect(table: &Table) -> Result<(Self, usize)> {
        for column in [GroupColumn::Scenario, GroupColumn::Template] {
            if let Some(idx) = table.column(column.name()) {
                return Ok((column, idx));
            }
        }
        Err(DatagenError::MissingGroupColumn {
            available: table.headers.iter().collect::<Vec<_>>().join(", "),
        })
    }
}

impl fmt::Display for GroupColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Configuration
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitConfig {
    pub seed: u64,
    /// Share of groups held out of train (validation + test).
    pub holdout_fraction: f64,
    /// Share of the held-out groups that become test.
    pub test_fraction_of_holdout: f64,
    /// Maximum tolerated gap in class-0 share between validation and test.
    pub balance_tolerance: f64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self { seed: 42, holdout_fraction: 0.3, test_fraction_of_holdout: 0.5, balance_tolerance: 0.15 }
    }
}

impl SplitConfig {
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("holdout_fraction", self.holdout_fraction),
            ("test_fraction_of_holdout", self.test_fraction_of_holdout),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(DatagenError::InvalidSplit(format!("{name} must be in (0, 1), got {value}")));
            }
        }
        if !(0.0..=1.0).contains(&self.balance_tolerance) {
            return Err(DatagenError::InvalidProbability {
                name: "balance_tolerance".to_string(),
                value: self.balance_tolerance,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Group shuffle split
// =============================================================================

/// Shuffle the distinct keys and hold out `ceil(holdout * groups)` of them.
/// Returns (kept, held_out) row indices, each in input row order.
pub fn group_shuffle_split(keys: &[&str], holdout: f64, ctx: &mut GenContext) -> (Vec<usize>, Vec<usize>) {
    let mut groups: Vec<&str> = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
    ctx.shuffle(&mut groups);

    let n_holdout = ((holdout * groups.len() as f64).ceil() as usize).min(groups.len());
    let held: HashSet<&str> = groups[..n_holdout].iter().copied().collect();

    let mut kept = Vec::new();
    let mut out = Vec::new();
    for (i, key) in keys.iter().enumerate() {
        if held.contains(key) {
            out.push(i);
        } else {
            kept.push(i);
        }
    }
    (kept, out)
}

// =============================================================================
// Three-way split
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceCheck {
    pub validation_class0: f64,
    pub test_class0: f64,
    pub within_tolerance: bool,
}

#[derive(Debug, Clone)]
pub struct Split {
    pub group_column: GroupColumn,
    pub train: Table,
    pub validation: Table,
    pub test: Table,
    pub balance: BalanceCheck,
}

impl Split {
    pub fn parts(&self) -> [(&'static str, &Table); 3] {
        [("train", &self.train), ("validation", &self.validation), ("test", &self.test)]
    }
}

pub fn split(table: &Table, config: &SplitConfig) -> Result<Split> {
    config.validate()?;
    table.require("text")?;
    let label_col = table.require("label")?;
    let (group_column, group_col) = GroupColumn::detect(table)?;
    info!("using '{}' for grouped splitting", group_column);

    let keys: Vec<&str> = table.values(group_col).collect();
    let mut ctx = GenContext::new(config.seed);

    let (train_idx, holdout_idx) = group_shuffle_split(&keys, config.holdout_fraction, &mut ctx);
    let holdout_keys: Vec<&str> = holdout_idx.iter().map(|&i| keys[i]).collect();
    let (val_local, test_local) = group_shuffle_split(&holdout_keys, config.test_fraction_of_holdout, &mut ctx);
    let val_idx: Vec<usize> = val_local.iter().map(|&i| holdout_idx[i]).collect();
    let test_idx: Vec<usize> = test_local.iter().map(|&i| holdout_idx[i]).collect();

    let train = table.select(&train_idx);
    let validation = table.select(&val_idx);
    let test = table.select(&test_idx);

    let parts = [("train", &train), ("validation", &validation), ("test", &test)];
    verify_disjoint(&parts, group_column, group_col)?;

    for (name, part) in parts {
        let groups = distinct(part, group_col).len();
        info!(split = name, rows = part.len(), groups, "split assigned");
        if part.is_empty() && !table.is_empty() {
            warn!(split = name, "split is empty; too few groups for the requested proportions");
        }
    }

    let balance = check_balance(&validation, &test, label_col, config.balance_tolerance)?;

    Ok(Split { group_column, train, validation, test, balance })
}

fn distinct(table: &Table, col: usize) -> HashSet<&str> {
    table.values(col).collect()
}

/// Fails on the first group key found in two splits.
pub fn verify_disjoint(parts: &[(&'static str, &Table)], column: GroupColumn, col: usize) -> Result<()> {
    for (i, (left, left_table)) in parts.iter().enumerate() {
        let left_keys = distinct(left_table, col);
        for (right, right_table) in &parts[i + 1..] {
            if let Some(key) = right_table.values(col).find(|k| left_keys.contains(k)) {
                return Err(DatagenError::GroupOverlap {
                    left: *left,
                    right: *right,
                    column: column.name().to_string(),
                    key: key.to_string(),
                });
            }
        }
    }
    Ok(())
}

fn class0_share(table: &Table, label_col: usize) -> Result<f64> {
    if table.is_empty() {
        return Ok(0.0);
    }
    let mut zeros = 0usize;
    for value in table.values(label_col) {
        if value.parse::<Label>()? == Label::Platonic {
            zeros += 1;
        }
    }
    Ok(zeros as f64 / table.len() as f64)
}

fn check_balance(validation: &Table, test: &Table, label_col: usize, tolerance: f64) -> Result<BalanceCheck> {
    let validation_class0 = class0_share(validation, label_col)?;
    let test_class0 = class0_share(test, label_col)?;
    let within_tolerance = (validation_class0 - test_class0).abs() <= tolerance;
    if !within_tolerance {
        warn!(
            "class balance differs between val and test: val class 0 = {:.1}%, class 1 = {:.1}%; test class 0 = {:.1}%, class 1 = {:.1}%",
            validation_class0 * 100.0,
            (1.0 - validation_class0) * 100.0,
            test_class0 * 100.0,
            (1.0 - test_class0) * 100.0,
        );
    }
    Ok(BalanceCheck { validation_class0, test_class0, within_tolerance })
}
