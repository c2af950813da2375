//! Dataset audit: class and difficulty balance, shortcut words and leftover
//! duplicates.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::Write as _;

use serde::Serialize;

use crate::dataset::Table;
use crate::error::Result;
use crate::sample::{normalize, Label};
use crate::splitter::GroupColumn;

const BALANCE_THRESHOLD: f64 = 0.05;
const SHORTCUT_LIMIT: usize = 10;

const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "i",
    "you", "he", "she", "it", "we", "they", "is", "are", "was", "were", "be", "been", "have", "has",
    "had", "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "can",
];

#[derive(Debug, Clone, Serialize)]
pub struct ClassShare {
    pub label: u8,
    pub label_name: String,
    pub count: usize,
    pub share: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupCount {
    pub column: String,
    pub unique: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub total: usize,
    pub columns: Vec<String>,
    /// Grouping column (`scenario_id` preferred) and its distinct values.
    pub groups: Option<GroupCount>,
    pub classes: Vec<ClassShare>,
    pub balanced: bool,
    /// difficulty -> count; empty for datasets without the column.
    pub difficulty: BTreeMap<String, usize>,
    /// label -> difficulty -> share within that label.
    pub difficulty_by_class: BTreeMap<u8, BTreeMap<String, f64>>,
    pub shortcut_words: BTreeMap<u8, Vec<String>>,
    pub duplicate_texts: usize,
}

pub fn audit(table: &Table) -> Result<AuditReport> {
    let text_col = table.require("text")?;
    let label_col = table.require("label")?;
    let difficulty_col = table.column("difficulty");
    let total = table.len();
    let groups = GroupColumn::detect(table).ok().map(|(column, col)| GroupCount {
        column: column.name().to_string(),
        unique: table.values(col).collect::<BTreeSet<_>>().len(),
    });

    let labels: Vec<Label> = table
        .values(label_col)
        .map(str::parse::<Label>)
        .collect::<Result<_>>()?;

    let mut counts: BTreeMap<Label, usize> = BTreeMap::new();
    for label in &labels {
        *counts.entry(*label).or_default() += 1;
    }
    let classes: Vec<ClassShare> = counts
        .iter()
        .map(|(label, &count)| ClassShare {
            label: label.value(),
            label_name: label.name().to_string(),
            count,
            share: count as f64 / total.max(1) as f64,
        })
        .collect();
    let balanced = match classes.as_slice() {
        [a, b] => (a.share - b.share).abs() < BALANCE_THRESHOLD,
        _ => false,
    };

    let mut difficulty = BTreeMap::new();
    let mut difficulty_by_class: BTreeMap<u8, BTreeMap<String, f64>> = BTreeMap::new();
    if let Some(col) = difficulty_col {
        for (value, label) in table.values(col).zip(&labels) {
            *difficulty.entry(value.to_string()).or_insert(0usize) += 1;
            *difficulty_by_class
                .entry(label.value())
                .or_default()
                .entry(value.to_string())
                .or_insert(0.0) += 1.0;
        }
        for (label, by_difficulty) in difficulty_by_class.iter_mut() {
            let n = counts.iter().find(|(l, _)| l.value() == *label).map(|(_, c)| *c).unwrap_or(1);
            for share in by_difficulty.values_mut() {
                *share /= n as f64;
            }
        }
    }

    let texts: Vec<&str> = table.values(text_col).collect();
    let shortcut_words = shortcut_words(&texts, &labels);

    let mut seen: HashMap<String, usize> = HashMap::new();
    for text in &texts {
        *seen.entry(normalize(text)).or_default() += 1;
    }
    let duplicate_texts = seen.values().filter(|&&n| n > 1).count();

    Ok(AuditReport {
        total,
        columns: table.headers.iter().map(str::to_string).collect(),
        groups,
        classes,
        balanced,
        difficulty,
        difficulty_by_class,
        shortcut_words,
        duplicate_texts,
    })
}

/// Words longer than three characters that occur in exactly one class.
fn shortcut_words(texts: &[&str], labels: &[Label]) -> BTreeMap<u8, Vec<String>> {
    let mut vocab: BTreeMap<Label, BTreeSet<String>> = BTreeMap::new();
    for (text, label) in texts.iter().zip(labels) {
        let words = vocab.entry(*label).or_default();
        words.extend(text.to_lowercase().split_whitespace().map(str::to_string));
    }

    let mut result = BTreeMap::new();
    if vocab.len() != 2 {
        return result;
    }
    for (label, words) in &vocab {
        let others: BTreeSet<&String> = vocab.iter().filter(|(l, _)| *l != label).flat_map(|(_, w)| w).collect();
        let only: Vec<String> = words
            .iter()
            .filter(|w| !others.contains(w))
            .filter(|w| w.chars().count() > 3 && !STOP_WORDS.contains(&w.as_str()))
            .take(SHORTCUT_LIMIT)
            .cloned()
            .collect();
        result.insert(label.value(), only);
    }
    result
}

impl AuditReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self) -> String {
        let rule = "=".repeat(60);
        let mut out = String::new();

        let _ = writeln!(out, "{rule}\nDATASET OVERVIEW\n{rule}");
        let _ = writeln!(out, "Total samples: {}", self.total);
        let _ = writeln!(out, "Columns: {}", self.columns.join(", "));
        if let Some(groups) = &self.groups {
            let _ = writeln!(out, "Unique {} values: {}", groups.column, groups.unique);
        }
        out.push('\n');

        let _ = writeln!(out, "{rule}\nCLASS BALANCE\n{rule}");
        for class in &self.classes {
            let _ = writeln!(
                out,
                "Label {} ({}): {} samples ({:.1}%)",
                class.label,
                class.label_name,
                class.count,
                class.share * 100.0
            );
        }
        if self.classes.len() == 2 {
            if self.balanced {
                let _ = writeln!(out, "Classes are well balanced");
            } else {
                let gap = (self.classes[0].share - self.classes[1].share).abs();
                let _ = writeln!(out, "Class imbalance: {:.1}% difference", gap * 100.0);
            }
        }

        if !self.difficulty.is_empty() {
            let _ = writeln!(out, "\n{rule}\nDIFFICULTY DISTRIBUTION\n{rule}");
            for (name, count) in &self.difficulty {
                let share = *count as f64 / self.total as f64 * 100.0;
                let _ = writeln!(out, "{name}: {count} samples ({share:.1}%)");
            }
            let _ = writeln!(out, "\n{rule}\nDIFFICULTY BY CLASS\n{rule}");
            for (label, shares) in &self.difficulty_by_class {
                let cells: Vec<String> = shares.iter().map(|(d, s)| format!("{d} {:.1}%", s * 100.0)).collect();
                let _ = writeln!(out, "Label {label}: {}", cells.join(", "));
            }
        }

        let _ = writeln!(out, "\n{rule}\nPOTENTIAL SHORTCUT WORDS\n{rule}");
        if self.shortcut_words.values().all(Vec::is_empty) {
            let _ = writeln!(out, "No obvious shortcut words detected");
        } else {
            for (label, words) in &self.shortcut_words {
                if !words.is_empty() {
                    let _ = writeln!(out, "Words only in label {label}: {}", words.join(", "));
                }
            }
        }

        let _ = writeln!(out, "\n{rule}\nDUPLICATES\n{rule}");
        if self.duplicate_texts == 0 {
            let _ = writeln!(out, "No duplicate texts");
        } else {
            let _ = writeln!(out, "{} duplicate texts found", self.duplicate_texts);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> Table {
        Table::from_reader(csv.as_bytes()).unwrap()
    }

    #[test]
    fn counts_classes_and_difficulty() {
        let t = table(
            "text,label,difficulty\n\
             \"A: refactor parser\",0,easy\n\
             \"A: refactor lexer\",0,hard\n\
             \"A: missing you tonight\",1,hard\n\
             \"A: missing you again\",1,hard\n",
        );
        let report = audit(&t).unwrap();
        assert_eq!(report.total, 4);
        assert!(report.balanced);
        assert_eq!(report.difficulty["hard"], 3);
        assert_eq!(report.difficulty_by_class[&0]["hard"], 0.5);
        assert_eq!(report.difficulty_by_class[&1]["hard"], 1.0);
        assert_eq!(report.shortcut_words[&0], ["lexer", "parser", "refactor"]);
        assert_eq!(report.shortcut_words[&1], ["again", "missing", "tonight"]);
    }

    #[test]
    fn counts_unique_groups() {
        let t = table("text,label,template_id\nx,0,p_core_0\ny,0,p_core_0\nz,1,e_core_2\n");
        let groups = audit(&t).unwrap().groups.unwrap();
        assert_eq!((groups.column.as_str(), groups.unique), ("template_id", 2));

        let t = table("text,label,template_id,scenario_id\nx,0,t1,s1\ny,1,t2,s1\n");
        let report = audit(&t).unwrap();
        let groups = report.groups.as_ref().unwrap();
        assert_eq!((groups.column.as_str(), groups.unique), ("scenario_id", 1));
        assert!(report.render().contains("Unique scenario_id values: 1"));

        assert!(audit(&table("text,label\nx,0\n")).unwrap().groups.is_none());
    }

    #[test]
    fn finds_duplicates_after_normalization() {
        let t = table("text,label\n\"A: hi  there\",0\n\"A: hi there\",1\n");
        assert_eq!(audit(&t).unwrap().duplicate_texts, 1);
    }

    #[test]
    fn legacy_dataset_has_no_difficulty_section() {
        let t = table("text,label\nx,0\ny,1\n");
        let report = audit(&t).unwrap();
        assert!(report.difficulty.is_empty());
        assert!(!report.render().contains("DIFFICULTY"));
    }

    #[test]
    fn json_report_has_counts() {
        let t = table("text,label
x,0
y,1
");
        let json: serde_json::Value = serde_json::from_str(&audit(&t).unwrap().to_json().unwrap()).unwrap();
        assert_eq!(json["total"], 2);
        assert_eq!(json["balanced"], true);
        assert_eq!(json["classes"][1]["label_name"], "emotional_affair_hot");
    }
}
