//! Delimiter-separated persistence for datasets and split files.
//!
//! Generated datasets are written from typed [`GeneratedSample`] rows. Reading
//! goes through [`Table`], which keeps the header and every column verbatim so
//! split files reproduce the source schema, including older datasets without
//! `difficulty`/`template_id` and LLM datasets that carry `scenario_id`.

use std::fs;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};

use crate::error::{DatagenError, Result};
use crate::sample::{GeneratedSample, COLUMNS};

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

pub fn write_samples(path: &Path, samples: &[GeneratedSample]) -> Result<()> {
    ensure_parent(path)?;
    let file = fs::File::create(path)?;
    write_samples_to(file, samples)
}

/// Header first, even for an empty dataset.
pub fn write_samples_to<W: Write>(writer: W, samples: &[GeneratedSample]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
    writer.write_record(COLUMNS)?;
    for sample in samples {
        writer.serialize(sample)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_samples(path: &Path) -> Result<Vec<GeneratedSample>> {
    let mut reader = ReaderBuilder::new().from_path(path)?;
    let mut samples = Vec::new();
    for row in reader.deserialize() {
        samples.push(row?);
    }
    Ok(samples)
}

// =============================================================================
// Schema-preserving table
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub headers: StringRecord,
    pub records: Vec<StringRecord>,
}

impl Table {
    pub fn read(path: &Path) -> Result<Self> {
        let file = fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut reader = ReaderBuilder::new().from_reader(reader);
        let headers = reader.headers()?.clone();
        let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self { headers, records })
    }

    pub fn from_samples(samples: &[GeneratedSample]) -> Self {
        let records = samples
            .iter()
            .map(|s| {
                let id = s.id.to_string();
                let label = s.label.to_string();
                StringRecord::from(vec![
                    id.as_str(),
                    s.text.as_str(),
                    label.as_str(),
                    s.label_name.as_str(),
                    s.difficulty.as_str(),
                    s.template_id.as_str(),
                ])
            })
            .collect();
        Self { headers: StringRecord::from(COLUMNS.to_vec()), records }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        ensure_parent(path)?;
        let file = fs::File::create(path)?;
        self.to_writer(file)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(writer);
        writer.write_record(&self.headers)?;
        for record in &self.records {
            writer.write_record(record)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn require(&self, name: &str) -> Result<usize> {
        self.column(name).ok_or_else(|| DatagenError::MissingColumn(name.to_string()))
    }

    pub fn values(&self, col: usize) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(move |r| r.get(col).unwrap_or(""))
    }

    /// Rows at `indices`, in that order, with the same header.
    pub fn select(&self, indices: &[usize]) -> Table {
        Table {
            headers: self.headers.clone(),
            records: indices.iter().filter_map(|&i| self.records.get(i).cloned()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::Label;
    use uuid::Uuid;

    fn sample(text: &str) -> GeneratedSample {
        GeneratedSample::new(Uuid::nil(), text.to_string(), Label::Platonic, false, "p_core_0")
    }

    #[test]
    fn embedded_newlines_and_commas_survive() {
        let samples = vec![sample("A: one, two\nB: \"three\"")];
        let mut buf = Vec::new();
        write_samples_to(&mut buf, &samples).unwrap();
        let table = Table::from_reader(buf.as_slice()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(&table.records[0][1], "A: one, two\nB: \"three\"");
        assert_eq!(table, Table::from_samples(&samples));
    }

    #[test]
    fn empty_dataset_still_has_header() {
        let mut buf = Vec::new();
        write_samples_to(&mut buf, &[]).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "id,text,label,label_name,difficulty,template_id\n");
    }

    #[test]
    fn legacy_schema_reads() {
        let csv = "id,text,label,label_name\nx,hello,0,platonic_cold\n";
        let table = Table::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.column("template_id"), None);
        assert_eq!(table.require("label").unwrap(), 2);
        assert!(matches!(table.require("difficulty"), Err(DatagenError::MissingColumn(_))));
    }

    #[test]
    fn select_keeps_header_and_order() {
        let table = Table::from_samples(&[sample("a"), sample("b"), sample("c")]);
        let picked = table.select(&[2, 0]);
        assert_eq!(picked.headers, table.headers);
        let texts: Vec<&str> = picked.values(1).collect();
        assert_eq!(texts, ["c", "a"]);
    }
}
