//! The manifest CSV writer (spec.md §4.7 step 7, §6 "Manifest CSV").

use std::fs::{self, OpenOptions};
use std::path::Path;

use cid::Cid;

use crate::detail::FsNode;
use crate::error::Result;

const FILE_NAME: &str = "manifest.csv";

/// Appends rows to `<car-dir>/manifest.csv`, writing the header only the
/// first time the file is created (spec.md §6: "header on first write
/// only"). CRLF line endings match the spec's documented format. Rows are
/// appended, never edited (spec.md §3 "Manifest rows").
pub struct ManifestWriter {
    writer: csv::Writer<fs::File>,
}

impl ManifestWriter {
    /// Open (creating if needed) `<car_dir>/manifest.csv`. `with_commp`
    /// selects between the two documented column layouts; it must stay
    /// consistent across every row written to a given file, since the
    /// header is only written once.
    pub fn open(car_dir: &Path, with_commp: bool) -> Result<Self> {
        let path = car_dir.join(FILE_NAME);
        let needs_header = fs::metadata(&path).map(|m| m.len() == 0).unwrap_or(true);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::CRLF)
            .from_writer(file);

        if needs_header {
            if with_commp {
                writer.write_record([
                    "payload_cid",
                    "filename",
                    "piece_cid",
                    "payload_size",
                    "piece_size",
                    "detail",
                ])?;
            } else {
                writer.write_record(["payload_cid", "filename", "detail"])?;
            }
            writer.flush()?;
        }

        Ok(Self { writer })
    }

    /// Append a row without piece-commitment data (spec.md §6 "Without
    /// CommP").
    pub fn write_row(&mut self, payload_cid: Cid, filename: &str, detail: &FsNode) -> Result<()> {
        let detail_json = serde_json::to_string(detail)?;
        self.writer
            .write_record([&payload_cid.to_string(), filename, &detail_json])?;
        self.writer.flush()?;
        Ok(())
    }

    /// Append a row including piece-commitment data (spec.md §6 "With
    /// CommP").
    #[allow(clippy::too_many_arguments)]
    pub fn write_row_with_commp(
        &mut self,
        payload_cid: Cid,
        filename: &str,
        piece_cid: Cid,
        payload_size: u64,
        piece_size: u64,
        detail: &FsNode,
    ) -> Result<()> {
        let detail_json = serde_json::to_string(detail)?;
        self.writer.write_record([
            &payload_cid.to_string(),
            filename,
            &piece_cid.to_string(),
            &payload_size.to_string(),
            &piece_size.to_string(),
            &detail_json,
        ])?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_detail() -> FsNode {
        FsNode {
            name: "a.txt".to_string(),
            hash: "bafy...".to_string(),
            size: 5,
            link: Vec::new(),
        }
    }

    #[test]
    fn writes_header_once_and_appends_rows() {
        let dir = tempfile::tempdir().unwrap();
        let cid = Cid::try_from("QmYjtig7VJQ6XsnUjqqJvj7QaMcCAwtrgNdahSiFofrE7o").unwrap();

        {
            let mut w = ManifestWriter::open(dir.path(), false).unwrap();
            w.write_row(cid, "slice1.car", &sample_detail()).unwrap();
        }
        {
            let mut w = ManifestWriter::open(dir.path(), false).unwrap();
            w.write_row(cid, "slice2.car", &sample_detail()).unwrap();
        }

        let contents = fs::read_to_string(dir.path().join("manifest.csv")).unwrap();
        let lines: Vec<&str> = contents.split("\r\n").filter(|l| !l.is_empty()).collect();
        assert_eq!(lines.len(), 3); // header + two rows
        assert_eq!(lines[0], "payload_cid,filename,detail");
        assert!(lines[1].starts_with("QmYjtig7VJQ6XsnUjqqJvj7QaMcCAwtrgNdahSiFofrE7o,slice1.car,"));
    }

    #[test]
    fn commp_layout_has_six_columns_in_the_header() {
        let dir = tempfile::tempdir().unwrap();
        let w = ManifestWriter::open(dir.path(), true).unwrap();
        drop(w);
        let contents = fs::read_to_string(dir.path().join("manifest.csv")).unwrap();
        assert!(contents.starts_with("payload_cid,filename,piece_cid,payload_size,piece_size,detail\r\n"));
    }
}
