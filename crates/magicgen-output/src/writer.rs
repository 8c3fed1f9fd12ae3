//! Batch writer: drives record generation into JSON-Lines files.

use crate::error::OutputError;
use crate::prefix::{create_prefixes, PrefixStrategy};
use magicgen_core::Schema;
use magicgen_generator::{Clock, Record, RecordGenerator, SystemClock};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Buffer size for JSON-Lines writing.
const WRITE_BUFFER_SIZE: usize = 8192;

/// A fully validated generation request, consumed by [`BatchWriter`].
///
/// The CLI layer validates directory existence, file name and line count
/// before building a job; the schema's directives are validated when the
/// writer is constructed.
#[derive(Debug, Clone)]
pub struct GenerationJob {
    pub schema: Schema,
    pub output_dir: PathBuf,
    pub file_name: String,
    /// Number of files to write; 0 means preview a single record instead.
    pub files_count: u64,
    /// Records per file.
    pub data_lines: u64,
    pub file_prefix: PrefixStrategy,
    /// Delete existing `<file_name>*.json` files before writing.
    pub clear_path: bool,
}

/// What a batch run produced.
#[derive(Debug)]
pub enum BatchOutcome {
    /// `files_count == 0`: one record for console display, nothing written.
    Preview(Record),
    /// Paths of the files written.
    Files(Vec<PathBuf>),
}

/// Runs a [`GenerationJob`] to completion.
pub struct BatchWriter {
    job: GenerationJob,
    generator: RecordGenerator,
}

impl BatchWriter {
    /// Build a writer, parsing and validating every schema directive.
    pub fn new(job: GenerationJob) -> Result<Self, OutputError> {
        let generator = RecordGenerator::new(&job.schema)?;
        Ok(Self { job, generator })
    }

    /// Run with a fresh entropy-seeded RNG and the system clock.
    pub fn run(&self) -> Result<BatchOutcome, OutputError> {
        self.run_with(&mut StdRng::from_entropy(), &SystemClock)
    }

    /// Run with an injected RNG and clock, for deterministic output.
    ///
    /// Errors abort the batch; files written by earlier iterations remain
    /// on disk.
    pub fn run_with<R: Rng, C: Clock>(
        &self,
        rng: &mut R,
        clock: &C,
    ) -> Result<BatchOutcome, OutputError> {
        if self.job.clear_path {
            let removed = clear_matching_files(&self.job.output_dir, &self.job.file_name)?;
            if removed > 0 {
                info!(removed, "cleared existing data files");
            }
        }

        if self.job.files_count == 0 {
            let record = self.generator.generate(rng, clock)?;
            return Ok(BatchOutcome::Preview(record));
        }

        let mut paths = Vec::with_capacity(self.job.files_count as usize);
        if self.job.files_count == 1 {
            let path = self.job.output_dir.join(format!("{}.json", self.job.file_name));
            self.write_file(&path, rng, clock)?;
            paths.push(path);
        } else {
            for prefix in create_prefixes(self.job.file_prefix, self.job.files_count, rng) {
                let path = self
                    .job
                    .output_dir
                    .join(format!("{}_{prefix}.json", self.job.file_name));
                self.write_file(&path, rng, clock)?;
                paths.push(path);
            }
        }

        info!(
            files = paths.len(),
            lines_per_file = self.job.data_lines,
            "batch generation complete"
        );
        Ok(BatchOutcome::Files(paths))
    }

    /// Write one JSON-Lines file: `data_lines` records, one object per
    /// line, flushed before the handle is dropped.
    fn write_file<R: Rng, C: Clock>(
        &self,
        path: &Path,
        rng: &mut R,
        clock: &C,
    ) -> Result<(), OutputError> {
        debug!(path = %path.display(), "writing data file");

        let file = File::create(path)?;
        let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);
        for _ in 0..self.job.data_lines {
            let record = self.generator.generate(rng, clock)?;
            serde_json::to_writer(&mut writer, &record)?;
            writeln!(writer)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Delete regular files in `dir` whose names match `<file_name>*.json`.
/// Returns the number of files removed.
pub fn clear_matching_files(dir: &Path, file_name: &str) -> Result<usize, OutputError> {
    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if name.starts_with(file_name) && name.ends_with(".json") && entry.file_type()?.is_file() {
            fs::remove_file(entry.path())?;
            removed += 1;
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use magicgen_generator::FixedClock;
    use tempfile::TempDir;

    fn job(dir: &Path, files_count: u64, data_lines: u64) -> GenerationJob {
        let schema = Schema::from_json_str(
            r#"{"date": "timestamp:", "name": "str:rand", "age": "int:rand(1, 90)"}"#,
        )
        .unwrap();
        GenerationJob {
            schema,
            output_dir: dir.to_path_buf(),
            file_name: "data".to_string(),
            files_count,
            data_lines,
            file_prefix: PrefixStrategy::Count,
            clear_path: false,
        }
    }

    fn run(job: GenerationJob) -> BatchOutcome {
        let writer = BatchWriter::new(job).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        writer.run_with(&mut rng, &FixedClock(12345.0)).unwrap()
    }

    #[test]
    fn test_preview_mode_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = run(job(temp_dir.path(), 0, 100));

        let BatchOutcome::Preview(record) = outcome else {
            panic!("expected a preview outcome");
        };
        assert_eq!(record["date"].as_f64().unwrap(), 12345.0);
        assert_eq!(fs::read_dir(temp_dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_single_file_has_no_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = run(job(temp_dir.path(), 1, 10));

        let BatchOutcome::Files(paths) = outcome else {
            panic!("expected files");
        };
        assert_eq!(paths, vec![temp_dir.path().join("data.json")]);

        let content = fs::read_to_string(&paths[0]).unwrap();
        assert!(content.ends_with('\n'));
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 10);
        for line in lines {
            let record: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(record.get("date").is_some());
            assert!(record.get("name").is_some());
            assert!(record.get("age").is_some());
        }
    }

    #[test]
    fn test_multi_file_count_prefixes() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = run(job(temp_dir.path(), 3, 5));

        let BatchOutcome::Files(paths) = outcome else {
            panic!("expected files");
        };
        assert_eq!(paths.len(), 3);
        for name in ["data_0.json", "data_1.json", "data_2.json"] {
            let path = temp_dir.path().join(name);
            assert!(path.exists(), "{name} should exist");
            assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 5);
        }
    }

    #[test]
    fn test_multi_file_uuid_prefixes() {
        let temp_dir = TempDir::new().unwrap();
        let mut j = job(temp_dir.path(), 4, 2);
        j.file_prefix = PrefixStrategy::Uuid;
        let BatchOutcome::Files(paths) = run(j) else {
            panic!("expected files");
        };
        assert_eq!(paths.len(), 4);
        for path in &paths {
            let name = path.file_name().unwrap().to_str().unwrap();
            assert!(name.starts_with("data_") && name.ends_with(".json"));
        }
    }

    #[test]
    fn test_clear_path_removes_matching_files() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("data_old.json"), "{}\n").unwrap();
        fs::write(temp_dir.path().join("data.json"), "{}\n").unwrap();
        fs::write(temp_dir.path().join("other.json"), "{}\n").unwrap();
        fs::write(temp_dir.path().join("data.txt"), "keep").unwrap();

        let mut j = job(temp_dir.path(), 0, 1);
        j.clear_path = true;
        run(j);

        assert!(!temp_dir.path().join("data_old.json").exists());
        assert!(!temp_dir.path().join("data.json").exists());
        assert!(temp_dir.path().join("other.json").exists());
        assert!(temp_dir.path().join("data.txt").exists());
    }

    #[test]
    fn test_deterministic_with_seed() {
        let temp_dir = TempDir::new().unwrap();

        let writer1 = BatchWriter::new(job(temp_dir.path(), 0, 1)).unwrap();
        let writer2 = BatchWriter::new(job(temp_dir.path(), 0, 1)).unwrap();
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);

        let BatchOutcome::Preview(r1) = writer1.run_with(&mut rng1, &FixedClock(1.0)).unwrap()
        else {
            panic!("expected a preview outcome");
        };
        let BatchOutcome::Preview(r2) = writer2.run_with(&mut rng2, &FixedClock(1.0)).unwrap()
        else {
            panic!("expected a preview outcome");
        };
        assert_eq!(r1, r2);
    }

    #[test]
    fn test_invalid_schema_fails_at_construction() {
        let temp_dir = TempDir::new().unwrap();
        let mut j = job(temp_dir.path(), 1, 1);
        j.schema = Schema::from_json_str(r#"{"number": "int:[1, 2, 3.5]"}"#).unwrap();

        let result = BatchWriter::new(j);
        assert!(matches!(result, Err(OutputError::Record(_))));
    }
}
