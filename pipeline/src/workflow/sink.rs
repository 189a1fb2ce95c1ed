use anyhow::Context;
use geotarget_core::{IngestError, IngestResult};
use serde_json::{json, Value};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const SENSOR_INDEX: &str = "sensors";
pub const TARGET_INDEX: &str = "targets";

/// Destination for index documents.
pub trait TargetSink {
    fn post(&mut self, index: &str, document: &Value) -> IngestResult<()>;
}

/// Sink shared between the offline run and the HTTP bridge.
pub type SharedSink = Arc<Mutex<Box<dyn TargetSink + Send>>>;

/// Opens the configured sink: a JSON-lines file when a path is set,
/// otherwise an in-memory sink.
pub fn open_sink(path: Option<&Path>) -> anyhow::Result<SharedSink> {
    let sink: Box<dyn TargetSink + Send> = match path {
        Some(path) => Box::new(JsonLinesSink::open(path)?),
        None => Box::new(MemorySink::new()),
    };
    Ok(Arc::new(Mutex::new(sink)))
}

/// Keeps documents in memory, in posting order.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Vec<(String, Value)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn documents(&self) -> &[(String, Value)] {
        &self.documents
    }

    #[cfg(test)]
    pub fn documents_in<'a>(&'a self, index: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.documents
            .iter()
            .filter(move |(name, _)| name == index)
            .map(|(_, document)| document)
    }
}

impl TargetSink for MemorySink {
    fn post(&mut self, index: &str, document: &Value) -> IngestResult<()> {
        self.documents.push((index.to_string(), document.clone()));
        Ok(())
    }
}

/// Appends `{"index": .., "document": ..}` lines to a file.
pub struct JsonLinesSink {
    file: File,
}

impl JsonLinesSink {
    pub fn open<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating sink directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path_ref)
            .with_context(|| format!("opening sink {}", path_ref.display()))?;
        Ok(Self { file })
    }
}

impl TargetSink for JsonLinesSink {
    fn post(&mut self, index: &str, document: &Value) -> IngestResult<()> {
        let line = json!({ "index": index, "document": document });
        writeln!(self.file, "{}", line).map_err(|err| IngestError::Sink(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_filters_by_index() {
        let mut sink = MemorySink::new();
        sink.post(SENSOR_INDEX, &json!({"sensor_id": "1"})).unwrap();
        sink.post(TARGET_INDEX, &json!({"location": "0,0"})).unwrap();
        sink.post(TARGET_INDEX, &json!({"location": "1,1"})).unwrap();

        assert_eq!(sink.documents().len(), 3);
        let targets: Vec<_> = sink.documents_in(TARGET_INDEX).collect();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1]["location"], "1,1");
    }

    #[test]
    fn json_lines_sink_appends_one_line_per_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("documents.jsonl");
        {
            let mut sink = JsonLinesSink::open(&path).unwrap();
            sink.post(TARGET_INDEX, &json!({"location": "0,0"})).unwrap();
            sink.post(TARGET_INDEX, &json!({"location": "1,1"})).unwrap();
        }
        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["index"], "targets");
        assert_eq!(lines[1]["document"]["location"], "1,1");
    }

    #[test]
    fn open_sink_writes_to_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("documents.jsonl");
        let sink = open_sink(Some(&path)).unwrap();
        sink.lock()
            .unwrap()
            .post(SENSOR_INDEX, &json!({"sensor_id": "1"}))
            .unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 1);

        assert!(open_sink(None).is_ok());
    }
}
