use std::path::Path;

use super::json;
use crate::error::Result;
use crate::model::Gantt;

/// Save a document to a JSON file.
pub fn save_gantt(gantt: &Gantt, path: &Path) -> Result<()> {
    let json = json::encode(gantt)?;
    std::fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "Document saved");
    Ok(())
}

/// Load a document from a JSON file.
pub fn load_gantt(path: &Path) -> Result<Gantt> {
    let json = std::fs::read_to_string(path)?;
    let gantt = json::decode(&json)?;
    tracing::debug!(path = %path.display(), sections = gantt.sections.len(), "Document loaded");
    Ok(gantt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let mut gantt = Gantt::with_title("Plan");
        let s = gantt.add_section("Lane");
        gantt.add_task(s, "Task", None).unwrap();

        save_gantt(&gantt, &path).unwrap();
        assert_eq!(load_gantt(&path).unwrap(), gantt);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_gantt(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
