pub mod file;
pub mod json;

pub use file::{load_gantt, save_gantt};
pub use json::{decode, decode_slice, encode};

use crate::model::Gantt;

/// File name used when a document without a title is exported.
pub const FALLBACK_FILE_STEM: &str = "most_import_gantt_diagram_ever";

/// Download name for an exported document: `<title>.json`.
pub fn export_file_name(gantt: &Gantt) -> String {
    let title = gantt.title.trim();
    let stem = if title.is_empty() { FALLBACK_FILE_STEM } else { title };
    format!("{stem}.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_name_follows_title() {
        assert_eq!(export_file_name(&Gantt::with_title("Roadmap")), "Roadmap.json");
        assert_eq!(
            export_file_name(&Gantt::new()),
            "most_import_gantt_diagram_ever.json"
        );
    }
}
