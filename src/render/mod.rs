pub mod config;
pub mod mermaid;

use std::fmt::Write;

pub use config::ChartConfig;
pub use mermaid::diagram;

use crate::model::Gantt;

/// Mermaid front matter carrying the theme colors and chart layout.
pub fn front_matter(gantt: &Gantt, config: &ChartConfig) -> String {
    let mut out = String::from("---\nconfig:\n");
    let _ = writeln!(out, "  theme: {}", config.theme);
    out.push_str("  themeVariables:\n");
    let _ = writeln!(out, "    sectionBkgColor: \"{}\"", gantt.section0bgcolor);
    let _ = writeln!(out, "    altSectionBkgColor: \"{}\"", gantt.odd_sectionbgcolor);
    let _ = writeln!(out, "    sectionBkgColor2: \"{}\"", gantt.even_sectionbgcolor);
    let _ = writeln!(out, "    taskBkgColor: \"{}\"", gantt.taskbgcolor);
    out.push_str("  gantt:\n");
    let _ = writeln!(out, "    barGap: {}", config.bar_gap);
    let _ = writeln!(out, "    barHeight: {}", config.bar_height);
    let _ = writeln!(out, "    fontSize: {}", config.font_size);
    let _ = writeln!(out, "    sectionFontSize: {}", config.section_font_size);
    let _ = writeln!(out, "    leftPadding: {}", config.left_padding);
    let _ = writeln!(out, "    topPadding: {}", config.top_padding);
    let _ = writeln!(out, "    gridLineStartPadding: {}", config.grid_line_start_padding);
    out.push_str("---\n");
    out
}

/// Front matter followed by the diagram, ready for a Mermaid renderer.
pub fn render_document(gantt: &Gantt, config: &ChartConfig) -> String {
    let mut out = front_matter(gantt, config);
    out.push_str(&diagram(gantt));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_matter_uses_document_colors() {
        let mut gantt = Gantt::new();
        gantt.taskbgcolor = "#123456".into();
        let text = front_matter(&gantt, &ChartConfig::default());
        assert!(text.starts_with("---\nconfig:\n  theme: base\n"));
        assert!(text.contains("    taskBkgColor: \"#123456\"\n"));
        assert!(text.contains("    sectionBkgColor: \"#85A0F9\"\n"));
        assert!(text.contains("    altSectionBkgColor: \"#2F78C4\"\n"));
        assert!(text.contains("    barHeight: 40\n"));
        assert!(text.ends_with("---\n"));
    }

    #[test]
    fn document_is_front_matter_then_diagram() {
        let gantt = Gantt::new();
        let text = render_document(&gantt, &ChartConfig::default());
        let (head, body) = text.split_at(text.find("gantt\n").unwrap());
        assert!(head.ends_with("---\n"));
        assert_eq!(body, diagram(&gantt));
    }
}
