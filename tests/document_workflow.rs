// End-to-end checks over the public API: build a document, render it,
// persist it, and load it back.

use chrono::{Datelike, NaiveDate, Weekday};
use gantt_builder::model::duration;
use gantt_builder::render::{self, mermaid};
use gantt_builder::{io, ErrorKind, Gantt, SessionStore, TaskId, TaskStatus};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn compile_scenario_emits_tokens_in_order() {
    let mut gantt = Gantt::new();
    let build = gantt.add_section("Build");
    let id = gantt.add_task(build, "Compile", None).unwrap();
    {
        let task = gantt.task_mut(&id).unwrap();
        task.critical = true;
        task.status = TaskStatus::Active;
        task.start = Some(date("2024-02-01"));
        task.set_duration("2d").unwrap();
        task.recalculate_end().unwrap();
    }

    let text = render::diagram(&gantt);
    let expected = format!("  Compile: crit, active, {id}, 2024-02-01, 2024-02-05\n");
    assert!(text.ends_with(&format!("section Build\n{expected}")), "{text}");
}

#[test]
fn add_after_then_remove_everything() {
    let mut gantt = Gantt::new();
    let lane = gantt.add_section("Lane");
    let a = gantt.add_task(lane, "a", None).unwrap();
    let c = gantt.add_task(lane, "c", None).unwrap();
    let b = gantt.add_task(lane, "b", Some(&a)).unwrap();
    let order: Vec<&TaskId> = gantt.sections[lane].tasks.iter().map(|t| &t.id).collect();
    assert_eq!(order, [&a, &b, &c]);

    gantt.remove_task(&a).unwrap();
    gantt.remove_task(&b).unwrap();
    assert_eq!(gantt.sections.len(), 1);
    gantt.remove_task(&c).unwrap();
    assert!(gantt.sections.is_empty());

    let err = gantt.remove_task(&c).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn file_round_trip_keeps_order_and_ids() {
    let mut gantt = Gantt::with_title("Roadmap");
    for lane in ["Design", "Build", "Ship"] {
        let s = gantt.add_section(lane);
        for n in 0..3 {
            gantt.add_task(s, format!("{lane} {n}"), None).unwrap();
        }
    }
    let ids: Vec<TaskId> = gantt.tasks().map(|t| t.id.clone()).collect();
    gantt.add_after(&ids[4], &ids[1]).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(io::export_file_name(&gantt));
    io::save_gantt(&gantt, &path).unwrap();
    let loaded = io::load_gantt(&path).unwrap();

    assert_eq!(loaded, gantt);
    let loaded_ids: Vec<TaskId> = loaded.tasks().map(|t| t.id.clone()).collect();
    assert_eq!(loaded_ids, ids);
    assert_eq!(render::diagram(&loaded), render::diagram(&gantt));
}

#[test]
fn emitter_handles_every_optional_field_combination() {
    for mask in 0u8..16 {
        let mut gantt = Gantt::new();
        let s = gantt.add_section("");
        let id = gantt.add_task(s, "", None).unwrap();
        let other = gantt.add_task(s, "other", None).unwrap();
        let task = gantt.task_mut(&id).unwrap();
        if mask & 1 != 0 {
            task.start = Some(date("2024-01-01"));
        }
        if mask & 2 != 0 {
            task.end = Some(date("2024-01-05"));
        }
        if mask & 4 != 0 {
            task.duration = "4d".into();
        }
        if mask & 8 != 0 {
            gantt.add_after(&id, &other).unwrap();
        }

        let line = mermaid::task_line(gantt.task(&id).unwrap());
        let tokens: Vec<&str> = line.trim_end().split(": ").nth(1).unwrap().split(", ").collect();
        assert_eq!(tokens[0], id.as_str());
        if mask & 2 != 0 {
            assert_eq!(*tokens.last().unwrap(), "2024-01-05");
        } else if mask & 4 != 0 {
            assert_eq!(*tokens.last().unwrap(), "4d");
        }
    }
}

#[test]
fn session_import_replaces_document_wholesale() {
    let mut store = SessionStore::new();
    let id = store.open(None).id;

    let mut incoming = Gantt::with_title("Incoming");
    incoming.add_section("Only");
    incoming.add_task(0, "task", None).unwrap();
    let bytes = io::encode(&incoming).unwrap().into_bytes();

    let session = store.open(Some(id));
    session.add_swimlane(date("2024-03-04")).unwrap();
    session.import(&bytes).unwrap();
    assert_eq!(store.get(id).unwrap().gantt, incoming);

    let session = store.get_mut(id).unwrap();
    let err = session.import(br#"{"title": "no sections"}"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Deserialization);
    assert_eq!(session.gantt, incoming);
}

#[test]
fn end_dates_never_land_on_weekends() {
    let mut start = date("2024-01-01");
    for _ in 0..21 {
        for token in ["", "0d", "1d", "3d", "1w", "1m"] {
            let end = duration::end_date(start, token.parse().unwrap()).unwrap();
            assert!(!matches!(end.weekday(), Weekday::Sat | Weekday::Sun));
            assert!(end >= start);
        }
        start = start.succ_opt().unwrap();
    }
}
