//! Deriving a calendar, editing it, storing it and describing it.
use intercalate::algorithm::derivation::{Solution, derive};
use intercalate::algorithm::editor::CalendarEditor;
use intercalate::data::calendar::IntercalationType;
use intercalate::error::CalendarError;
use intercalate::io::import;
use intercalate::io::project::Project;
use intercalate::io::summary::{TextWriter, fill_writer};

use crate::input;

#[test]
fn edit_save_describe() {
    let input = input("365 97/400", "29 1/2", 12);
    let mut editor = CalendarEditor::new();
    editor.offer(derive(Solution::Gregorian, &input).unwrap());
    assert!(!editor.in_error_state());

    editor.select_first_month();
    editor.rename_selected_month("Thaw");
    assert!(editor.remove_normal_day());
    assert!(editor.in_error_state());
    assert!(editor.final_calendar().is_err());
    editor.select_next_month();
    assert!(editor.add_normal_day());
    editor.switch_rule(1, false);
    assert!(!editor.in_error_state());

    let calendar = editor.final_calendar().unwrap().clone();
    let first = calendar.year().months()[0].clone();
    let second = calendar.year().months()[1].clone();
    let project = Project::new(input, Solution::Gregorian, calendar);

    let name = format!("intercalate-workflow-{}.json", std::process::id());
    let path = std::env::temp_dir().join(name);
    project.save(&path).unwrap();
    let loaded = import(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, project);
    assert_eq!(loaded.calendar.year().months()[0], first);
    assert_eq!(loaded.calendar.year().months()[1], second);
    assert!(!loaded.calendar.is_rule_turned_on(1));

    let mut writer = TextWriter::new(Some("Thaw calendar"));
    fill_writer(&mut writer, &loaded);
    let text = writer.result();
    assert!(text.starts_with("###\tTHAW CALENDAR\t###"));
    assert!(text.contains(&format!("1. Thaw\n\t\t{} days", first.normal_days)));
    assert!(text.contains(" * every 4th year is a leap year\n"));
    assert!(text.contains(" * every 400th year is a leap year\n"));
    assert!(!text.contains("100th"));
}

#[test]
fn rederive_keeps_names() {
    let metonic = derive(Solution::Metonic, &input("365 2422/10000", "29 53059/100000", 12));
    let mut editor = CalendarEditor::with_calendar(metonic.unwrap());
    editor.select_first_month();
    editor.rename_selected_month("Nisan");

    editor.offer(derive(Solution::Islamic, &input("365", "29 191/360", 12)).unwrap());
    assert!(editor.is_new_calendar_awaiting());
    editor.switch_to_awaiting_calendar();
    assert!(!editor.is_new_calendar_awaiting());

    let calendar = editor.final_calendar().unwrap();
    assert!(calendar.has_cycle());
    assert_eq!(calendar.year().month_count(), 12);
    assert_eq!(calendar.year().months()[0].name, "Nisan");
    assert_eq!(calendar.year().months()[1].name, "#2");
    assert_eq!(calendar.cycle().map(<[_]>::len), Some(30));
    assert!(calendar.is_cycle_of(1, IntercalationType::Leap));
}

#[test]
fn broken_project() {
    let path = std::env::temp_dir().join(format!("intercalate-broken-{}.json", std::process::id()));
    std::fs::write(&path, "{\"calendar\": []}").unwrap();
    let result = import(&path);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(result, Err(CalendarError::InvalidCalendarState("could not open project".into())));
}
