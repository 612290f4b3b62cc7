use chrono::{DateTime, FixedOffset, TimeZone, Timelike};
use taskteller_core::extract::resolve_due_date;
use taskteller_core::{
    extract_tasks, RawTaskFragment, ResolvedTask, TaskCategory, TaskPriority,
};

fn eastern() -> FixedOffset {
    FixedOffset::west_opt(5 * 3600).unwrap()
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<FixedOffset> {
    eastern()
        .with_ymd_and_hms(year, month, day, hour, minute, 0)
        .unwrap()
}

fn fragment(date: Option<&str>, time: Option<&str>) -> RawTaskFragment {
    RawTaskFragment {
        title: "Task".to_string(),
        due_date_phrase: date.map(str::to_string),
        due_time_phrase: time.map(str::to_string),
        ..RawTaskFragment::default()
    }
}

#[test]
fn two_exam_reply_yields_two_dated_school_tasks() {
    let reply = r#"{"tasks":[{"title":"Math exam","dueDate":"December 11, 2025","dueTime":"4 PM","priority":"high","category":"school","notes":null},{"title":"English exam","dueDate":"December 11, 2025","dueTime":"6 PM","priority":"high","category":"school","notes":null}]}"#;
    let now = at(2025, 12, 1, 10, 0);

    let tasks = extract_tasks(reply, "math exam at 4, english at 6 on the 11th", &now);

    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].title, "Math exam");
    assert_eq!(tasks[1].title, "English exam");
    for task in &tasks {
        assert_eq!(task.category, TaskCategory::School);
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.notes, None);
    }
    assert_eq!(tasks[0].due_date, Some(at(2025, 12, 11, 16, 0)));
    assert_eq!(tasks[1].due_date, Some(at(2025, 12, 11, 18, 0)));
    assert_ne!(tasks[0].id, tasks[1].id);
}

#[test]
fn refusal_reply_keeps_user_input_as_single_task() {
    let now = at(2026, 1, 5, 9, 0);
    let tasks = extract_tasks("Sorry, I cannot help with that.", "call mom tomorrow", &now);

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "call mom tomorrow");
    assert_eq!(tasks[0].due_date, None);
    assert_eq!(tasks[0].priority, TaskPriority::Medium);
    assert_eq!(tasks[0].category, TaskCategory::Other);
}

#[test]
fn task_count_matches_reply_array_length() {
    let reply = r#"{"tasks":[{"title":"a"},{"title":"b"},{"title":"c"},{"title":"d"}]}"#;
    let tasks = extract_tasks(reply, "four things", &at(2026, 1, 5, 9, 0));

    let titles: Vec<&str> = tasks.iter().map(|task| task.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "c", "d"]);
}

#[test]
fn time_without_date_never_produces_a_due_date() {
    let now = at(2026, 1, 5, 9, 0);
    let task = ResolvedTask::from_fragment(fragment(None, Some("4 PM")), &now);

    assert_eq!(task.due_date, None);
}

#[test]
fn unresolvable_date_discards_the_time() {
    let now = at(2026, 1, 5, 9, 0);
    let task = ResolvedTask::from_fragment(fragment(Some("whenever"), Some("4 PM")), &now);

    assert_eq!(task.due_date, None);
}

#[test]
fn date_without_usable_time_is_start_of_day() {
    let now = at(2026, 1, 5, 9, 0);

    let without_time = ResolvedTask::from_fragment(fragment(Some("tomorrow"), None), &now);
    assert_eq!(without_time.due_date, Some(at(2026, 1, 6, 0, 0)));

    let bad_time = ResolvedTask::from_fragment(fragment(Some("tomorrow"), Some("noon")), &now);
    assert_eq!(bad_time.due_date, Some(at(2026, 1, 6, 0, 0)));
}

#[test]
fn relative_date_and_time_combine_in_reference_offset() {
    let now = at(2026, 1, 5, 9, 0);
    let due = resolve_due_date(Some("friday"), Some("4:30 pm"), &now).unwrap();

    assert_eq!(due, at(2026, 1, 9, 16, 30));
    assert_eq!(due.offset(), &eastern());
    assert_eq!(due.second(), 0);
}

#[test]
fn priority_and_category_match_case_insensitively_or_default() {
    let now = at(2026, 1, 5, 9, 0);
    let task = ResolvedTask::from_fragment(
        RawTaskFragment {
            title: "Essay".to_string(),
            priority_phrase: Some("URGENT".to_string()),
            category_phrase: Some("School".to_string()),
            ..RawTaskFragment::default()
        },
        &now,
    );
    assert_eq!(task.priority, TaskPriority::Medium);
    assert_eq!(task.category, TaskCategory::School);

    let task = ResolvedTask::from_fragment(
        RawTaskFragment {
            title: "Groceries".to_string(),
            priority_phrase: Some(" Low ".to_string()),
            category_phrase: Some("errands".to_string()),
            notes: Some("oat milk".to_string()),
            ..RawTaskFragment::default()
        },
        &now,
    );
    assert_eq!(task.priority, TaskPriority::Low);
    assert_eq!(task.category, TaskCategory::Other);
    assert_eq!(task.notes.as_deref(), Some("oat milk"));
}

#[test]
fn empty_title_is_kept_as_is() {
    let now = at(2026, 1, 5, 9, 0);
    let tasks = extract_tasks(r#"{"title":""}"#, "something", &now);

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "");
}

#[test]
fn resolved_task_serializes_with_lowercase_enums() {
    let now = at(2025, 12, 1, 10, 0);
    let reply = r#"{"title":"Math exam","dueDate":"December 11, 2025","dueTime":"4 PM","priority":"High","category":"SCHOOL"}"#;
    let task = extract_tasks(reply, "math exam", &now).remove(0);

    let json = serde_json::to_value(&task).unwrap();
    assert_eq!(json["priority"], "high");
    assert_eq!(json["category"], "school");
    assert!(json["due_date"]
        .as_str()
        .unwrap()
        .starts_with("2025-12-11T16:00:00"));

    let decoded: ResolvedTask = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, task);
}

#[test]
fn pipeline_is_safe_to_run_concurrently() {
    let now = at(2026, 1, 5, 9, 0);
    let reply = r#"{"tasks":[{"title":"a","dueDate":"monday","dueTime":"9 am"}]}"#;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| extract_tasks(reply, "a", &now)))
            .collect();
        for handle in handles {
            let tasks = handle.join().unwrap();
            assert_eq!(tasks[0].due_date, Some(at(2026, 1, 12, 9, 0)));
        }
    });
}

#[test]
fn yearless_due_date_for_today_is_never_in_the_past() {
    let now = at(2026, 10, 14, 12, 0);
    let reply = r#"{"title":"Dentist","dueDate":"October 14","dueTime":"9 AM"}"#;

    let due = extract_tasks(reply, "dentist", &now)[0].due_date.unwrap();

    assert_eq!(due, at(2027, 10, 14, 9, 0));
    assert!(due > now);
}
