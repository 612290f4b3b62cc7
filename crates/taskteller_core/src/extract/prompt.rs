//! Prompts sent to the language model.
//!
//! The model call itself belongs to the caller; this module only renders the
//! text: the extraction prompt, shaped so the reply lands in the form
//! `decode_reply` expects, and the daily summary request.

use crate::model::task::TaskItem;
use chrono::{DateTime, Days, TimeZone};

const PROMPT_DATE_FORMAT: &str = "%A, %B %-d, %Y";
const MAX_SUMMARY_TASKS: usize = 5;

/// System prompt for the daily summary request.
pub const DAILY_SUMMARY_PROMPT: &str = "You are a friendly productivity assistant. Generate a brief, encouraging daily summary (2-3 sentences max). Be concise and positive.";

/// Renders the system prompt for a request made at `now`.
pub fn build_extraction_prompt<Tz: TimeZone>(now: &DateTime<Tz>) -> String {
    let today = now.date_naive();
    let today_text = today.format(PROMPT_DATE_FORMAT).to_string();
    let tomorrow_text = today
        .checked_add_days(Days::new(1))
        .map(|tomorrow| tomorrow.format(PROMPT_DATE_FORMAT).to_string())
        .unwrap_or_else(|| "the day after today".to_string());

    format!(
        r#"You are a task parser. Extract ALL tasks from the user's input. The user may mention multiple tasks in one sentence.
Today's date is {today_text}.

Return a JSON object with a "tasks" array containing each task. Each task should have:
- title: string (clear, concise task description)
- dueDate: string or null (in "MMMM d, yyyy" format like "December 11, 2025", or "tomorrow")
- dueTime: string or null (like "4 PM", "6 PM", "16:00")
- priority: string ("low", "medium", or "high" - use "high" for exams, deadlines, urgent items)
- category: string ("work", "personal", "school", "health", "shopping", or "other")
- notes: string or null

IMPORTANT:
- If the user mentions multiple distinct tasks/events, create SEPARATE task objects for each one
- "tomorrow" means {tomorrow_text}
- Exams and tests should be "school" category and "high" priority

Example input: "I have a math exam on December 11 at 4 PM and an English exam the same day at 6 PM"
Example output: {{"tasks": [{{"title": "Math exam", "dueDate": "December 11, 2025", "dueTime": "4 PM", "priority": "high", "category": "school", "notes": null}}, {{"title": "English exam", "dueDate": "December 11, 2025", "dueTime": "6 PM", "priority": "high", "category": "school", "notes": null}}]}}

Return ONLY valid JSON, no additional text."#
    )
}

/// Renders the user message that carries the captured text.
pub fn build_user_message(text: &str) -> String {
    format!("Parse these tasks: {text}")
}

/// Renders the user message for the daily summary.
///
/// Counts cover every task; only the first five are listed, in the order
/// given.
pub fn build_daily_summary_message(tasks: &[TaskItem], event_count: usize) -> String {
    let mut message = format!(
        "Today I have {} task(s) and {event_count} calendar event(s). ",
        tasks.len()
    );
    if tasks.is_empty() {
        message.push_str("No specific tasks yet.");
        return message;
    }

    let lines: Vec<String> = tasks
        .iter()
        .take(MAX_SUMMARY_TASKS)
        .map(|task| format!("- {} (priority: {})", task.title, task.priority.display_name()))
        .collect();
    message.push_str("My tasks:\n");
    message.push_str(&lines.join("\n"));
    message
}

#[cfg(test)]
mod tests {
    use super::{build_daily_summary_message, build_extraction_prompt, build_user_message};
    use crate::model::task::{ResolvedTask, TaskPriority};
    use chrono::{FixedOffset, TimeZone, Utc};

    #[test]
    fn prompt_embeds_today_and_tomorrow() {
        let now = FixedOffset::west_opt(5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 14, 9, 0, 0)
            .unwrap();
        let prompt = build_extraction_prompt(&now);

        assert!(prompt.contains("Today's date is Wednesday, October 14, 2026."));
        assert!(prompt.contains("\"tomorrow\" means Thursday, October 15, 2026"));
        assert!(prompt.contains(r#"{"tasks": [{"title": "Math exam""#));
    }

    #[test]
    fn user_message_wraps_text() {
        assert_eq!(
            build_user_message("call mom tomorrow"),
            "Parse these tasks: call mom tomorrow"
        );
    }

    #[test]
    fn daily_summary_lists_at_most_five_tasks() {
        let tasks: Vec<_> = (1..=6)
            .map(|index| {
                let mut task = ResolvedTask::new(format!("task {index}"));
                if index == 1 {
                    task.priority = TaskPriority::High;
                }
                task.into_task_item("owner-1", Utc::now())
            })
            .collect();

        let message = build_daily_summary_message(&tasks, 2);

        assert!(message.starts_with("Today I have 6 task(s) and 2 calendar event(s). My tasks:\n"));
        assert!(message.contains("- task 1 (priority: High)"));
        assert!(message.contains("- task 5 (priority: Medium)"));
        assert!(!message.contains("task 6"));
    }

    #[test]
    fn daily_summary_without_tasks_says_so() {
        assert_eq!(
            build_daily_summary_message(&[], 0),
            "Today I have 0 task(s) and 0 calendar event(s). No specific tasks yet."
        );
    }
}
