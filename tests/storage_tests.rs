mod common;

use chore_schedule::{ChoreHandler, DueDate, Schedule, Storage, effective_due_date};
use chrono::Weekday;
use common::{at, day, fixed_chore, recurring_chore, temp_chores_file, unscheduled_chore, weekly};
use tempfile::NamedTempFile;

const SAMPLE_TOML: &str = r#"
[[chores]]
id = "trash"
title = "Take out the trash"
priority = 2
remind_until_done = true
recurrence = { frequency = "WEEKLY", byWeekday = ["TU"], start = 2024-01-01 }

[[chores]]
id = "call"
title = "Call the landlord"
priority = 1
due_date = 2025-03-15T14:00:00

[[chores]]
id = "bills"
title = "Pay bills"
recurrence = '{"frequency":"MONTHLY","byMonthDay":15,"start":"2024-01-15"}'

[[chores]]
id = "broken"
title = "Water plants"
description = "Kitchen and balcony"
recurrence = '{"frequency":"WEEKLY","start":"2025-'
"#;

fn sample_handler() -> (NamedTempFile, ChoreHandler) {
    let file = temp_chores_file(".toml", SAMPLE_TOML);
    // 2025-03-18 is a Tuesday
    let handler = ChoreHandler::open(file.path(), day(2025, 3, 18)).unwrap();
    (file, handler)
}

// TOMLファイル読み込みテスト
// 各行のスケジュールが正しく読み込まれ、壊れた繰り返しは予定なしになることを確認
#[test_log::test]
fn test_load_toml_chores() {
    let (_file, handler) = sample_handler();
    let chores = handler.chores();
    assert_eq!(chores.len(), 4);

    assert!(chores[0].remind_until_done);
    match &chores[0].schedule {
        Schedule::Recurring(rule) => assert_eq!(rule.weekdays(), &[Weekday::Tue]),
        other => panic!("expected a recurrence, got {:?}", other),
    }
    assert_eq!(
        chores[1].schedule,
        Schedule::Fixed(DueDate::at(at(2025, 3, 15, 14, 0)))
    );
    assert_eq!(
        effective_due_date(&chores[2], handler.today()),
        Some(DueDate::on(day(2025, 4, 15)))
    );
    assert_eq!(chores[3].schedule, Schedule::Unscheduled);
}

#[test]
fn test_load_json_chores() {
    let content = r#"{
        "chores": [
            { "id": "a", "title": "Dust", "dueDate": "2025-03-20" },
            { "id": "b", "name": "Mop", "recurrence": { "freq": "DAILY", "dtstart": "2025-01-01" } }
        ]
    }"#;
    let file = temp_chores_file(".json", content);
    let chores = Storage::new(file.path()).load().unwrap();
    assert_eq!(chores.len(), 2);
    assert_eq!(chores[0].schedule, Schedule::Fixed(DueDate::on(day(2025, 3, 20))));
    assert_eq!(chores[1].title, "Mop");
    assert!(chores[1].schedule.is_recurring());
}

// 存在しないファイルのテスト
// ファイルがない場合・空の場合は空リストとして扱われることを確認
#[test]
fn test_missing_or_empty_file_is_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let missing = Storage::new(dir.path().join("none.toml"));
    assert!(missing.load().unwrap().is_empty());

    let empty = temp_chores_file(".json", "  \n");
    assert!(Storage::new(empty.path()).load().unwrap().is_empty());
}

#[test]
fn test_unparsable_file_is_an_error() {
    let file = temp_chores_file(".json", "{ not json");
    let err = Storage::new(file.path()).load().unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse"));
}

// 保存と再読み込みのテスト
// JSONとTOMLの両方で保存した内容が同じChoreとして読み戻せることを確認
#[test]
fn test_save_and_reload() {
    let mut described = unscheduled_chore("free", 4);
    described.description = Some("Whenever".to_string());
    let chores = vec![
        fixed_chore("call", 1, at(2025, 3, 15, 14, 0)),
        recurring_chore("trash", 2, weekly(day(2024, 1, 1), &[Weekday::Tue, Weekday::Fri]))
            .with_remind_until_done(true),
        described.with_done(true),
    ];

    let dir = tempfile::tempdir().unwrap();
    for name in ["chores.json", "chores.toml"] {
        let storage = Storage::new(dir.path().join(name));
        storage.save(&chores).unwrap();
        assert_eq!(storage.load().unwrap(), chores, "round trip through {}", name);
    }
}

// 今日のChore一覧テスト
// 当日対象のChoreと予定なしのChoreが表示されることを確認
#[test_log::test]
fn test_handle_today() {
    let (_file, handler) = sample_handler();
    let output = handler.handle_today(false);

    assert!(output.starts_with("Found 2 chore(s):"));
    let trash = output.find("[trash]").unwrap();
    let broken = output.find("[broken]").unwrap();
    assert!(trash < broken);
    assert!(!output.contains("[call]"));
    assert!(!output.contains("[bills]"));
}

#[test_log::test]
fn test_handle_list_order_and_filters() {
    let (_file, handler) = sample_handler();
    let output = handler.handle_list(None, false, false);

    let positions: Vec<usize> = ["[call]", "[trash]", "[bills]", "[broken]"]
        .iter()
        .map(|id| output.find(id).unwrap())
        .collect();
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(output.contains("- [call] Call the landlord (priority: 1) [overdue]"));
    assert!(output.contains("  Description: Kitchen and balcony"));

    let filtered = handler.handle_list(Some("PLANTS".to_string()), false, true);
    assert!(filtered.starts_with("Found 1 chore(s):"));
    assert!(!filtered.contains("Description"));
}

// リマインダー出力テスト
// 当日対象のChoreのみ通知対象になることを確認
#[test_log::test]
fn test_handle_reminders() {
    let (_file, handler) = sample_handler();
    let output = handler.handle_reminders();

    assert!(output.starts_with("2 reminder(s) for 2025-03-18:"));
    assert!(output.contains("- [trash] Take out the trash (due today)"));
    assert!(output.contains("- [broken] Water plants (due today)"));

    let quiet = ChoreHandler::new(vec![fixed_chore("x", 0, day(2025, 3, 20))], day(2025, 3, 18));
    assert_eq!(quiet.handle_reminders(), "No reminders for 2025-03-18");
}

#[test]
fn test_handle_occurrences() {
    let (_file, handler) = sample_handler();

    let output = handler
        .handle_occurrences("trash", None, Some("2025-04-01".to_string()), 10)
        .unwrap();
    assert!(output.starts_with("[trash] Take out the trash: Every week on Tuesday\n"));
    assert!(output.contains("- 2025-03-18 (Tuesday)"));
    assert!(output.contains("- 2025-03-25 (Tuesday)"));
    assert!(output.contains("- 2025-04-01 (Tuesday)"));

    let limited = handler
        .handle_occurrences(" bills ", Some("2025-01-01".to_string()), None, 2)
        .unwrap();
    assert_eq!(limited.matches("\n- ").count(), 2);

    let past = handler
        .handle_occurrences("call", Some("2025-03-16".to_string()), None, 10)
        .unwrap();
    assert!(past.contains("No occurrences in range"));

    let none = handler.handle_occurrences("broken", None, None, 10).unwrap();
    assert_eq!(none, "Chore broken has no schedule");
}

#[test]
fn test_handle_occurrences_errors() {
    let (_file, handler) = sample_handler();

    let err = handler.handle_occurrences("nope", None, None, 10).unwrap_err();
    assert!(err.to_string().contains("Available chores: trash, call, bills, broken"));

    let err = handler
        .handle_occurrences(
            "trash",
            Some("2025-03-10".to_string()),
            Some("2025-03-01".to_string()),
            10,
        )
        .unwrap_err();
    assert!(err.to_string().contains("is before start date"));

    assert!(
        handler
            .handle_occurrences("trash", Some("03/10/2025".to_string()), None, 10)
            .is_err()
    );
}
