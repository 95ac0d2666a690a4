mod common;

use chore_schedule::{Chore, DueDate, SortKey, compare, sort_by_due};
use chrono::Weekday;
use common::{at, day, fixed_chore, recurring_chore, unscheduled_chore, weekly};
use std::cmp::Ordering;

fn sorted_ids(mut chores: Vec<Chore>, as_of: chrono::NaiveDate) -> Vec<String> {
    sort_by_due(&mut chores, as_of);
    chores.into_iter().map(|c| c.id).collect()
}

// 期日・優先度による並び替えテスト
// 期日ありが先、期日昇順、同日は優先度昇順、期日なしは最後に優先度順となることを確認
#[test]
fn test_dated_before_undated_then_priority() {
    let chores = vec![
        unscheduled_chore("D", 2),
        fixed_chore("B", 2, day(2025, 3, 15)),
        unscheduled_chore("C", 1),
        fixed_chore("A", 1, day(2025, 3, 15)),
    ];
    assert_eq!(sorted_ids(chores, day(2025, 3, 1)), vec!["A", "B", "C", "D"]);
}

#[test]
fn test_earlier_due_date_beats_priority() {
    let chores = vec![
        fixed_chore("urgent-later", -10, day(2025, 3, 20)),
        fixed_chore("relaxed-sooner", 10, day(2025, 3, 16)),
    ];
    assert_eq!(
        sorted_ids(chores, day(2025, 3, 1)),
        vec!["relaxed-sooner", "urgent-later"]
    );
}

#[test]
fn test_timed_due_dates_order_within_day() {
    let chores = vec![
        fixed_chore("evening", 0, at(2025, 3, 15, 18, 0)),
        fixed_chore("morning", 5, at(2025, 3, 15, 9, 0)),
        fixed_chore("untimed", 9, day(2025, 3, 15)),
    ];
    assert_eq!(
        sorted_ids(chores, day(2025, 3, 1)),
        vec!["untimed", "morning", "evening"]
    );
}

// 繰り返しChoreの並び替えテスト
// 次回発生日で固定期日と混在して並ぶことを確認
#[test]
fn test_recurring_sorted_by_next_occurrence() {
    let chores = vec![
        fixed_chore("friday", 0, day(2025, 3, 21)),
        recurring_chore("tuesdays", 0, weekly(day(2024, 1, 1), &[Weekday::Tue])),
        fixed_chore("monday", 0, day(2025, 3, 17)),
    ];
    // As of Wednesday 2025-03-19 the next Tuesday is 2025-03-25
    assert_eq!(
        sorted_ids(chores, day(2025, 3, 19)),
        vec!["monday", "friday", "tuesdays"]
    );
}

#[test]
fn test_sort_is_stable_for_equal_keys() {
    let chores = vec![
        fixed_chore("first", 1, day(2025, 3, 15)),
        fixed_chore("second", 1, day(2025, 3, 15)),
        unscheduled_chore("third", 0),
        unscheduled_chore("fourth", 0),
    ];
    assert_eq!(
        sorted_ids(chores, day(2025, 3, 1)),
        vec!["first", "second", "third", "fourth"]
    );
}

// 比較関数の一貫性テスト
// compare(a,b)とcompare(b,a)が逆になり、SortKeyの比較と一致することを確認
#[test]
fn test_compare_is_antisymmetric() {
    let as_of = day(2025, 3, 19);
    let chores = vec![
        fixed_chore("a", 1, day(2025, 3, 15)),
        fixed_chore("b", 2, at(2025, 3, 15, 0, 30)),
        recurring_chore("c", 0, weekly(day(2024, 1, 1), &[Weekday::Wed])),
        unscheduled_chore("d", 1),
        unscheduled_chore("e", 1),
    ];

    for a in &chores {
        for b in &chores {
            let forward = compare(a, b, as_of);
            assert_eq!(forward, compare(b, a, as_of).reverse(), "{} vs {}", a.id, b.id);
            assert_eq!(forward, SortKey::new(a, as_of).cmp(&SortKey::new(b, as_of)));
        }
    }
    assert_eq!(compare(&chores[3], &chores[4], as_of), Ordering::Equal);
}

#[test]
fn test_sort_key_exposes_effective_due_date() {
    let chore = recurring_chore("c", 0, weekly(day(2024, 1, 1), &[Weekday::Wed]));
    let key = SortKey::new(&chore, day(2025, 3, 18));
    assert_eq!(key.due(), Some(DueDate::on(day(2025, 3, 19))));
}
