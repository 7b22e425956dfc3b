//! Dashboard aggregates.

use chrono::{Days, NaiveDate};

use crate::model::date::parse_date;
use crate::model::Task;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage in `0.0..=100.0`; zero for an empty list.
    pub completion_rate: f64,
    pub this_week: usize,
}

impl TaskStats {
    pub fn calculate(tasks: &[Task], today: NaiveDate) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|task| task.completed).count();
        let completion_rate = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };

        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate,
            this_week: tasks_this_week(tasks, today),
        }
    }

    pub fn completion_rate_label(&self) -> String {
        format!("{:.1}%", self.completion_rate)
    }
}

/// Tasks whose start (else creation) date falls within the last seven days.
pub fn tasks_this_week(tasks: &[Task], today: NaiveDate) -> usize {
    let Some(week_ago) = today.checked_sub_days(Days::new(7)) else {
        return 0;
    };
    tasks
        .iter()
        .filter_map(|task| task.activity_date().and_then(parse_date))
        .filter(|date| *date >= week_ago)
        .count()
}

/// One dashboard tile.
#[derive(Debug, Clone, PartialEq)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub description: Option<&'static str>,
}

pub fn stat_cards(stats: &TaskStats, user_count: usize) -> Vec<StatCard> {
    vec![
        StatCard {
            title: "Total Tasks",
            value: stats.total.to_string(),
            description: Some("All tasks in system"),
        },
        StatCard {
            title: "Completed",
            value: stats.completed.to_string(),
            description: Some("Successfully finished"),
        },
        StatCard {
            title: "Total Users",
            value: user_count.to_string(),
            description: Some("Active users"),
        },
        StatCard {
            title: "Pending",
            value: stats.pending.to_string(),
            description: Some("Awaiting completion"),
        },
    ]
}

pub fn additional_stats(stats: &TaskStats) -> Vec<StatCard> {
    vec![
        StatCard {
            title: "This Week",
            value: stats.this_week.to_string(),
            description: None,
        },
        StatCard {
            title: "Completion Rate",
            value: stats.completion_rate_label(),
            description: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(completed: bool, start: Option<&str>, created: Option<&str>) -> Task {
        Task {
            completed,
            start_date: start.map(str::to_string),
            created_at: created.map(str::to_string),
            ..Task::default()
        }
    }

    #[test]
    fn empty_list_has_zero_rate() {
        let stats = TaskStats::calculate(&[], day(2025, 1, 1));
        assert_eq!(stats, TaskStats::default());
        assert_eq!(stats.completion_rate_label(), "0.0%");
    }

    #[test]
    fn counts_and_rate() {
        let tasks = vec![task(true, None, None), task(false, None, None), task(false, None, None)];
        let stats = TaskStats::calculate(&tasks, day(2025, 1, 1));
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.completion_rate_label(), "33.3%");
    }

    #[test]
    fn this_week_uses_start_then_created() {
        let today = day(2025, 7, 10);
        let tasks = vec![
            task(false, Some("2025-07-09"), None),
            task(false, Some("2025-07-03"), None),
            task(false, Some("2025-07-02"), None),
            task(false, None, Some("2025-07-08T12:00:00Z")),
            task(false, None, None),
            task(false, Some("garbage"), None),
        ];
        assert_eq!(tasks_this_week(&tasks, today), 3);
    }

    #[test]
    fn cards_follow_dashboard_order() {
        let stats = TaskStats {
            total: 4,
            completed: 3,
            pending: 1,
            completion_rate: 75.0,
            this_week: 2,
        };
        let titles: Vec<_> = stat_cards(&stats, 9).iter().map(|c| c.title).collect();
        assert_eq!(titles, ["Total Tasks", "Completed", "Total Users", "Pending"]);
        assert_eq!(stat_cards(&stats, 9)[2].value, "9");
        assert_eq!(additional_stats(&stats)[1].value, "75.0%");
    }
}
