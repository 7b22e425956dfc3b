use chrono::NaiveDate;
use deskboard::model::{Task, User};
use deskboard::query::{filter_tasks, filter_users, paginate, total_pages};
use deskboard::stats::TaskStats;
use deskboard::store::{StatusFilter, TaskFilters, PAGE_SIZE_OPTIONS};
use proptest::prelude::*;

fn task(index: usize, title: String, description: String, completed: bool) -> Task {
    Task {
        id: index.to_string(),
        title,
        description,
        completed,
        ..Task::default()
    }
}

fn tasks_strategy() -> impl Strategy<Value = Vec<Task>> {
    let row = ("[a-zA-Z ]{0,12}", "[a-zA-Z ]{0,16}", any::<bool>());
    prop::collection::vec(row, 0..60).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (title, description, completed))| task(i, title, description, completed))
            .collect()
    })
}

fn contains_ignoring_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

proptest! {
    #[test]
    fn pages_cover_the_list_exactly_once(
        len in 0usize..300,
        size_index in 0usize..PAGE_SIZE_OPTIONS.len(),
    ) {
        let items: Vec<usize> = (0..len).collect();
        let page_size = PAGE_SIZE_OPTIONS[size_index];
        let pages = total_pages(len, page_size);

        let mut seen = Vec::new();
        for page in 1..=pages {
            let window = paginate(&items, page, page_size);
            prop_assert!(window.items.len() <= page_size);
            prop_assert!(!window.items.is_empty());
            prop_assert_eq!(window.row_number(0), (page - 1) * page_size + 1);
            seen.extend_from_slice(window.items);
        }
        prop_assert_eq!(seen, items.clone());
        prop_assert!(paginate(&items, pages + 1, page_size).items.is_empty());
    }

    #[test]
    fn completion_rate_stays_in_bounds(tasks in tasks_strategy()) {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let stats = TaskStats::calculate(&tasks, today);

        prop_assert!((0.0..=100.0).contains(&stats.completion_rate));
        prop_assert_eq!(stats.completed + stats.pending, stats.total);
        prop_assert_eq!(stats.total, tasks.len());
        if stats.total == 0 {
            prop_assert_eq!(stats.completion_rate, 0.0);
        } else {
            let expected = stats.completed as f64 / stats.total as f64 * 100.0;
            prop_assert!((stats.completion_rate - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn task_filter_returns_exactly_the_matches(
        tasks in tasks_strategy(),
        term in "[a-zA-Z]{0,3}",
    ) {
        let filters = TaskFilters { search: term.clone(), status: StatusFilter::Pending };
        let matched: Vec<&str> = filter_tasks(&tasks, &filters)
            .into_iter()
            .map(|task| task.id.as_str())
            .collect();

        let expected: Vec<&str> = tasks
            .iter()
            .filter(|task| !task.completed)
            .filter(|task| {
                contains_ignoring_case(&task.title, &term)
                    || contains_ignoring_case(&task.description, &term)
            })
            .map(|task| task.id.as_str())
            .collect();
        prop_assert_eq!(matched, expected);
    }

    #[test]
    fn description_hits_are_found_in_any_case(
        description in "[a-z]{3,10}",
        upper in any::<bool>(),
    ) {
        let tasks = vec![task(0, "untitled".into(), description.clone(), false)];
        let term = if upper { description.to_uppercase() } else { description };
        let filters = TaskFilters { search: term, status: StatusFilter::All };
        prop_assert_eq!(filter_tasks(&tasks, &filters).len(), 1);
    }

    #[test]
    fn user_search_returns_exactly_the_matches(
        rows in prop::collection::vec(("[A-Za-z]{1,8}", "[A-Za-z]{1,8}"), 0..20),
        term in "[a-zA-Z0-9]{1,3}",
    ) {
        let users: Vec<User> = rows
            .into_iter()
            .enumerate()
            .map(|(i, (first, last))| User {
                id: i.to_string(),
                email: Some(format!("{first}.{last}@example.com")),
                first_name: first,
                last_name: last,
                ..User::default()
            })
            .collect();

        let matched: Vec<&str> = filter_users(&users, &term)
            .into_iter()
            .map(|user| user.id.as_str())
            .collect();
        let expected: Vec<&str> = users
            .iter()
            .filter(|user| {
                [&user.first_name, &user.last_name, &user.id]
                    .into_iter()
                    .chain(user.email.as_ref())
                    .any(|field| contains_ignoring_case(field, &term))
            })
            .map(|user| user.id.as_str())
            .collect();
        prop_assert_eq!(matched, expected);
    }

    #[test]
    fn empty_user_search_keeps_everyone(names in prop::collection::vec("[A-Za-z]{1,8}", 0..20)) {
        let users: Vec<User> = names
            .iter()
            .enumerate()
            .map(|(i, name)| User {
                id: i.to_string(),
                first_name: name.clone(),
                ..User::default()
            })
            .collect();
        prop_assert_eq!(filter_users(&users, "").len(), users.len());
    }
}
