//! Summary counts for the statistics panel.

use crate::domain::{Priority, Task};

/// Counts over the full task collection (not the filtered view).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Completed share rounded to the nearest whole percent; 0 for an empty list.
    pub completion_percent: u8,
    pub high_priority: usize,
}

impl TaskStats {
    #[must_use]
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let high_priority = tasks
            .iter()
            .filter(|t| t.priority == Some(Priority::High))
            .count();

        let completion_percent = if total == 0 {
            0
        } else {
            // (2c + t) / 2t rounds half up without going through floats.
            u8::try_from((completed * 200 + total) / (total * 2)).unwrap_or(100)
        };

        Self {
            total,
            completed,
            pending: total - completed,
            completion_percent,
            high_priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_collection_is_zero_percent() {
        assert_eq!(TaskStats::from_tasks(&[]), TaskStats::default());
    }

    #[test]
    fn counts_and_rounds() {
        let mut tasks: Vec<Task> = (0..3).map(|i| Task::new(i.to_string(), "t")).collect();
        tasks[0].completed = true;
        tasks[1].priority = Some(Priority::High);
        tasks[2].priority = None;

        let stats = TaskStats::from_tasks(&tasks);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.pending, 2);
        assert_eq!(stats.completion_percent, 33);
        assert_eq!(stats.high_priority, 1);

        tasks[1].completed = true;
        assert_eq!(TaskStats::from_tasks(&tasks).completion_percent, 67);
    }
}
