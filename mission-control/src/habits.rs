//! Daily habits checklist.
//!
//! Check state is held in memory for the life of the board and is never
//! persisted.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use strum::{Display, EnumIter, IntoEnumIterator};

/// Habit groups, in display order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum HabitGroup {
    Sleep,
    Work,
    Mind,
    Body,
    Money,
    Systems,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub label: String,
    pub group: HabitGroup,
}

impl Habit {
    pub fn new(id: &str, label: &str, group: HabitGroup) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
            group,
        }
    }
}

pub struct HabitBoard {
    habits: Vec<Habit>,
    checked: HashSet<String>,
}

impl HabitBoard {
    pub fn new(habits: Vec<Habit>) -> Self {
        Self {
            habits,
            checked: HashSet::new(),
        }
    }

    /// Flips a habit and returns its new state, or `None` for an unknown id.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        if !self.habits.iter().any(|h| h.id == id) {
            log::warn!("Ignoring toggle for unknown habit {}", id);
            return None;
        }
        if self.checked.remove(id) {
            Some(false)
        } else {
            self.checked.insert(id.to_string());
            Some(true)
        }
    }

    pub fn is_checked(&self, id: &str) -> bool {
        self.checked.contains(id)
    }

    pub fn total(&self) -> usize {
        self.habits.len()
    }

    pub fn completed(&self) -> usize {
        self.habits
            .iter()
            .filter(|h| self.checked.contains(&h.id))
            .count()
    }

    /// Percentage of habits checked, rounded to the nearest integer.
    /// An empty board is 0%.
    pub fn completion(&self) -> u8 {
        let total = self.total();
        if total == 0 {
            return 0;
        }
        ((self.completed() * 100) as f64 / total as f64).round() as u8
    }

    /// "{completed}/{total} habits checked"
    pub fn summary(&self) -> String {
        format!("{}/{} habits checked", self.completed(), self.total())
    }

    /// Habits of each non-empty group, in group order.
    pub fn by_group(&self) -> Vec<(HabitGroup, Vec<&Habit>)> {
        HabitGroup::iter()
            .map(|group| {
                let habits: Vec<&Habit> = self.habits.iter().filter(|h| h.group == group).collect();
                (group, habits)
            })
            .filter(|(_, habits)| !habits.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> HabitBoard {
        HabitBoard::new(vec![
            Habit::new("reveil", "Wake up 05:50", HabitGroup::Sleep),
            Habit::new("deep-work", "Deep work block", HabitGroup::Work),
            Habit::new("gym", "Gym", HabitGroup::Body),
        ])
    }

    #[test]
    fn test_toggle_flips_state() {
        let mut board = board();
        assert!(!board.is_checked("gym"));
        assert_eq!(board.toggle("gym"), Some(true));
        assert!(board.is_checked("gym"));
        assert_eq!(board.toggle("gym"), Some(false));
        assert!(!board.is_checked("gym"));
    }

    #[test]
    fn test_toggle_unknown_habit() {
        let mut board = board();
        assert_eq!(board.toggle("nope"), None);
        assert_eq!(board.completed(), 0);
    }

    #[test]
    fn test_completion_rounds() {
        let mut board = board();
        assert_eq!(board.completion(), 0);
        board.toggle("reveil");
        assert_eq!(board.completion(), 33);
        board.toggle("gym");
        assert_eq!(board.completion(), 67);
        board.toggle("deep-work");
        assert_eq!(board.completion(), 100);
        assert_eq!(board.summary(), "3/3 habits checked");
    }

    #[test]
    fn test_empty_board_is_zero_percent() {
        let board = HabitBoard::new(Vec::new());
        assert_eq!(board.completion(), 0);
        assert_eq!(board.summary(), "0/0 habits checked");
        assert!(board.by_group().is_empty());
    }

    #[test]
    fn test_by_group_keeps_group_order() {
        let board = HabitBoard::new(vec![
            Habit::new("income", "Income", HabitGroup::Money),
            Habit::new("gym", "Gym", HabitGroup::Body),
            Habit::new("read", "Read", HabitGroup::Mind),
            Habit::new("walk", "Walk", HabitGroup::Body),
        ]);
        let groups: Vec<_> = board
            .by_group()
            .into_iter()
            .map(|(g, habits)| (g, habits.len()))
            .collect();
        assert_eq!(
            groups,
            vec![
                (HabitGroup::Mind, 1),
                (HabitGroup::Body, 2),
                (HabitGroup::Money, 1),
            ]
        );
    }

    #[test]
    fn test_group_labels() {
        let labels: Vec<String> = HabitGroup::iter().map(|g| g.to_string()).collect();
        assert_eq!(labels, ["Sleep", "Work", "Mind", "Body", "Money", "Systems"]);
    }
}
