use taskboard_core::{Task, TaskId};

/// Tracks which visible task is selected, independent of IO.
///
/// Rebuilt whenever the list or the filter changes; the previously selected
/// task keeps the selection when it is still visible.
#[derive(Debug, Default)]
pub(super) struct Selection {
    visible_ids: Vec<TaskId>,
    selected: usize,
}

impl Selection {
    pub(super) fn rebuild(&mut self, visible: &[&Task], preferred: Option<TaskId>) {
        self.visible_ids = visible.iter().map(|task| task.id).collect();

        if self.visible_ids.is_empty() {
            self.selected = 0;
            return;
        }

        self.selected = preferred
            .and_then(|id| self.visible_ids.iter().position(|&visible_id| visible_id == id))
            .unwrap_or_else(|| self.selected.min(self.visible_ids.len() - 1));
    }

    pub(super) fn has_tasks(&self) -> bool {
        !self.visible_ids.is_empty()
    }

    pub(super) const fn selected_index(&self) -> usize {
        self.selected
    }

    pub(super) fn selected_id(&self) -> Option<TaskId> {
        self.visible_ids.get(self.selected).copied()
    }

    pub(super) fn select_next(&mut self) {
        if !self.visible_ids.is_empty() && self.selected + 1 < self.visible_ids.len() {
            self.selected += 1;
        }
    }

    pub(super) fn select_prev(&mut self) {
        if !self.visible_ids.is_empty() && self.selected > 0 {
            self.selected -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, done: bool) -> Task {
        Task {
            id: TaskId(id),
            text: format!("task {id}"),
            done,
        }
    }

    #[test]
    fn rebuild_selects_the_first_task_by_default() {
        let tasks = [task(1, false), task(2, false)];
        let visible: Vec<&Task> = tasks.iter().collect();
        let mut selection = Selection::default();
        selection.rebuild(&visible, None);

        assert_eq!(selection.selected_id(), Some(TaskId(1)));
        assert!(selection.has_tasks());
    }

    #[test]
    fn rebuild_keeps_the_preferred_task_when_still_visible() {
        let tasks = [task(1, false), task(2, false), task(3, false)];
        let visible: Vec<&Task> = tasks.iter().collect();
        let mut selection = Selection::default();
        selection.rebuild(&visible, Some(TaskId(3)));

        assert_eq!(selection.selected_id(), Some(TaskId(3)));
    }

    #[test]
    fn rebuild_clamps_when_the_preferred_task_disappeared() {
        let tasks = [task(1, false), task(2, false), task(3, false)];
        let visible: Vec<&Task> = tasks.iter().collect();
        let mut selection = Selection::default();
        selection.rebuild(&visible, Some(TaskId(3)));

        let shorter: Vec<&Task> = tasks[..1].iter().collect();
        selection.rebuild(&shorter, Some(TaskId(3)));
        assert_eq!(selection.selected_id(), Some(TaskId(1)));
    }

    #[test]
    fn navigation_stops_at_both_ends() {
        let tasks = [task(1, false), task(2, false)];
        let visible: Vec<&Task> = tasks.iter().collect();
        let mut selection = Selection::default();
        selection.rebuild(&visible, None);

        selection.select_prev();
        assert_eq!(selection.selected_id(), Some(TaskId(1)));
        selection.select_next();
        assert_eq!(selection.selected_id(), Some(TaskId(2)));
        selection.select_next();
        assert_eq!(selection.selected_id(), Some(TaskId(2)));
    }

    #[test]
    fn empty_list_has_no_selection() {
        let mut selection = Selection::default();
        selection.rebuild(&[], None);
        assert_eq!(selection.selected_id(), None);
        assert!(!selection.has_tasks());
    }
}
