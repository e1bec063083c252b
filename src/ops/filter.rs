use std::collections::BTreeSet;

use crate::model::task::{Status, Task};
use crate::parse::reference::{calendar_references, is_calendar_note};

/// Error for an unknown status name on the command line
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}' (expected open, done, cancelled, scheduled)")]
pub struct UnknownStatus(pub String);

/// Parse a comma-separated list of status names, e.g. `open,done`
pub fn parse_statuses<'a, I>(values: I) -> Result<BTreeSet<Status>, UnknownStatus>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut statuses = BTreeSet::new();
    for value in values {
        for name in value.split(',').map(str::trim).filter(|n| !n.is_empty()) {
            let status = Status::from_name(name).ok_or_else(|| UnknownStatus(name.to_string()))?;
            statuses.insert(status);
        }
    }
    Ok(statuses)
}

/// Keep tasks whose status is in `wanted`. `None` keeps everything; tasks
/// with an unrecognized checkbox never match a status set.
pub fn filter_by_statuses(tasks: Vec<Task>, wanted: Option<&BTreeSet<Status>>) -> Vec<Task> {
    let Some(wanted) = wanted else {
        return tasks;
    };
    tasks
        .into_iter()
        .filter(|t| t.status().is_some_and(|s| wanted.contains(&s)))
        .collect()
}

pub fn filter_priority_only(tasks: Vec<Task>, enabled: bool) -> Vec<Task> {
    if !enabled {
        return tasks;
    }
    tasks.into_iter().filter(Task::is_priority).collect()
}

/// A task is scheduled when it lives in a calendar note or references a
/// year or a date.
pub fn is_scheduled(task: &Task) -> bool {
    task.note_name().is_some_and(is_calendar_note) || !calendar_references(&task.raw).is_empty()
}

pub fn filter_unscheduled(tasks: Vec<Task>, enabled: bool) -> Vec<Task> {
    if !enabled {
        return tasks;
    }
    tasks.into_iter().filter(|t| !is_scheduled(t)).collect()
}

/// The filters a listing command applies, in one value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub statuses: Option<BTreeSet<Status>>,
    pub priority_only: bool,
    pub unscheduled: bool,
}

impl TaskFilter {
    /// Use `statuses` when the caller gave none
    pub fn with_default_statuses(mut self, statuses: &[Status]) -> Self {
        if self.statuses.is_none() {
            self.statuses = Some(statuses.iter().copied().collect());
        }
        self
    }

    pub fn apply(&self, tasks: Vec<Task>) -> Vec<Task> {
        let tasks = filter_by_statuses(tasks, self.statuses.as_ref());
        let tasks = filter_priority_only(tasks, self.priority_only);
        filter_unscheduled(tasks, self.unscheduled)
    }
}
