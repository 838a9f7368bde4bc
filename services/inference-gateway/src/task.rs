//! The closed set of prediction tasks and their fixed configuration.
//!
//! Dispatch is a pure table lookup keyed by the `Task` enum; there is no
//! fallback between tasks. Label order is a contract with the artifact
//! producer (it must match the order the classifier was trained with) and is
//! never re-derived at inference time.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Task {
    Iris,
    Housing,
}

pub const TASK_COUNT: usize = 2;

impl Task {
    pub const ALL: [Task; TASK_COUNT] = [Task::Iris, Task::Housing];

    pub fn as_str(&self) -> &'static str {
        match self {
            Task::Iris => "iris",
            Task::Housing => "housing",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn spec(&self) -> &'static TaskSpec {
        &TASKS[self.index()]
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Task {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iris" => Ok(Task::Iris),
            "housing" => Ok(Task::Housing),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Categorical,
    Continuous,
}

#[derive(Debug)]
pub struct TaskSpec {
    pub task: Task,
    pub artifact_file: &'static str,
    pub expected_features: usize,
    pub output_kind: OutputKind,
    pub labels: &'static [&'static str],
}

pub const IRIS_LABELS: [&str; 3] = ["setosa", "versicolor", "virginica"];

const TASKS: [TaskSpec; TASK_COUNT] = [
    TaskSpec {
        task: Task::Iris,
        artifact_file: "iris_classifier.json",
        expected_features: 4,
        output_kind: OutputKind::Categorical,
        labels: &IRIS_LABELS,
    },
    TaskSpec {
        task: Task::Housing,
        artifact_file: "housing_regressor.json",
        expected_features: 8,
        output_kind: OutputKind::Continuous,
        labels: &[],
    },
];
