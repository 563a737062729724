// ABOUTME: Core types for the seltest wizard
// ABOUTME: Step, Action, and Response types shared by the shell, steps, and runner

use seltest_client::{AppContext, ModelInfo, Story, TestPlan};
use std::path::PathBuf;

/// Wizard steps in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    SelectModel,
    AppContext,
    TestPlan,
    Review,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::SelectModel,
        Step::AppContext,
        Step::TestPlan,
        Step::Review,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Step::SelectModel => "Select Model",
            Step::AppContext => "Set App Context",
            Step::TestPlan => "Generate Test Plan",
            Step::Review => "Review & Download Scripts",
        }
    }

    /// Zero-based position in the stepper
    pub fn index(&self) -> usize {
        match self {
            Step::SelectModel => 0,
            Step::AppContext => 1,
            Step::TestPlan => 2,
            Step::Review => 3,
        }
    }

    pub fn next(&self) -> Option<Step> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn previous(&self) -> Option<Step> {
        self.index().checked_sub(1).map(|i| Self::ALL[i])
    }
}

/// Side effects requested by the state machine, executed by the runner
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    LoadModels,
    SelectModel(String),
    SubmitAppContext(AppContext),
    /// Read the archive at `codebase`, then post the multipart request
    GenerateTestPlan {
        requirements: String,
        codebase: PathBuf,
        model_id: Option<String>,
    },
    DownloadScripts {
        stories: Vec<Story>,
        model_id: Option<String>,
    },
    ExportPlan(TestPlan),
}

/// Results of actions, fed back into the state machine
#[derive(Debug, Clone)]
pub enum Response {
    ModelsLoaded(Result<Vec<ModelInfo>, String>),
    ModelSelected(Result<String, String>),
    AppContextSaved(Result<AppContext, String>),
    /// `Err` carries the message to show verbatim
    TestPlanGenerated(Result<TestPlan, String>),
    ScriptsDownloaded(Result<PathBuf, String>),
    PlanExported(Result<PathBuf, String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_order() {
        assert_eq!(Step::SelectModel.next(), Some(Step::AppContext));
        assert_eq!(Step::TestPlan.next(), Some(Step::Review));
        assert_eq!(Step::Review.next(), None);
        assert_eq!(Step::SelectModel.previous(), None);
        assert_eq!(Step::Review.previous(), Some(Step::TestPlan));
    }

    #[test]
    fn test_step_index_matches_all() {
        for (i, step) in Step::ALL.iter().enumerate() {
            assert_eq!(step.index(), i);
        }
    }

    #[test]
    fn test_step_labels() {
        assert_eq!(Step::Review.label(), "Review & Download Scripts");
    }
}
