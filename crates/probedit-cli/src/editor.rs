//! Editor client state and its event loop.
//!
//! [`EditorState`] holds the two texts and their rendered markup. Every
//! change goes through [`EditorState::apply`], which keeps the rendered
//! fields in step with the texts. [`Editor`] wires that state to the server.

use crate::render::render_latex;
use probedit_domain::Problem;
use probedit_sdk::ProblemClient;
use tracing::{error, info};

/// Events driving the editor state
#[derive(Debug, Clone)]
pub enum EditorEvent {
    /// The latest problem arrived from the server
    Loaded(Problem),
    /// Loading failed; diagnostics only
    LoadFailed(String),
    /// The user replaced the editable text
    Edited(String),
    /// The server accepted a save
    SaveSucceeded,
    /// The save was rejected or never reached the server
    SaveFailed(String),
}

/// Acknowledgment shown to the user after a save
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acknowledgment {
    /// Save went through
    Saved,
    /// Save failed
    SaveFailed,
}

impl Acknowledgment {
    /// User-facing text
    pub fn message(&self) -> &'static str {
        match self {
            Acknowledgment::Saved => "Problem saved successfully!",
            Acknowledgment::SaveFailed => "Failed to save problem. Please try again.",
        }
    }

    /// Whether the save succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, Acknowledgment::Saved)
    }
}

/// Texts under edit and their rendered markup
///
/// All four fields start empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    source_problem: String,
    editable_problem: String,
    rendered_source: String,
    rendered_editable: String,
}

impl EditorState {
    /// Empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Source text (read-only for the user)
    pub fn source_problem(&self) -> &str {
        &self.source_problem
    }

    /// Editable text
    pub fn editable_problem(&self) -> &str {
        &self.editable_problem
    }

    /// Markup for the source text
    pub fn rendered_source(&self) -> &str {
        &self.rendered_source
    }

    /// Markup for the editable text
    pub fn rendered_editable(&self) -> &str {
        &self.rendered_editable
    }

    fn set_source_problem(&mut self, text: String) {
        self.rendered_source = render_latex(&text);
        self.source_problem = text;
    }

    fn set_editable_problem(&mut self, text: String) {
        self.rendered_editable = render_latex(&text);
        self.editable_problem = text;
    }

    /// Apply one event, returning the acknowledgment to show, if any
    pub fn apply(&mut self, event: EditorEvent) -> Option<Acknowledgment> {
        match event {
            EditorEvent::Loaded(problem) => {
                self.set_source_problem(problem.source_problem);
                self.set_editable_problem(problem.editable_problem);
                None
            }
            EditorEvent::LoadFailed(reason) => {
                error!("Error fetching problems: {}", reason);
                None
            }
            EditorEvent::Edited(text) => {
                self.set_editable_problem(text);
                None
            }
            EditorEvent::SaveSucceeded => Some(Acknowledgment::Saved),
            EditorEvent::SaveFailed(reason) => {
                error!("Error saving problem: {}", reason);
                Some(Acknowledgment::SaveFailed)
            }
        }
    }
}

/// Editor session against one server
pub struct Editor {
    client: ProblemClient,
    state: EditorState,
}

impl Editor {
    /// New editor with empty state
    pub fn new(client: ProblemClient) -> Self {
        Self {
            client,
            state: EditorState::new(),
        }
    }

    /// Current state
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Fetch the latest problem into the state
    ///
    /// A failure is logged and leaves the state as it was. Returns whether
    /// the problem was loaded.
    pub async fn load(&mut self) -> bool {
        let event = match self.client.fetch_latest().await {
            Ok(problem) => {
                info!("Loaded problem {}", problem.id);
                EditorEvent::Loaded(problem)
            }
            Err(e) => EditorEvent::LoadFailed(e.to_string()),
        };

        let loaded = matches!(event, EditorEvent::Loaded(_));
        self.state.apply(event);
        loaded
    }

    /// Replace the editable text
    pub fn edit(&mut self, text: impl Into<String>) {
        self.state.apply(EditorEvent::Edited(text.into()));
    }

    /// Send the current editable text to the server
    pub async fn save(&mut self) -> Acknowledgment {
        let event = match self.client.save_editable(self.state.editable_problem()).await {
            Ok(_) => EditorEvent::SaveSucceeded,
            Err(e) => EditorEvent::SaveFailed(e.to_string()),
        };

        self.state
            .apply(event)
            .unwrap_or(Acknowledgment::SaveFailed)
    }
}
