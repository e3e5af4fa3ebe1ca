//! Persona Model and Customization State
//!
//! The persona describes how the assistant presents itself: name, traits,
//! and communication style. Enforcement happens in the backend; this is
//! the editable client-side copy behind the persona settings view.
//! Persistence to the backend is not wired up yet, so `save` only records
//! the outcome message the UI shows.

use serde::{Deserialize, Serialize};

/// A named character trait with a short description
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaTrait {
    /// Trait name
    pub name: String,
    /// What the trait means in practice
    pub description: String,
}

impl PersonaTrait {
    /// Create a trait
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// The assistant's persona
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Display name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Primary conversation language
    pub primary_language: String,
    /// Secondary language, empty when unused
    pub secondary_language: String,
    /// Core character traits
    pub core_traits: Vec<PersonaTrait>,
    /// Response style bullet points
    pub response_style: Vec<String>,
    /// Free-form communication style guidance
    pub communication_style: String,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            name: "Nova".to_string(),
            description: "A personal AI assistant - cognitive partner, coding ally, and creative companion.".to_string(),
            primary_language: "English".to_string(),
            secondary_language: String::new(),
            core_traits: vec![
                PersonaTrait::new(
                    "Calm + Curious",
                    "Listens deeply to organize thoughts and spark ideas",
                ),
                PersonaTrait::new("Structured", "Frames answers with clear, ordered reasoning"),
                PersonaTrait::new("Attentive", "Learns preferences over time and adapts"),
            ],
            response_style: vec![
                "Clear, structured guidance for tasks".to_string(),
                "Warmth in tone, never robotic".to_string(),
            ],
            communication_style:
                "Speak clearly and conversationally, clarifying ambiguous phrasing when noticed."
                    .to_string(),
        }
    }
}

/// Partial persona update; unset fields keep their current value
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PersonaUpdate {
    /// New display name
    pub name: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New primary language
    pub primary_language: Option<String>,
    /// New secondary language
    pub secondary_language: Option<String>,
    /// Replacement trait list
    pub core_traits: Option<Vec<PersonaTrait>>,
    /// Replacement response style list
    pub response_style: Option<Vec<String>>,
    /// New communication style guidance
    pub communication_style: Option<String>,
}

/// State behind the persona settings view
#[derive(Clone, Debug, Default)]
pub struct PersonaStore {
    current: Persona,
    customization_open: bool,
    saving: bool,
    save_message: String,
}

impl PersonaStore {
    /// Create a store holding the default persona
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The persona as currently edited
    #[must_use]
    pub fn current(&self) -> &Persona {
        &self.current
    }

    /// Replace the persona wholesale
    pub fn set_current(&mut self, persona: Persona) {
        self.current = persona;
    }

    /// Whether the customization dialog is open
    #[must_use]
    pub fn is_customization_open(&self) -> bool {
        self.customization_open
    }

    /// Open or close the customization dialog
    pub fn set_customization_open(&mut self, open: bool) {
        self.customization_open = open;
    }

    /// Whether a save is in progress
    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Outcome message from the last save, empty when none
    #[must_use]
    pub fn save_message(&self) -> &str {
        &self.save_message
    }

    /// Merge a partial update into the current persona
    pub fn update(&mut self, update: PersonaUpdate) {
        if let Some(name) = update.name {
            self.current.name = name;
        }
        if let Some(description) = update.description {
            self.current.description = description;
        }
        if let Some(language) = update.primary_language {
            self.current.primary_language = language;
        }
        if let Some(language) = update.secondary_language {
            self.current.secondary_language = language;
        }
        if let Some(traits) = update.core_traits {
            self.current.core_traits = traits;
        }
        if let Some(style) = update.response_style {
            self.current.response_style = style;
        }
        if let Some(style) = update.communication_style {
            self.current.communication_style = style;
        }
    }

    /// Record a save of the current persona.
    ///
    /// Backend persistence is not wired up; this only sets the outcome
    /// message the settings view displays.
    pub fn save(&mut self) {
        self.saving = true;
        self.save_message.clear();
        self.save_message = "Persona settings saved successfully!".to_string();
        self.saving = false;
    }

    /// Clear the save outcome message
    pub fn reset_save_message(&mut self) {
        self.save_message.clear();
    }
}
