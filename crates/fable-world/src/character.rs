use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::id::{CharacterId, ItemId};
use crate::text::normalize;

/// What happens when the hero gives an expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ResponseEffect {
    /// Narration only.
    Text,
    /// The hero receives an item.
    Item(ItemId),
    /// The hero's health changes by a signed amount.
    AlterHealth(i32),
}

/// A character's reaction to one expected answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// What the character says.
    pub text: String,
    /// The mechanical effect.
    pub effect: ResponseEffect,
}

impl Response {
    /// Create a response.
    pub fn new(text: impl Into<String>, effect: ResponseEffect) -> Self {
        Self {
            text: text.into(),
            effect,
        }
    }
}

/// A non-player character.
///
/// Greeting a character with an unresolved question makes it wait for the
/// hero's next input. Any expected answer resolves it for good.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonPlayerCharacter {
    /// Stable id.
    pub id: CharacterId,
    /// Display name, also the name the player types.
    pub name: String,
    /// Shown by `INSPECT` and `EXPLORE`.
    pub description: String,
    /// Said when greeted before the question is resolved.
    pub greeting: String,
    /// Said when greeted after the question is resolved.
    pub resolved_greeting: String,
    has_question: bool,
    responses: BTreeMap<String, Response>,
    resolved: bool,
    waiting: bool,
}

impl NonPlayerCharacter {
    /// Create a character with no question.
    pub fn new(id: CharacterId, name: impl Into<String>, greeting: impl Into<String>) -> Self {
        let greeting = greeting.into();
        Self {
            id,
            name: name.into(),
            description: String::new(),
            resolved_greeting: greeting.clone(),
            greeting,
            has_question: false,
            responses: BTreeMap::new(),
            resolved: false,
            waiting: false,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the greeting used once resolved.
    pub fn with_resolved_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.resolved_greeting = greeting.into();
        self
    }

    /// Mark the greeting as asking a question.
    pub fn with_question(mut self) -> Self {
        self.has_question = true;
        self
    }

    /// Add an expected answer. The key is stored normalized.
    pub fn with_response(mut self, answer: &str, response: Response) -> Self {
        self.responses.insert(normalize(answer), response);
        self
    }

    /// Whether the greeting asks a question.
    pub fn has_question(&self) -> bool {
        self.has_question
    }

    /// Expected answers and their responses.
    pub fn responses(&self) -> impl Iterator<Item = (&str, &Response)> {
        self.responses.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Whether the question has been answered.
    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Whether the character is waiting for the hero's answer.
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// Greet the character, returning what it says.
    ///
    /// A character with an unresolved question starts waiting for an answer.
    pub fn greet(&mut self) -> &str {
        if self.resolved {
            return &self.resolved_greeting;
        }
        if self.has_question {
            self.waiting = true;
        }
        &self.greeting
    }

    /// Offer an answer. The character stops waiting either way; a match
    /// resolves it and returns the response.
    pub fn answer(&mut self, reply: &str) -> Option<Response> {
        self.waiting = false;
        let response = self.responses.get(&normalize(reply)).cloned()?;
        self.resolved = true;
        Some(response)
    }
}
