// Event module
// Party schedule event model

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Closed set of party-planning categories.
///
/// Categories only influence presentation (block colour, badges); the
/// layout and gesture engines never branch on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Setup,
    Food,
    Entertainment,
    Activity,
    Cleanup,
}

impl Category {
    /// Fallback block colour for events without an explicit colour.
    pub fn default_color(&self) -> &'static str {
        match self {
            Category::Setup => "#7E9CD8",
            Category::Food => "#D8A657",
            Category::Entertainment => "#A48EC7",
            Category::Activity => "#6FAF8D",
            Category::Cleanup => "#9A9A9A",
        }
    }
}

/// Event priority, presentation-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Priority {
    Low,
    #[default]
    Normal,
    High,
}

/// A scheduled item on the party timeline.
///
/// An event with an `end` is a duration event; one without is a milestone
/// (a fixed-size marker at a single instant). The timeline never mutates
/// events it is given - a completed drag hands a proposed new time range
/// back to the caller, which owns persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub start: DateTime<Local>,
    /// `None` marks a milestone.
    pub end: Option<DateTime<Local>>,
    pub category: Option<Category>,
    pub priority: Priority,
    /// Optional hex colour override (#RRGGBB).
    pub color: Option<String>,
}

impl Event {
    /// Create a new duration event with required fields.
    ///
    /// # Examples
    /// ```
    /// use party_timeline::models::event::Event;
    /// use chrono::Local;
    ///
    /// let start = Local::now();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = Event::new("cake", "Cake cutting", start, Some(end)).unwrap();
    /// ```
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Local>,
        end: Option<DateTime<Local>>,
    ) -> Result<Self, String> {
        let event = Self {
            id: id.into(),
            title: title.into(),
            description: None,
            start,
            end,
            category: None,
            priority: Priority::Normal,
            color: None,
        };
        event.validate()?;
        Ok(event)
    }

    /// Create a milestone marker at a single instant.
    pub fn milestone(
        id: impl Into<String>,
        title: impl Into<String>,
        at: DateTime<Local>,
    ) -> Result<Self, String> {
        Self::new(id, title, at, None)
    }

    /// Create a builder for constructing events with optional fields.
    pub fn builder() -> EventBuilder {
        EventBuilder::new()
    }

    /// Validate the event.
    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("Event id cannot be empty".to_string());
        }

        if self.title.trim().is_empty() {
            return Err("Event title cannot be empty".to_string());
        }

        if let Some(end) = self.end {
            if end <= self.start {
                return Err("Event end time must be after start time".to_string());
            }
        }

        // Validate color format if present (should be hex color)
        if let Some(ref color) = self.color {
            if !color.starts_with('#') || (color.len() != 7 && color.len() != 4) {
                return Err("Color must be in hex format (#RRGGBB or #RGB)".to_string());
            }
        }

        Ok(())
    }

    /// True for events without an end time.
    pub fn is_milestone(&self) -> bool {
        self.end.is_none()
    }

    /// Duration of the event, `None` for milestones.
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.end.map(|end| end - self.start)
    }
}

/// Builder for creating events with optional fields
pub struct EventBuilder {
    id: Option<String>,
    title: Option<String>,
    description: Option<String>,
    start: Option<DateTime<Local>>,
    end: Option<DateTime<Local>>,
    category: Option<Category>,
    priority: Priority,
    color: Option<String>,
}

impl EventBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: None,
            description: None,
            start: None,
            end: None,
            category: None,
            priority: Priority::Normal,
            color: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn start(mut self, start: DateTime<Local>) -> Self {
        self.start = Some(start);
        self
    }

    pub fn end(mut self, end: DateTime<Local>) -> Self {
        self.end = Some(end);
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the event colour (hex format).
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Build the event.
    pub fn build(self) -> Result<Event, String> {
        let id = self.id.ok_or("Event id is required")?;
        let title = self.title.ok_or("Event title is required")?;
        let start = self.start.ok_or("Event start time is required")?;

        let event = Event {
            id,
            title,
            description: self.description,
            start,
            end: self.end,
            category: self.category,
            priority: self.priority,
            color: self.color,
        };

        event.validate()?;
        Ok(event)
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}
