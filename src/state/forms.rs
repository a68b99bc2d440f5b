//! Text-entry form state for the Login, Register and AddList pages.

/// Field focus within the Login form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoginField {
    /// Username input.
    #[default]
    Username,
    /// Password input (rendered masked).
    Password,
}

/// Login page inputs.
#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    /// Username text.
    pub username: String,
    /// Password text; only ever rendered as mask characters.
    pub password: String,
    /// Which field receives keystrokes.
    pub focus: LoginField,
}

impl LoginForm {
    /// Move focus to the other field.
    pub fn cycle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    /// Mutable reference to the focused field's text.
    pub fn focused_text(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    /// Whether both inputs carry non-empty trimmed text.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.username.trim().is_empty() && !self.password.trim().is_empty()
    }

    /// Reset all inputs (used when entering the page).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Field focus within the AddList form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddField {
    /// Place name input (required).
    #[default]
    Name,
    /// Optional reminder message.
    Message,
    /// Optional reminder date (`YYYY-MM-DD`).
    Date,
    /// Latitude input.
    Latitude,
    /// Longitude input.
    Longitude,
}

impl AddField {
    /// Next field in tab order, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            AddField::Name => AddField::Message,
            AddField::Message => AddField::Date,
            AddField::Date => AddField::Latitude,
            AddField::Latitude => AddField::Longitude,
            AddField::Longitude => AddField::Name,
        }
    }

    /// Previous field in tab order, wrapping.
    #[must_use]
    pub fn prev(self) -> Self {
        match self {
            AddField::Name => AddField::Longitude,
            AddField::Message => AddField::Name,
            AddField::Date => AddField::Message,
            AddField::Latitude => AddField::Date,
            AddField::Longitude => AddField::Latitude,
        }
    }
}

/// AddList page inputs, doubling as the edit form when `editing_id` is set.
/// `auto_activate` defaults on; an auto-activated place starts with
/// `is_disable == false`.
#[derive(Clone, Debug)]
pub struct AddPlaceForm {
    /// Place name (required).
    pub name: String,
    /// Optional reminder message.
    pub message: String,
    /// Optional reminder date text.
    pub date: String,
    /// Latitude text, parsed on submit.
    pub latitude: String,
    /// Longitude text, parsed on submit.
    pub longitude: String,
    /// Whether the reminder starts (or stays) enabled.
    pub auto_activate: bool,
    /// Id of the place being edited; `None` when creating.
    pub editing_id: Option<String>,
    /// Which field receives keystrokes.
    pub focus: AddField,
}

impl Default for AddPlaceForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            message: String::new(),
            date: String::new(),
            latitude: String::new(),
            longitude: String::new(),
            auto_activate: true,
            editing_id: None,
            focus: AddField::Name,
        }
    }
}

impl AddPlaceForm {
    /// Mutable reference to the focused field's text.
    pub fn focused_text(&mut self) -> &mut String {
        match self.focus {
            AddField::Name => &mut self.name,
            AddField::Message => &mut self.message,
            AddField::Date => &mut self.date,
            AddField::Latitude => &mut self.latitude,
            AddField::Longitude => &mut self.longitude,
        }
    }

    /// Validate and extract the submission payload pieces.
    ///
    /// Returns `None` when the name is empty or a coordinate fails to parse.
    #[must_use]
    pub fn validated(&self) -> Option<(String, Option<f64>, Option<f64>)> {
        let name = self.name.trim();
        if name.is_empty() {
            return None;
        }
        let latitude = match self.latitude.trim() {
            "" => None,
            s => Some(s.parse::<f64>().ok()?),
        };
        let longitude = match self.longitude.trim() {
            "" => None,
            s => Some(s.parse::<f64>().ok()?),
        };
        Some((name.to_string(), latitude, longitude))
    }

    /// Whether the form is editing an existing place.
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    /// Load an existing place into the form for editing.
    pub fn prefill(&mut self, place: &crate::state::Place) {
        *self = Self {
            name: place.name.clone(),
            message: place.reminder_message.clone().unwrap_or_default(),
            date: place.reminder_date.clone().unwrap_or_default(),
            latitude: place.latitude.map(|v| v.to_string()).unwrap_or_default(),
            longitude: place.longitude.map(|v| v.to_string()).unwrap_or_default(),
            auto_activate: !place.is_disable,
            editing_id: Some(place.id.clone()),
            focus: AddField::Name,
        };
    }

    /// Reset all inputs (used when entering the page).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
