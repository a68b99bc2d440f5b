//! Core value types shared across Waypost's cache, navigation and UI layers.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair. Used both for device fixes and place positions.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

/// The authenticated user's identity as held in memory and in the local
/// session store. Either fully absent or fully populated, never partial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Remote user id.
    pub user_id: String,
    /// Display name, shown on the Setting page.
    pub user_name: String,
}

/// Canonical remote place entity; the client holds a read/write-through copy.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Place {
    /// Remote id.
    pub id: String,
    /// Place name.
    pub name: String,
    /// Latitude in degrees, when the place has one.
    pub latitude: Option<f64>,
    /// Longitude in degrees, when the place has one.
    pub longitude: Option<f64>,
    /// Optional reminder text attached to the place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_message: Option<String>,
    /// Optional reminder date in wire format (RFC 3339 or `YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reminder_date: Option<String>,
    /// Whether the reminder is currently switched off.
    pub is_disable: bool,
    /// Owning user id; drives the cache's owner-matching invariant.
    pub user_id: String,
    /// Server-side creation timestamp, wire format.
    pub created_at: String,
}

impl Place {
    /// The place's position, when both components are present.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some(Coordinate {
                latitude,
                longitude,
            }),
            _ => None,
        }
    }
}

/// A [`Place`] enriched with derived, transient display data. Recomputed on
/// every relevant change, never persisted.
#[derive(Clone, Debug)]
pub struct DisplayPlace {
    /// The underlying place.
    pub place: Place,
    /// Distance from the user's last fix in kilometers (0.0 when unknown).
    pub location_distance: f64,
    /// Reminder date formatted for display, when set.
    pub display_date: Option<String>,
}

/// Ordering mode for the reminder list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending distance: nearest place first (default).
    #[default]
    NearestFirst,
    /// Descending distance: farthest place first.
    FarthestFirst,
}

impl SortOrder {
    /// Flip between the two orderings.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::NearestFirst => SortOrder::FarthestFirst,
            SortOrder::FarthestFirst => SortOrder::NearestFirst,
        }
    }

    /// Settings-file key for this ordering.
    #[must_use]
    pub fn as_config_key(self) -> &'static str {
        match self {
            SortOrder::NearestFirst => "nearest_first",
            SortOrder::FarthestFirst => "farthest_first",
        }
    }

    /// Parse an ordering from its settings key or legacy aliases.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "nearest_first" | "ascending" | "asc" => Some(SortOrder::NearestFirst),
            "farthest_first" | "descending" | "desc" => Some(SortOrder::FarthestFirst),
            _ => None,
        }
    }
}

/// Modal dialog state for the UI.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Modal {
    /// No modal visible.
    #[default]
    None,
    /// Informational alert with a dismissable message.
    Alert {
        /// Message text shown in the modal body.
        message: String,
    },
    /// Confirmation dialog before deleting the named place.
    ConfirmDelete {
        /// Id of the place to delete when confirmed.
        place_id: String,
        /// Name shown in the prompt.
        place_name: String,
    },
}
