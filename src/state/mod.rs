//! Application state: core value types, the owned session context, form
//! state and the top-level [`AppState`].

mod app_state;
mod context;
pub mod forms;
mod types;

pub use app_state::{AppState, EvBatteryForm, BANNER_TTL};
pub use context::SessionContext;
pub use types::{Coordinate, DisplayPlace, Modal, Place, Session, SortOrder};
