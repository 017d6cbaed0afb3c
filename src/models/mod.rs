pub mod clickup_settings;

pub use clickup_settings::{ClickUpSettings, ListKind};
