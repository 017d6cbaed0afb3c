pub mod settings;

pub use settings::{
    AuthSettings, ClickUpApiSettings, MonitorSettings, PollingSettings, ServerSettings, Settings,
    StoreSettings,
};
