pub mod api_monitor;
pub mod fetchers;
pub mod filters;
pub mod normalizer;
pub mod poller;
pub mod roles;
pub mod settings_store;
pub mod snapshot_cache;

pub use api_monitor::{ApiCallRecord, ApiMonitor, CallLogger, CallStatus};
pub use fetchers::{AssigneeProjection, ListFetcher, TaskSource};
pub use filters::{StatusFilter, TaskQuery, TicketView};
pub use normalizer::{NormalizedField, NormalizedTask};
pub use poller::{ListPanel, DEFAULT_POLL_INTERVAL};
pub use roles::{Role, RoleProvider, StaticRoleProvider};
pub use settings_store::{MemorySettingsStore, SettingsStore, YamlSettingsStore};
pub use snapshot_cache::{PanelState, SnapshotCache};
