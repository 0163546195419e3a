//! Two-way synchronization between the selection and the navigation address
//!
//! ```text
//!            open(n)                    open(m)
//!   Closed ───────────► Open(n) ───────────────► Open(m)
//!     ▲   ◄───────────    │
//!     │     close /       │
//!     │  external(none)   │
//!     └── external(n) ────┘
//! ```
//!
//! Outbound writes (user intents) go to the navigator first and the selection
//! second. Every address this sync writes or has already applied is
//! remembered, so seeing it again is a no-op rather than a fresh inbound change.

use crate::route::{Navigator, RouteAddress, RouteError};
use crate::selection::SelectionState;
use tracing::{debug, warn};

/// Observable state of the (selection, address segment) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawerState {
    Closed,
    Open(String),
}

/// What an inbound observation did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Address already applied (or written by us); nothing happened
    Unchanged,
    /// A new external address was applied
    Applied {
        state: DrawerState,
        project_changed: bool,
    },
}

#[derive(Debug, Clone)]
pub struct RouteSync {
    selection: SelectionState,
    address: RouteAddress,
    /// Raw address last seen on, or written to, the navigator
    last_seen: Option<String>,
}

impl RouteSync {
    /// Derive the initial state from the address present at mount.
    pub fn mount<N: Navigator + ?Sized>(navigator: &N) -> Result<Self, RouteError> {
        let raw = navigator.current().ok_or(RouteError::Empty)?;
        let address = RouteAddress::parse(raw)?;

        let mut selection = SelectionState::new();
        if let Some(environment) = address.environment() {
            selection.select(environment);
        }
        debug!(address = %address, "route sync mounted");

        Ok(Self {
            selection,
            address,
            last_seen: Some(raw.to_string()),
        })
    }

    pub fn state(&self) -> DrawerState {
        match self.selection.selected() {
            Some(name) => DrawerState::Open(name.to_string()),
            None => DrawerState::Closed,
        }
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn project(&self) -> &str {
        self.address.project()
    }

    /// The last address applied or written
    pub fn address(&self) -> &RouteAddress {
        &self.address
    }

    /// Inbound: react to the navigator's current address if it originated elsewhere.
    ///
    /// A malformed address is remembered as seen so it is reported once, and the
    /// current state is left untouched.
    pub fn observe<N: Navigator + ?Sized>(&mut self, navigator: &N) -> Result<Inbound, RouteError> {
        let Some(raw) = navigator.current() else {
            return Ok(Inbound::Unchanged);
        };
        if self.last_seen.as_deref() == Some(raw) {
            return Ok(Inbound::Unchanged);
        }
        self.last_seen = Some(raw.to_string());

        let address = match RouteAddress::parse(raw) {
            Ok(address) => address,
            Err(err) => {
                warn!(address = raw, error = %err, "ignoring unrecognised address");
                return Err(err);
            }
        };

        let project_changed = address.project() != self.address.project();
        match address.environment() {
            Some(environment) => self.selection.select(environment),
            None => self.selection.clear(),
        };
        self.address = address;

        let state = self.state();
        debug!(address = raw, ?state, project_changed, "inbound address applied");
        Ok(Inbound::Applied {
            state,
            project_changed,
        })
    }

    /// Outbound: open `name`, writing the address before touching the selection.
    pub fn open<N: Navigator + ?Sized>(
        &mut self,
        navigator: &mut N,
        name: &str,
    ) -> Result<(), RouteError> {
        let target = self.base_address(navigator).with_environment(name)?;
        self.write(navigator, target);
        self.selection.select(name);
        Ok(())
    }

    /// Outbound: close the drawer, writing the address before clearing the selection.
    pub fn close<N: Navigator + ?Sized>(&mut self, navigator: &mut N) {
        let target = self.base_address(navigator).without_environment();
        self.write(navigator, target);
        self.selection.clear();
    }

    /// The address outbound writes start from: the navigator's current one when
    /// it parses, so sibling segments written by others survive.
    fn base_address<N: Navigator + ?Sized>(&self, navigator: &N) -> RouteAddress {
        navigator
            .current()
            .and_then(|raw| RouteAddress::parse(raw).ok())
            .unwrap_or_else(|| self.address.clone())
    }

    fn write<N: Navigator + ?Sized>(&mut self, navigator: &mut N, target: RouteAddress) {
        let raw = target.to_string();
        if navigator.current() != Some(raw.as_str()) {
            debug!(address = %raw, "outbound address write");
            navigator.push(raw.clone());
        }
        self.last_seen = Some(raw);
        self.address = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::History;

    /// Navigator that records every write
    #[derive(Default)]
    struct RecordingNavigator {
        current: Option<String>,
        writes: Vec<String>,
    }

    impl RecordingNavigator {
        fn at(address: &str) -> Self {
            Self {
                current: Some(address.to_string()),
                writes: Vec::new(),
            }
        }

        /// Simulate a change made outside the sync (link, back/forward)
        fn external(&mut self, address: &str) {
            self.current = Some(address.to_string());
        }
    }

    impl Navigator for RecordingNavigator {
        fn current(&self) -> Option<&str> {
            self.current.as_deref()
        }

        fn push(&mut self, address: String) {
            self.writes.push(address.clone());
            self.current = Some(address);
        }
    }

    #[test]
    fn test_mount_closed() {
        let nav = RecordingNavigator::at("/project/P");
        let sync = RouteSync::mount(&nav).unwrap();
        assert_eq!(sync.state(), DrawerState::Closed);
        assert_eq!(sync.project(), "P");
    }

    #[test]
    fn test_mount_open_round_trip() {
        let mut nav = RecordingNavigator::at("/project/P/environment/E");
        let mut sync = RouteSync::mount(&nav).unwrap();
        assert_eq!(sync.state(), DrawerState::Open("E".to_string()));

        sync.close(&mut nav);
        assert_eq!(nav.current(), Some("/project/P"));
        assert_eq!(sync.state(), DrawerState::Closed);

        sync.open(&mut nav, "E").unwrap();
        assert_eq!(nav.current(), Some("/project/P/environment/E"));
        assert_eq!(sync.state(), DrawerState::Open("E".to_string()));
    }

    #[test]
    fn test_mount_without_address_fails() {
        let nav = RecordingNavigator::default();
        assert_eq!(RouteSync::mount(&nav).unwrap_err(), RouteError::Empty);
    }

    #[test]
    fn test_open_then_close_returns_to_closed() {
        let mut nav = RecordingNavigator::at("/project/P");
        let mut sync = RouteSync::mount(&nav).unwrap();

        sync.open(&mut nav, "staging").unwrap();
        sync.close(&mut nav);

        assert_eq!(sync.state(), DrawerState::Closed);
        assert_eq!(nav.current(), Some("/project/P"));
        assert_eq!(
            nav.writes,
            vec!["/project/P/environment/staging", "/project/P"]
        );
    }

    #[test]
    fn test_switch_without_closing() {
        let mut nav = RecordingNavigator::at("/project/P");
        let mut sync = RouteSync::mount(&nav).unwrap();

        sync.open(&mut nav, "staging").unwrap();
        sync.open(&mut nav, "prod").unwrap();

        assert_eq!(sync.state(), DrawerState::Open("prod".to_string()));
        assert_eq!(nav.current(), Some("/project/P/environment/prod"));
    }

    #[test]
    fn test_outbound_write_is_not_reapplied_inbound() {
        let mut nav = RecordingNavigator::at("/project/P");
        let mut sync = RouteSync::mount(&nav).unwrap();

        sync.open(&mut nav, "prod").unwrap();
        assert_eq!(sync.observe(&nav).unwrap(), Inbound::Unchanged);

        sync.close(&mut nav);
        assert_eq!(sync.observe(&nav).unwrap(), Inbound::Unchanged);
        assert_eq!(nav.writes.len(), 2);
    }

    #[test]
    fn test_inbound_is_idempotent() {
        let mut nav = RecordingNavigator::at("/project/P");
        let mut sync = RouteSync::mount(&nav).unwrap();

        nav.external("/project/P/environment/prod");
        let first = sync.observe(&nav).unwrap();
        let second = sync.observe(&nav).unwrap();

        assert_eq!(
            first,
            Inbound::Applied {
                state: DrawerState::Open("prod".to_string()),
                project_changed: false,
            }
        );
        assert_eq!(second, Inbound::Unchanged);
        assert_eq!(sync.state(), DrawerState::Open("prod".to_string()));
        assert!(nav.writes.is_empty());
    }

    #[test]
    fn test_external_close() {
        let mut nav = RecordingNavigator::at("/project/P/environment/prod");
        let mut sync = RouteSync::mount(&nav).unwrap();

        nav.external("/project/P");
        sync.observe(&nav).unwrap();

        assert_eq!(sync.state(), DrawerState::Closed);
        assert!(nav.writes.is_empty());
    }

    #[test]
    fn test_external_project_change_is_reported() {
        let mut nav = RecordingNavigator::at("/project/P/environment/prod");
        let mut sync = RouteSync::mount(&nav).unwrap();

        nav.external("/project/Q");
        let inbound = sync.observe(&nav).unwrap();

        assert_eq!(
            inbound,
            Inbound::Applied {
                state: DrawerState::Closed,
                project_changed: true,
            }
        );
        assert_eq!(sync.project(), "Q");
    }

    #[test]
    fn test_malformed_inbound_leaves_state_and_reports_once() {
        let mut nav = RecordingNavigator::at("/project/P/environment/prod");
        let mut sync = RouteSync::mount(&nav).unwrap();

        nav.external("/nowhere");
        assert!(sync.observe(&nav).is_err());
        assert_eq!(sync.observe(&nav).unwrap(), Inbound::Unchanged);
        assert_eq!(sync.state(), DrawerState::Open("prod".to_string()));
    }

    #[test]
    fn test_outbound_preserves_sibling_segments() {
        let mut nav = RecordingNavigator::at("/project/P?view=compact");
        let mut sync = RouteSync::mount(&nav).unwrap();

        sync.open(&mut nav, "prod").unwrap();
        assert_eq!(nav.current(), Some("/project/P/environment/prod?view=compact"));

        sync.close(&mut nav);
        assert_eq!(nav.current(), Some("/project/P?view=compact"));
    }

    #[test]
    fn test_reopening_same_environment_writes_nothing() {
        let mut nav = RecordingNavigator::at("/project/P/environment/prod");
        let mut sync = RouteSync::mount(&nav).unwrap();

        sync.open(&mut nav, "prod").unwrap();
        assert!(nav.writes.is_empty());
    }

    #[test]
    fn test_history_back_forward_drive_inbound() {
        let mut history = History::new("/project/P");
        let mut sync = RouteSync::mount(&history).unwrap();

        sync.open(&mut history, "prod").unwrap();
        sync.close(&mut history);

        history.back();
        sync.observe(&history).unwrap();
        assert_eq!(sync.state(), DrawerState::Open("prod".to_string()));

        history.back();
        sync.observe(&history).unwrap();
        assert_eq!(sync.state(), DrawerState::Closed);

        history.forward();
        sync.observe(&history).unwrap();
        assert_eq!(sync.state(), DrawerState::Open("prod".to_string()));
        assert_eq!(history.len(), 3);
    }
}
