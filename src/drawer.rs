//! Drawer visibility and content, derived from the route-synced selection

use crate::environment::{Environment, EnvironmentIndex};
use crate::route::{Navigator, RouteError};
use crate::sync::{DrawerState, Inbound, RouteSync};
use tracing::info;

/// The drawer only closes through its own close control.
pub const CLOSE_ON_OUTSIDE_CLICK: bool = false;

/// What the drawer body should show
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawerContent<'a> {
    Hidden,
    /// Selected name not in the index and the collection is still pending
    Loading(&'a str),
    /// Selected name not in a loaded collection
    NotFound(&'a str),
    Ready(&'a Environment),
}

#[derive(Debug, Clone)]
pub struct DrawerController {
    sync: RouteSync,
}

impl DrawerController {
    pub fn mount<N: Navigator + ?Sized>(navigator: &N) -> Result<Self, RouteError> {
        Ok(Self {
            sync: RouteSync::mount(navigator)?,
        })
    }

    pub fn visible(&self) -> bool {
        self.sync.selection().is_open()
    }

    pub fn selected(&self) -> Option<&str> {
        self.sync.selection().selected()
    }

    pub fn state(&self) -> DrawerState {
        self.sync.state()
    }

    pub fn sync(&self) -> &RouteSync {
        &self.sync
    }

    /// The selected entity, if the index has it.
    pub fn entity<'a>(&self, index: &'a EnvironmentIndex) -> Option<&'a Environment> {
        self.selected().and_then(|name| index.get(name))
    }

    pub fn content<'a>(&'a self, index: &'a EnvironmentIndex, loaded: bool) -> DrawerContent<'a> {
        let Some(name) = self.selected() else {
            return DrawerContent::Hidden;
        };
        match index.get(name) {
            Some(environment) => DrawerContent::Ready(environment),
            None if loaded => DrawerContent::NotFound(name),
            None => DrawerContent::Loading(name),
        }
    }

    pub fn open<N: Navigator + ?Sized>(
        &mut self,
        navigator: &mut N,
        name: &str,
    ) -> Result<(), RouteError> {
        self.sync.open(navigator, name)?;
        info!(environment = name, "drawer opened");
        Ok(())
    }

    /// Close regardless of what the drawer currently shows.
    pub fn close<N: Navigator + ?Sized>(&mut self, navigator: &mut N) {
        self.sync.close(navigator);
        info!("drawer closed");
    }

    pub fn observe<N: Navigator + ?Sized>(&mut self, navigator: &N) -> Result<Inbound, RouteError> {
        self.sync.observe(navigator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Health;
    use crate::route::History;

    fn index() -> EnvironmentIndex {
        EnvironmentIndex::build(&[
            Environment::named("staging"),
            Environment::named("prod").with_health(Health::Healthy),
        ])
    }

    #[test]
    fn test_open_makes_visible_close_hides() {
        let mut history = History::new("/project/P");
        let mut drawer = DrawerController::mount(&history).unwrap();
        assert!(!drawer.visible());

        for name in ["prod", "staging", "anything-at-all"] {
            drawer.open(&mut history, name).unwrap();
            assert!(drawer.visible());
            drawer.close(&mut history);
            assert!(!drawer.visible());
        }
    }

    #[test]
    fn test_content_resolves_from_index() {
        let mut history = History::new("/project/P");
        let mut drawer = DrawerController::mount(&history).unwrap();
        let index = index();

        assert_eq!(drawer.content(&index, true), DrawerContent::Hidden);

        drawer.open(&mut history, "prod").unwrap();
        let entity = drawer.entity(&index).unwrap();
        assert_eq!(entity.health(), Some(Health::Healthy));
        assert!(matches!(drawer.content(&index, true), DrawerContent::Ready(_)));
    }

    #[test]
    fn test_unresolved_selection_is_loading_then_not_found() {
        let history = History::new("/project/P/environment/missing");
        let drawer = DrawerController::mount(&history).unwrap();

        assert!(drawer.visible());
        assert_eq!(
            drawer.content(&EnvironmentIndex::default(), false),
            DrawerContent::Loading("missing")
        );
        assert_eq!(drawer.content(&index(), true), DrawerContent::NotFound("missing"));
        assert!(drawer.entity(&index()).is_none());
    }

    #[test]
    fn test_close_works_without_content() {
        let mut history = History::new("/project/P/environment/missing");
        let mut drawer = DrawerController::mount(&history).unwrap();

        drawer.close(&mut history);

        assert!(!drawer.visible());
        assert_eq!(history.current(), Some("/project/P"));
    }
}
