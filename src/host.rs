//! Host page bookkeeping: which scene view is showing, which panel is live,
//! and whether the panel's tab is selected.
//!
//! The host notifies the core explicitly with
//! [`HostSession::scene_view_entered`] and [`HostSession::scene_view_left`].
//! Async work started for a panel carries its [`PanelTicket`] and checks
//! [`HostSession::is_live`] before touching anything.

/// Identifies one constructed panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelTicket {
    scene_id: String,
    generation: u64,
}

impl PanelTicket {
    pub fn scene_id(&self) -> &str {
        &self.scene_id
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What the shell must do after a scene-view notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneViewChange {
    /// Same scene is already mounted; keep everything.
    Unchanged,
    /// Build a panel for this ticket, tearing down `replaced` first if set.
    Mount {
        ticket: PanelTicket,
        replaced: Option<PanelTicket>,
    },
}

/// Tracks the live panel across host navigation.
#[derive(Debug, Default)]
pub struct HostSession {
    current: Option<PanelTicket>,
    generation: u64,
    tab_active: bool,
}

impl HostSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The host is now showing scene `scene_id`.
    ///
    /// At most one panel exists per scene view: re-entering the mounted scene
    /// is a no-op, a different scene retires the old ticket.
    pub fn scene_view_entered(&mut self, scene_id: &str) -> SceneViewChange {
        if self
            .current
            .as_ref()
            .is_some_and(|ticket| ticket.scene_id == scene_id)
        {
            return SceneViewChange::Unchanged;
        }
        self.generation += 1;
        let ticket = PanelTicket {
            scene_id: scene_id.to_string(),
            generation: self.generation,
        };
        let replaced = self.current.replace(ticket.clone());
        self.tab_active = false;
        tracing::debug!(scene_id, generation = self.generation, "scene view entered");
        SceneViewChange::Mount { ticket, replaced }
    }

    /// The host left the scene view. Returns the retired ticket so the shell
    /// can tear its panel down.
    pub fn scene_view_left(&mut self) -> Option<PanelTicket> {
        self.tab_active = false;
        let retired = self.current.take();
        if let Some(ticket) = &retired {
            tracing::debug!(scene_id = %ticket.scene_id, "scene view left");
        }
        retired
    }

    /// Map a location path onto enter/leave notifications.
    pub fn route_changed(&mut self, path: &str) -> RouteChange {
        match scene_id_from_path(path) {
            Some(scene_id) => RouteChange::Scene(self.scene_view_entered(scene_id)),
            None => RouteChange::Left(self.scene_view_left()),
        }
    }

    /// Whether results for `ticket` may still be applied.
    pub fn is_live(&self, ticket: &PanelTicket) -> bool {
        self.current.as_ref() == Some(ticket)
    }

    pub fn current(&self) -> Option<&PanelTicket> {
        self.current.as_ref()
    }

    pub fn tab_active(&self) -> bool {
        self.tab_active
    }

    /// Select or deselect the panel's tab. Returns whether it changed.
    ///
    /// Only visibility follows the tab; the panel and its subscription stay.
    pub fn set_tab_active(&mut self, active: bool) -> bool {
        if self.current.is_none() || self.tab_active == active {
            return false;
        }
        self.tab_active = active;
        true
    }
}

/// Result of [`HostSession::route_changed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteChange {
    Scene(SceneViewChange),
    Left(Option<PanelTicket>),
}

/// Extract the numeric scene id from a path like `/scenes/123/markers`.
///
/// Only the leading digits of the segment after `scenes` count.
pub fn scene_id_from_path(path: &str) -> Option<&str> {
    let mut segments = path.split('/').skip_while(|s| *s != "scenes").skip(1);
    let id = segments.next()?;
    let digits = id.bytes().take_while(u8::is_ascii_digit).count();
    id.get(..digits).filter(|digits| !digits.is_empty())
}
