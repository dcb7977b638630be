//! Browser shell: wires the panel into the host page.
//!
//! The host calls [`SpriteTab::scene_view_entered`] / [`SpriteTab::scene_view_left`]
//! (or [`SpriteTab::route_changed`] with the location path). Each mounted
//! panel runs one async task: fetch scene data, load the sheet, build tiles,
//! wait for the player, subscribe to its time updates. Every step after an
//! await re-checks the panel's ticket and drops its result if the panel was
//! torn down meanwhile.

mod controls;
mod fetch;
mod media;
mod storage;
mod surface;
mod tab;

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions, EventListenerPhase};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, HtmlElement};

pub use fetch::{load_image_size, GraphqlSceneProvider};
pub use media::{DocumentMediaLocator, TimeoutTimer, VideoElement};
pub use storage::LocalStorageBackend;
pub use surface::{DomSurface, DomTile};

use crate::config::SpriteTabConfig;
use crate::error::{Result, SpriteTabError};
use crate::host::{HostSession, PanelTicket, RouteChange, SceneViewChange};
use crate::media::{discover_media, MediaElement, MediaLocator};
use crate::panel::{PanelStatus, SpritePanel, NO_SPRITES_MESSAGE, VIDEO_NOT_READY_MESSAGE};
use crate::scene::SceneDataProvider;
use crate::settings::{SettingsPatch, SettingsStore};
use crate::style;
use surface::create_html;
use tab::TabMount;

type DomPanel = SpritePanel<DomSurface, LocalStorageBackend>;

/// Everything owned by the currently mounted panel. Dropping it removes all
/// listeners.
struct Mounted {
    ticket: PanelTicket,
    tab: TabMount,
    panel: Option<Rc<RefCell<DomPanel>>>,
    listeners: Vec<EventListener>,
}

struct Shell {
    session: HostSession,
    config: SpriteTabConfig,
    mounted: Option<Mounted>,
}

impl Shell {
    fn teardown(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            tracing::debug!(scene_id = mounted.ticket.scene_id(), "tearing down sprite panel");
            mounted.tab.unmount();
        }
    }

    /// Mounted state for `ticket`, if it is still the live panel.
    fn live(&mut self, ticket: &PanelTicket) -> Option<&mut Mounted> {
        if !self.session.is_live(ticket) {
            return None;
        }
        self.mounted.as_mut().filter(|m| &m.ticket == ticket)
    }
}

fn document() -> Result<Document> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| SpriteTabError::Dom("no document".into()))
}

/// Sprite tab entry point exported to JavaScript.
#[wasm_bindgen]
pub struct SpriteTab {
    shell: Rc<RefCell<Shell>>,
}

#[wasm_bindgen]
impl SpriteTab {
    /// Create the shell. `config` is an optional object overriding
    /// [`SpriteTabConfig`] fields (camelCase keys).
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> std::result::Result<SpriteTab, JsValue> {
        console_error_panic_hook::set_once();
        let config = if config.is_undefined() || config.is_null() {
            SpriteTabConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid config: {e}")))?
        };
        Ok(SpriteTab {
            shell: Rc::new(RefCell::new(Shell {
                session: HostSession::new(),
                config,
                mounted: None,
            })),
        })
    }

    /// The host is showing scene `scene_id`.
    #[wasm_bindgen(js_name = "sceneViewEntered")]
    pub fn scene_view_entered(&self, scene_id: &str) -> std::result::Result<(), JsValue> {
        let change = self.shell.borrow_mut().session.scene_view_entered(scene_id);
        self.apply(change).map_err(JsValue::from)
    }

    /// The host left the scene view.
    #[wasm_bindgen(js_name = "sceneViewLeft")]
    pub fn scene_view_left(&self) {
        let mut shell = self.shell.borrow_mut();
        shell.session.scene_view_left();
        shell.teardown();
    }

    /// Convenience for hosts that only report location changes.
    #[wasm_bindgen(js_name = "routeChanged")]
    pub fn route_changed(&self, path: &str) -> std::result::Result<(), JsValue> {
        let change = self.shell.borrow_mut().session.route_changed(path);
        match change {
            RouteChange::Scene(change) => self.apply(change).map_err(JsValue::from),
            RouteChange::Left(_) => {
                self.shell.borrow_mut().teardown();
                Ok(())
            }
        }
    }

    /// Index of the highlighted tile, if any.
    #[wasm_bindgen(js_name = "activeIndex")]
    pub fn active_index(&self) -> Option<u32> {
        let shell = self.shell.borrow();
        let panel = shell.mounted.as_ref()?.panel.as_ref()?;
        let index = panel.borrow().synchronizer().active_index();
        index
    }
}

impl SpriteTab {
    fn apply(&self, change: SceneViewChange) -> Result<()> {
        let SceneViewChange::Mount { ticket, .. } = change else {
            return Ok(());
        };
        let document = document()?;
        let mut shell = self.shell.borrow_mut();
        shell.teardown();

        let Some(tab) = TabMount::mount(&document)? else {
            // Host layout not ready; forget the scene so the next notification retries.
            tracing::debug!(scene_id = ticket.scene_id(), "tab layout not found");
            shell.session.scene_view_left();
            return Ok(());
        };
        let nav_listener = tab_click_listener(&self.shell, &tab, &ticket);
        shell.mounted = Some(Mounted {
            ticket: ticket.clone(),
            tab,
            panel: None,
            listeners: vec![nav_listener],
        });
        let config = shell.config.clone();
        drop(shell);

        let shell = Rc::clone(&self.shell);
        spawn_local(async move {
            if let Err(e) = run_panel(&shell, &ticket, &config, &document).await {
                tracing::warn!(error = %e, scene_id = ticket.scene_id(), "sprite panel failed");
            }
        });
        Ok(())
    }
}

/// Capture-phase click handler on the host's tab bar.
fn tab_click_listener(
    shell: &Rc<RefCell<Shell>>,
    tab: &TabMount,
    ticket: &PanelTicket,
) -> EventListener {
    let shell = Rc::downgrade(shell);
    let ticket = ticket.clone();
    let options = EventListenerOptions {
        phase: EventListenerPhase::Capture,
        passive: false,
    };
    EventListener::new_with_options(&tab.nav, "click", options, move |event: &Event| {
        let Some(shell) = shell.upgrade() else {
            return;
        };
        let Some(link) = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(".nav-link").ok().flatten())
        else {
            return;
        };
        let ours = link.id() == style::TAB_LINK_ID;
        if ours {
            event.prevent_default();
            event.stop_propagation();
        }
        let mut shell = shell.borrow_mut();
        if !shell.session.set_tab_active(ours) && !ours {
            return;
        }
        let Some(mounted) = shell.live(&ticket) else {
            return;
        };
        mounted.tab.show(ours);
        if ours {
            if let Some(panel) = mounted.panel.as_ref() {
                panel.borrow_mut().tab_shown();
            }
        }
    })
}

async fn run_panel(
    shell: &Rc<RefCell<Shell>>,
    ticket: &PanelTicket,
    config: &SpriteTabConfig,
    document: &Document,
) -> Result<()> {
    let provider = GraphqlSceneProvider::new(&config.graphql_endpoint);
    let scene = provider.fetch_scene(ticket.scene_id()).await;

    let panel = {
        let mut guard = shell.borrow_mut();
        let Some(mounted) = guard.live(ticket) else {
            tracing::debug!(scene_id = ticket.scene_id(), "discarding stale scene data");
            return Ok(());
        };
        let scene = match scene {
            Ok(scene) if scene.has_sprites() => scene,
            Ok(_) => return mounted.tab.show_message(document, NO_SPRITES_MESSAGE),
            Err(e) => {
                tracing::info!(error = %e, "scene data unavailable");
                return mounted.tab.show_message(document, NO_SPRITES_MESSAGE);
            }
        };
        let store = SettingsStore::new(LocalStorageBackend);
        let panel = Rc::new(RefCell::new(SpritePanel::new(store, scene, config.clone())));
        mounted.panel = Some(Rc::clone(&panel));
        panel
    };

    let scroll_area = build_panel_chrome(shell, ticket, &panel, document)?;

    let url = panel
        .borrow()
        .scene()
        .sprite_sheet_url
        .clone()
        .ok_or(SpriteTabError::NoSprites)?;
    let loaded = load_image_size(&url).await;

    let grid_element = {
        let mut guard = shell.borrow_mut();
        let Some(mounted) = guard.live(ticket) else {
            tracing::debug!(scene_id = ticket.scene_id(), "discarding stale sprite sheet");
            return Ok(());
        };
        let mut p = panel.borrow_mut();
        match loaded {
            Ok((width, height)) => {
                let surface = DomSurface::new(document)?;
                let grid_element = surface.element().clone();
                if let Err(e) = p.sheet_loaded(surface, width, height) {
                    tracing::warn!(error = %e, "building sprite grid failed");
                }
                if let Some(message) = p.status().message() {
                    return mounted.tab.show_message(document, message);
                }
                grid_element
            }
            Err(e) => {
                p.sheet_failed(&e.to_string());
                return mounted.tab.show_message(document, NO_SPRITES_MESSAGE);
            }
        }
    };
    scroll_area
        .append_child(&grid_element)
        .map_err(|e| SpriteTabError::from_js("append grid", &e))?;
    let click = tile_click_listener(&panel, &grid_element);
    if let Some(mounted) = shell.borrow_mut().live(ticket) {
        mounted.listeners.push(click);
    }

    let locator = DocumentMediaLocator;
    let mut timer = TimeoutTimer;
    let found = discover_media(
        &locator,
        &mut timer,
        config.poll_interval_ms,
        config.max_discovery_attempts,
    )
    .await;

    let mut guard = shell.borrow_mut();
    let Some(mounted) = guard.live(ticket) else {
        tracing::debug!(scene_id = ticket.scene_id(), "panel gone before player appeared");
        return Ok(());
    };
    let video = match found {
        Ok(video) => video,
        Err(e) => {
            tracing::info!(error = %e, "player discovery gave up");
            panel.borrow_mut().media_unavailable();
            if panel.borrow().status() == PanelStatus::VideoNotReady {
                append_notice(document, &scroll_area, VIDEO_NOT_READY_MESSAGE)?;
            }
            return Ok(());
        }
    };
    let listener = {
        let panel = Rc::downgrade(&panel);
        let media = video.clone();
        EventListener::new(video.element(), "timeupdate", move |_| {
            if let Some(panel) = panel.upgrade() {
                panel.borrow_mut().time_update(media.current_time());
            }
        })
    };
    mounted.listeners.push(listener);
    panel.borrow_mut().media_attached(&video);
    Ok(())
}

/// Controls bar plus the scroll area the grid goes into.
fn build_panel_chrome(
    shell: &Rc<RefCell<Shell>>,
    ticket: &PanelTicket,
    panel: &Rc<RefCell<DomPanel>>,
    document: &Document,
) -> Result<HtmlElement> {
    let container = create_html(document, "div")?;
    container.style().set_css_text(style::CONTAINER_CSS);

    let on_change: controls::OnChange = {
        let panel = Rc::downgrade(panel);
        Rc::new(move |patch: SettingsPatch| {
            if let Some(panel) = panel.upgrade() {
                panel.borrow_mut().update_settings(&patch);
            }
        })
    };
    let settings = *panel.borrow().settings();
    let (bar, listeners) = controls::build_controls(document, &settings, &on_change)?;

    let scroll_area = create_html(document, "div")?;
    scroll_area.set_class_name("sprite-scroll-area");
    scroll_area.style().set_css_text(style::SCROLL_AREA_CSS);

    container
        .append_child(&bar)
        .map_err(|e| SpriteTabError::from_js("append controls", &e))?;
    container
        .append_child(&scroll_area)
        .map_err(|e| SpriteTabError::from_js("append scroll area", &e))?;

    let mut guard = shell.borrow_mut();
    let mounted = guard
        .live(ticket)
        .ok_or_else(|| SpriteTabError::Dom("panel torn down".into()))?;
    mounted
        .tab
        .pane
        .append_child(&container)
        .map_err(|e| SpriteTabError::from_js("append panel", &e))?;
    mounted.listeners.extend(listeners);
    Ok(scroll_area)
}

/// One delegated click handler for all tiles.
fn tile_click_listener(panel: &Rc<RefCell<DomPanel>>, grid: &HtmlElement) -> EventListener {
    let panel = Rc::downgrade(panel);
    EventListener::new(grid, "click", move |event: &Event| {
        let Some(panel) = panel.upgrade() else {
            return;
        };
        let index = event
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|el| el.closest(&format!(".{}", style::TILE_CLASS)).ok().flatten())
            .and_then(|cell| cell.get_attribute("data-index"))
            .and_then(|raw| raw.parse::<u32>().ok());
        let Some(index) = index else {
            return;
        };
        let Some(video) = DocumentMediaLocator.locate() else {
            tracing::debug!(index, "tile clicked without a player");
            return;
        };
        if let Err(e) = panel.borrow().select_tile(index, &video) {
            tracing::debug!(error = %e, "tile selection ignored");
        }
    })
}

fn append_notice(document: &Document, parent: &HtmlElement, message: &str) -> Result<()> {
    let note = create_html(document, "div")?;
    note.style().set_css_text(style::MESSAGE_CSS);
    note.set_text_content(Some(message));
    parent
        .append_child(&note)
        .map_err(|e| SpriteTabError::from_js("append notice", &e))?;
    Ok(())
}
