//! DOM implementation of [`GridSurface`].

use std::cell::Cell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::error::{Result, SpriteTabError};
use crate::grid::{GridSurface, TileSpec};
use crate::style;

/// Create an element and cast it to `HtmlElement`.
pub(crate) fn create_html(document: &Document, tag: &str) -> Result<HtmlElement> {
    document
        .create_element(tag)
        .map_err(|e| SpriteTabError::from_js("create element", &e))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SpriteTabError::Dom(format!("<{tag}> is not an HtmlElement")))
}

/// A tile element and its timestamp label.
pub struct DomTile {
    pub cell: HtmlElement,
    pub label: HtmlElement,
}

/// Grid container plus the per-tile hover listeners.
pub struct DomSurface {
    document: Document,
    grid: HtmlElement,
    compact: Rc<Cell<bool>>,
    hover_listeners: Vec<EventListener>,
}

impl DomSurface {
    pub fn new(document: &Document) -> Result<Self> {
        let grid = create_html(document, "div")?;
        grid.style()
            .set_css_text(&style::grid_css(crate::settings::Settings::default().columns, false));
        Ok(Self {
            document: document.clone(),
            grid,
            compact: Rc::new(Cell::new(false)),
            hover_listeners: Vec::new(),
        })
    }

    /// Grid container; the shell attaches it to the panel once tiles exist.
    pub fn element(&self) -> &HtmlElement {
        &self.grid
    }

    fn attach_hover(&mut self, cell: &HtmlElement) {
        let compact = Rc::clone(&self.compact);
        let target = cell.clone();
        self.hover_listeners
            .push(EventListener::new(cell, "mouseenter", move |_| {
                if !compact.get() {
                    let _ = target
                        .style()
                        .set_property("border-color", style::TILE_BORDER_HOVER_COLOR);
                }
            }));
        let compact = Rc::clone(&self.compact);
        let target = cell.clone();
        self.hover_listeners
            .push(EventListener::new(cell, "mouseleave", move |_| {
                if !compact.get() {
                    let _ = target.style().set_property("border", style::TILE_BORDER);
                }
            }));
    }
}

impl GridSurface for DomSurface {
    type Handle = DomTile;

    fn set_columns(&mut self, columns: u8) {
        let _ = self
            .grid
            .style()
            .set_property("grid-template-columns", &style::grid_template_columns(columns));
    }

    fn set_gap(&mut self, compact: bool) {
        self.compact.set(compact);
        let _ = self.grid.style().set_property("gap", style::grid_gap(compact));
    }

    fn create_tile(&mut self, spec: &TileSpec<'_>) -> Result<DomTile> {
        let cell = create_html(&self.document, "div")?;
        cell.set_class_name(style::TILE_CLASS);
        let css = cell.style();
        css.set_css_text(style::TILE_CSS);
        let _ = css.set_property("background-image", &style::background_image(spec.sprite_url));
        let _ = css.set_property(
            "background-size",
            &style::background_size(spec.background_size_pct),
        );
        let _ = css.set_property(
            "background-position",
            &style::background_position(spec.background_position_pct),
        );
        let _ = css.set_property("border", style::tile_border(spec.compact));
        let _ = css.set_property("border-radius", style::tile_radius(spec.compact));
        let _ = cell.set_attribute("data-index", &spec.index.to_string());
        cell.set_title(&spec.label);

        let label = create_html(&self.document, "span")?;
        label.set_class_name(style::TIMESTAMP_CLASS);
        label.style().set_css_text(style::TIMESTAMP_CSS);
        let _ = label
            .style()
            .set_property("display", style::label_display(spec.show_timestamp));
        label.set_text_content(Some(&spec.label));

        cell.append_child(&label)
            .map_err(|e| SpriteTabError::from_js("append label", &e))?;
        self.grid
            .append_child(&cell)
            .map_err(|e| SpriteTabError::from_js("append tile", &e))?;
        self.attach_hover(&cell);
        Ok(DomTile { cell, label })
    }

    fn set_tile_frame(&mut self, tile: &DomTile, compact: bool) {
        let css = tile.cell.style();
        let _ = css.set_property("border", style::tile_border(compact));
        let _ = css.set_property("border-radius", style::tile_radius(compact));
    }

    fn set_label_visible(&mut self, tile: &DomTile, visible: bool) {
        let _ = tile
            .label
            .style()
            .set_property("display", style::label_display(visible));
    }

    fn set_highlight(&mut self, tile: &DomTile, active: bool) {
        let css = tile.cell.style();
        let _ = css.set_property("box-shadow", style::highlight_shadow(active));
        let _ = css.set_property("z-index", style::highlight_z_index(active));
    }

    fn scroll_into_view(&mut self, tile: &DomTile) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Center);
        tile.cell
            .scroll_into_view_with_scroll_into_view_options(&options);
    }
}
