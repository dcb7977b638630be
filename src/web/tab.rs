//! The panel's tab entry and content pane inside the host's tab layout.
//!
//! Showing the panel toggles one class on the host's tab-content container;
//! the host's own per-pane switching is never touched.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::surface::create_html;
use crate::error::{Result, SpriteTabError};
use crate::style;

/// Inject the panel stylesheet once per document.
pub fn inject_styles(document: &Document) -> Result<()> {
    if document.get_element_by_id(style::STYLE_ELEMENT_ID).is_some() {
        return Ok(());
    }
    let sheet = create_html(document, "style")?;
    sheet.set_id(style::STYLE_ELEMENT_ID);
    sheet.set_text_content(Some(style::PANEL_STYLESHEET));
    let head = document
        .head()
        .ok_or_else(|| SpriteTabError::Dom("document has no <head>".into()))?;
    head.append_child(&sheet)
        .map_err(|e| SpriteTabError::from_js("append stylesheet", &e))?;
    Ok(())
}

/// Elements added to the host page for one panel.
pub struct TabMount {
    pub nav: Element,
    pub tab_item: HtmlElement,
    pub link: HtmlElement,
    pub content: Element,
    pub pane: HtmlElement,
}

impl TabMount {
    /// Add the tab and pane. `Ok(None)` when the host's tab layout is not on
    /// the page yet, or a tab is already mounted.
    pub fn mount(document: &Document) -> Result<Option<Self>> {
        if document.get_element_by_id(style::TAB_LINK_ID).is_some() {
            return Ok(None);
        }
        let Some(nav) = document.query_selector(".nav-tabs").ok().flatten() else {
            return Ok(None);
        };
        let content = document
            .query_selector(".tab-content .tab-pane")
            .ok()
            .flatten()
            .and_then(|pane| pane.parent_element())
            .or_else(|| nav.next_element_sibling());
        let Some(content) = content else {
            return Ok(None);
        };

        inject_styles(document)?;

        let tab_item = create_html(document, "div")?;
        tab_item.set_class_name("nav-item");
        let link = create_html(document, "a")?;
        link.set_id(style::TAB_LINK_ID);
        link.set_class_name("nav-link");
        let _ = link.set_attribute("href", "#");
        let _ = link.set_attribute("role", "tab");
        link.set_text_content(Some("Sprites"));
        tab_item
            .append_child(&link)
            .map_err(|e| SpriteTabError::from_js("append tab link", &e))?;
        nav.append_child(&tab_item)
            .map_err(|e| SpriteTabError::from_js("append tab", &e))?;

        let pane = create_html(document, "div")?;
        pane.set_id(style::PANEL_ID);
        pane.set_class_name("tab-pane");
        content
            .append_child(&pane)
            .map_err(|e| SpriteTabError::from_js("append pane", &e))?;

        Ok(Some(Self {
            nav,
            tab_item,
            link,
            content,
            pane,
        }))
    }

    /// Show or hide the panel by switching tab link and container classes.
    pub fn show(&self, active: bool) {
        if active {
            if let Ok(links) = self.nav.query_selector_all(".nav-link") {
                for i in 0..links.length() {
                    if let Some(link) = links.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                        let _ = link.class_list().remove_1("active");
                    }
                }
            }
            let _ = self.link.class_list().add_1("active");
            let _ = self.content.class_list().add_1(style::ACTIVE_CONTAINER_CLASS);
        } else {
            let _ = self.link.class_list().remove_1("active");
            let _ = self
                .content
                .class_list()
                .remove_1(style::ACTIVE_CONTAINER_CLASS);
        }
    }

    /// Replace the pane's contents with a plain message.
    pub fn show_message(&self, document: &Document, message: &str) -> Result<()> {
        self.pane.set_inner_html("");
        let note = create_html(document, "div")?;
        note.style().set_css_text(style::MESSAGE_CSS);
        note.set_text_content(Some(message));
        self.pane
            .append_child(&note)
            .map_err(|e| SpriteTabError::from_js("append message", &e))?;
        Ok(())
    }

    /// Remove everything this mount added.
    pub fn unmount(&self) {
        self.show(false);
        self.tab_item.remove();
        self.pane.remove();
    }
}
