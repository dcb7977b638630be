//! Sticky controls bar: column slider and the three toggles.

use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, HtmlInputElement};

use super::surface::create_html;
use crate::error::{Result, SpriteTabError};
use crate::settings::{SettingKey, Settings, SettingsPatch, MAX_COLUMNS, MIN_COLUMNS};
use crate::style;

/// Receives each control interaction as a settings patch.
pub type OnChange = Rc<dyn Fn(SettingsPatch)>;

fn create_input(document: &Document, kind: &str) -> Result<HtmlInputElement> {
    let input = create_html(document, "input")?
        .dyn_into::<HtmlInputElement>()
        .map_err(|_| SpriteTabError::Dom("input is not an HtmlInputElement".into()))?;
    input.set_type(kind);
    Ok(input)
}

fn append(parent: &HtmlElement, child: &HtmlElement) -> Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| SpriteTabError::from_js("append control", &e))
}

/// Build the controls bar. The returned listeners must live as long as the bar.
pub fn build_controls(
    document: &Document,
    settings: &Settings,
    on_change: &OnChange,
) -> Result<(HtmlElement, Vec<EventListener>)> {
    let bar = create_html(document, "div")?;
    bar.style().set_css_text(style::CONTROLS_CSS);
    let mut listeners = Vec::new();

    let wrapper = create_html(document, "div")?;
    wrapper.style().set_css_text(style::SLIDER_WRAPPER_CSS);
    let caption = create_html(document, "span")?;
    caption.set_text_content(Some("Size:"));
    append(&wrapper, &caption)?;

    let slider = create_input(document, "range")?;
    slider.set_min(&MIN_COLUMNS.to_string());
    slider.set_max(&MAX_COLUMNS.to_string());
    slider.set_value(&settings.columns.to_string());
    slider.style().set_css_text(style::SLIDER_CSS);
    {
        let on_change = Rc::clone(on_change);
        let input = slider.clone();
        listeners.push(EventListener::new(&slider, "input", move |_| {
            if let Ok(columns) = input.value().parse::<u8>() {
                on_change(SettingsPatch::columns(columns));
            }
        }));
    }
    append(&wrapper, &slider)?;
    append(&bar, &wrapper)?;

    let toggles = [
        ("Timestamps", SettingKey::ShowTimestamps, settings.show_timestamps),
        ("Compact", SettingKey::Compact, settings.compact),
        ("Auto-Scroll", SettingKey::AutoScroll, settings.auto_scroll),
    ];
    for (text, key, checked) in toggles {
        let label = create_html(document, "label")?;
        label.style().set_css_text(style::TOGGLE_CSS);
        let check = create_input(document, "checkbox")?;
        check.set_checked(checked);
        {
            let on_change = Rc::clone(on_change);
            let input = check.clone();
            listeners.push(EventListener::new(&check, "change", move |_| {
                on_change(SettingsPatch::toggle(key, input.checked()));
            }));
        }
        append(&label, &check)?;
        label
            .append_with_str_1(text)
            .map_err(|e| SpriteTabError::from_js("append label text", &e))?;
        append(&bar, &label)?;
    }

    Ok((bar, listeners))
}
