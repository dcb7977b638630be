//! The page's `<video>` element behind [`MediaElement`].

use std::future::Future;

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use web_sys::HtmlMediaElement;

use crate::media::{MediaElement, MediaLocator, PollTimer};

/// Player selectors, most specific first.
const PLAYER_SELECTORS: [&str; 2] = ["video.vjs-tech", "video"];

#[derive(Clone)]
pub struct VideoElement(HtmlMediaElement);

impl VideoElement {
    pub fn element(&self) -> &HtmlMediaElement {
        &self.0
    }
}

impl MediaElement for VideoElement {
    fn current_time(&self) -> f64 {
        self.0.current_time()
    }

    fn seek(&self, seconds: f64) {
        self.0.set_current_time(seconds);
    }

    fn play(&self) {
        // Autoplay policy may reject; the seek still applies.
        let _ = self.0.play();
    }
}

/// Finds the player in the current document.
#[derive(Clone, Copy, Default)]
pub struct DocumentMediaLocator;

impl MediaLocator for DocumentMediaLocator {
    type Media = VideoElement;

    fn locate(&self) -> Option<VideoElement> {
        let document = web_sys::window()?.document()?;
        PLAYER_SELECTORS.iter().find_map(|selector| {
            document
                .query_selector(selector)
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlMediaElement>().ok())
                .map(VideoElement)
        })
    }
}

/// Browser timer for discovery polls.
#[derive(Default)]
pub struct TimeoutTimer;

impl PollTimer for TimeoutTimer {
    fn sleep(&mut self, interval_ms: u32) -> impl Future<Output = ()> {
        TimeoutFuture::new(interval_ms)
    }
}
