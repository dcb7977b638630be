//! The page's media player, as seen by the panel.
//!
//! The panel never creates or owns the player. It finds one through a
//! [`MediaLocator`], waits for it with [`discover_media`], and afterwards only
//! reads the play position and issues seek/play commands.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use crate::error::{Result, SpriteTabError};

/// Delay between discovery polls, in milliseconds.
pub const DISCOVERY_INTERVAL_MS: u32 = 1000;

/// Playback controls of an external media element.
pub trait MediaElement {
    /// Current play position in seconds.
    fn current_time(&self) -> f64;
    /// Move the play position.
    fn seek(&self, seconds: f64);
    /// Resume playback.
    fn play(&self);
}

/// Looks up the page's media element, if one is present right now.
pub trait MediaLocator {
    type Media: MediaElement;
    fn locate(&self) -> Option<Self::Media>;
}

/// Suspends discovery between polls.
pub trait PollTimer {
    fn sleep(&mut self, interval_ms: u32) -> impl Future<Output = ()>;
}

/// Poll `locator` until a media element appears.
///
/// Resolves exactly once. With `max_attempts` set, gives up with
/// [`SpriteTabError::MediaNotReady`] after that many failed lookups; with
/// `None` it waits indefinitely. No timer outlives the returned future.
pub async fn discover_media<L, T>(
    locator: &L,
    timer: &mut T,
    interval_ms: u32,
    max_attempts: Option<u32>,
) -> Result<L::Media>
where
    L: MediaLocator,
    T: PollTimer,
{
    let mut attempts: u32 = 0;
    loop {
        attempts = attempts.saturating_add(1);
        if let Some(media) = locator.locate() {
            tracing::debug!(attempts, "media element found");
            return Ok(media);
        }
        if max_attempts.is_some_and(|max| attempts >= max) {
            tracing::warn!(attempts, "media element never appeared");
            return Err(SpriteTabError::MediaNotReady { attempts });
        }
        timer.sleep(interval_ms).await;
    }
}

/// Seek `media` to `seconds` and resume playback.
pub fn seek_and_play<M: MediaElement + ?Sized>(media: &M, seconds: f64) {
    media.seek(seconds);
    media.play();
}

/// Media element driven by hand. Clones share state, so a test can keep one
/// handle while the panel holds another.
#[derive(Debug, Clone, Default)]
pub struct ManualMedia {
    inner: Rc<ManualMediaState>,
}

#[derive(Debug, Default)]
struct ManualMediaState {
    current_time: Cell<f64>,
    playing: Cell<bool>,
    seeks: RefCell<Vec<f64>>,
}

impl ManualMedia {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the play position as if playback advanced.
    pub fn set_current_time(&self, seconds: f64) {
        self.inner.current_time.set(seconds);
    }

    pub fn is_playing(&self) -> bool {
        self.inner.playing.get()
    }

    /// Positions requested through [`MediaElement::seek`], in order.
    pub fn seeks(&self) -> Vec<f64> {
        self.inner.seeks.borrow().clone()
    }
}

impl MediaElement for ManualMedia {
    fn current_time(&self) -> f64 {
        self.inner.current_time.get()
    }

    fn seek(&self, seconds: f64) {
        self.inner.current_time.set(seconds);
        self.inner.seeks.borrow_mut().push(seconds);
    }

    fn play(&self) {
        self.inner.playing.set(true);
    }
}
