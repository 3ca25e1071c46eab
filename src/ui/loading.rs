//! Request loading overlay and the initial preloader.

use crate::app::Timer;
use crate::dom::{Dom, NodeId};
use crate::timing::{Millis, Scheduler};

const OVERLAY_ID: &str = "skin-loading";
const PRELOADER_ID: &str = "preloader";
const PRELOADER_FADE_MS: Millis = 500;

/// Marks the body busy and shows `#skin-loading`, creating it once.
pub fn show<D: Dom + ?Sized>(dom: &mut D) {
    let body = dom.body();
    dom.add_class(body, "loading");
    let overlay = match dom.element_by_id(OVERLAY_ID) {
        Some(overlay) => overlay,
        None => {
            let overlay = dom.create_element("div");
            dom.set_attr(overlay, "id", OVERLAY_ID);
            let spinner = dom.create_element("div");
            dom.add_class(spinner, "loading-spinner");
            dom.append_child(overlay, spinner);
            dom.append_child(body, overlay);
            overlay
        }
    };
    dom.add_class(overlay, "visible");
}

pub fn hide<D: Dom + ?Sized>(dom: &mut D) {
    let body = dom.body();
    dom.remove_class(body, "loading");
    if let Some(overlay) = dom.element_by_id(OVERLAY_ID) {
        dom.remove_class(overlay, "visible");
    }
}

#[must_use]
pub fn is_visible<D: Dom + ?Sized>(dom: &D) -> bool {
    dom.element_by_id(OVERLAY_ID)
        .is_some_and(|overlay| dom.has_class(overlay, "visible"))
}

/// Document-ready work: tags the body and fades out `#preloader`.
///
/// Returns the preloader whose removal was scheduled.
pub fn document_ready<D: Dom + ?Sized>(dom: &mut D, scheduler: &mut Scheduler<Timer>) -> Option<NodeId> {
    let body = dom.body();
    dom.add_class(body, "skin-loaded");
    let preloader = dom.element_by_id(PRELOADER_ID)?;
    dom.add_class(preloader, "fade-out");
    scheduler.schedule(PRELOADER_FADE_MS, Timer::PreloaderRemove { node: preloader });
    Some(preloader)
}

pub fn on_preloader_remove<D: Dom + ?Sized>(dom: &mut D, preloader: NodeId) {
    if dom.is_connected(preloader) {
        dom.remove(preloader);
    }
}
