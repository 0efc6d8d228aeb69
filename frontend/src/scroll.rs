use log::warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    js_sys, Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, ScrollBehavior, ScrollToOptions,
};

/// Share of an element that must be visible before it is revealed.
pub const REVEAL_THRESHOLD: f64 = 0.12;
/// Shrinks the viewport bottom so elements reveal a little after entering it.
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -8% 0px";
pub const STAGGER_STEP_MS: usize = 90;
/// Gap kept between the fixed header and an anchor target.
pub const ANCHOR_GAP: f64 = 10.0;

/// Value of the `--delay` custom property for the `index`-th staggered sibling.
pub fn stagger_delay(index: usize) -> String {
    format!("{}ms", index * STAGGER_STEP_MS)
}

/// Fragment of a same-page link, `None` for bare `#` or other hrefs.
pub fn anchor_fragment(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|fragment| !fragment.is_empty())
}

/// Document scroll position that puts `target_top` (viewport-relative) just below the header.
pub fn anchor_scroll_top(target_top: f64, scroll_y: f64, header_height: f64) -> f64 {
    (target_top + scroll_y - header_height - ANCHOR_GAP).max(0.0)
}

/// Scroll-reveal observer and anchor click handler. Dropping it detaches both.
pub struct ScrollEffects {
    document: Document,
    observer: Option<IntersectionObserver>,
    _on_intersect: Option<Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>>,
    on_click: Closure<dyn FnMut(MouseEvent)>,
}

impl Drop for ScrollEffects {
    fn drop(&mut self) {
        if let Some(observer) = &self.observer {
            observer.disconnect();
        }
        let _ = self
            .document
            .remove_event_listener_with_callback("click", self.on_click.as_ref().unchecked_ref());
    }
}

pub fn install(document: &Document) -> ScrollEffects {
    apply_stagger(document);
    let (observer, on_intersect) = match observe_reveals(document) {
        Ok((observer, callback)) => (Some(observer), Some(callback)),
        Err(e) => {
            warn!("IntersectionObserver unavailable, revealing everything: {:?}", e);
            for el in elements(document, ".reveal") {
                let _ = el.class_list().add_1("active");
            }
            (None, None)
        }
    };

    let on_click = {
        let document = document.clone();
        Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
            scroll_to_anchor(&document, &event);
        })
    };
    if let Err(e) = document.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref()) {
        warn!("Could not listen for anchor clicks: {:?}", e);
    }

    ScrollEffects {
        document: document.clone(),
        observer,
        _on_intersect: on_intersect,
        on_click,
    }
}

fn elements(document: &Document, selector: &str) -> Vec<Element> {
    let Ok(list) = document.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Numbers `.stagger` elements within each parent, starting over for every parent.
fn apply_stagger(document: &Document) {
    let mut parent: Option<Element> = None;
    let mut index = 0;
    for el in elements(document, ".stagger") {
        let current = el.parent_element();
        if current != parent {
            parent = current;
            index = 0;
        }
        if let Ok(html) = el.dyn_into::<HtmlElement>() {
            let _ = html.style().set_property("--delay", &stagger_delay(index));
        }
        index += 1;
    }
}

fn observe_reveals(
    document: &Document,
) -> Result<(IntersectionObserver, Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>), JsValue> {
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let entry: IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    let target = entry.target();
                    let _ = target.class_list().add_1("active");
                    // Reveal once, then stop watching.
                    observer.unobserve(&target);
                }
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    init.set_root_margin(REVEAL_ROOT_MARGIN);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)?;

    for el in elements(document, ".reveal") {
        observer.observe(&el);
    }
    Ok((observer, callback))
}

fn scroll_to_anchor(document: &Document, event: &MouseEvent) {
    let Some(link) = event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .and_then(|el| el.closest("a[href^='#']").ok().flatten())
    else {
        return;
    };
    let Some(href) = link.get_attribute("href") else {
        return;
    };
    let Some(fragment) = anchor_fragment(&href) else {
        return;
    };
    let Some(target) = document.get_element_by_id(fragment) else {
        return;
    };
    let Some(window) = web_sys::window() else {
        return;
    };

    event.prevent_default();
    if let Ok(history) = window.history() {
        let _ = history.push_state_with_url(&JsValue::NULL, "", Some(href.as_str()));
    }

    let header_height = document
        .query_selector("header")
        .ok()
        .flatten()
        .and_then(|h| h.dyn_into::<HtmlElement>().ok())
        .map(|h| f64::from(h.offset_height()))
        .unwrap_or(0.0);
    let top = anchor_scroll_top(
        target.get_bounding_client_rect().top(),
        window.scroll_y().unwrap_or(0.0),
        header_height,
    );

    let options = ScrollToOptions::new();
    options.set_top(top);
    options.set_behavior(ScrollBehavior::Smooth);
    window.scroll_to_with_scroll_to_options(&options);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stagger_delay_grows_by_step() {
        assert_eq!(stagger_delay(0), "0ms");
        assert_eq!(stagger_delay(1), "90ms");
        assert_eq!(stagger_delay(4), "360ms");
    }

    #[test]
    fn only_non_empty_fragments_are_anchors() {
        assert_eq!(anchor_fragment("#contato"), Some("contato"));
        assert_eq!(anchor_fragment("#"), None);
        assert_eq!(anchor_fragment("/blog#x"), None);
        assert_eq!(anchor_fragment("https://example.com"), None);
    }

    #[test]
    fn anchor_offset_accounts_for_header_and_gap() {
        assert_eq!(anchor_scroll_top(500.0, 1200.0, 72.0), 1618.0);
    }

    #[test]
    fn anchor_offset_never_negative() {
        assert_eq!(anchor_scroll_top(-40.0, 0.0, 72.0), 0.0);
    }
}
