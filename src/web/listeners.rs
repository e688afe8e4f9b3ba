use crate::Result;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Event, EventTarget};

struct Subscription {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

/// DOM event listeners owned by one map.
///
/// Every listener is removed on [`Subscriptions::clear`] or when the set
/// is dropped.
#[derive(Default)]
pub struct Subscriptions {
    entries: Vec<Subscription>,
}

impl Subscriptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event` on `target`
    pub fn listen<F>(&mut self, target: &EventTarget, event: &'static str, handler: F) -> Result<()>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        self.entries.push(Subscription {
            target: target.clone(),
            event,
            closure,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remove every listener
    pub fn clear(&mut self) {
        for sub in self.entries.drain(..) {
            if let Err(err) = sub
                .target
                .remove_event_listener_with_callback(sub.event, sub.closure.as_ref().unchecked_ref())
            {
                log::warn!("failed to remove {} listener: {:?}", sub.event, err);
            }
        }
    }
}

impl Drop for Subscriptions {
    fn drop(&mut self) {
        self.clear();
    }
}
