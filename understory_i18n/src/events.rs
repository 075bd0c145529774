// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine notifications and their subscribers.

use core::fmt;

/// Something observable happened in the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum I18nEvent {
    /// The current language changed.
    LangChanged {
        /// Previous language.
        old: String,
        /// New language.
        new: String,
    },
    /// The fallback language changed.
    DefaultLangChanged {
        /// Previous fallback.
        old: String,
        /// New fallback.
        new: String,
    },
    /// A translation table was registered or replaced.
    TranslationsUpdated {
        /// The table's language.
        lang: String,
    },
    /// A full refresh pass completed.
    Refreshed {
        /// Number of elements written.
        nodes: usize,
    },
}

impl I18nEvent {
    /// The kind bit for this event.
    #[must_use]
    pub fn kind(&self) -> EventKinds {
        match self {
            Self::LangChanged { .. } => EventKinds::LANG_CHANGED,
            Self::DefaultLangChanged { .. } => EventKinds::DEFAULT_LANG_CHANGED,
            Self::TranslationsUpdated { .. } => EventKinds::TRANSLATIONS_UPDATED,
            Self::Refreshed { .. } => EventKinds::REFRESHED,
        }
    }

    /// The host-facing event name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LangChanged { .. } => "langchanged",
            Self::DefaultLangChanged { .. } => "defaultlangchanged",
            Self::TranslationsUpdated { .. } => "translationsupdated",
            Self::Refreshed { .. } => "refreshed",
        }
    }
}

bitflags::bitflags! {
    /// Set of event kinds a subscriber wants. [`EventKinds::all`] subscribes
    /// to every change.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EventKinds: u8 {
        /// [`I18nEvent::LangChanged`].
        const LANG_CHANGED = 1 << 0;
        /// [`I18nEvent::DefaultLangChanged`].
        const DEFAULT_LANG_CHANGED = 1 << 1;
        /// [`I18nEvent::TranslationsUpdated`].
        const TRANSLATIONS_UPDATED = 1 << 2;
        /// [`I18nEvent::Refreshed`].
        const REFRESHED = 1 << 3;
    }
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&I18nEvent)>;

/// Subscriber list, notified in subscription order.
#[derive(Default)]
pub(crate) struct Listeners {
    next: u64,
    entries: Vec<(SubscriptionId, EventKinds, Listener)>,
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("next", &self.next)
            .field("len", &self.entries.len())
            .finish()
    }
}

impl Listeners {
    pub(crate) fn subscribe(&mut self, kinds: EventKinds, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next);
        self.next += 1;
        self.entries.push((id, kinds, listener));
        id
    }

    pub(crate) fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, ..)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn emit(&mut self, event: &I18nEvent) {
        let kind = event.kind();
        for (_, kinds, listener) in &mut self.entries {
            if kinds.intersects(kind) {
                listener(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{EventKinds, I18nEvent, Listeners};

    #[test]
    fn filters_by_kind_and_supports_wildcard() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners = Listeners::default();
        let lang_only = seen.clone();
        listeners.subscribe(
            EventKinds::LANG_CHANGED,
            Box::new(move |e| lang_only.borrow_mut().push(("lang", e.name()))),
        );
        let any = seen.clone();
        let id = listeners.subscribe(
            EventKinds::all(),
            Box::new(move |e| any.borrow_mut().push(("any", e.name()))),
        );

        listeners.emit(&I18nEvent::TranslationsUpdated { lang: "en".into() });
        listeners.emit(&I18nEvent::LangChanged {
            old: "en".into(),
            new: "fr".into(),
        });
        assert!(listeners.unsubscribe(id));
        assert!(!listeners.unsubscribe(id));
        listeners.emit(&I18nEvent::Refreshed { nodes: 1 });

        assert_eq!(
            *seen.borrow(),
            [
                ("any", "translationsupdated"),
                ("lang", "langchanged"),
                ("any", "langchanged"),
            ]
        );
    }
}
