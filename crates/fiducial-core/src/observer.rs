//! Presentation callbacks with token-based registration
//!
//! Presenters register a handler and receive a token; leaving is an
//! explicit unsubscribe with that token. Emission is synchronous and
//! fire-and-forget: the session never waits on presentation work, and a
//! handler has no way to report back into the tick that called it.

use std::fmt;

/// Content lifecycle notification delivered to subscribed presenters
#[derive(Debug, Clone, PartialEq)]
pub enum PresenterEvent<D> {
    /// Content for `marker` should appear
    Show {
        /// Id of the marker being presented
        marker: String,
        /// The registered descriptor for that marker
        content: D,
    },
    /// The currently showing content should disappear
    Hide {
        /// Id of the marker that was showing
        marker: String,
    },
}

impl<D> PresenterEvent<D> {
    /// The marker id this event concerns
    pub fn marker(&self) -> &str {
        match self {
            PresenterEvent::Show { marker, .. } => marker,
            PresenterEvent::Hide { marker } => marker,
        }
    }
}

/// Proof of registration, redeemed to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

type Handler<D> = Box<dyn FnMut(&PresenterEvent<D>) + Send + Sync>;

/// Registered presentation handlers, notified in subscription order
pub struct PresenterObservers<D> {
    handlers: Vec<(SubscriptionToken, Handler<D>)>,
    next_token: u64,
}

impl<D> PresenterObservers<D> {
    /// Creates an empty handler list
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_token: 0,
        }
    }

    /// Registers `handler` for every future emission
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionToken
    where
        F: FnMut(&PresenterEvent<D>) + Send + Sync + 'static,
    {
        let token = SubscriptionToken(self.next_token);
        self.next_token += 1;
        self.handlers.push((token, Box::new(handler)));
        token
    }

    /// Removes the handler registered under `token`
    ///
    /// Returns `false` when the token was already unsubscribed, and the
    /// handler sees no further events either way.
    pub fn unsubscribe(&mut self, token: SubscriptionToken) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(t, _)| *t != token);
        self.handlers.len() != before
    }

    /// Delivers `event` to every handler, in subscription order
    pub fn emit(&mut self, event: &PresenterEvent<D>) {
        for (_, handler) in &mut self.handlers {
            handler(event);
        }
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Whether nobody is subscribed
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<D> Default for PresenterObservers<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D> fmt::Debug for PresenterObservers<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresenterObservers")
            .field("handlers", &self.handlers.len())
            .field("next_token", &self.next_token)
            .finish()
    }
}
