//! Session-driven navigation.
//!
//! Watches the session and tells the presentation layer whether to show the
//! authenticated entry point or the welcome (login/register) screen.

use futures::Stream;

use storyline_core::error::StoryError;
use storyline_core::session::{Session, SessionSubscription};

/// Where the presentation layer should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The authenticated story feed.
    Main,
    /// The unauthenticated entry point.
    Welcome,
}

impl Destination {
    pub fn for_session(session: &Session) -> Self {
        if session.is_authenticated() {
            Destination::Main
        } else {
            Destination::Welcome
        }
    }

    /// Redirect required by `error`, if any.
    ///
    /// Missing or rejected credentials send the user back to `Welcome`
    /// instead of being shown as an error message.
    pub fn for_error(error: &StoryError) -> Option<Self> {
        error.requires_login().then_some(Destination::Welcome)
    }
}

/// Emits a [`Destination`] whenever the session crosses the login boundary.
///
/// The first call to [`next`](Self::next) yields the destination for the
/// current session; repeated values are suppressed.
pub struct SessionRouter {
    subscription: SessionSubscription,
    last: Option<Destination>,
}

impl SessionRouter {
    pub fn new(subscription: SessionSubscription) -> Self {
        Self {
            subscription,
            last: None,
        }
    }

    /// Waits for the next change of destination.
    ///
    /// Returns `None` once the session store is gone.
    pub async fn next(&mut self) -> Option<Destination> {
        loop {
            let session = self.subscription.next().await?;
            let destination = Destination::for_session(&session);
            if self.last != Some(destination) {
                tracing::debug!("[SessionRouter] Routing to {:?}", destination);
                self.last = Some(destination);
                return Some(destination);
            }
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = Destination> + Send {
        futures::stream::unfold(self, |mut router| async move {
            let destination = router.next().await?;
            Some((destination, router))
        })
    }
}
