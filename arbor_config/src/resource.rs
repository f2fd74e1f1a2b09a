// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resource fetching boundary.
//!
//! A [`Fetch`] implementation turns a [`Locator`] into a [`Pending`] handle.
//! The work may finish on any thread; the UI thread polls the handle with
//! [`Pending::try_take`] once per frame (or waits with a bound) and only then
//! touches the tree. [`SchemeRouter`] dispatches by locator scheme.
//!
//! No transport lives here. Hosts register their own fetchers per scheme.

use std::fmt;
use std::str::FromStr;
use std::sync::mpsc;
use std::time::Duration;

use hashbrown::HashMap;

/// A URI-like resource address: `scheme://path`.
///
/// A string without a scheme separator is a `file` locator.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Locator {
    scheme: String,
    path: String,
}

impl Locator {
    /// Build from parts. The scheme is lowercased.
    pub fn new(scheme: &str, path: impl Into<String>) -> Self {
        Self {
            scheme: scheme.to_ascii_lowercase(),
            path: path.into(),
        }
    }

    /// Scheme, lowercase.
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Everything after `://`.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl FromStr for Locator {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (scheme, path) = s.split_once("://").unwrap_or(("file", s));
        let valid_scheme = scheme
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
        if !valid_scheme || path.is_empty() {
            return Err(FetchError::InvalidLocator(s.to_owned()));
        }
        Ok(Self::new(scheme, path))
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}", self.scheme, self.path)
    }
}

/// Payload and status of a completed fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// Transport status code. `200` means success for every scheme.
    pub status: u16,
    /// Body bytes.
    pub body: Vec<u8>,
}

impl Response {
    /// A `200` response.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a fetch produced no response.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The locator string could not be parsed.
    #[error("invalid locator `{0}`")]
    InvalidLocator(String),
    /// No fetcher is registered for the scheme.
    #[error("no fetcher for scheme `{0}`")]
    UnknownScheme(String),
    /// The fetcher failed.
    #[error("transport error: {0}")]
    Transport(String),
    /// The completing side went away without an answer.
    #[error("fetch abandoned before completion")]
    Abandoned,
    /// A bounded wait ran out.
    #[error("fetch timed out after {0:?}")]
    TimedOut(Duration),
}

type FetchResult = Result<Response, FetchError>;

/// Handle to a fetch that may still be running.
#[derive(Debug)]
pub struct Pending {
    rx: mpsc::Receiver<FetchResult>,
}

/// Completing side of a [`Pending`]. Send it to the worker doing the fetch.
#[derive(Debug)]
pub struct Completer {
    tx: mpsc::SyncSender<FetchResult>,
}

impl Completer {
    /// Deliver the result. Ignored if the handle was dropped.
    pub fn complete(self, result: FetchResult) {
        if self.tx.send(result).is_err() {
            log::trace!("fetch result dropped: handle already gone");
        }
    }
}

impl Pending {
    /// A connected handle/completer pair.
    pub fn channel() -> (Completer, Self) {
        let (tx, rx) = mpsc::sync_channel(1);
        (Completer { tx }, Self { rx })
    }

    /// A handle that is already complete.
    pub fn ready(result: FetchResult) -> Self {
        let (completer, pending) = Self::channel();
        completer.complete(result);
        pending
    }

    /// The result if it has arrived, without blocking.
    ///
    /// Returns `None` while the fetch is running. A completer dropped without
    /// an answer yields [`FetchError::Abandoned`]. After a result has been
    /// taken, the handle reports `Abandoned` too.
    pub fn try_take(&mut self) -> Option<FetchResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => Some(Err(FetchError::Abandoned)),
        }
    }

    /// Block for at most `timeout`.
    pub fn wait(self, timeout: Duration) -> FetchResult {
        match self.rx.recv_timeout(timeout) {
            Ok(result) => result,
            Err(mpsc::RecvTimeoutError::Timeout) => Err(FetchError::TimedOut(timeout)),
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(FetchError::Abandoned),
        }
    }
}

/// Something that can start fetches.
pub trait Fetch: Send + Sync {
    /// Start fetching `locator`.
    fn fetch(&self, locator: &Locator) -> Pending;
}

/// Routes fetches to per-scheme fetchers.
#[derive(Default)]
pub struct SchemeRouter {
    routes: HashMap<String, Box<dyn Fetch>>,
}

impl fmt::Debug for SchemeRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut schemes: Vec<_> = self.routes.keys().collect();
        schemes.sort();
        f.debug_struct("SchemeRouter")
            .field("schemes", &schemes)
            .finish()
    }
}

impl SchemeRouter {
    /// A router with no schemes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `fetcher` for `scheme`, replacing any previous one.
    pub fn route(mut self, scheme: &str, fetcher: impl Fetch + 'static) -> Self {
        self.routes
            .insert(scheme.to_ascii_lowercase(), Box::new(fetcher));
        self
    }

    /// Whether a fetcher handles `scheme`.
    pub fn handles(&self, scheme: &str) -> bool {
        self.routes.contains_key(&scheme.to_ascii_lowercase())
    }

    /// Parse `locator` and fetch it. Parse failures resolve immediately.
    pub fn fetch_str(&self, locator: &str) -> Pending {
        match locator.parse::<Locator>() {
            Ok(loc) => self.fetch(&loc),
            Err(err) => Pending::ready(Err(err)),
        }
    }
}

impl Fetch for SchemeRouter {
    fn fetch(&self, locator: &Locator) -> Pending {
        match self.routes.get(locator.scheme()) {
            Some(fetcher) => {
                log::debug!("fetching {locator}");
                fetcher.fetch(locator)
            }
            None => {
                log::debug!("no fetcher for {locator}");
                Pending::ready(Err(FetchError::UnknownScheme(locator.scheme().to_owned())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    /// Answers on a worker thread with the path bytes.
    struct Echo(Arc<AtomicUsize>);

    impl Fetch for Echo {
        fn fetch(&self, locator: &Locator) -> Pending {
            self.0.fetch_add(1, Ordering::SeqCst);
            let (completer, pending) = Pending::channel();
            let body = locator.path().as_bytes().to_vec();
            thread::spawn(move || completer.complete(Ok(Response::ok(body))));
            pending
        }
    }

    /// Never answers; the completer is parked in the fetcher.
    struct Stall(parking_lot::Mutex<Vec<Completer>>);

    impl Fetch for Stall {
        fn fetch(&self, _: &Locator) -> Pending {
            let (completer, pending) = Pending::channel();
            self.0.lock().push(completer);
            pending
        }
    }

    #[test]
    fn parses_locators() {
        let loc: Locator = "HTTPS://example.org/a.png".parse().unwrap();
        assert_eq!(loc.scheme(), "https");
        assert_eq!(loc.path(), "example.org/a.png");
        assert_eq!(loc.to_string(), "https://example.org/a.png");

        let bare: Locator = "assets/skin.json".parse().unwrap();
        assert_eq!(bare, Locator::new("file", "assets/skin.json"));

        for bad in ["", "://x", "1http://x", "ht tp://x", "file://"] {
            assert!(
                matches!(bad.parse::<Locator>(), Err(FetchError::InvalidLocator(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn routes_by_scheme() {
        let calls = Arc::new(AtomicUsize::new(0));
        let router = SchemeRouter::new().route("mem", Echo(calls.clone()));
        assert!(router.handles("MEM"));

        let result = router
            .fetch_str("mem://hello")
            .wait(Duration::from_secs(5))
            .unwrap();
        assert_eq!(result, Response::ok("hello"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let mut unknown = router.fetch_str("gopher://x");
        assert_eq!(
            unknown.try_take(),
            Some(Err(FetchError::UnknownScheme("gopher".into())))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn polling_sees_running_then_done() {
        let stall = Arc::new(Stall(parking_lot::Mutex::new(Vec::new())));
        let mut pending = stall.fetch(&Locator::new("x", "y"));
        assert_eq!(pending.try_take(), None, "still running");
        let completer = stall.0.lock().pop().unwrap();
        completer.complete(Ok(Response {
            status: 404,
            body: Vec::new(),
        }));
        let response = pending.try_take().unwrap().unwrap();
        assert!(!response.is_success());
    }

    #[test]
    fn dropped_completer_abandons() {
        let (completer, mut pending) = Pending::channel();
        drop(completer);
        assert_eq!(pending.try_take(), Some(Err(FetchError::Abandoned)));
    }

    #[test]
    fn bounded_wait_times_out() {
        let (_completer, pending) = Pending::channel();
        let timeout = Duration::from_millis(10);
        assert_eq!(pending.wait(timeout), Err(FetchError::TimedOut(timeout)));
    }
}
