use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;
use coinlens::error::FetchError;
use coinlens::port::outbound::http::{HttpClient, HttpRequest};
use parking_lot::Mutex;

type Reply = Result<String, FetchError>;

struct Route {
    fragment: String,
    replies: VecDeque<(Duration, Reply)>,
}

/// HTTP fake that answers by URL fragment and records every request.
///
/// Each route replays its replies in order; the last one repeats once the
/// queue is down to a single entry. Unrouted URLs get a 404. A reply with a
/// delay is held back on the tokio clock, so concurrent callers really
/// overlap in flight.
#[derive(Default)]
pub struct ScriptedHttp {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttp {
    pub fn new() -> std::sync::Arc<Self> {
        std::sync::Arc::new(Self::default())
    }

    /// Answer URLs containing `fragment` with `replies`, in order.
    pub fn route(&self, fragment: &str, replies: Vec<Reply>) {
        let immediate = replies.into_iter().map(|reply| (Duration::ZERO, reply));
        self.route_timed(fragment, immediate.collect());
    }

    /// Like [`route`](Self::route), with each reply delivered after its delay.
    pub fn route_timed(&self, fragment: &str, replies: Vec<(Duration, Reply)>) {
        self.routes.lock().push(Route {
            fragment: fragment.to_string(),
            replies: replies.into(),
        });
    }

    /// Answer URLs containing `fragment` with `body` forever, after `delay`.
    pub fn ok_after(&self, fragment: &str, body: impl Into<String>, delay: Duration) {
        self.route_timed(fragment, vec![(delay, Ok(body.into()))]);
    }

    /// Answer URLs containing `fragment` with `body` forever.
    pub fn ok(&self, fragment: &str, body: impl Into<String>) {
        self.route(fragment, vec![Ok(body.into())]);
    }

    /// Answer URLs containing `fragment` with `status` forever.
    pub fn status(&self, fragment: &str, status: u16) {
        let err = FetchError::from_status(status, fragment).expect("non-success status");
        self.route(fragment, vec![Err(err)]);
    }

    /// Number of requests whose URL contains `fragment`.
    pub fn calls(&self, fragment: &str) -> usize {
        self.requests
            .lock()
            .iter()
            .filter(|request| request.url.contains(fragment))
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl HttpClient for ScriptedHttp {
    async fn get(&self, request: &HttpRequest) -> Result<String, FetchError> {
        self.requests.lock().push(request.clone());

        let (delay, reply) = {
            let mut routes = self.routes.lock();
            let Some(route) = routes
                .iter_mut()
                .find(|route| request.url.contains(&route.fragment))
            else {
                return Err(FetchError::Client {
                    status: 404,
                    url: request.url.clone(),
                });
            };

            if route.replies.len() > 1 {
                route.replies.pop_front().expect("non-empty replies")
            } else {
                route.replies.front().cloned().expect("route has a reply")
            }
        };

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        reply
    }
}
