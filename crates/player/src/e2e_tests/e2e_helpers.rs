//! Shared setup for end-to-end tests.

use std::sync::Arc;

use talekeeper_domain::{SessionRef, Turn};

use crate::application::services::SessionView;
use crate::config::PlayerConfig;
use crate::infrastructure::clock::FixedClock;
use crate::infrastructure::testing::fixtures::at;
use crate::infrastructure::testing::FakeSessionServer;

pub struct Harness {
    pub server: Arc<FakeSessionServer>,
    pub session: SessionRef,
}

impl Harness {
    /// A session whose history holds `turns` alternating user/narrator turns.
    pub fn with_turns(turns: usize) -> Self {
        let server = Arc::new(FakeSessionServer::new());
        let session = server.add_session("The Sunken Crypt");
        server.seed_turns(&session, turns);
        Self { server, session }
    }

    pub async fn open(&self) -> Arc<SessionView> {
        let view = SessionView::open(
            self.session.clone(),
            self.server.clone(),
            Arc::new(FixedClock(at(10_000))),
            &PlayerConfig::default(),
        )
        .await
        .expect("session view should open");
        Arc::new(view)
    }

    /// What a freshly opened view would show after loading every page.
    pub fn server_turns(&self) -> Vec<Turn> {
        self.server.turns(&self.session)
    }
}

/// Yield to other tasks until `condition` holds.
pub async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..10_000 {
        if condition() {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!("condition was never met");
}

pub fn confirmed_ids(turns: &[Turn]) -> Vec<i64> {
    turns.iter().filter_map(|t| t.id.confirmed()).collect()
}
