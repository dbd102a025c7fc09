use async_trait::async_trait;
use mispbot::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ReplyPresenter for testing
///
/// Records every delivered reply; clones share the record.
#[derive(Clone, Default)]
pub struct MockReplyPresenter {
    pub should_fail: bool,
    replies: Arc<Mutex<Vec<(ReplyTarget, String)>>>,
}

impl MockReplyPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    pub fn replies(&self) -> Vec<(ReplyTarget, String)> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReplyPresenter for MockReplyPresenter {
    async fn present(&self, target: &ReplyTarget, text: &str) -> Result<()> {
        if self.should_fail {
            anyhow::bail!("Mock reply presenter failure");
        }
        self.replies
            .lock()
            .unwrap()
            .push((target.clone(), text.to_string()));
        Ok(())
    }
}
