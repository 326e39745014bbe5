pub mod email;

pub use email::EmailSender;

use anyhow::Result;

/// Delivery transport for a rendered report. Fire-and-forget with a
/// `Result` outcome; a failure here is the only pipeline failure surfaced
/// to the caller.
#[async_trait::async_trait]
pub trait ReportSink: Send + Sync {
    async fn deliver(&self, subject: &str, html: &str) -> Result<()>;
}

// --- Test helper ---
pub struct MockSink {
    pub sent: std::sync::Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            sent: std::sync::Mutex::new(vec![]),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: std::sync::Mutex::new(vec![]),
            fail: true,
        }
    }
}

impl Default for MockSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ReportSink for MockSink {
    async fn deliver(&self, subject: &str, html: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("mock delivery failure");
        }
        self.sent
            .lock()
            .unwrap()
            .push((subject.to_string(), html.to_string()));
        Ok(())
    }
}
