//! Transient success / error banners shown above a screen.
//!
//! Expiry is evaluated lazily against [`tokio::time::Instant`] whenever the
//! view model is rendered, so tests can drive it with a paused clock.

use std::time::Duration;

use serde::Serialize;
use tokio::time::Instant;

/// Lifetime of a success banner.
pub const SUCCESS_TTL: Duration = Duration::from_secs(3);
/// Lifetime of a description-generation error.
pub const GENERATION_ERROR_TTL: Duration = Duration::from_secs(5);
/// Lifetime of a task-delete error on the task screens.
pub const DELETE_ERROR_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone)]
struct Banner {
    message: String,
    /// `None` stays until the next write clears it.
    expires_at: Option<Instant>,
}

impl Banner {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|deadline| now < deadline)
    }
}

#[derive(Debug, Default)]
pub struct Banners {
    success: Option<Banner>,
    error: Option<Banner>,
}

/// Rendered banners.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BannerView {
    pub success: Option<String>,
    pub error: Option<String>,
}

impl Banners {
    /// Drop both banners. Every write starts with this.
    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    /// Drop only the error banner.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.success = Some(Banner {
            message: message.into(),
            expires_at: Some(Instant::now() + SUCCESS_TTL),
        });
    }

    /// An error that stays until the next write.
    pub fn error(&mut self, message: impl Into<String>) {
        self.error = Some(Banner {
            message: message.into(),
            expires_at: None,
        });
    }

    pub fn error_for(&mut self, message: impl Into<String>, ttl: Duration) {
        self.error = Some(Banner {
            message: message.into(),
            expires_at: Some(Instant::now() + ttl),
        });
    }

    /// Current banners, discarding the ones that have expired.
    pub fn view(&mut self) -> BannerView {
        let now = Instant::now();
        if self.success.as_ref().is_some_and(|b| !b.is_live(now)) {
            self.success = None;
        }
        if self.error.as_ref().is_some_and(|b| !b.is_live(now)) {
            self.error = None;
        }
        BannerView {
            success: self.success.as_ref().map(|b| b.message.clone()),
            error: self.error.as_ref().map(|b| b.message.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn success_clears_after_three_seconds() {
        let mut banners = Banners::default();
        banners.success("Project created successfully!");

        tokio::time::advance(Duration::from_millis(2_900)).await;
        assert_eq!(
            banners.view().success.as_deref(),
            Some("Project created successfully!")
        );

        tokio::time::advance(Duration::from_millis(200)).await;
        assert_eq!(banners.view(), BannerView::default());
    }

    #[tokio::test(start_paused = true)]
    async fn plain_errors_persist() {
        let mut banners = Banners::default();
        banners.error("Please enter a project title");
        tokio::time::advance(Duration::from_secs(600)).await;
        assert_eq!(
            banners.view().error.as_deref(),
            Some("Please enter a project title")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn generation_errors_clear_after_five_seconds() {
        let mut banners = Banners::default();
        banners.error_for("quota exceeded", GENERATION_ERROR_TTL);
        tokio::time::advance(Duration::from_millis(4_999)).await;
        assert!(banners.view().error.is_some());
        tokio::time::advance(Duration::from_millis(1)).await;
        assert!(banners.view().error.is_none());
    }

    #[test]
    fn clear_drops_both() {
        let mut banners = Banners::default();
        banners.error("x");
        banners.clear();
        assert_eq!(banners.view(), BannerView::default());
    }
}
