use async_trait::async_trait;
use courtside_core::{availability::ConflictChecker, slots::TimeWindow};
use mockall::mock;
use uuid::Uuid;

// Mock conflict store for testing
mock! {
    pub ConflictStore {}

    #[async_trait]
    impl ConflictChecker for ConflictStore {
        async fn reservation_overlaps(
            &self,
            court_id: Uuid,
            window: TimeWindow,
        ) -> eyre::Result<bool>;

        async fn blackout_overlaps(
            &self,
            court_id: Uuid,
            window: TimeWindow,
        ) -> eyre::Result<bool>;
    }
}
