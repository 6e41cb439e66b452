//! The staged confirmation overlay.
//!
//! A fixed visual timer: four stages, one per second from the moment the
//! overlay is mounted, holding on the last. It never looks at the store:
//! "Saving your information..." may well be showing after the insert has
//! already returned.

use std::time::Duration;

use tokio::time::Instant;

/// Stage texts, in order.
pub const STAGES: [&str; 4] = [
    "Initializing connection...",
    "Connecting to database...",
    "Saving your information...",
    "Thank you for your submission! 🎉",
];

/// Time each stage is active before the next one takes over.
pub const STAGE_INTERVAL: Duration = Duration::from_millis(1000);

const LAST_STAGE: usize = STAGES.len() - 1;

/// How a stage line is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    /// Already passed; drawn with a check mark.
    Done,
    /// The current stage; drawn highlighted with a pulsing ellipsis.
    Active,
    /// Not reached yet; drawn dimmed.
    Pending,
}

impl StageStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Active => "active",
            Self::Pending => "pending",
        }
    }
}

/// One mounted overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressSequence {
    mounted_at: Instant,
}

impl ProgressSequence {
    /// Mount the overlay now.
    #[must_use]
    pub fn mount() -> Self {
        Self {
            mounted_at: Instant::now(),
        }
    }

    /// Stage index after `elapsed` time on screen.
    #[must_use]
    pub fn stage_at(elapsed: Duration) -> usize {
        let ticks = elapsed.as_millis() / STAGE_INTERVAL.as_millis();
        usize::try_from(ticks).map_or(LAST_STAGE, |t| t.min(LAST_STAGE))
    }

    /// Every stage with its status and how long until it becomes active
    /// (zero for stages already reached), as of now.
    #[must_use]
    pub fn schedule(&self) -> Vec<(&'static str, StageStatus, Duration)> {
        Self::schedule_at(self.mounted_at.elapsed())
    }

    /// [`schedule`](Self::schedule) after `elapsed` time on screen.
    #[must_use]
    pub fn schedule_at(elapsed: Duration) -> Vec<(&'static str, StageStatus, Duration)> {
        let current = Self::stage_at(elapsed);
        STAGES
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let status = match index.cmp(&current) {
                    std::cmp::Ordering::Less => StageStatus::Done,
                    std::cmp::Ordering::Equal => StageStatus::Active,
                    std::cmp::Ordering::Greater => StageStatus::Pending,
                };
                let starts_at =
                    STAGE_INTERVAL.saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
                (*text, status, starts_at.saturating_sub(elapsed))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_advances_once_per_interval() {
        assert_eq!(ProgressSequence::stage_at(Duration::ZERO), 0);
        assert_eq!(ProgressSequence::stage_at(Duration::from_millis(999)), 0);
        assert_eq!(ProgressSequence::stage_at(Duration::from_millis(1000)), 1);
        assert_eq!(ProgressSequence::stage_at(Duration::from_millis(2500)), 2);
        assert_eq!(ProgressSequence::stage_at(Duration::from_millis(3000)), 3);
    }

    #[test]
    fn stage_holds_on_last_without_wrapping() {
        assert_eq!(ProgressSequence::stage_at(Duration::from_secs(4)), 3);
        assert_eq!(ProgressSequence::stage_at(Duration::from_secs(3600)), 3);
    }

    #[test]
    fn last_stage_shows_before_success_delay_ends() {
        let last = ProgressSequence::schedule_at(Duration::ZERO)[LAST_STAGE].2;
        assert_eq!(last, Duration::from_secs(3));
        assert!(last < crate::form::SUCCESS_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn fresh_sequence_schedules_one_second_apart() {
        let seq = ProgressSequence::mount();
        let schedule = seq.schedule();

        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule[0].1, StageStatus::Active);
        assert!(schedule[1..].iter().all(|s| s.1 == StageStatus::Pending));

        let delays: Vec<_> = schedule.iter().map(|s| s.2).collect();
        assert_eq!(
            delays,
            vec![
                Duration::ZERO,
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(3),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn statuses_follow_the_clock() {
        let seq = ProgressSequence::mount();

        tokio::time::advance(Duration::from_millis(2100)).await;
        let statuses: Vec<_> = seq.schedule().into_iter().map(|s| s.1).collect();
        assert_eq!(
            statuses,
            vec![
                StageStatus::Done,
                StageStatus::Done,
                StageStatus::Active,
                StageStatus::Pending,
            ]
        );

        tokio::time::advance(Duration::from_secs(10)).await;
        let last = seq.schedule();
        assert!(last[..LAST_STAGE].iter().all(|s| s.1 == StageStatus::Done));
        assert_eq!(last[LAST_STAGE].1, StageStatus::Active);
        assert!(last.iter().all(|s| s.2 == Duration::ZERO));
    }
}
