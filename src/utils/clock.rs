use chrono::{DateTime, Local};

/// Represents an entity responsible for providing dates across application. Command handlers ask
/// it for "now" so that tests can pin the day.
pub trait Clock {
    fn time(&self) -> DateTime<Local>;
}

pub struct DefaultClock;

impl Clock for DefaultClock {
    fn time(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock stuck at a single moment.
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn time(&self) -> DateTime<Local> {
        self.0
    }
}
