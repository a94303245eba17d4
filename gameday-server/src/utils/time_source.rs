use crate::types::date_time::DateTime;
use chrono::TimeDelta;
use parking_lot::Mutex;
use std::sync::Arc;

/// Source of wall clock time that can be frozen and advanced manually in tests.
#[derive(Clone, Default)]
pub struct TimeSource {
	test_time: Option<Arc<Mutex<DateTime>>>,
}

impl TimeSource {
	pub fn test(start: DateTime) -> Self {
		Self {
			test_time: Some(Arc::new(Mutex::new(start))),
		}
	}

	pub fn now(&self) -> DateTime {
		match &self.test_time {
			None => DateTime::now(),
			Some(test_time) => *test_time.lock(),
		}
	}

	pub fn advance_time(&self, by_duration: TimeDelta) {
		let mut test_time = self
			.test_time
			.as_ref()
			.expect("Can only be called in test mode.")
			.lock();
		*test_time = test_time
			.checked_add(by_duration)
			.expect("Advancing the test time overflowed.");
	}
}
