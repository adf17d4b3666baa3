// Analysis orchestration — topic fan-out over the revision source.

pub mod analyze;
