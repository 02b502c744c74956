use chrono::Duration;

use super::common::*;
use crate::workflows::review::search::SearchPipeline;

#[test]
fn commits_only_after_the_quiet_period() {
    let mut pipeline = SearchPipeline::new(Duration::milliseconds(200));
    let start = t0();

    pipeline.submit("rea", start);
    assert_eq!(pipeline.commit_due(start), None);
    assert_eq!(
        pipeline.commit_due(start + Duration::milliseconds(199)),
        None
    );
    assert_eq!(
        pipeline.commit_due(start + Duration::milliseconds(200)),
        Some("rea".to_string())
    );

    // Committed input does not commit twice.
    assert_eq!(pipeline.commit_due(start + Duration::seconds(5)), None);
}

#[test]
fn new_input_restarts_the_quiet_period() {
    let mut pipeline = SearchPipeline::new(Duration::milliseconds(200));
    let start = t0();

    pipeline.submit("rea", start);
    pipeline.submit("react", start + Duration::milliseconds(150));

    // The first input's deadline has passed, but it was superseded.
    assert_eq!(
        pipeline.commit_due(start + Duration::milliseconds(250)),
        None
    );
    assert_eq!(
        pipeline.commit_due(start + Duration::milliseconds(350)),
        Some("react".to_string())
    );
}

#[test]
fn flush_commits_immediately() {
    let mut pipeline = SearchPipeline::default();
    pipeline.submit("go", t0());

    assert_eq!(pipeline.pending(), Some("go"));
    assert_eq!(pipeline.flush(), Some("go".to_string()));
    assert_eq!(pipeline.pending(), None);
    assert_eq!(pipeline.flush(), None);
}
