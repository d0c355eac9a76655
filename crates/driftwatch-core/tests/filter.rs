use driftwatch_core::filter::MATCH_ALL;
use driftwatch_core::models::{Stack, StackStatus};
use driftwatch_core::{CoreError, StackFilter};

fn stack(name: &str, status: &str) -> Stack {
    Stack::new(
        format!("arn:aws:cloudformation:us-east-1:123456789012:stack/{name}/1"),
        name,
        StackStatus::from(status),
    )
}

fn names(stacks: &[Stack]) -> Vec<&str> {
    stacks.iter().map(|s| s.stack_name.as_str()).collect()
}

#[test]
fn settled_statuses_are_kept() {
    let filter = StackFilter::new(MATCH_ALL).unwrap();
    for status in ["CREATE_COMPLETE", "UPDATE_COMPLETE", "UPDATE_ROLLBACK_COMPLETE"] {
        assert!(filter.accepts(&stack("app", status)), "{status} should be kept");
    }
}

#[test]
fn other_statuses_are_dropped() {
    let filter = StackFilter::new(MATCH_ALL).unwrap();
    for status in [
        "CREATE_IN_PROGRESS",
        "ROLLBACK_COMPLETE",
        "DELETE_FAILED",
        "UPDATE_ROLLBACK_FAILED",
        "IMPORT_COMPLETE",
    ] {
        assert!(!filter.accepts(&stack("app", status)), "{status} should be dropped");
    }
}

#[test]
fn filter_preserves_order() {
    let filter = StackFilter::new(MATCH_ALL).unwrap();
    let kept = filter.filter(vec![
        stack("c", "UPDATE_COMPLETE"),
        stack("a", "DELETE_IN_PROGRESS"),
        stack("b", "CREATE_COMPLETE"),
        stack("a", "UPDATE_ROLLBACK_COMPLETE"),
    ]);
    assert_eq!(names(&kept), ["c", "b", "a"]);
}

#[test]
fn empty_pattern_matches_everything() {
    let filter = StackFilter::new("").unwrap();
    let kept = filter.filter(vec![stack("x", "CREATE_COMPLETE"), stack("", "CREATE_COMPLETE")]);
    assert_eq!(kept.len(), 2);
}

#[test]
fn pattern_is_anchored_at_start_only() {
    let filter = StackFilter::new("prod-").unwrap();
    let kept = filter.filter(vec![
        stack("prod-api", "CREATE_COMPLETE"),
        stack("staging-prod-api", "CREATE_COMPLETE"),
        stack("prod-", "UPDATE_COMPLETE"),
    ]);
    assert_eq!(names(&kept), ["prod-api", "prod-"]);
}

#[test]
fn alternation_is_grouped_under_the_anchor() {
    let filter = StackFilter::new("api|web").unwrap();
    let kept = filter.filter(vec![
        stack("web-frontend", "CREATE_COMPLETE"),
        stack("old-api", "CREATE_COMPLETE"),
        stack("api", "CREATE_COMPLETE"),
    ]);
    assert_eq!(names(&kept), ["web-frontend", "api"]);
}

#[test]
fn empty_input_yields_empty_output() {
    let filter = StackFilter::new(MATCH_ALL).unwrap();
    assert!(filter.filter(Vec::new()).is_empty());
}

#[test]
fn invalid_pattern_is_rejected() {
    assert!(matches!(
        StackFilter::new("prod-("),
        Err(CoreError::InvalidPattern { .. })
    ));
}
