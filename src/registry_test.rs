use super::*;

fn page_with_answers(n: u64) -> WidgetRegistry {
    let mut reg = WidgetRegistry::new();
    for i in 1..=n {
        reg.insert_answer_mark(AnswerMarkWidget::new(WidgetId(i), format!("/answer/mark/{i}")));
    }
    reg
}

fn marked_count(reg: &WidgetRegistry) -> usize {
    reg.answer_marks().filter(|w| w.accepted).count()
}

#[test]
fn insert_resets_phase_to_idle() {
    let mut reg = WidgetRegistry::new();
    let mut widget = VoteWidget::new(WidgetId(1), 10, "/vote/question");
    widget.phase = Phase::Submitting;
    reg.insert_vote(widget);
    assert_eq!(reg.vote(WidgetId(1)).unwrap().phase, Phase::Idle);
}

#[test]
fn begin_vote_is_single_flight() {
    let mut reg = WidgetRegistry::new();
    reg.insert_vote(VoteWidget::new(WidgetId(1), 10, "/vote/question"));

    let first = reg.begin_vote(WidgetId(1)).unwrap();
    assert_eq!(first.unwrap().phase, Phase::Submitting);
    assert!(reg.begin_vote(WidgetId(1)).unwrap().is_none());
}

#[test]
fn begin_unknown_widget_errors() {
    let mut reg = WidgetRegistry::new();
    assert!(matches!(reg.begin_vote(WidgetId(5)), Err(SubmitError::UnknownWidget(WidgetId(5)))));
    assert!(matches!(reg.begin_answer_mark(WidgetId(5)), Err(SubmitError::UnknownWidget(WidgetId(5)))));
}

#[test]
fn busy_vote_does_not_block_other_widgets() {
    let mut reg = WidgetRegistry::new();
    reg.insert_vote(VoteWidget::new(WidgetId(1), 10, "/vote/question"));
    reg.insert_vote(VoteWidget::new(WidgetId(2), 11, "/vote/answer"));

    assert!(reg.begin_vote(WidgetId(1)).unwrap().is_some());
    assert!(reg.begin_vote(WidgetId(2)).unwrap().is_some());
}

#[test]
fn finish_vote_applies_rating_and_idles() {
    let mut reg = WidgetRegistry::new();
    reg.insert_vote(VoteWidget::new(WidgetId(1), 10, "/vote/question").with_rating(3));
    reg.begin_vote(WidgetId(1)).unwrap();

    let done = reg.finish_vote(WidgetId(1), Some(4)).unwrap();
    assert_eq!(done.rating, Some(4));
    assert_eq!(done.phase, Phase::Idle);
}

#[test]
fn finish_vote_without_rating_keeps_display() {
    let mut reg = WidgetRegistry::new();
    reg.insert_vote(VoteWidget::new(WidgetId(1), 10, "/vote/question").with_rating(3));
    reg.begin_vote(WidgetId(1)).unwrap();

    let done = reg.finish_vote(WidgetId(1), None).unwrap();
    assert_eq!(done.rating, Some(3));
    assert!(!done.is_busy());
}

#[test]
fn accepting_is_exclusive() {
    let mut reg = page_with_answers(3);
    reg.insert_answer_mark(AnswerMarkWidget::new(WidgetId(1), "/answer/mark/1").with_accepted(true));

    reg.begin_answer_mark(WidgetId(3)).unwrap();
    let changed = reg.finish_answer_mark(WidgetId(3), Some(true));

    assert_eq!(changed.len(), 2);
    assert_eq!(changed[0].id, WidgetId(1));
    assert!(!changed[0].accepted);
    assert_eq!(changed[1].id, WidgetId(3));
    assert!(changed[1].accepted);
    assert_eq!(marked_count(&reg), 1);
    assert_eq!(reg.accepted_answer(), Some(WidgetId(3)));
}

#[test]
fn reaccepting_same_answer_changes_only_itself() {
    let mut reg = page_with_answers(2);
    reg.insert_answer_mark(AnswerMarkWidget::new(WidgetId(2), "/answer/mark/2").with_accepted(true));

    reg.begin_answer_mark(WidgetId(2)).unwrap();
    let changed = reg.finish_answer_mark(WidgetId(2), Some(true));
    assert_eq!(changed.len(), 1);
    assert_eq!(marked_count(&reg), 1);
}

#[test]
fn unmarking_touches_only_clicked_widget() {
    let mut reg = page_with_answers(3);
    reg.insert_answer_mark(AnswerMarkWidget::new(WidgetId(2), "/answer/mark/2").with_accepted(true));

    reg.begin_answer_mark(WidgetId(2)).unwrap();
    let changed = reg.finish_answer_mark(WidgetId(2), Some(false));

    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].id, WidgetId(2));
    assert!(!changed[0].accepted);
    assert_eq!(marked_count(&reg), 0);
}

#[test]
fn failed_mark_only_restores_phase() {
    let mut reg = page_with_answers(2);
    reg.insert_answer_mark(AnswerMarkWidget::new(WidgetId(1), "/answer/mark/1").with_accepted(true));

    reg.begin_answer_mark(WidgetId(2)).unwrap();
    let changed = reg.finish_answer_mark(WidgetId(2), None);

    assert_eq!(changed.len(), 1);
    assert_eq!(changed[0].phase, Phase::Idle);
    assert_eq!(reg.accepted_answer(), Some(WidgetId(1)));
}

#[test]
fn finish_unknown_answer_mark_is_empty() {
    let mut reg = page_with_answers(1);
    assert!(reg.finish_answer_mark(WidgetId(9), Some(true)).is_empty());
    assert!(reg.finish_vote(WidgetId(9), Some(1)).is_none());
}
