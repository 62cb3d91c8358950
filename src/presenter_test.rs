use super::*;
use crate::widget::Phase;

fn submitting_vote() -> VoteWidget {
    let mut widget = VoteWidget::new(WidgetId(1), 12, "/vote/question").with_rating(3);
    widget.phase = Phase::Submitting;
    widget
}

#[test]
fn modal_messages_follow_error_kind() {
    assert_eq!(modal_message(&SubmitError::PermissionDenied), PERMISSION_DENIED_MESSAGE);
    assert_eq!(modal_message(&SubmitError::from_status(500, String::new())), GENERIC_FAILURE_MESSAGE);
    assert_eq!(modal_message(&SubmitError::MalformedResponse("eof".into())), GENERIC_FAILURE_MESSAGE);
    assert_eq!(modal_message(&SubmitError::Transport("reset".into())), GENERIC_FAILURE_MESSAGE);
}

#[test]
fn submitting_vote_is_inactive_and_loading() {
    let view = VoteView::from(&submitting_vote());
    assert_eq!(view.button_classes(), vec!["votes__vote", "votes__vote--inactive"]);
    assert_eq!(view.value_classes(), vec!["hidden"]);
    assert_eq!(view.loader_classes(), vec!["loader"]);
}

#[test]
fn idle_vote_clears_loading_markers() {
    let mut widget = submitting_vote();
    widget.phase = Phase::Idle;
    let view = VoteView::from(&widget);
    assert_eq!(view.button_classes(), vec!["votes__vote"]);
    assert!(view.value_classes().is_empty());
    assert_eq!(view.loader_classes(), vec!["loader", "hidden"]);
    assert_eq!(view.value, Some(3));
}

#[test]
fn pending_answer_block_is_dimmed() {
    let mut widget = AnswerMarkWidget::new(WidgetId(2), "/answer/mark/2").with_accepted(true);
    widget.phase = Phase::Submitting;
    let view = AnswerMarkView::from(&widget);
    assert_eq!(view.mark_classes(), vec!["answer-mark", "answer-mark--inactive", "answer-mark--marked"]);
    assert!((view.block_opacity - PENDING_BLOCK_OPACITY).abs() < f32::EPSILON);

    widget.phase = Phase::Idle;
    let view = AnswerMarkView::from(&widget);
    assert_eq!(view.mark_classes(), vec!["answer-mark", "answer-mark--marked"]);
    assert_eq!(view.block_classes(), vec!["uk-comment", "uk-comment-primary"]);
    assert!((view.block_opacity - 1.0).abs() < f32::EPSILON);
}

#[test]
fn page_view_tracks_events() {
    let first = AnswerMarkWidget::new(WidgetId(2), "/answer/mark/2").with_accepted(true);
    let second = AnswerMarkWidget::new(WidgetId(3), "/answer/mark/3");
    let mut page = PageView::new();
    page.seed(Vec::<&VoteWidget>::new(), [&first, &second]);
    assert!(page.answer_mark(WidgetId(2)).unwrap().block_primary);

    page.apply(&WidgetEvent::AnswerMark(first.clone().with_accepted(false)));
    page.apply(&WidgetEvent::AnswerMark(second.clone().with_accepted(true)));

    let primary: Vec<_> = [WidgetId(2), WidgetId(3)]
        .into_iter()
        .filter(|id| page.answer_mark(*id).unwrap().block_primary)
        .collect();
    assert_eq!(primary, vec![WidgetId(3)]);
}

#[test]
fn render_lines_lists_votes_then_marks() {
    let vote = VoteWidget::new(WidgetId(1), 12, "/vote/question").with_rating(7);
    let mark = AnswerMarkWidget::new(WidgetId(2), "/answer/mark/2");
    let mut page = PageView::new();
    page.seed([&vote], [&mark]);

    assert_eq!(
        page.render_lines(),
        vec![
            "w1 vote 7 [votes__vote]".to_string(),
            "w2 answer-mark [answer-mark] block [uk-comment] opacity 1".to_string(),
        ]
    );
}
