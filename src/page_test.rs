use super::*;
use crate::widget::Phase;

#[test]
fn parses_page_description() {
    let json = r#"{
        "votes": [
            { "id": 1, "target_id": 12, "endpoint_url": "/vote/question", "rating": 5 },
            { "id": 2, "target_id": 40, "endpoint_url": "/vote/answer" }
        ],
        "answer_marks": [
            { "id": 3, "endpoint_url": "/answer/mark/40", "accepted": true }
        ]
    }"#;

    let page = PageManifest::from_json(json).unwrap();
    assert_eq!(page.votes.len(), 2);
    assert_eq!(page.votes[0].rating, Some(5));
    assert_eq!(page.votes[1].rating, None);
    assert_eq!(page.votes[1].phase, Phase::Idle);
    assert_eq!(page.answer_marks[0].id, WidgetId(3));
    assert!(page.answer_marks[0].accepted);
    assert_eq!(page.next_id(), Some(WidgetId(4)));
}

#[test]
fn empty_document_is_empty_page() {
    let page = PageManifest::from_json("{}").unwrap();
    assert_eq!(page, PageManifest::default());
    assert_eq!(page.next_id(), Some(WidgetId(1)));
}

#[test]
fn missing_endpoint_is_rejected() {
    assert!(PageManifest::from_json(r#"{ "votes": [{ "id": 1, "target_id": 2 }] }"#).is_err());
}

#[test]
fn next_id_is_none_when_max_id_is_taken() {
    let page = PageManifest::from_json(r#"{ "answer_marks": [{ "id": 18446744073709551615, "endpoint_url": "/a" }] }"#)
        .unwrap();
    assert_eq!(page.answer_marks[0].id, WidgetId(u64::MAX));
    assert_eq!(page.next_id(), None);
}

#[test]
fn next_id_skips_past_highest_of_either_kind() {
    let page = PageManifest {
        votes: vec![VoteWidget::new(WidgetId(2), 1, "/vote/question")],
        answer_marks: vec![AnswerMarkWidget::new(WidgetId(9), "/answer/mark/1")],
    };
    assert_eq!(page.next_id(), Some(WidgetId(10)));
}
