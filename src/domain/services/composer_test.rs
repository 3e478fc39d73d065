use test_utils::conversation_fixture;

use super::PromptComposer;
use crate::domain::models::ChatTurn;

fn fixture_turns() -> Vec<ChatTurn> {
    return conversation_fixture()
        .into_iter()
        .map(|(message, is_user)| {
            if is_user {
                return ChatTurn::user(message);
            }
            return ChatTurn::counselor(message);
        })
        .collect();
}

#[test]
fn it_keeps_only_the_last_six_turns_in_order() {
    let turns = fixture_turns();
    assert_eq!(turns.len(), 8);

    let prompt = PromptComposer::compose(&turns, "疲れました");

    assert!(!prompt.contains(&turns[0].message));
    assert!(!prompt.contains(&turns[1].message));
    for turn in &turns[2..] {
        assert!(prompt.contains(&turn.message));
    }

    let third = prompt.find(&turns[2].message).unwrap();
    let fifth = prompt.find(&turns[4].message).unwrap();
    let last = prompt.find(&turns[7].message).unwrap();
    assert!(third < fifth);
    assert!(fifth < last);
}

#[test]
fn it_labels_turns_by_author() {
    let turns = fixture_turns();
    let prompt = PromptComposer::compose(&turns, "疲れました");

    assert!(prompt.contains(&format!("ユーザー: {}", turns[2].message)));
    assert!(prompt.contains(&format!("カウンセラー: {}", turns[3].message)));
}

#[test]
fn it_frames_the_message_with_the_persona() {
    let prompt = PromptComposer::compose(&[], "疲れました");

    assert!(prompt
        .trim_start()
        .starts_with("あなたは職場の匿名カウンセリング室のAIカウンセラーです。"));
    assert!(prompt.contains("【現在のユーザーメッセージ】\nユーザー: 疲れました"));
    assert!(prompt.ends_with("上記の文脈を踏まえて、カウンセラーとして共感的で建設的な回答をしてください。"));
}

#[test]
fn it_renders_an_empty_history_section() {
    let prompt = PromptComposer::compose(&[], "疲れました");

    assert!(prompt.contains("【これまでの会話】\n\n\n【現在のユーザーメッセージ】"));
}
