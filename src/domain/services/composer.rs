#[cfg(test)]
#[path = "composer_test.rs"]
mod tests;

use crate::domain::models::ChatTurn;

/// Persona document prepended to every outbound prompt. Gemini holds no state
/// between calls, so the whole framing travels with each request.
const PERSONA_CONTEXT: &str = r#"
あなたは職場の匿名カウンセリング室のAIカウンセラーです。

【この会社の特徴】
- 新規事業部門での不透明な意思決定が頻発
- 事前説明や相談なしに方針変更される環境
- 上司は責任回避傾向が強く、感情的な配慮に欠ける
- 部下の努力や貢献が軽視されがち
- 透明性の欠如により、メンバーが不安や失望を感じやすい

【よくある悩み】
- 頑張ったのに突然方針変更される
- 事前説明がなく、疎外感を感じる
- 上司とのコミュニケーション不足
- 努力が正当に評価されない
- 職場での孤独感や無力感

【あなたの役割】
- 相談者の気持ちに深く共感する
- 状況を客観視する手助けをする
- 現実的で建設的なアドバイスを提供
- 「逃げ道」を含む選択肢を示す
- 決して一人じゃないことを伝える

相談者の感情を最優先に、寄り添う姿勢で対話してください。
"#;

/// Only the most recent turns ride along, older ones fall out of the window.
const HISTORY_WINDOW: usize = 6;

pub struct PromptComposer {}

impl PromptComposer {
    pub fn compose(history: &[ChatTurn], message: &str) -> String {
        let start = history.len().saturating_sub(HISTORY_WINDOW);
        let history_text = history[start..]
            .iter()
            .map(|turn| return format!("{}: {}", turn.author().to_string(), turn.message))
            .collect::<Vec<String>>()
            .join("\n\n");

        return format!(
            "{PERSONA_CONTEXT}\n\n【これまでの会話】\n{history_text}\n\n【現在のユーザーメッセージ】\nユーザー: {message}\n\n上記の文脈を踏まえて、カウンセラーとして共感的で建設的な回答をしてください。"
        );
    }
}
