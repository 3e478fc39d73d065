/// Returns a full counseling exchange as (message, is_user) pairs, oldest
/// first. Eight turns, two more than the history window carries.
pub fn conversation_fixture() -> Vec<(&'static str, bool)> {
    return vec![
        ("最近、仕事のことで眠れない日が続いています", true),
        (
            "眠れない日が続くのはとてもおつらいですね。お仕事で何があったのか、よければ聞かせてください",
            false,
        ),
        ("頑張って準備していた企画が、説明もなく中止になりました", true),
        (
            "事前の説明がないまま方針が変わると、努力を軽視されたように感じますよね",
            false,
        ),
        ("はい。自分だけが知らされていなかったようで、疎外感があります", true),
        (
            "一人だけ蚊帳の外に置かれたと感じるのは自然な反応です。決してあなたの価値が下がったわけではありません",
            false,
        ),
        ("これからどう気持ちを立て直せばいいのかわかりません", true),
        (
            "まずは十分に休むことを優先しましょう。そのうえで、信頼できる人に状況を整理して話してみるのはいかがでしょうか",
            false,
        ),
    ];
}
