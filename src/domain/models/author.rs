#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Author {
    User,
    Counselor,
}

impl ToString for Author {
    fn to_string(&self) -> String {
        match self {
            Author::User => return String::from("ユーザー"),
            Author::Counselor => return String::from("カウンセラー"),
        }
    }
}
