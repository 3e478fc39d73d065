use std::time::Duration;

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::Confirm;
use dialoguer::Input;
use dialoguer::Password;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use owo_colors::OwoColorize;

use crate::domain::models::ChatTurn;
use crate::domain::models::ConfirmPrompt;
use crate::domain::models::SlashCommand;
use crate::domain::services::ConversationController;
use crate::domain::services::LoginOutcome;
use crate::infrastructure::client::HttpCounselorClient;

struct DialoguerConfirm {}

impl ConfirmPrompt for DialoguerConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        let res = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt.replace('\n', " "))
            .default(false)
            .interact();

        return res.unwrap_or(false);
    }
}

pub fn help_text() -> String {
    let text = r#"
COMMANDS:
- /new (/n) - 新しいセッションを開始します。現在の会話は削除されます。
- /end (/e) - セッションを終了してログイン画面に戻ります。
- /help (/h) - コマンドの一覧を表示します。
- /quit (/q) - アプリを終了します。
    "#;

    return text.trim().to_string();
}

fn render_turn(turn: &ChatTurn) {
    let label = format!("{}:", turn.author().to_string());
    if turn.is_user {
        println!("{} {}", label.blue().bold(), turn.message);
    } else {
        println!("{} {}", label.green().bold(), turn.message);
    }
    println!("{}", turn.timestamp.dimmed());
    println!();
}

fn typing_indicator() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("カウンセラーが入力中...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    return spinner;
}

fn print_banner() {
    println!("{}", "匿名カウンセリング室".bold());
    println!("{}", "完全プライベートな相談空間".dimmed());
    println!();
    println!("※ 緊急時は専門機関にご相談ください");
    println!("こころの健康相談統一ダイヤル: 0570-064-556");
    println!();
}

fn print_session(controller: &ConversationController) {
    if let Some(session_id) = controller.session_id() {
        println!("{}", format!("セッション: {session_id}").dimmed());
        println!();
    }
}

pub async fn start() -> Result<()> {
    print_banner();

    let mut controller = ConversationController::new(
        Box::<HttpCounselorClient>::default(),
        Box::new(DialoguerConfirm {}),
    );

    loop {
        loop {
            let password = Password::with_theme(&ColorfulTheme::default())
                .with_prompt("アクセスコード")
                .interact()?;

            match controller.login(&password).await {
                LoginOutcome::Granted => break,
                LoginOutcome::Denied(message) => {
                    println!("{}", message.red());
                }
            }
        }

        print_session(&controller);
        if let Some(turn) = controller.transcript().last() {
            render_turn(turn);
        }

        loop {
            let line = Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(">")
                .allow_empty(true)
                .interact_text()?;

            if let Some(command) = SlashCommand::parse(&line) {
                if command.is_help() {
                    println!("{}", help_text());
                    continue;
                }
                if command.is_new_session() {
                    if controller.start_new_session() {
                        print_session(&controller);
                        if let Some(turn) = controller.transcript().last() {
                            render_turn(turn);
                        }
                    }
                    continue;
                }
                if command.is_end_session() {
                    if controller.end_session() {
                        println!("セッションを終了しました。会話内容は削除されました。");
                        println!();
                        break;
                    }
                    continue;
                }
                if command.is_quit() {
                    return Ok(());
                }
            }

            if line.trim().is_empty() {
                continue;
            }

            let spinner = typing_indicator();
            let sent = controller.send_message(&line).await;
            spinner.finish_and_clear();

            if !sent {
                continue;
            }
            if let Some(turn) = controller.transcript().last() {
                render_turn(turn);
            }
        }
    }
}
