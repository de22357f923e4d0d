// UI layer: the interactive prompt loop. Reads one line at a time with
// `dialoguer`, handles the sentinel commands, and hands everything else to
// the classification client. The loop only ends on an explicit exit command,
// Ctrl-C or end of input; every request failure is printed and skipped.

use crate::client::{ClassificationResult, ClassifierClient, ClassifyError};
use crate::format;
use anyhow::Result;
use crossterm::{cursor, execute, terminal};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, ErrorKind};
use std::time::Duration;

const EXIT_COMMANDS: &[&str] = &["exit", "quit", "q"];
const CLEAR_COMMANDS: &[&str] = &["clear", "cls"];

/// What one line of input asks the loop to do.
#[derive(Debug, PartialEq)]
enum Action {
    Nothing,
    Exit,
    Clear,
    Classify(String),
}

/// Trim the line and match it against the sentinel commands
/// (case-insensitive). Whitespace-only input counts as empty.
fn parse_input(line: &str) -> Action {
    let text = line.trim();
    if text.is_empty() {
        return Action::Nothing;
    }
    let lowered = text.to_lowercase();
    if EXIT_COMMANDS.contains(&lowered.as_str()) {
        Action::Exit
    } else if CLEAR_COMMANDS.contains(&lowered.as_str()) {
        Action::Clear
    } else {
        Action::Classify(text.to_string())
    }
}

/// Main interactive loop. Receives a `ClassifierClient` instance and runs
/// until the user exits. Always returns `Ok(())` on the controlled
/// termination paths, so the process exit code stays 0.
pub fn run(client: ClassifierClient) -> Result<()> {
    println!("{}", format::banner(client.base_url()));

    loop {
        // `Input::interact_text()` prompts the user and returns the line.
        // Ctrl-C surfaces as an interrupted read; end of input (or a closed
        // terminal) is any other read error. Both end the session cleanly.
        let line: String = match Input::new()
            .with_prompt("\n📝 Введіть текст звернення")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(e) if e.kind() == ErrorKind::Interrupted => {
                println!("\n👋 Перервано користувачем. До побачення!");
                return Ok(());
            }
            Err(_) => {
                println!("\n👋 До побачення!");
                return Ok(());
            }
        };

        match parse_input(&line) {
            Action::Nothing => {
                println!("⚠️  Будь ласка, введіть текст для класифікації.");
            }
            Action::Exit => {
                println!("\n👋 До побачення!");
                return Ok(());
            }
            Action::Clear => clear_screen()?,
            Action::Classify(text) => match classify_with_spinner(&client, &text) {
                Ok(result) => println!("\n{}", format::format_result(&result)),
                Err(e) => {
                    report_failure(&e);
                    println!("\n❌ Не вдалося отримати результат класифікації.");
                }
            },
        }
    }
}

/// Call the client with a spinner showing while the request is in flight.
fn classify_with_spinner(
    client: &ClassifierClient,
    text: &str,
) -> Result<ClassificationResult, ClassifyError> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    spinner.set_message("⏳ Обробка...");
    spinner.enable_steady_tick(Duration::from_millis(80));

    let outcome = client.classify(text);
    spinner.finish_and_clear();
    outcome
}

/// One diagnostic per error kind, so an unreachable service reads
/// differently from a timeout or a broken response body.
fn report_failure(err: &ClassifyError) {
    match err {
        ClassifyError::Status { status, detail } => {
            println!("❌ Помилка: HTTP {}", status);
            println!("   Деталі: {}", detail);
        }
        ClassifyError::Unreachable { url } => {
            println!("❌ Помилка: Не вдалося підключитися до {}", url);
            println!("   Переконайтеся, що класифікаційний сервіс запущено.");
        }
        ClassifyError::Timeout => {
            println!("❌ Помилка: Час очікування вичерпано");
        }
        ClassifyError::BadPayload(e) => {
            println!("❌ Несподівана помилка: {}", e);
        }
        ClassifyError::Unexpected(e) => {
            println!("❌ Несподівана помилка: {}", e);
        }
    }
}

/// Clear the terminal and move the cursor home, for `clear`/`cls`.
fn clear_screen() -> Result<()> {
    let mut stdout = io::stdout();
    execute!(
        stdout,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )?;
    Ok(())
}
