//! ATM Walkthrough
//!
//! A scripted customer visit driven by a tokio event loop.
//!
//! Key concepts:
//! - The session never sleeps; the loop advances it by the real time elapsed
//! - Delayed transitions (success messages, exit) fire from `advance`
//! - An observer renders every view change
//!
//! Run with: RUST_LOG=atm_session=debug cargo run --example atm_walkthrough

use atm_session::session::FormField;
use atm_session::{Screen, Session, SessionError, View};
use std::time::Duration;
use tokio::time::{interval, Instant};
use tracing::info;

enum Step {
    Goto(Screen),
    Keypad(&'static str),
    Login,
    Fill(FormField, &'static str),
    Withdraw,
    Deposit,
    ChangePin,
    Wait(Duration),
}

fn render(view: &View) {
    let message = [
        &view.messages.login,
        &view.messages.withdraw,
        &view.messages.deposit,
        &view.messages.pin_change,
    ]
    .into_iter()
    .flatten()
    .next();

    print!("[{}] {:<11}", view.time, view.screen.name());
    if !view.pin_mask.is_empty() {
        print!(" pin {}", view.pin_mask);
    }
    if let Some(balance) = &view.balance {
        print!(" balance ${balance}");
    }
    if let Some(message) = message {
        print!(" \"{}\"", message.text);
    }
    println!();
    for row in &view.statement {
        println!("             {:<10} {:<8} {}", row.date, row.kind, row.amount);
    }
}

fn apply(session: &mut Session, step: &Step) -> Result<(), SessionError> {
    match step {
        Step::Goto(screen) => session.navigate_to(*screen),
        Step::Keypad(digits) => {
            digits.chars().for_each(|d| {
                session.append_digit(d);
            });
            Ok(())
        }
        Step::Login => session.validate_login(),
        Step::Fill(field, value) => {
            session.set_field(*field, *value);
            Ok(())
        }
        Step::Withdraw => session.submit_withdraw(),
        Step::Deposit => session.submit_deposit(),
        Step::ChangePin => session.submit_pin_change(),
        Step::Wait(_) => Ok(()),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("atm_session=info".parse()?),
        )
        .init();

    let script = vec![
        Step::Goto(Screen::Balance),
        Step::Goto(Screen::PinEntry),
        Step::Keypad("9999"),
        Step::Login,
        Step::Keypad("1234"),
        Step::Login,
        Step::Goto(Screen::Withdraw),
        Step::Fill(FormField::WithdrawAmount, "6000"),
        Step::Withdraw,
        Step::Fill(FormField::WithdrawAmount, "200"),
        Step::Withdraw,
        Step::Wait(Duration::from_millis(1600)),
        Step::Goto(Screen::Deposit),
        Step::Fill(FormField::DepositAmount, "1500"),
        Step::Deposit,
        Step::Wait(Duration::from_millis(1600)),
        Step::Goto(Screen::PinChange),
        Step::Fill(FormField::OldPin, "1234"),
        Step::Fill(FormField::NewPin, "2468"),
        Step::Fill(FormField::ConfirmPin, "2468"),
        Step::ChangePin,
        Step::Wait(Duration::from_millis(1600)),
        Step::Goto(Screen::Balance),
        Step::Goto(Screen::Statement),
        Step::Goto(Screen::Exit),
        Step::Wait(Duration::from_millis(3200)),
    ];

    let mut session = Session::builder().observer(render).build()?;
    info!(session = %session.id(), "walkthrough started");

    let mut ticker = interval(Duration::from_millis(100));
    let mut last = Instant::now();
    let mut steps = script.iter();
    let mut waiting_until = Instant::now();

    loop {
        ticker.tick().await;
        let now = Instant::now();
        session.advance(now - last);
        last = now;

        if now < waiting_until {
            continue;
        }
        let Some(step) = steps.next() else { break };

        if let Step::Wait(duration) = step {
            waiting_until = now + *duration;
            continue;
        }
        if let Err(error) = apply(&mut session, step) {
            println!("             ! {error}");
        }
    }

    info!(
        session = %session.id(),
        balance = %session.balance_display(),
        transactions = session.transactions().len(),
        "walkthrough finished"
    );
    Ok(())
}
