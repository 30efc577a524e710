//! Property-based tests for sessions and their building blocks.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated inputs.

use atm_session::account::Amount;
use atm_session::core::{Guard, NavigationRequest, Screen};
use atm_session::session::PinBuffer;
use atm_session::{Session, SessionError};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::time::Duration;

#[derive(Clone, Debug)]
enum Op {
    Deposit(Decimal),
    Withdraw(Decimal),
    Navigate(Screen),
    Advance(u64),
}

prop_compose! {
    fn arbitrary_screen()(index in 0..Screen::ALL.len()) -> Screen {
        Screen::ALL[index]
    }
}

prop_compose! {
    /// Decimals with up to five fractional digits, including zero and negatives.
    fn arbitrary_amount()(value in -5_000i64..200_000_000, scale in 0u32..=5) -> Decimal {
        Decimal::new(value, scale)
    }
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arbitrary_amount().prop_map(Op::Deposit),
        arbitrary_amount().prop_map(Op::Withdraw),
        arbitrary_screen().prop_map(Op::Navigate),
        (0u64..5_000).prop_map(Op::Advance),
    ]
}

fn logged_in() -> Session {
    let mut session = Session::builder().build().unwrap();
    session.navigate_to(Screen::PinEntry).unwrap();
    for digit in "1234".chars() {
        session.append_digit(digit);
    }
    session.validate_login().unwrap();
    session
}

proptest! {
    #[test]
    fn balance_matches_successful_operations(ops in prop::collection::vec(arbitrary_op(), 0..40)) {
        let mut session = logged_in();
        let mut expected = session.balance();
        let mut successes = 0usize;

        for op in ops {
            match op {
                Op::Deposit(a) => {
                    let result = session.deposit(&a.to_string());
                    if a <= Decimal::ZERO {
                        prop_assert_eq!(result, Err(SessionError::InvalidAmount));
                    } else {
                        prop_assert_eq!(result, Ok(()));
                        expected += a;
                        successes += 1;
                    }
                }
                Op::Withdraw(a) => {
                    let result = session.withdraw(&a.to_string());
                    if a <= Decimal::ZERO {
                        prop_assert_eq!(result, Err(SessionError::InvalidAmount));
                    } else if a > expected {
                        prop_assert_eq!(result, Err(SessionError::InsufficientFunds));
                    } else {
                        prop_assert_eq!(result, Ok(()));
                        expected -= a;
                        successes += 1;
                    }
                }
                Op::Navigate(screen) => {
                    let _ = session.navigate_to(screen);
                }
                Op::Advance(ms) => session.advance(Duration::from_millis(ms)),
            }

            prop_assert!(session.balance() >= Decimal::ZERO);
            prop_assert_eq!(session.balance(), expected);
        }

        prop_assert_eq!(session.transactions().len(), successes + 1);
    }

    #[test]
    fn rejected_operations_leave_balance_alone(value in -1_000_000i64..=0, scale in 0u32..=5) {
        let mut session = logged_in();
        let before = session.balance();
        let input = Decimal::new(value, scale).to_string();

        prop_assert_eq!(session.deposit(&input), Err(SessionError::InvalidAmount));
        prop_assert_eq!(session.withdraw(&input), Err(SessionError::InvalidAmount));
        prop_assert_eq!(session.balance(), before);
    }

    #[test]
    fn overdraft_is_always_refused(extra in 1i64..1_000_000, scale in 2u32..=6) {
        let mut session = logged_in();
        let over = session.balance() + Decimal::new(extra, scale);

        prop_assert_eq!(
            session.withdraw(&over.to_string()),
            Err(SessionError::InsufficientFunds)
        );
    }

    #[test]
    fn unauthenticated_session_never_reaches_protected_screens(
        targets in prop::collection::vec(arbitrary_screen(), 0..20)
    ) {
        let mut session = Session::builder().build().unwrap();

        for target in targets {
            let result = session.navigate_to(target);
            prop_assert_eq!(result.is_ok(), !target.requires_auth());
            prop_assert!(!session.screen().requires_auth());
        }
    }

    #[test]
    fn pin_buffer_never_exceeds_four_digits(input in ".{0,16}") {
        let mut buffer = PinBuffer::new();
        for c in input.chars() {
            buffer.push(c);
        }

        prop_assert!(buffer.len() <= 4);
        prop_assert!(buffer.as_str().chars().all(|c| c.is_ascii_digit()));
        prop_assert_eq!(buffer.masked().len(), buffer.len());
    }

    #[test]
    fn login_succeeds_only_with_the_pin(attempt in "[0-9]{0,6}") {
        let mut session = Session::builder().build().unwrap();
        for digit in attempt.chars() {
            session.append_digit(digit);
        }

        let accepted = session.validate_login().is_ok();
        prop_assert_eq!(accepted, attempt.starts_with("1234"));
        prop_assert_eq!(session.pin_input_len(), 0);
    }

    #[test]
    fn positive_amounts_parse_exactly(value in 1i64..10_000_000, scale in 0u32..=5) {
        let exact = Decimal::new(value, scale);
        let amount = Amount::parse(&exact.to_string()).unwrap();

        prop_assert_eq!(amount.value(), exact);
        let text = amount.to_string();
        let decimals = text.split('.').nth(1).map(str::len);
        prop_assert_eq!(decimals, Some(2));
    }


    #[test]
    fn statement_never_exceeds_configured_length(deposits in 0usize..12) {
        let mut session = logged_in();
        for _ in 0..deposits {
            session.deposit("1").unwrap();
        }
        session.request_statement().unwrap();

        let rows = session.view().statement;
        prop_assert_eq!(rows.len(), (deposits + 1).min(5));
    }

    #[test]
    fn pending_transitions_drain_after_longest_delay(ops in prop::collection::vec(arbitrary_op(), 0..30)) {
        let mut session = logged_in();

        for op in ops {
            match op {
                Op::Deposit(a) => { let _ = session.deposit(&a.to_string()); }
                Op::Withdraw(a) => { let _ = session.withdraw(&a.to_string()); }
                Op::Navigate(screen) => { let _ = session.navigate_to(screen); }
                Op::Advance(ms) => session.advance(Duration::from_millis(ms)),
            }
        }
        session.advance(Duration::from_millis(3000));

        prop_assert!(session.pending_transition().is_none());
        prop_assert_ne!(session.screen(), Screen::Exit);
    }

    #[test]
    fn guard_is_deterministic(from in arbitrary_screen(), to in arbitrary_screen(), authenticated in any::<bool>()) {
        let guard = Guard::authenticated();
        let request = NavigationRequest { from, to, authenticated };

        prop_assert_eq!(guard.check(&request), guard.check(&request));
        prop_assert_eq!(guard.check(&request), authenticated || !to.requires_auth());
    }
}

fn pin_like() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9]{4}", "[0-9a-z]{0,6}", Just("1234".to_string())]
}

proptest! {
    #[test]
    fn pin_change_reports_first_failed_check(
        old in pin_like(),
        new in pin_like(),
        confirm in pin_like(),
    ) {
        let mut session = logged_in();
        let result = session.change_pin(&old, &new, &confirm);

        let new_is_valid = new.len() == 4 && new.chars().all(|c| c.is_ascii_digit());
        let expected = if old != "1234" {
            Err(SessionError::WrongOldPin)
        } else if !new_is_valid {
            Err(SessionError::InvalidNewPin)
        } else if new != confirm {
            Err(SessionError::PinMismatch)
        } else {
            Ok(())
        };
        prop_assert_eq!(result.clone(), expected);

        session.logout();
        for digit in "1234".chars() {
            session.append_digit(digit);
        }
        let old_pin_still_works = session.validate_login().is_ok();
        prop_assert_eq!(old_pin_still_works, result.is_err() || new == "1234");
    }

    #[test]
    fn recent_transactions_are_newest_first(count in prop_oneof![Just(0usize), Just(1), 2usize..40, Just(1000)]) {
        let mut session = Session::builder()
            .opening_balance(Decimal::ZERO)
            .build()
            .unwrap();
        for i in 1..=count {
            session.deposit(&i.to_string()).unwrap();
        }

        let recent: Vec<_> = session.recent_transactions(5).map(|t| t.amount()).collect();
        let expected: Vec<_> = (1..=count)
            .rev()
            .take(5)
            .map(|i| Decimal::from(i as u64))
            .collect();

        prop_assert_eq!(recent, expected);
    }
}
