//! The session controller: one customer at one ATM.

use crate::account::{
    format_currency, Account, Amount, Pin, Transaction, TransactionKind, TransactionLog,
};
use crate::builder::SessionBuilder;
use crate::config::SessionConfig;
use crate::core::{
    Guard, NavigationCause, NavigationHistory, NavigationRecord, NavigationRequest, Screen,
};
use crate::effects::{Clock, Fired, Scheduler, TimerAction, TimerHandle};
use crate::enforcement::{check_amount, check_pin_change, check_withdrawal, first_violation, PinChange};
use crate::error::{ConfigError, SessionError};
use crate::session::input::{FormField, FormFields, PinBuffer};
use crate::session::view::{
    MessageSlot, Messages, StatementRow, StatusMessage, View, ViewObserver,
};
use rust_decimal::Decimal;
use std::fmt;
use std::time::Duration;
use stillwater::{NonEmptyVec, Validation};
use tracing::{debug, info, warn};
use uuid::Uuid;

const WITHDRAW_OK: &str = "Withdrawal Successful!";
const DEPOSIT_OK: &str = "Deposit Successful!";
const PIN_CHANGE_OK: &str = "PIN Changed Successfully!";

/// An ATM session: account state, the active screen and everything the
/// screens display.
///
/// Operations report failures both as a returned [`SessionError`] and as an
/// error message in the slot of the screen they belong to; a failed
/// operation leaves the account untouched. Delayed transitions are driven by
/// [`Session::advance`].
///
/// Guards only cover navigation. `withdraw`, `deposit` and `change_pin` act
/// on the account whatever screen is active and whether or not the PIN has
/// been accepted; a front end keeps them behind the guarded screens.
///
/// # Example
///
/// ```rust
/// use atm_session::core::Screen;
/// use atm_session::Session;
/// use std::time::Duration;
///
/// let mut session = Session::builder().build()?;
/// session.navigate_to(Screen::PinEntry)?;
/// for digit in "1234".chars() {
///     session.append_digit(digit);
/// }
/// session.validate_login()?;
/// assert_eq!(session.screen(), Screen::Dashboard);
///
/// session.navigate_to(Screen::Deposit)?;
/// session.deposit("1500")?;
/// assert_eq!(session.balance_display(), "6500.00");
///
/// session.advance(Duration::from_millis(1500));
/// assert_eq!(session.screen(), Screen::Dashboard);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Session {
    id: Uuid,
    config: SessionConfig,
    account: Account,
    ledger: TransactionLog,
    screen: Screen,
    authenticated: bool,
    pin_buffer: PinBuffer,
    forms: FormFields,
    messages: Messages,
    balance_snapshot: Option<String>,
    statement: Vec<StatementRow>,
    time_display: String,
    history: NavigationHistory,
    guards: Vec<Guard>,
    scheduler: Scheduler,
    pending_transition: Option<TimerHandle>,
    clock: Box<dyn Clock>,
    observers: Vec<Box<dyn ViewObserver>>,
}

impl Session {
    pub fn builder() -> SessionBuilder {
        SessionBuilder::new()
    }

    /// Build a session from configuration with the system clock.
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        SessionBuilder::new().config(config).build()
    }

    pub(crate) fn from_parts(
        config: SessionConfig,
        clock: Box<dyn Clock>,
        guards: Vec<Guard>,
        observers: Vec<Box<dyn ViewObserver>>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let pin = Pin::parse(&config.pin).map_err(|_| ConfigError::InvalidPin)?;
        let account = Account::new(config.opening_balance, pin);

        let mut ledger = TransactionLog::new();
        if config.seed_opening_deposit {
            if let Some(amount) = Amount::new(config.opening_balance) {
                ledger.record(Transaction::new(
                    TransactionKind::Deposit,
                    amount,
                    clock.today(),
                ));
            }
        }

        let mut scheduler = Scheduler::new();
        scheduler.schedule_every(config.clock_refresh(), TimerAction::RefreshClock);
        let time_display = clock.now().format(&config.time_format).to_string();

        let mut all_guards = vec![Guard::authenticated()];
        all_guards.extend(guards);

        let mut session = Self {
            id: Uuid::new_v4(),
            config,
            account,
            ledger,
            screen: Screen::Welcome,
            authenticated: false,
            pin_buffer: PinBuffer::new(),
            forms: FormFields::default(),
            messages: Messages::default(),
            balance_snapshot: None,
            statement: Vec::new(),
            time_display,
            history: NavigationHistory::new(),
            guards: all_guards,
            scheduler,
            pending_transition: None,
            clock,
            observers,
        };

        info!(
            session = %session.id,
            balance = %format_currency(session.account.balance()),
            "session started"
        );
        session.notify();
        Ok(session)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn balance(&self) -> Decimal {
        self.account.balance()
    }

    /// Current balance with two decimal places.
    pub fn balance_display(&self) -> String {
        format_currency(self.account.balance())
    }

    pub fn transactions(&self) -> &TransactionLog {
        &self.ledger
    }

    /// The `n` most recent transactions, newest first.
    pub fn recent_transactions(&self, n: usize) -> impl Iterator<Item = &Transaction> + '_ {
        self.ledger.recent(n)
    }

    /// The transactions the statement screen shows.
    pub fn recent_transactions_default(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.ledger.recent(self.config.statement_length)
    }

    pub fn pin_mask(&self) -> String {
        self.pin_buffer.masked()
    }

    pub fn pin_input_len(&self) -> usize {
        self.pin_buffer.len()
    }

    pub fn message(&self, slot: MessageSlot) -> Option<&StatusMessage> {
        self.messages.get(slot)
    }

    pub fn forms(&self) -> &FormFields {
        &self.forms
    }

    pub fn time_display(&self) -> &str {
        &self.time_display
    }

    pub fn history(&self) -> &NavigationHistory {
        &self.history
    }

    /// Logical time elapsed since the session started.
    pub fn elapsed(&self) -> Duration {
        self.scheduler.now()
    }

    /// The delayed transition waiting to fire, if any.
    pub fn pending_transition(&self) -> Option<TimerHandle> {
        self.pending_transition
    }

    /// When the next timer of any kind is due, on the session's logical clock.
    pub fn next_timer_due(&self) -> Option<Duration> {
        self.scheduler.next_due()
    }

    /// Snapshot of everything the screens display.
    pub fn view(&self) -> View {
        View {
            screen: self.screen,
            pin_mask: self.pin_buffer.masked(),
            balance: self.balance_snapshot.clone(),
            statement: self.statement.clone(),
            messages: self.messages.clone(),
            time: self.time_display.clone(),
            forms: self.forms.clone(),
        }
    }

    /// Register an observer. It immediately receives the current view.
    pub fn subscribe(&mut self, mut observer: impl ViewObserver + 'static) {
        observer.on_view(&self.view());
        self.observers.push(Box::new(observer));
    }

    /// Keypad press. Returns whether the digit was accepted.
    pub fn append_digit(&mut self, digit: char) -> bool {
        let accepted = self.pin_buffer.push(digit);
        if accepted {
            debug!(session = %self.id, entered = self.pin_buffer.len(), "pin digit entered");
            self.notify();
        }
        accepted
    }

    pub fn clear_input(&mut self) {
        self.pin_buffer.clear();
        self.notify();
    }

    /// Compare the keypad buffer to the PIN. The buffer is cleared either way.
    pub fn validate_login(&mut self) -> Result<(), SessionError> {
        let matched = self.account.pin_matches(self.pin_buffer.as_str());
        self.pin_buffer.clear();

        if matched {
            self.authenticated = true;
            info!(session = %self.id, "login accepted");
            self.transition(Screen::Dashboard, NavigationCause::Login);
            Ok(())
        } else {
            self.reject(MessageSlot::Login, SessionError::IncorrectPin)
        }
    }

    /// Explicit navigation, checked against every guard.
    pub fn navigate_to(&mut self, to: Screen) -> Result<(), SessionError> {
        let request = NavigationRequest {
            from: self.screen,
            to,
            authenticated: self.authenticated,
        };

        if let Some(guard) = self.guards.iter().find(|g| !g.check(&request)) {
            warn!(
                session = %self.id,
                from = %self.screen,
                to = %to,
                guard = guard.name(),
                "navigation blocked"
            );
            return Err(SessionError::NavigationBlocked {
                to: to.name().to_string(),
                guard: guard.name().to_string(),
            });
        }

        self.transition(to, NavigationCause::Manual);
        Ok(())
    }

    pub fn check_balance(&mut self) -> Result<(), SessionError> {
        self.navigate_to(Screen::Balance)
    }

    pub fn request_statement(&mut self) -> Result<(), SessionError> {
        self.navigate_to(Screen::Statement)
    }

    /// End the session and return to the welcome screen.
    pub fn logout(&mut self) {
        self.end_session(NavigationCause::Manual);
    }

    pub fn withdraw(&mut self, input: &str) -> Result<(), SessionError> {
        let amount = match check_withdrawal(input, self.account.balance()) {
            Validation::Success(amount) => amount,
            Validation::Failure(violations) => {
                return self.reject_all(MessageSlot::Withdraw, &violations)
            }
        };

        if let Err(error) = self.account.withdraw(amount) {
            return self.reject(MessageSlot::Withdraw, error);
        }
        self.ledger.record(Transaction::new(
            TransactionKind::Withdraw,
            amount,
            self.clock.today(),
        ));

        info!(
            session = %self.id,
            amount = %amount,
            balance = %self.balance_display(),
            "withdrawal completed"
        );
        self.complete(MessageSlot::Withdraw, WITHDRAW_OK);
        Ok(())
    }

    pub fn deposit(&mut self, input: &str) -> Result<(), SessionError> {
        let amount = match check_amount(input) {
            Validation::Success(amount) => amount,
            Validation::Failure(violations) => {
                return self.reject_all(MessageSlot::Deposit, &violations)
            }
        };

        if let Err(error) = self.account.deposit(amount) {
            return self.reject(MessageSlot::Deposit, error);
        }
        self.ledger.record(Transaction::new(
            TransactionKind::Deposit,
            amount,
            self.clock.today(),
        ));

        info!(
            session = %self.id,
            amount = %amount,
            balance = %self.balance_display(),
            "deposit completed"
        );
        self.complete(MessageSlot::Deposit, DEPOSIT_OK);
        Ok(())
    }

    /// Replace the PIN. On failure the reported error is the first violated
    /// check: old PIN, then new PIN format, then confirmation.
    pub fn change_pin(&mut self, old: &str, new: &str, confirm: &str) -> Result<(), SessionError> {
        let request = PinChange { old, new, confirm };
        match check_pin_change(self.account.pin(), &request) {
            Validation::Success(pin) => {
                self.account.set_pin(pin);
                info!(session = %self.id, "pin changed");
                self.complete(MessageSlot::PinChange, PIN_CHANGE_OK);
                Ok(())
            }
            Validation::Failure(violations) => self.reject_all(MessageSlot::PinChange, &violations),
        }
    }

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.forms.set(field, value);
        self.notify();
    }

    /// Quick-amount button on the withdraw screen.
    pub fn preset_withdraw(&mut self, amount: impl Into<String>) {
        self.set_field(FormField::WithdrawAmount, amount);
    }

    pub fn submit_withdraw(&mut self) -> Result<(), SessionError> {
        let input = self.forms.withdraw_amount.clone();
        self.withdraw(&input)
    }

    pub fn submit_deposit(&mut self) -> Result<(), SessionError> {
        let input = self.forms.deposit_amount.clone();
        self.deposit(&input)
    }

    pub fn submit_pin_change(&mut self) -> Result<(), SessionError> {
        let FormFields {
            old_pin,
            new_pin,
            confirm_pin,
            ..
        } = self.forms.clone();
        self.change_pin(&old_pin, &new_pin, &confirm_pin)
    }

    /// Let `elapsed` logical time pass, firing due timers in order.
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.scheduler.now().saturating_add(elapsed);
        while let Some(fired) = self.scheduler.pop_due(until) {
            self.fire(fired);
        }
        self.scheduler.advance_to(until);
    }

    fn fire(&mut self, fired: Fired) {
        debug!(session = %self.id, action = ?fired.action, due = ?fired.due, "timer fired");
        if self.pending_transition == Some(fired.handle) {
            self.pending_transition = None;
        }

        match fired.action {
            TimerAction::Navigate(screen) => self.transition(screen, NavigationCause::Timer),
            TimerAction::Logout => self.end_session(NavigationCause::Timer),
            TimerAction::RefreshClock => {
                self.time_display = self.clock.now().format(&self.config.time_format).to_string();
                self.notify();
            }
        }
    }

    fn end_session(&mut self, cause: NavigationCause) {
        self.pin_buffer.clear();
        self.authenticated = false;
        info!(session = %self.id, ?cause, "logged out");
        self.transition(Screen::Welcome, cause);
    }

    /// Perform a screen change. Guards have already been checked.
    fn transition(&mut self, to: Screen, cause: NavigationCause) {
        let from = self.screen;
        self.cancel_pending();

        self.pin_buffer.clear();
        self.forms.clear();
        self.messages.clear();
        self.balance_snapshot = None;
        self.statement.clear();

        self.screen = to;
        self.history.record(NavigationRecord {
            from,
            to,
            cause,
            at: self.scheduler.now(),
        });

        match to {
            Screen::Balance => self.balance_snapshot = Some(self.balance_display()),
            Screen::Statement => self.statement = self.render_statement(),
            Screen::Exit => self.schedule_transition(self.config.exit_delay(), TimerAction::Logout),
            _ => {}
        }

        info!(session = %self.id, from = %from, to = %to, ?cause, "navigated");
        self.notify();
    }

    fn render_statement(&self) -> Vec<StatementRow> {
        self.recent_transactions_default()
            .map(|t| StatementRow::from_transaction(t, &self.config.date_format))
            .collect()
    }

    fn complete(&mut self, slot: MessageSlot, text: &str) {
        self.messages.set(slot, StatusMessage::success(text));
        self.schedule_transition(
            self.config.success_delay(),
            TimerAction::Navigate(Screen::Dashboard),
        );
        self.notify();
    }

    /// At most one delayed transition is pending; a new one replaces it.
    fn schedule_transition(&mut self, delay: Duration, action: TimerAction) {
        self.cancel_pending();
        let handle = self.scheduler.schedule_once(delay, action);
        debug!(session = %self.id, ?action, ?delay, "transition scheduled");
        self.pending_transition = Some(handle);
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending_transition.take() {
            if self.scheduler.cancel(handle) {
                debug!(session = %self.id, "pending transition cancelled");
            }
        }
    }

    fn reject(&mut self, slot: MessageSlot, error: SessionError) -> Result<(), SessionError> {
        warn!(session = %self.id, ?slot, %error, "operation rejected");
        self.messages.set(slot, StatusMessage::error(error.to_string()));
        self.notify();
        Err(error)
    }

    fn reject_all(
        &mut self,
        slot: MessageSlot,
        violations: &NonEmptyVec<SessionError>,
    ) -> Result<(), SessionError> {
        if violations.len() > 1 {
            debug!(
                session = %self.id,
                violations = ?violations.iter().collect::<Vec<_>>(),
                "multiple violations"
            );
        }
        self.reject(slot, first_violation(violations))
    }

    fn notify(&mut self) {
        if self.observers.is_empty() {
            return;
        }
        let view = self.view();
        for observer in &mut self.observers {
            observer.on_view(&view);
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("screen", &self.screen)
            .field("authenticated", &self.authenticated)
            .field("balance", &self.account.balance())
            .field("transactions", &self.ledger.len())
            .field("elapsed", &self.scheduler.now())
            .finish_non_exhaustive()
    }
}
