pub use alerts::{
    BalanceCheck, ChannelError, Delivery, DispatchReport, Dispatcher, Disabled, EmailChannel,
    HookReport, Message, Recipient, SmsChannel, TransactionHook,
};
pub use budgets::Budget;
pub use commands::{
    BudgetCmd, DateRange, ExpenseCmd, InvestmentCmd, ProfileCmd, SavingsGoalCmd, TransactionCmd,
    UserCmd,
};
pub use error::EngineError;
pub use expenses::Expense;
pub use investments::Investment;
pub use money::Money;
pub use notifications::Notification;
pub use ops::{Balance, BudgetAnalytics, CategoryTotal, Engine, EngineBuilder, TransactionListFilter};
pub use profiles::Profile;
pub use reports::{
    Chart, ChartKind, ChartPoint, Statement, financial_advice, render_csv, render_pdf,
};
pub use savings_goals::SavingsGoal;
pub use transactions::{Transaction, TransactionKind};
pub use users::User;
pub use util::MAX_AMOUNT;

mod alerts;
mod budgets;
mod commands;
mod error;
mod expenses;
mod investments;
mod money;
mod notifications;
mod ops;
mod profiles;
mod reports;
mod savings_goals;
mod transactions;
mod users;
mod util;

pub type ResultEngine<T> = Result<T, EngineError>;
