use chrono::{Days, NaiveDate, Utc};
use sea_orm::Database;

use engine::{
    BudgetCmd, DateRange, Engine, EngineError, ExpenseCmd, InvestmentCmd, MAX_AMOUNT, Money,
    ProfileCmd,
    SavingsGoalCmd, TransactionCmd, TransactionKind, TransactionListFilter, User, UserCmd,
};
use migration::MigratorTrait;

async fn engine_with_user() -> (Engine, User) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    let user = engine
        .create_user(UserCmd::new("alice", "alice@example.com").name("Alice", "Liddell"))
        .await
        .unwrap();
    (engine, user)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn deposit(cents: i64) -> TransactionCmd {
    TransactionCmd::new(TransactionKind::Deposit, Money::new(cents))
}

#[tokio::test]
async fn usernames_are_unique() {
    let (engine, _) = engine_with_user().await;

    let err = engine
        .create_user(UserCmd::new("alice", "other@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("username alice".to_string()));

    let err = engine
        .create_user(UserCmd::new("   ", "blank@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidInput(_)));
}

#[tokio::test]
async fn user_can_keep_its_username_on_update() {
    let (engine, user) = engine_with_user().await;
    let bob = engine
        .create_user(UserCmd::new("bob", "bob@example.com"))
        .await
        .unwrap();

    let updated = engine
        .update_user(user.id, UserCmd::new("alice", "new@example.com"))
        .await
        .unwrap();
    assert_eq!(updated.email, "new@example.com");

    let err = engine
        .update_user(bob.id, UserCmd::new("alice", "bob@example.com"))
        .await
        .unwrap_err();
    assert_eq!(err, EngineError::ExistingKey("username alice".to_string()));

    let names: Vec<_> = engine
        .list_users()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.username)
        .collect();
    assert_eq!(names, ["alice", "bob"]);
}

#[tokio::test]
async fn deleting_a_user_removes_its_records() {
    let (engine, user) = engine_with_user().await;
    engine.upsert_profile(user.id, ProfileCmd::default()).await.unwrap();
    engine.create_transaction(user.id, deposit(100)).await.unwrap();

    engine.delete_user(user.id).await.unwrap();

    assert!(matches!(
        engine.user(user.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
    assert!(matches!(
        engine.balance(user.id).await,
        Err(EngineError::KeyNotFound(_))
    ));
}

#[tokio::test]
async fn profile_upsert_keeps_unset_fields() {
    let (engine, user) = engine_with_user().await;
    assert_eq!(engine.profile(user.id).await.unwrap(), None);

    let created = engine
        .upsert_profile(
            user.id,
            ProfileCmd::default()
                .phone_number(" +15550100 ")
                .low_balance_threshold(Money::new(2_500)),
        )
        .await
        .unwrap();
    assert_eq!(created.phone_number, "+15550100");
    assert!(created.email_notifications);
    assert!(!created.sms_notifications);

    let updated = engine
        .upsert_profile(user.id, ProfileCmd::default().sms_notifications(true))
        .await
        .unwrap();
    assert_eq!(updated.phone_number, "+15550100");
    assert_eq!(updated.low_balance_threshold, Money::new(2_500));
    assert!(updated.sms_notifications);

    engine.delete_profile(user.id).await.unwrap();
    assert_eq!(engine.profile(user.id).await.unwrap(), None);
    assert_eq!(
        engine.delete_profile(user.id).await.unwrap_err(),
        EngineError::KeyNotFound("profile not exists".to_string())
    );
}

#[tokio::test]
async fn records_of_other_users_are_not_found() {
    let (engine, alice) = engine_with_user().await;
    let bob = engine
        .create_user(UserCmd::new("bob", "bob@example.com"))
        .await
        .unwrap();
    let tx = engine.create_transaction(alice.id, deposit(100)).await.unwrap();

    assert_eq!(
        engine.transaction(bob.id, tx.id).await.unwrap_err(),
        EngineError::KeyNotFound("transaction not exists".to_string())
    );
    assert!(engine.delete_transaction(bob.id, tx.id).await.is_err());
    assert!(engine.transaction(alice.id, tx.id).await.is_ok());
}

#[tokio::test]
async fn bulk_create_is_all_or_nothing() {
    let (engine, user) = engine_with_user().await;

    let err = engine
        .create_transactions(user.id, vec![deposit(100), deposit(0)])
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
    assert!(
        engine
            .list_transactions(user.id, &TransactionListFilter::default())
            .await
            .unwrap()
            .is_empty()
    );

    let created = engine
        .create_transactions(
            user.id,
            vec![
                deposit(100).description("a"),
                TransactionCmd::new(TransactionKind::Withdrawal, Money::new(40)),
            ],
        )
        .await
        .unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(
        engine.balance(user.id).await.unwrap().total(),
        Money::new(60)
    );

    assert!(matches!(
        engine.create_transactions(user.id, Vec::new()).await,
        Err(EngineError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn bulk_update_replaces_every_row_or_none() {
    let (engine, user) = engine_with_user().await;
    let created = engine
        .create_transactions(user.id, vec![deposit(100), deposit(200)])
        .await
        .unwrap();

    let err = engine
        .update_transactions(
            user.id,
            vec![
                (created[0].id, deposit(111)),
                (uuid::Uuid::new_v4(), deposit(999)),
            ],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
    let before = engine.transaction(user.id, created[0].id).await.unwrap();
    assert_eq!(before.amount, Money::new(100));

    let updated = engine
        .update_transactions(
            user.id,
            vec![
                (
                    created[0].id,
                    TransactionCmd::new(TransactionKind::Payment, Money::new(150))
                        .description("rent"),
                ),
                (created[1].id, deposit(250)),
            ],
        )
        .await
        .unwrap();
    assert_eq!(updated.len(), 2);

    let first = engine.transaction(user.id, created[0].id).await.unwrap();
    assert_eq!(first.kind, TransactionKind::Payment);
    assert_eq!(first.amount, Money::new(150));
    assert_eq!(first.description, "rent");
    assert_eq!(first.occurred_at, before.occurred_at);

    assert!(matches!(
        engine.update_transactions(user.id, Vec::new()).await,
        Err(EngineError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn amounts_above_the_limit_are_rejected() {
    let (engine, user) = engine_with_user().await;

    let err = engine
        .create_transaction(user.id, deposit(MAX_AMOUNT.cents() + 1))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidAmount(_)));
    assert!(matches!(
        engine.create_transaction(user.id, deposit(i64::MAX)).await,
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine
            .create_investment(
                user.id,
                InvestmentCmd {
                    investment_type: "stocks".to_string(),
                    amount: Money::new(i64::MAX),
                },
            )
            .await,
        Err(EngineError::InvalidAmount(_))
    ));
    assert!(matches!(
        engine
            .upsert_profile(
                user.id,
                ProfileCmd::default().low_balance_threshold(Money::new(i64::MAX)),
            )
            .await,
        Err(EngineError::InvalidAmount(_))
    ));

    engine
        .create_transactions(
            user.id,
            vec![deposit(MAX_AMOUNT.cents()), deposit(MAX_AMOUNT.cents())],
        )
        .await
        .unwrap();
    assert_eq!(
        engine.balance(user.id).await.unwrap().total(),
        Money::new(2 * MAX_AMOUNT.cents())
    );
    let [bar, _] = engine.transaction_charts(user.id).await.unwrap();
    assert_eq!(bar.points.len(), 1);
    assert_eq!(bar.points[0].y, 199_999_999.98);
}

#[tokio::test]
async fn transactions_filter_by_kind_and_day() {
    let (engine, user) = engine_with_user().await;
    engine.create_transaction(user.id, deposit(100)).await.unwrap();
    engine
        .create_transaction(
            user.id,
            TransactionCmd::new(TransactionKind::Transfer, Money::new(50)),
        )
        .await
        .unwrap();

    let today = Utc::now().date_naive();
    let only_today = TransactionListFilter::range(DateRange::new(Some(today), Some(today)).unwrap());
    assert_eq!(
        engine
            .list_transactions(user.id, &only_today)
            .await
            .unwrap()
            .len(),
        2
    );

    let transfers = TransactionListFilter {
        kind: Some(TransactionKind::Transfer),
        ..TransactionListFilter::default()
    };
    let rows = engine.list_transactions(user.id, &transfers).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, TransactionKind::Transfer);

    let tomorrow = today.checked_add_days(Days::new(1)).unwrap();
    let future = TransactionListFilter::range(DateRange::new(Some(tomorrow), None).unwrap());
    assert!(engine.list_transactions(user.id, &future).await.unwrap().is_empty());
}

#[tokio::test]
async fn reversed_range_is_rejected() {
    assert!(matches!(
        DateRange::new(Some(date(2024, 2, 1)), Some(date(2024, 1, 1))),
        Err(EngineError::InvalidDateRange(_))
    ));
}

#[tokio::test]
async fn statement_and_export_cover_the_range() {
    let (engine, user) = engine_with_user().await;
    let today = Utc::now().date_naive();
    let yesterday = today.checked_sub_days(Days::new(1)).unwrap();

    assert!(matches!(
        engine
            .export_transactions(user.id, DateRange::all())
            .await,
        Err(EngineError::KeyNotFound(_))
    ));

    engine
        .create_transaction(user.id, deposit(1_000).description("salary"))
        .await
        .unwrap();

    let statement = engine.statement(user.id, yesterday, today).await.unwrap();
    assert_eq!(statement.transactions.len(), 1);
    assert_eq!(statement.deposits(), Money::new(1_000));

    let earlier = engine
        .statement(user.id, date(2000, 1, 1), yesterday)
        .await
        .unwrap();
    assert!(earlier.transactions.is_empty());

    let rows = engine
        .export_transactions(user.id, DateRange::all())
        .await
        .unwrap();
    let csv = String::from_utf8(engine::render_csv(&rows).unwrap()).unwrap();
    assert!(csv.ends_with(&format!("{today},Deposit,10.00,salary\n")));

    let pdf = engine::render_pdf("Account Statement", &statement.period(), &rows).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[tokio::test]
async fn transaction_charts_sum_per_day() {
    let (engine, user) = engine_with_user().await;
    engine.create_transaction(user.id, deposit(1_000)).await.unwrap();
    engine.create_transaction(user.id, deposit(250)).await.unwrap();

    let [bar, line] = engine.transaction_charts(user.id).await.unwrap();
    assert_eq!(bar.chart, engine::ChartKind::Bar);
    assert_eq!(line.chart, engine::ChartKind::Line);
    assert_eq!(bar.points.len(), 1);
    assert_eq!(bar.points[0].y, 12.5);
}

#[tokio::test]
async fn investments_crud_and_charts() {
    let (engine, user) = engine_with_user().await;
    let cmd = |kind: &str, cents| InvestmentCmd {
        investment_type: kind.to_string(),
        amount: Money::new(cents),
    };

    let stocks = engine.create_investment(user.id, cmd("stocks", 10_000)).await.unwrap();
    let stored = engine.investment(user.id, stocks.id).await.unwrap();
    let updated = engine
        .update_investment(user.id, stocks.id, cmd("bonds", 12_000))
        .await
        .unwrap();
    assert_eq!(updated.investment_type, "bonds");
    assert_eq!(updated.occurred_at, stored.occurred_at);

    assert!(matches!(
        engine.create_investment(user.id, cmd("", 100)).await,
        Err(EngineError::InvalidInput(_))
    ));

    let [bar, _] = engine.investment_charts(user.id).await.unwrap();
    assert_eq!(bar.title, "Investments Over Time");
    assert_eq!(bar.points[0].y, 120.0);

    engine.delete_investment(user.id, stocks.id).await.unwrap();
    assert!(
        engine
            .list_investments(user.id, &DateRange::all())
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn budget_analytics_groups_by_category() {
    let (engine, user) = engine_with_user().await;
    let cmd = |category: &str, cents| BudgetCmd {
        category: category.to_string(),
        amount: Money::new(cents),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 1, 31),
    };
    engine.create_budget(user.id, cmd("food", 30_000)).await.unwrap();
    engine.create_budget(user.id, cmd("food", 5_000)).await.unwrap();
    engine.create_budget(user.id, cmd("books", 2_000)).await.unwrap();

    let analytics = engine.budget_analytics(user.id).await.unwrap();
    assert_eq!(analytics.total, Money::new(37_000));
    let by_category: Vec<_> = analytics
        .by_category
        .iter()
        .map(|c| (c.category.as_str(), c.total))
        .collect();
    assert_eq!(
        by_category,
        [("books", Money::new(2_000)), ("food", Money::new(35_000))]
    );

    let reversed = BudgetCmd {
        start_date: date(2024, 2, 1),
        ..cmd("rent", 100)
    };
    assert!(matches!(
        engine.create_budget(user.id, reversed).await,
        Err(EngineError::InvalidDateRange(_))
    ));
}

#[tokio::test]
async fn expenses_filter_by_inclusive_dates() {
    let (engine, user) = engine_with_user().await;
    for day in [1, 15, 31] {
        engine
            .create_expense(
                user.id,
                ExpenseCmd {
                    category: "food".to_string(),
                    amount: Money::new(1_000),
                    date: date(2024, 1, day),
                    description: None,
                },
            )
            .await
            .unwrap();
    }

    let range = DateRange::new(Some(date(2024, 1, 15)), Some(date(2024, 1, 31))).unwrap();
    let rows = engine.list_expenses(user.id, &range).await.unwrap();
    let days: Vec<_> = rows.iter().map(|e| e.date).collect();
    assert_eq!(days, [date(2024, 1, 15), date(2024, 1, 31)]);
}

#[tokio::test]
async fn only_unreached_goals_are_active() {
    let (engine, user) = engine_with_user().await;
    let cmd = |name: &str, current| SavingsGoalCmd {
        goal_name: name.to_string(),
        target_amount: Money::new(10_000),
        current_amount: Money::new(current),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 12, 31),
    };
    engine.create_savings_goal(user.id, cmd("car", 2_000)).await.unwrap();
    engine.create_savings_goal(user.id, cmd("trip", 10_000)).await.unwrap();

    let active: Vec<_> = engine
        .active_savings_goals(user.id)
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.goal_name)
        .collect();
    assert_eq!(active, ["car"]);
    assert_eq!(engine.list_savings_goals(user.id).await.unwrap().len(), 2);
}
