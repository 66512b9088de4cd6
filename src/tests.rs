#[cfg(test)]
mod integration_tests {
    use crate::handlers::accounts::CreateAccountRequest;
    use crate::handlers::occurrences::{CreateOccurrenceRequest, RealizeOccurrenceRequest};
    use crate::handlers::schedules::CreateScheduleRequest;
    use crate::handlers::transactions::CreateTransactionRequest;
    use crate::handlers::users::CreateUserRequest;
    use crate::schemas::ApiResponse;
    use crate::test_utils::test_utils::setup_test_app;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::{Duration, NaiveDate, Utc};
    use rust_decimal::Decimal;

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// Create a user through the API and return its id.
    async fn create_user(server: &TestServer, username: &str) -> i64 {
        let response = server
            .post("/api/v1/users")
            .json(&CreateUserRequest {
                username: username.to_string(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    /// Create a bank account through the API and return its id.
    async fn create_account(
        server: &TestServer,
        owner_id: i64,
        balance_cents: i64,
        kind: &str,
    ) -> i64 {
        let response = server
            .post("/api/v1/accounts")
            .json(&CreateAccountRequest {
                name: "Checking".to_string(),
                currency_code: "USD".to_string(),
                owner_id: owner_id as i32,
                current_balance: Decimal::new(balance_cents, 2),
                main_income_schedule_id: None,
                kind: kind.to_string(),
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    /// Create an expense schedule and one projected occurrence on `date`.
    async fn create_expense_occurrence(
        server: &TestServer,
        account_id: i64,
        display_name: &str,
        amount_cents: i64,
        date: NaiveDate,
    ) -> i64 {
        let response = server
            .post("/api/v1/schedules")
            .json(&CreateScheduleRequest {
                account_id: account_id as i32,
                kind: "Expense".to_string(),
                display_name: display_name.to_string(),
                expected_amount: Decimal::new(amount_cents, 2),
                period: "Monthly".to_string(),
                anchor_date: date,
                second_day: None,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        let schedule_id = body.data["id"].as_i64().unwrap();

        let response = server
            .post(&format!("/api/v1/schedules/{}/occurrences", schedule_id))
            .json(&CreateOccurrenceRequest {
                expected_date: date,
                expected_amount: None,
            })
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_user() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/users")
            .json(&CreateUserRequest {
                username: "newuser".to_string(),
            })
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.message, "User created successfully");
        assert_eq!(body.data["username"], "newuser");
        assert!(body.data["id"].as_i64().unwrap() > 0);
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/users/99999").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_account_crud() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let owner_id = create_user(&server, "account_owner").await;
        let account_id = create_account(&server, owner_id, 250_00, "Linked").await;

        // Read it back
        let response = server.get(&format!("/api/v1/accounts/{}", account_id)).await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["kind"], "Linked");
        assert_eq!(body.data["current_balance"], "250.00");

        // Update the balance
        let response = server
            .put(&format!("/api/v1/accounts/{}", account_id))
            .json(&serde_json::json!({ "current_balance": "99.50" }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["current_balance"], "99.50");

        // Delete it
        let response = server
            .delete(&format!("/api/v1/accounts/{}", account_id))
            .await;
        response.assert_status(StatusCode::NO_CONTENT);

        let response = server.get(&format!("/api/v1/accounts/{}", account_id)).await;
        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_schedule_rejects_unknown_period() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let owner_id = create_user(&server, "schedule_owner").await;
        let account_id = create_account(&server, owner_id, 100_00, "Linked").await;

        let response = server
            .post("/api/v1/schedules")
            .json(&CreateScheduleRequest {
                account_id: account_id as i32,
                kind: "Income".to_string(),
                display_name: "ACME PAYROLL".to_string(),
                expected_amount: Decimal::new(120000, 2),
                period: "Fortnightly".to_string(),
                anchor_date: today(),
                second_day: None,
            })
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_transactions_pending_filter() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let owner_id = create_user(&server, "tx_owner").await;
        let account_id = create_account(&server, owner_id, 100_00, "Linked").await;

        for (amount, pending) in [(-25_00, true), (-10_00, false)] {
            let response = server
                .post(&format!("/api/v1/accounts/{}/transactions", account_id))
                .json(&CreateTransactionRequest {
                    amount: Decimal::new(amount, 2),
                    transaction_date: today(),
                    display_name: "GROCERY MART".to_string(),
                    pending: Some(pending),
                })
                .await;
            response.assert_status(StatusCode::CREATED);
        }

        let response = server
            .get(&format!(
                "/api/v1/accounts/{}/transactions?pending=true",
                account_id
            ))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<Vec<serde_json::Value>> = response.json();
        assert_eq!(body.data.len(), 1);
        assert_eq!(body.data[0]["amount"], "-25.00");
    }

    #[tokio::test]
    async fn test_forecast_quiet_account() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let owner_id = create_user(&server, "quiet_owner").await;
        let account_id = create_account(&server, owner_id, 300_00, "Linked").await;

        let response = server
            .get(&format!("/api/v1/accounts/{}/forecast", account_id))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.data["start_balance"], "300.00");
        assert_eq!(body.data["lowest_balance"], "300.00");
        assert_eq!(body.data["start"], today().to_string());
        assert!(body.data["paycheck"].is_null());
        assert_eq!(body.data["recurring"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_forecast_day_zero_events() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let owner_id = create_user(&server, "busy_owner").await;
        let account_id = create_account(&server, owner_id, 300_00, "Linked").await;

        // Projected bill today plus an uncleared card debit.
        create_expense_occurrence(&server, account_id, "OAKWOOD RENT", -50_00, today()).await;
        let response = server
            .post(&format!("/api/v1/accounts/{}/transactions", account_id))
            .json(&CreateTransactionRequest {
                amount: Decimal::new(-20_00, 2),
                transaction_date: today(),
                display_name: "COFFEE".to_string(),
                pending: Some(true),
            })
            .await;
        response.assert_status(StatusCode::CREATED);

        let response = server
            .get(&format!("/api/v1/accounts/{}/forecast", account_id))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["lowest_balance"], "230.00");
        assert_eq!(body.data["recurring"].as_array().unwrap().len(), 1);
        assert_eq!(body.data["pending"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_forecast_skips_settled_occurrence() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let owner_id = create_user(&server, "settled_owner").await;
        let account_id = create_account(&server, owner_id, 300_00, "Linked").await;

        let occurrence_id =
            create_expense_occurrence(&server, account_id, "CITY UTILITIES", -80_00, today()).await;

        // Mark the occurrence as settled; it must drop out of the forecast.
        let response = server
            .put(&format!(
                "/api/v1/occurrences/{}/realization",
                occurrence_id
            ))
            .json(&RealizeOccurrenceRequest {
                pending_date: None,
                settled_date: Some(today() - Duration::days(1)),
            })
            .await;
        response.assert_status(StatusCode::OK);

        let response = server
            .get(&format!("/api/v1/accounts/{}/forecast", account_id))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["lowest_balance"], "300.00");
        assert_eq!(body.data["recurring"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_forecast_spending_account_ignores_pending_debits() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let owner_id = create_user(&server, "spending_owner").await;
        let account_id = create_account(&server, owner_id, 40_00, "Spending").await;

        let response = server
            .post(&format!("/api/v1/accounts/{}/transactions", account_id))
            .json(&CreateTransactionRequest {
                amount: Decimal::new(-100_00, 2),
                transaction_date: today(),
                display_name: "GROCERY MART".to_string(),
                pending: Some(true),
            })
            .await;
        response.assert_status(StatusCode::CREATED);

        let response = server
            .get(&format!("/api/v1/accounts/{}/forecast", account_id))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["lowest_balance"], "40.00");
    }

    #[tokio::test]
    async fn test_forecast_missing_account() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/accounts/99999/forecast").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_projection_curve() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let owner_id = create_user(&server, "curve_owner").await;
        let account_id = create_account(&server, owner_id, 120_00, "Linked").await;

        let response = server
            .get(&format!("/api/v1/accounts/{}/projection", account_id))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        let points = body.data["points"].as_array().unwrap();
        assert!(!points.is_empty());
        assert_eq!(points[0]["date"], today().to_string());
        assert_eq!(points[0]["balance"], "120.00");

        // Second read comes from the cache and matches.
        let response = server
            .get(&format!("/api/v1/accounts/{}/projection", account_id))
            .await;
        response.assert_status(StatusCode::OK);
        let cached: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(cached.data["points"], body.data["points"]);
    }

    #[tokio::test]
    async fn test_projection_missing_account() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/accounts/99999/projection").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
