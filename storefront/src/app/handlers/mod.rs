//! # Action Handlers
//!
//! Handlers organized by screen. Each takes the shared state and, when it
//! talks to the API, the service and the task spawner; results come back
//! later as [`crate::app::AppEvent`]s.

pub mod admin;
pub mod auth;
pub mod cart;
pub mod navigation;
pub mod products;
pub mod transactions;

#[cfg(test)]
pub(crate) mod tests {
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use parking_lot::Mutex;
    use rust_decimal::Decimal;
    use shared::{
        LoginRequest, NewProduct, Page, PaymentMethod, Product, SignupRequest, SignupResponse,
        TokenResponse, Transaction, TransactionStatus, User,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::app::App;
    use crate::core::service::StorefrontApi;
    use crate::services::api::ApiError;
    use crate::services::storage::{KeyValueStore, MemoryStore, TOKEN_KEY};

    pub(crate) type Log<T> = Arc<Mutex<Vec<T>>>;

    /// In-memory stand-in for the REST API.
    ///
    /// Catalogue: 1 "Mug" $4.50 x10, 2 "Lamp" $25.00 x3, 3 "Chair" $80.00
    /// sold out. Transactions: 10 (Mug x2, completed), 11 (Lamp x1,
    /// pending). Valid login: any username with password `secret123`.
    pub(crate) struct MockApi {
        calls: Log<String>,
        purchases: Log<(i64, u32, PaymentMethod)>,
        added: Log<NewProduct>,
        purchase_count: AtomicUsize,
        fail_purchase_at: Option<(usize, String)>,
        reject_products: Option<String>,
        staff: bool,
        current_user_fails: bool,
        unauthorized: Option<Arc<dyn KeyValueStore>>,
    }

    impl MockApi {
        pub(crate) fn new() -> Self {
            Self {
                calls: Arc::default(),
                purchases: Arc::default(),
                added: Arc::default(),
                purchase_count: AtomicUsize::new(0),
                fail_purchase_at: None,
                reject_products: None,
                staff: false,
                current_user_fails: false,
                unauthorized: None,
            }
        }

        /// The `n`-th purchase call (1-based) fails with `message`.
        pub(crate) fn fail_purchase_at(mut self, n: usize, message: &str) -> Self {
            self.fail_purchase_at = Some((n, message.to_string()));
            self
        }

        pub(crate) fn reject_products(mut self, message: &str) -> Self {
            self.reject_products = Some(message.to_string());
            self
        }

        pub(crate) fn staff(mut self) -> Self {
            self.staff = true;
            self
        }

        pub(crate) fn without_current_user(mut self) -> Self {
            self.current_user_fails = true;
            self
        }

        /// Token-protected calls answer 401 and drop the token from `store`,
        /// as the HTTP client does.
        pub(crate) fn unauthorized(mut self, store: Arc<dyn KeyValueStore>) -> Self {
            self.unauthorized = Some(store);
            self
        }

        pub(crate) fn call_log(&self) -> Log<String> {
            self.calls.clone()
        }

        pub(crate) fn purchase_log(&self) -> Log<(i64, u32, PaymentMethod)> {
            self.purchases.clone()
        }

        pub(crate) fn added_log(&self) -> Log<NewProduct> {
            self.added.clone()
        }

        pub(crate) fn purchase_calls(&self) -> Vec<i64> {
            self.purchases.lock().iter().map(|(id, _, _)| *id).collect()
        }

        fn record(&self, call: String) {
            self.calls.lock().push(call);
        }

        fn guard(&self) -> Result<(), ApiError> {
            match &self.unauthorized {
                Some(store) => {
                    let _ = store.remove(TOKEN_KEY);
                    Err(ApiError::Unauthorized)
                }
                None => Ok(()),
            }
        }
    }

    pub(crate) fn product(id: i64, name: &str, price_cents: i64, stock: i64) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: Decimal::new(price_cents, 2),
            quantity: stock,
            image: None,
            image_url: None,
            image_source: None,
            created_at: None,
            updated_at: None,
        }
    }

    pub(crate) fn catalogue() -> Vec<Product> {
        vec![
            product(1, "Mug", 450, 10),
            product(2, "Lamp", 2500, 3),
            product(3, "Chair", 8000, 0),
        ]
    }

    pub(crate) fn transaction(
        id: i64,
        product: Product,
        quantity: i64,
        status: TransactionStatus,
    ) -> Transaction {
        Transaction {
            id,
            total_amount: product.price * Decimal::from(quantity),
            product,
            quantity,
            payment_method: PaymentMethod::App,
            status,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    fn page<T>(results: Vec<T>) -> Page<T> {
        Page {
            count: results.len() as u64,
            next: None,
            previous: None,
            results,
        }
    }

    fn user(username: &str, is_staff: bool) -> User {
        User {
            id: 1,
            username: username.to_string(),
            email: format!("{}@example.com", username),
            is_staff,
        }
    }

    #[async_trait]
    impl StorefrontApi for MockApi {
        async fn login(&self, request: LoginRequest) -> Result<TokenResponse, ApiError> {
            self.record(format!("login({})", request.username));
            if request.password != "secret123" {
                return Err(ApiError::request(
                    "Unable to log in with provided credentials.",
                    Some(400),
                ));
            }
            Ok(TokenResponse {
                token: format!("token-{}", request.username),
            })
        }

        async fn signup(&self, request: SignupRequest) -> Result<SignupResponse, ApiError> {
            self.record(format!("signup({})", request.username));
            Ok(SignupResponse {
                token: format!("token-{}", request.username),
                user: user(&request.username, false),
            })
        }

        async fn get_products(&self, page_number: u32) -> Result<Page<Product>, ApiError> {
            self.record(format!("get_products({})", page_number));
            self.guard()?;
            Ok(page(catalogue()))
        }

        async fn add_product(&self, new_product: NewProduct) -> Result<Product, ApiError> {
            self.record(format!("add_product({})", new_product.name));
            self.guard()?;
            if let Some(message) = &self.reject_products {
                return Err(ApiError::request(message.clone(), Some(400)));
            }
            let created = product(4, &new_product.name, 1200, 4);
            self.added.lock().push(new_product);
            Ok(created)
        }

        async fn delete_product(&self, id: i64) -> Result<(), ApiError> {
            self.record(format!("delete_product({})", id));
            self.guard()
        }

        async fn purchase_product(
            &self,
            id: i64,
            quantity: u32,
            payment_method: PaymentMethod,
        ) -> Result<Transaction, ApiError> {
            self.record(format!("purchase_product({}, {})", id, quantity));
            self.guard()?;
            self.purchases.lock().push((id, quantity, payment_method));
            let n = self.purchase_count.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some((fail_at, message)) = &self.fail_purchase_at {
                if n == *fail_at {
                    return Err(ApiError::request(message.clone(), Some(400)));
                }
            }
            let product = catalogue()
                .into_iter()
                .find(|p| p.id == id)
                .unwrap_or_else(|| product(id, "Unknown", 100, 1));
            Ok(transaction(
                100 + n as i64,
                product,
                i64::from(quantity),
                TransactionStatus::Completed,
            ))
        }

        async fn get_transactions(&self, page_number: u32) -> Result<Page<Transaction>, ApiError> {
            self.record(format!("get_transactions({})", page_number));
            self.guard()?;
            let products = catalogue();
            Ok(page(vec![
                transaction(10, products[0].clone(), 2, TransactionStatus::Completed),
                transaction(11, products[1].clone(), 1, TransactionStatus::Pending),
            ]))
        }

        async fn update_transaction(&self, id: i64, quantity: i64) -> Result<Transaction, ApiError> {
            self.record(format!("update_transaction({}, {})", id, quantity));
            self.guard()?;
            Ok(transaction(
                id,
                product(1, "Mug", 450, 10),
                quantity,
                TransactionStatus::Completed,
            ))
        }

        async fn delete_transaction(&self, id: i64) -> Result<(), ApiError> {
            self.record(format!("delete_transaction({})", id));
            self.guard()
        }

        async fn get_users(&self) -> Result<Vec<User>, ApiError> {
            self.record("get_users".to_string());
            self.guard()?;
            Ok(vec![user("admin", true), user("alice", false)])
        }

        async fn get_current_user(&self) -> Result<User, ApiError> {
            self.record("get_current_user".to_string());
            self.guard()?;
            if self.current_user_fails {
                return Err(ApiError::request("Failed to fetch user data", Some(500)));
            }
            Ok(user(if self.staff { "admin" } else { "alice" }, self.staff))
        }
    }

    /// App over `api` with an in-memory store, optionally holding `token`,
    /// with the session already restored.
    pub(crate) fn test_app(api: MockApi, token: Option<&str>) -> (App, Arc<MemoryStore>) {
        let store = Arc::new(match token {
            Some(token) => MemoryStore::with_entry(TOKEN_KEY, token),
            None => MemoryStore::new(),
        });
        let mut app = App::new(Arc::new(api), store.clone());
        app.restore_session();
        (app, store)
    }
}
