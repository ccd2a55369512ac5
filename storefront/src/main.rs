//! `storefront` binary: a line-oriented shell over the client.
//!
//! Every command becomes one or more [`Action`]s. After each command the
//! loop waits for the spawned API tasks and prints the current screen.

use storefront::app::{App, Route};
use storefront::config::ClientConfig;
use storefront::ui::action::{Action, AuthForm};
use storefront::ui::render::to_text;
use storefront::utils::record::{ProductField, TransactionField};
use storefront::utils::shortcuts::KeyPress;
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "\
Commands:
  products [page]            search <term>          sort <field> | sort reset
  add <id> [qty]             cart                   qty <id> <n>
  remove <id>                checkout [app|cash]
  transactions [page]        filter <field> <value> | filter clear
  edit <id> <qty>            delete <id>
  admin [products|users]     newproduct <name> <price> <qty> [image]
  delproduct <id>            refresh                key <combo>
  resize <w> <h>             login <u> <p>          signup <u> <e> <p>
  logout                     help                   quit";

enum Step {
    Actions(Vec<Action>),
    Refresh,
    Key(KeyPress),
    Search(String),
    Help,
    Quit,
}

#[tokio::main]
async fn main() -> storefront::core::Result<()> {
    let config = ClientConfig::from_env();
    storefront::debug::init(&config);
    tracing::info!(api_url = %config.api_url, "Storefront starting");

    let mut app = match App::from_config(&config) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "Failed to start");
            return Err(e);
        }
    };
    app.restore_session();
    app.settle().await;
    println!("{}", to_text(&app.render()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "Failed to read stdin");
                break;
            }
        };

        match parse(&line) {
            Ok(Step::Quit) => break,
            Ok(Step::Help) => {
                println!("{}", HELP);
                continue;
            }
            Ok(Step::Actions(actions)) => {
                for action in actions {
                    app.dispatch(action);
                }
            }
            Ok(Step::Refresh) => app.refresh(Instant::now()),
            Ok(Step::Key(press)) => {
                if !app.handle_key(&press) {
                    println!("No shortcut bound to that key");
                }
            }
            Ok(Step::Search(term)) => {
                app.dispatch(Action::SearchProducts(term));
                // applied once the debounce delay has passed
                tokio::time::sleep(storefront::app::SEARCH_DEBOUNCE).await;
            }
            Err(message) => {
                println!("{}", message);
                continue;
            }
        }

        app.settle().await;
        app.on_tick();
        app.settle().await;
        println!("{}", to_text(&app.render()));
    }

    tracing::info!("Storefront exiting");
    Ok(())
}

fn parse(line: &str) -> Result<Step, String> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, args)) = words.split_first() else {
        return Ok(Step::Actions(Vec::new()));
    };

    let step = match (command, args) {
        ("quit" | "exit", _) => Step::Quit,
        ("help", _) => Step::Help,
        ("products", []) => Step::Actions(vec![Action::Navigate(Route::Products)]),
        ("products", [page]) => Step::Actions(vec![
            Action::Navigate(Route::Products),
            Action::ProductsPage(number(page)?),
        ]),
        ("search", terms) => Step::Search(terms.join(" ")),
        ("sort", ["reset"]) => Step::Actions(vec![Action::ResetProductSort]),
        ("sort", [field]) => Step::Actions(vec![Action::SortProducts(field.parse::<ProductField>()?)]),
        ("add", [id]) => Step::Actions(vec![Action::AddToCart { product_id: number(id)? }]),
        ("add", [id, qty]) => {
            let product_id = number(id)?;
            let qty: i32 = number(qty)?;
            Step::Actions(vec![
                Action::ChangeQuantity { product_id, delta: qty - 1 },
                Action::AddToCart { product_id },
            ])
        }
        ("cart", []) => Step::Actions(vec![Action::Navigate(Route::Cart)]),
        ("qty", [id, n]) => Step::Actions(vec![Action::SetItemQuantity {
            product_id: number(id)?,
            quantity: number(n)?,
        }]),
        ("remove", [id]) => Step::Actions(vec![Action::RemoveItem(number(id)?)]),
        ("checkout", rest) => {
            let mut actions = vec![Action::Navigate(Route::Cart), Action::OpenCheckout];
            if let [method] = rest {
                actions.push(Action::SelectPaymentMethod(method.parse()?));
            }
            actions.push(Action::ConfirmCheckout);
            Step::Actions(actions)
        }
        ("transactions", []) => Step::Actions(vec![Action::Navigate(Route::Transactions)]),
        ("transactions", [page]) => Step::Actions(vec![
            Action::Navigate(Route::Transactions),
            Action::TransactionsPage(number(page)?),
        ]),
        ("filter", ["clear"]) => Step::Actions(vec![Action::ClearTransactionFilters]),
        ("filter", [field, value @ ..]) if !value.is_empty() => {
            Step::Actions(vec![Action::FilterTransactions {
                field: field.parse::<TransactionField>()?,
                value: value.join(" "),
            }])
        }
        ("edit", [id, qty]) => Step::Actions(vec![
            Action::EditTransaction(number(id)?),
            Action::EditQuantityInput(qty.to_string()),
            Action::SaveTransactionEdit,
        ]),
        ("delete", [id]) => Step::Actions(vec![
            Action::DeleteTransaction(number(id)?),
            Action::ConfirmDeleteTransaction,
        ]),
        ("admin", []) => Step::Actions(vec![Action::Navigate(Route::Admin)]),
        ("admin", [tab]) => {
            let tab = match *tab {
                "products" => storefront::app::AdminTab::Products,
                "users" => storefront::app::AdminTab::Users,
                other => return Err(format!("Unknown admin tab: {}", other)),
            };
            Step::Actions(vec![Action::Navigate(Route::Admin), Action::AdminTab(tab)])
        }
        ("newproduct", [name, price, qty, image @ ..]) if image.len() <= 1 => {
            use storefront::app::NewProductField;

            let mut actions = vec![Action::Navigate(Route::Admin), Action::OpenAddProduct];
            let mut input = |field, value: &str| {
                actions.push(Action::NewProductInput { field, value: value.to_string() })
            };
            input(NewProductField::Name, *name);
            input(NewProductField::Price, *price);
            input(NewProductField::Quantity, *qty);
            if let [image] = image {
                if image.starts_with("http://") || image.starts_with("https://") {
                    input(NewProductField::ImageUrl, *image);
                } else {
                    input(NewProductField::ImageFile, *image);
                }
            }
            actions.push(Action::SubmitNewProduct);
            Step::Actions(actions)
        }
        ("delproduct", [id]) => Step::Actions(vec![Action::DeleteProduct(number(id)?)]),
        ("refresh", []) => Step::Refresh,
        ("key", [combo]) => Step::Key(combo.parse()?),
        ("resize", [w, h]) => Step::Actions(vec![Action::Resize {
            width: number(w)?,
            height: number(h)?,
        }]),
        ("login", [username, password]) => Step::Actions(vec![
            Action::Navigate(Route::Login),
            field(AuthForm::Login, "username", username),
            field(AuthForm::Login, "password", password),
            Action::SubmitLogin,
        ]),
        ("signup", [username, email, password]) => Step::Actions(vec![
            Action::Navigate(Route::Signup),
            field(AuthForm::Signup, "username", username),
            field(AuthForm::Signup, "email", email),
            field(AuthForm::Signup, "password", password),
            Action::SubmitSignup,
        ]),
        ("logout", []) => Step::Actions(vec![Action::Logout]),
        _ => return Err(format!("Unrecognised command: {} (try `help`)", line.trim())),
    };
    Ok(step)
}

fn field(form: AuthForm, name: &str, value: &str) -> Action {
    Action::FormInput {
        form,
        field: name.to_string(),
        value: value.to_string(),
    }
}

fn number<T: std::str::FromStr>(word: &str) -> Result<T, String> {
    word.parse().map_err(|_| format!("Not a number: {}", word))
}
