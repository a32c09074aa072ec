//! Trolley command line

use std::io::{self, Write};

use anyhow::{Context, Result};
use tracing::info;

use trolley::{
    analytics::{JsonLinesSink, TracingSink},
    cart::QuantityChange,
    catalog::Catalog,
    config::{Action, AnalyticsMode, Config},
    manager::{CartManager, CheckoutOutcome},
    observability::init_subscriber,
    presentation::{write_cart, write_catalog, write_checkout_notice},
    session::Session,
    storage::{FileStore, KeyValueStore},
};

fn main() -> Result<()> {
    let config = Config::load().unwrap_or_else(|err| err.exit());

    init_subscriber(&config.logging)?;

    let catalog = match &config.catalog {
        Some(path) => Catalog::load(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::demo(),
    };

    info!(
        products = catalog.len(),
        store = %config.store_dir.display(),
        "starting trolley"
    );

    let manager = CartManager::open(&catalog, FileStore::new(&config.store_dir));

    let manager = match config.analytics {
        AnalyticsMode::Off => manager,
        AnalyticsMode::Log => manager.with_analytics(TracingSink),
        AnalyticsMode::Json => manager.with_analytics(JsonLinesSink::new(io::stderr())),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    run(manager, config.action.unwrap_or(Action::Shell), &mut out)?;

    out.flush()?;

    Ok(())
}

fn run<S: KeyValueStore>(
    mut manager: CartManager<'_, S>,
    action: Action,
    mut out: impl Write,
) -> Result<()> {
    match action {
        Action::Products => write_catalog(&mut out, manager.catalog())?,
        Action::Cart => write_cart(&mut out, manager.cart())?,
        Action::Add { id } => {
            match manager.add_item(id) {
                Some(entry) => writeln!(out, "Added {} (x{})", entry.name, entry.quantity)?,
                None => anyhow::bail!("No product with id {id}"),
            }

            write_cart(&mut out, manager.cart())?;
        }
        Action::Update { id, quantity } => {
            if manager.update_quantity(id, quantity) == QuantityChange::Missing {
                writeln!(out, "Product {id} is not in the cart")?;
            }

            write_cart(&mut out, manager.cart())?;
        }
        Action::Remove { id } => {
            if manager.remove_item(id) == QuantityChange::Missing {
                writeln!(out, "Product {id} is not in the cart")?;
            }

            write_cart(&mut out, manager.cart())?;
        }
        Action::Checkout => {
            let outcome = manager.checkout();
            write_checkout_notice(&mut out, &outcome)?;

            if let CheckoutOutcome::Completed(receipt) = outcome {
                receipt.write_to(&mut out)?;
            }
        }
        Action::Shell => {
            let stdin = io::stdin();

            Session::new(manager)
                .run(stdin.lock(), &mut out)
                .context("Interactive session failed")?;
        }
    }

    Ok(())
}
