use std::time::Duration;

use cart::{CartStore, FileStorage, Product, Storage};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::{
    catalog::{CatalogLoader, CatalogStatus},
    commands::{Command, HELP},
    config::Config,
    error::AppError,
    search::SortMode,
    views::{View, render_cart, render_catalog, render_header},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Render,
    Message(String),
    Reload,
    Quit,
}

pub struct State<S: Storage> {
    pub config: Config,
    pub cart: CartStore<S>,
    pub catalog: CatalogLoader,
    pub search: String,
    pub sort: SortMode,
    pub view: View,
}

impl State<FileStorage> {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let storage = FileStorage::new(&config.storage_dir);

        Self::with_storage(config, storage)
    }
}

impl<S: Storage> State<S> {
    /// Loads the cart from `storage` immediately. The catalog starts out `Loading`.
    pub fn with_storage(config: Config, storage: S) -> Result<Self, AppError> {
        let cart = CartStore::open(storage, config.cart_slot.clone());
        let catalog = CatalogLoader::new(config.catalog_url.clone(), config.request_timeout)?;

        Ok(Self {
            config,
            cart,
            catalog,
            search: String::new(),
            sort: SortMode::None,
            view: View::Products,
        })
    }

    /// Fetches the catalog again. Search and sort survive the reload.
    pub async fn reload(&mut self) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Loading products...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        self.catalog.load().await;

        spinner.finish_and_clear();
    }

    pub fn apply(&mut self, command: Command) -> Result<Outcome, AppError> {
        debug!("Applying {command:?}");

        match command {
            Command::Products => self.view = View::Products,
            Command::Cart => self.view = View::Cart,
            Command::Search(text) => {
                ready_products(&self.catalog)?;
                self.search = text;
                self.view = View::Products;
            }
            Command::Sort => {
                ready_products(&self.catalog)?;
                self.sort = self.sort.toggle();
                self.view = View::Products;
            }
            Command::Add(id) => {
                let product = ready_products(&self.catalog)?
                    .iter()
                    .find(|product| product.id == id)
                    .ok_or(AppError::UnknownProduct(id))?;

                self.cart.add_to_cart(product);
            }
            Command::Inc(id) => {
                let quantity = self.quantity_of(id)?;
                self.cart.update_quantity(id, quantity + 1);
            }
            Command::Dec(id) => {
                let quantity = self.quantity_of(id)? - 1;

                // the cart view only removes through `remove`
                let quantity = match self.view {
                    View::Products => quantity,
                    View::Cart => quantity.max(1),
                };
                self.cart.update_quantity(id, quantity);
            }
            Command::Remove(id) => {
                self.quantity_of(id)?;
                self.cart.remove_from_cart(id);
            }
            Command::Retry => return Ok(Outcome::Reload),
            Command::Help => return Ok(Outcome::Message(HELP.to_string())),
            Command::Quit => return Ok(Outcome::Quit),
        }

        Ok(Outcome::Render)
    }

    pub fn render(&self) -> String {
        let body = match self.view {
            View::Products => render_catalog(self.catalog.status(), &self.search, self.sort, &self.cart),
            View::Cart => render_cart(&self.cart),
        };

        format!("{}\n\n{body}", render_header(self.view, self.cart.count()))
    }

    fn quantity_of(&self, id: u32) -> Result<i64, AppError> {
        self.cart
            .get(id)
            .map(|entry| i64::from(entry.quantity()))
            .ok_or(AppError::NotInCart(id))
    }
}

fn ready_products(catalog: &CatalogLoader) -> Result<&[Product], AppError> {
    match catalog.status() {
        CatalogStatus::Ready(products) => Ok(products),
        CatalogStatus::Loading => Err(AppError::CatalogUnavailable(
            "Products are still loading.".to_string(),
        )),
        CatalogStatus::Failed(message) => Err(AppError::CatalogUnavailable(message.clone())),
    }
}
