use cart::{CartEntry, CartStore, Storage};

use crate::{
    catalog::CatalogStatus,
    search::{SortMode, filter_products},
};

pub const SHOP_NAME: &str = "My Shop";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Products,
    Cart,
}

/// Sum of price × quantity, recomputed on every call.
pub fn cart_total(entries: &[&CartEntry]) -> f64 {
    entries.iter().map(|entry| entry.subtotal()).sum()
}

pub fn format_price(amount: f64) -> String {
    format!("${amount:.2}")
}

pub fn render_header(view: View, count: usize) -> String {
    let marker = |target: View| if view == target { "*" } else { " " };
    let badge = if count > 0 {
        format!(" ({count})")
    } else {
        String::new()
    };

    format!(
        "== {SHOP_NAME} ==  {}Products  {}Cart{badge}",
        marker(View::Products),
        marker(View::Cart)
    )
}

pub fn render_catalog<S: Storage>(
    status: &CatalogStatus,
    search: &str,
    sort: SortMode,
    cart: &CartStore<S>,
) -> String {
    let products = match status {
        CatalogStatus::Loading => return "Loading products...".to_string(),
        CatalogStatus::Failed(message) => return format!("{message}\nType `retry` to reload."),
        CatalogStatus::Ready(products) => products,
    };

    let shown_search = if search.is_empty() { "(none)" } else { search };
    let mut lines = vec![format!("Search: {shown_search}   Sort: {}", sort.label())];

    let filtered = filter_products(products, search, sort);
    if filtered.is_empty() {
        lines.push("No products available...".to_string());
    }

    for product in filtered {
        // catalog prices are shown as fetched, cart prices always carry two decimals
        lines.push(format!("#{:<4} {}  ${}", product.id, product.title, product.price));

        lines.push(match cart.get(product.id) {
            Some(entry) => format!(
                "      - {} +   (dec {id} / inc {id})",
                entry.quantity(),
                id = product.id
            ),
            None => format!("      Add to Cart   (add {})", product.id),
        });
    }

    lines.join("\n")
}

pub fn render_cart<S: Storage>(cart: &CartStore<S>) -> String {
    let entries = cart.as_list();
    if entries.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut lines = vec!["Shopping Cart".to_string()];
    lines.extend(entries.iter().map(|entry| {
        format!(
            "#{:<4} {}  {} x {}   (dec {id} / inc {id} / remove {id})",
            entry.id(),
            entry.product.title,
            format_price(entry.product.price),
            entry.quantity(),
            id = entry.id()
        )
    }));
    lines.push(format!("Total: {}", format_price(cart_total(&entries))));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use cart::{MemoryStorage, Product};

    use super::*;

    fn product(id: u32, title: &str, price: f64) -> Product {
        Product {
            id,
            title: title.to_string(),
            price,
            image: String::new(),
        }
    }

    fn empty_cart() -> CartStore<MemoryStorage> {
        CartStore::new(MemoryStorage::new(), "cart")
    }

    #[test]
    fn test_total() {
        let mut cart = empty_cart();
        cart.add_to_cart(&product(1, "Shirt", 10.0));
        cart.update_quantity(1, 3);

        assert_eq!(format_price(cart_total(&cart.as_list())), "$30.00");
    }

    #[test]
    fn test_total_mixed() {
        let mut cart = empty_cart();
        cart.add_to_cart(&product(1, "Shirt", 19.99));
        cart.add_to_cart(&product(2, "Shoe", 0.5));
        cart.update_quantity(2, 3);

        assert_eq!(format_price(cart_total(&cart.as_list())), "$21.49");
        assert_eq!(cart_total(&[]), 0.0);
    }

    #[test]
    fn test_header_badge() {
        assert!(render_header(View::Products, 2).ends_with("Cart (2)"));
        assert!(render_header(View::Cart, 0).ends_with("*Cart"));
        assert!(render_header(View::Products, 0).contains("*Products"));
    }

    #[test]
    fn test_catalog_states() {
        let cart = empty_cart();

        assert_eq!(
            render_catalog(&CatalogStatus::Loading, "", SortMode::None, &cart),
            "Loading products..."
        );

        let failed = CatalogStatus::Failed("Failed to fetch products, try again.".to_string());
        assert!(render_catalog(&failed, "", SortMode::None, &cart).contains("retry"));
    }

    #[test]
    fn test_catalog_cards() {
        let mut cart = empty_cart();
        let catalog = vec![product(1, "Shirt", 20.0), product(2, "Shoe", 10.5)];
        cart.add_to_cart(&catalog[1]);
        cart.update_quantity(2, 2);

        let status = CatalogStatus::Ready(catalog);
        let rendered = render_catalog(&status, "", SortMode::Asc, &cart);

        assert!(rendered.contains("Price Low → High"));
        assert!(rendered.contains("(add 1)"));
        assert!(rendered.contains("- 2 +"));
        assert!(rendered.contains("$10.5"));
        assert!(rendered.find("Shoe").unwrap() < rendered.find("Shirt").unwrap());
    }

    #[test]
    fn test_catalog_no_match() {
        let status = CatalogStatus::Ready(vec![product(1, "Shirt", 20.0)]);

        let rendered = render_catalog(&status, "zzz", SortMode::None, &empty_cart());

        assert!(rendered.ends_with("No products available..."));
    }

    #[test]
    fn test_cart_lines() {
        let mut cart = empty_cart();
        cart.add_to_cart(&product(1, "Shirt", 20.0));
        cart.add_to_cart(&product(2, "Shoe", 5.25));

        let rendered = render_cart(&cart);
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Shopping Cart");
        assert!(lines[2].starts_with("#2    Shoe  $5.25 x 1"));
        assert_eq!(lines[3], "Total: $25.25");
    }

    #[test]
    fn test_cart_view() {
        let mut cart = empty_cart();
        assert_eq!(render_cart(&cart), "Your cart is empty.");

        cart.add_to_cart(&product(1, "Shirt", 20.0));
        cart.update_quantity(1, 2);
        let rendered = render_cart(&cart);

        assert!(rendered.contains("$20.00 x 2"));
        assert!(rendered.ends_with("Total: $40.00"));
    }
}
