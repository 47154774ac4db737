use std::path::PathBuf;

use anyhow::Context;
use cart::{CART_SLOT, CartStore, FileStorage, Product, Storage};
use clap::Parser;

/// Seeds a storage directory with a cart, for poking at the storefront by hand.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Storage directory the storefront reads from
    #[arg(long, default_value = ".shop")]
    storage_dir: PathBuf,

    /// Write garbage instead of a cart
    #[arg(long)]
    corrupt: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut storage = FileStorage::new(&args.storage_dir);

    if args.corrupt {
        storage
            .set_item(CART_SLOT, "[[1, {\"id\": 1, \"quantity\": ")
            .context("writing corrupt cart")?;

        println!("Corrupt cart written to {}", args.storage_dir.display());
        return Ok(());
    }

    let mut cart = CartStore::new(storage, CART_SLOT);
    for (id, title, price, quantity) in [
        (1, "Fjallraven - Foldsack No. 1 Backpack, Fits 15 Laptops", 109.95, 1),
        (3, "Mens Cotton Jacket", 55.99, 2),
        (9, "WD 2TB Elements Portable External Hard Drive - USB 3.0", 64.0, 3),
    ] {
        cart.add_to_cart(&Product {
            id,
            title: title.to_string(),
            price,
            image: format!("https://fakestoreapi.com/img/{id}.jpg"),
        });
        cart.update_quantity(id, quantity);
    }
    cart.save().context("writing sample cart")?;

    let raw = cart
        .storage()
        .get_item(CART_SLOT)
        .context("reading sample cart back")?
        .unwrap_or_default();
    let pretty: serde_json::Value = serde_json::from_str(&raw)?;

    println!("Cart entries: {}", cart.count());
    println!("{}", serde_json::to_string_pretty(&pretty)?);

    Ok(())
}
