//! Aggregations over the store collections
//!
//! Every function here is a pure transformation of its inputs. Lookups are
//! built with first-write-wins semantics and both finders keep the first
//! maximum they encounter (strict `>` comparison).

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::result::{Error, LookupError, Result};
use crate::domain::{haversine_distance, Cart, CartItem, Product, User, UserName};

/// Category name to summed unit prices
pub type CategoryTotals = BTreeMap<String, Decimal>;

/// Product id to unit price
pub type PriceLookup = HashMap<u64, Decimal>;

/// User id to name
pub type NameLookup = HashMap<u64, UserName>;

/// The cart with the highest total value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartWinner {
    pub cart_id: u64,
    pub user_id: u64,
    pub owner_name: String,
    pub value: Decimal,
}

/// The two users living furthest from each other
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistantPair {
    pub first: User,
    pub second: User,
    pub distance_meters: f64,
}

/// Sum product prices per category
///
/// Fails with `Error::Overflow` when a total leaves the decimal range.
pub fn category_totals(products: &[Product]) -> Result<CategoryTotals> {
    let mut totals = CategoryTotals::new();
    for product in products {
        let total = totals.entry(product.category.clone()).or_default();
        *total = total.checked_add(product.price).ok_or_else(|| {
            Error::overflow(format!("total for category {:?}", product.category))
        })?;
    }
    Ok(totals)
}

/// Map product ids to prices, keeping the first price seen for an id
pub fn price_lookup(products: &[Product]) -> PriceLookup {
    let mut prices = PriceLookup::with_capacity(products.len());
    for product in products {
        prices.entry(product.id).or_insert(product.price);
    }
    prices
}

/// Map user ids to names, keeping the first name seen for an id
pub fn name_lookup(users: &[User]) -> NameLookup {
    let mut names = NameLookup::with_capacity(users.len());
    for user in users {
        names.entry(user.id).or_insert_with(|| user.name.clone());
    }
    names
}

/// Total value of one cart's line items
///
/// `cart_id` is only used to describe a failure: `Error::Lookup` for an
/// unknown product, `Error::Overflow` when the value leaves the decimal range.
pub fn cart_value(cart_id: u64, items: &[CartItem], prices: &PriceLookup) -> Result<Decimal> {
    items.iter().try_fold(Decimal::ZERO, |sum, item| {
        let price = prices
            .get(&item.product_id)
            .ok_or(LookupError::MissingProduct {
                cart_id,
                product_id: item.product_id,
            })?;
        price
            .checked_mul(Decimal::from(item.quantity))
            .and_then(|line| sum.checked_add(line))
            .ok_or_else(|| Error::overflow(format!("value of cart {}", cart_id)))
    })
}

/// Find the most valuable cart and resolve its owner's name
///
/// Every cart is valued, so an unknown product anywhere fails the whole
/// computation. Returns `Ok(None)` for an empty cart list.
pub fn highest_value_cart(
    carts: &[Cart],
    prices: &PriceLookup,
    names: &NameLookup,
) -> Result<Option<CartWinner>> {
    let mut best: Option<(&Cart, Decimal)> = None;

    for cart in carts {
        let value = cart_value(cart.id, &cart.items, prices)?;
        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((cart, value));
        }
    }

    let Some((cart, value)) = best else {
        return Ok(None);
    };

    let owner = names.get(&cart.user_id).ok_or(LookupError::MissingUser {
        cart_id: cart.id,
        user_id: cart.user_id,
    })?;

    Ok(Some(CartWinner {
        cart_id: cart.id,
        user_id: cart.user_id,
        owner_name: owner.display_name(),
        value,
    }))
}

/// Find the pair of users furthest apart by scanning every unordered pair once
///
/// The first pair seeds the maximum; a later pair replaces it only when its
/// distance is strictly greater. A NaN distance (non-finite coordinates) never
/// outranks a real one. Returns `None` for fewer than two users.
pub fn most_distant_users(users: &[User]) -> Option<DistantPair> {
    let mut best: Option<(usize, usize, f64)> = None;

    for i in 0..users.len() {
        for j in (i + 1)..users.len() {
            let distance = haversine_distance(users[i].location, users[j].location);
            if best.map_or(true, |(_, _, max)| distance > max || max.is_nan()) {
                best = Some((i, j, distance));
            }
        }
    }

    best.map(|(i, j, distance_meters)| DistantPair {
        first: users[i].clone(),
        second: users[j].clone(),
        distance_meters,
    })
}
