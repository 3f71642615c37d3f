//! Store API client
//!
//! Fetches users, carts and products from a fakestoreapi-compatible HTTP API.
//! The three collections are requested concurrently and joined before any
//! computation starts; the first failure fails the whole fetch.
//!
//! API Documentation: https://fakestoreapi.com/docs

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use crate::config::Config;
use crate::domain::result::{Error, FetchError, Result};
use crate::domain::{Cart, CartItem, GeoPoint, Product, User, UserName};
use crate::ports::{DataSupplier, Dataset};

// =============================================================================
// API Response Models (matching the fakestore payloads)
// =============================================================================

/// User record from `GET /users`
#[derive(Debug, Clone, Deserialize)]
pub struct StoreUser {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    pub name: StoreName,
    pub address: StoreAddress,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreName {
    pub firstname: String,
    pub lastname: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreAddress {
    pub geolocation: StoreGeolocation,
}

/// Coordinates arrive as decimal strings ("-37.3159"), sometimes as numbers
#[derive(Debug, Clone, Deserialize)]
pub struct StoreGeolocation {
    pub lat: JsonValue,
    pub long: JsonValue,
}

/// Product record from `GET /products`
#[derive(Debug, Clone, Deserialize)]
pub struct StoreProduct {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    pub price: JsonValue,
    pub category: String,
}

/// Cart record from `GET /carts`
#[derive(Debug, Clone, Deserialize)]
pub struct StoreCart {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: u64,
    #[serde(rename = "userId", deserialize_with = "deserialize_id")]
    pub user_id: u64,
    pub products: Vec<StoreCartItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreCartItem {
    #[serde(rename = "productId", deserialize_with = "deserialize_id")]
    pub product_id: u64,
    pub quantity: i64,
}

/// Deserialize ID that can be number or numeric string
fn deserialize_id<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;
    let value: JsonValue = Deserialize::deserialize(deserializer)?;
    match value {
        JsonValue::Number(n) => n
            .as_u64()
            .ok_or_else(|| D::Error::custom(format!("invalid id: {}", n))),
        JsonValue::String(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid id: {}", s))),
        _ => Err(D::Error::custom("expected number or string for id")),
    }
}

/// Read a decimal from a JSON number or numeric string
fn decimal_from_json(value: &JsonValue) -> Option<Decimal> {
    match value {
        JsonValue::Number(n) => n.to_string().parse().ok(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Read a float from a JSON number or numeric string
fn float_from_json(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// =============================================================================
// Mapping to domain records
// =============================================================================

/// Map a store user to a domain User, rejecting unusable coordinates
pub fn map_user(store_user: &StoreUser) -> std::result::Result<User, FetchError> {
    let geo = &store_user.address.geolocation;
    let (Some(latitude), Some(longitude)) = (float_from_json(&geo.lat), float_from_json(&geo.long))
    else {
        return Err(FetchError::malformed(
            "users",
            format!("user {} has a non-numeric geolocation", store_user.id),
        ));
    };

    let user = User::new(
        store_user.id,
        UserName::new(&store_user.name.firstname, &store_user.name.lastname),
        GeoPoint::new(latitude, longitude),
    );
    user.validate()?;
    Ok(user)
}

/// Map a store product to a domain Product
pub fn map_product(store_product: &StoreProduct) -> std::result::Result<Product, FetchError> {
    let price = decimal_from_json(&store_product.price).ok_or_else(|| {
        FetchError::malformed(
            "products",
            format!("product {} has a non-numeric price", store_product.id),
        )
    })?;

    let mut product = Product::new(store_product.id, &store_product.category, price);
    product.title = store_product.title.clone();
    product.validate()?;
    Ok(product)
}

/// Map a store cart to a domain Cart
pub fn map_cart(store_cart: &StoreCart) -> std::result::Result<Cart, FetchError> {
    let items = store_cart
        .products
        .iter()
        .map(|item| {
            u32::try_from(item.quantity)
                .map(|quantity| CartItem::new(item.product_id, quantity))
                .map_err(|_| {
                    FetchError::malformed(
                        "carts",
                        format!(
                            "cart {} has invalid quantity {} for product {}",
                            store_cart.id, item.quantity, item.product_id
                        ),
                    )
                })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let cart = Cart::new(store_cart.id, store_cart.user_id, items);
    cart.validate()?;
    Ok(cart)
}

// =============================================================================
// Store HTTP Client
// =============================================================================

/// Store API client
#[derive(Debug)]
pub struct FakeStoreClient {
    client: Client,
    config: Config,
}

impl FakeStoreClient {
    /// Create a client for the configured base URL and cart window
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Fetch all users
    pub async fn get_users(&self) -> std::result::Result<Vec<User>, FetchError> {
        let url = format!("{}/users", self.config.base_url);
        let users: Vec<StoreUser> = self.get_json("users", &url, &[]).await?;
        users.iter().map(map_user).collect()
    }

    /// Fetch carts inside the configured date window
    pub async fn get_carts(&self) -> std::result::Result<Vec<Cart>, FetchError> {
        let url = format!("{}/carts/", self.config.base_url);
        let start = self.config.carts_start_date.format("%Y-%m-%d").to_string();
        let end = self.config.carts_end_date.format("%Y-%m-%d").to_string();
        let carts: Vec<StoreCart> = self
            .get_json("carts", &url, &[("startdate", start), ("enddate", end)])
            .await?;
        carts.iter().map(map_cart).collect()
    }

    /// Fetch all products
    pub async fn get_products(&self) -> std::result::Result<Vec<Product>, FetchError> {
        let url = format!("{}/products", self.config.base_url);
        let products: Vec<StoreProduct> = self.get_json("products", &url, &[]).await?;
        products.iter().map(map_product).collect()
    }

    /// GET a resource and decode its JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        resource: &str,
        url: &str,
        query: &[(&str, String)],
    ) -> std::result::Result<T, FetchError> {
        tracing::debug!(resource, url, "requesting");

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| map_request_error(resource, e))?;

        check_response_status(resource, &response)?;

        let body = response
            .text()
            .await
            .map_err(|e| map_request_error(resource, e))?;

        let decoded = serde_json::from_str(&body)
            .map_err(|e| FetchError::decode(resource, e.to_string()))?;

        tracing::debug!(resource, bytes = body.len(), "received");
        Ok(decoded)
    }
}

/// Map request errors to the fetch taxonomy
fn map_request_error(resource: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            resource: resource.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            resource: resource.to_string(),
            message: error.to_string(),
        }
    } else {
        FetchError::Request {
            resource: resource.to_string(),
            message: error.to_string(),
        }
    }
}

/// Any non-success status fails the resource
fn check_response_status(
    resource: &str,
    response: &reqwest::Response,
) -> std::result::Result<(), FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Status {
            resource: resource.to_string(),
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl DataSupplier for FakeStoreClient {
    fn name(&self) -> &str {
        "fakestore"
    }

    async fn fetch_all(&self) -> Result<Dataset> {
        let (users, carts, products) =
            tokio::try_join!(self.get_users(), self.get_carts(), self.get_products())?;
        Ok(Dataset::new(users, carts, products))
    }
}

// =============================================================================
// Tests
// =============================================================================
