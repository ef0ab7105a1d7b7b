//! Catalog/ledger service client.
//!
//! Typed wrappers over [`Backend`] for the Game, Wallet, Purchase and User
//! resources. Create/update operations echo the catalog's record back as
//! raw JSON so handlers can return it to the client unmodified.

use reqwest::Method;
use serde_json::{json, Value};

use storefront_core::{Game, GameId, GameStatus, Purchase, PurchaseId, UserId, Wallet};

use super::{decode, Backend, BackendError};
use crate::config::CATALOG_CALL_TIMEOUT;

/// Client for the catalog/ledger service.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    backend: Backend,
}

impl CatalogClient {
    /// Create a client for the catalog service at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            backend: Backend::new("io_api", base_url, CATALOG_CALL_TIMEOUT),
        }
    }

    /// Fetch every game, regardless of status.
    pub async fn list_games(&self) -> Result<Vec<Game>, BackendError> {
        let value = self.backend.call(Method::GET, "/games", &[], None).await?;
        decode(&self.backend, Method::GET, "/games", value)
    }

    /// Fetch one game.
    pub async fn get_game(&self, gid: GameId) -> Result<Game, BackendError> {
        let path = format!("/games/{gid}");
        let value = self.backend.call(Method::GET, &path, &[], None).await?;
        decode(&self.backend, Method::GET, &path, value)
    }

    /// Create a game record.
    pub async fn create_game(&self, payload: &Value) -> Result<Value, BackendError> {
        self.backend
            .call(Method::POST, "/games", &[], Some(payload))
            .await
    }

    /// Apply a partial update to a game record.
    pub async fn update_game(&self, gid: GameId, payload: &Value) -> Result<Value, BackendError> {
        let path = format!("/games/{gid}");
        self.backend
            .call(Method::PUT, &path, &[], Some(payload))
            .await
    }

    /// Set a game's review status, leaving other fields untouched.
    pub async fn set_game_status(
        &self,
        gid: GameId,
        status: GameStatus,
    ) -> Result<Value, BackendError> {
        self.update_game(gid, &json!({ "status": status })).await
    }

    /// Delete a game record.
    pub async fn delete_game(&self, gid: GameId) -> Result<(), BackendError> {
        let path = format!("/games/{gid}");
        self.backend
            .call(Method::DELETE, &path, &[], None)
            .await
            .map(|_| ())
    }

    /// Fetch a user's wallet.
    pub async fn get_wallet(&self, uid: UserId) -> Result<Wallet, BackendError> {
        let path = format!("/wallets/{uid}");
        let value = self.backend.call(Method::GET, &path, &[], None).await?;
        decode(&self.backend, Method::GET, &path, value)
    }

    /// Write a user's wallet balance, returning the updated record.
    pub async fn put_wallet(&self, uid: UserId, balance: i64) -> Result<Wallet, BackendError> {
        let path = format!("/wallets/{uid}");
        let value = self
            .backend
            .call(Method::PUT, &path, &[], Some(&json!({ "balance": balance })))
            .await?;
        decode(&self.backend, Method::PUT, &path, value)
    }

    /// Fetch one purchase record.
    pub async fn get_purchase(&self, pid: PurchaseId) -> Result<Purchase, BackendError> {
        let path = format!("/purchases/{pid}");
        let value = self.backend.call(Method::GET, &path, &[], None).await?;
        decode(&self.backend, Method::GET, &path, value)
    }

    /// List purchases, optionally filtered by user and/or game.
    pub async fn list_purchases(
        &self,
        user_id: Option<UserId>,
        game_id: Option<GameId>,
    ) -> Result<Vec<Purchase>, BackendError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(uid) = user_id {
            query.push(("user_id", uid.to_string()));
        }
        if let Some(gid) = game_id {
            query.push(("game_id", gid.to_string()));
        }
        let value = self
            .backend
            .call(Method::GET, "/purchases", &query, None)
            .await?;
        decode(&self.backend, Method::GET, "/purchases", value)
    }

    /// Create a purchase record for (user, game).
    pub async fn create_purchase(
        &self,
        user_id: UserId,
        game_id: GameId,
    ) -> Result<Value, BackendError> {
        self.backend
            .call(
                Method::POST,
                "/purchases",
                &[],
                Some(&json!({ "user_id": user_id, "game_id": game_id })),
            )
            .await
    }

    /// Delete a purchase record.
    pub async fn delete_purchase(&self, pid: PurchaseId) -> Result<(), BackendError> {
        let path = format!("/purchases/{pid}");
        self.backend
            .call(Method::DELETE, &path, &[], None)
            .await
            .map(|_| ())
    }

    /// List all users (admin delegation).
    pub async fn list_users(&self) -> Result<Value, BackendError> {
        self.backend.call(Method::GET, "/users", &[], None).await
    }

    /// Liveness probe.
    pub async fn health(&self) -> bool {
        self.backend.probe_health().await
    }
}
