//! Order gateways that persist locally instead of calling the order backend.
//!
//! * [`JsonOutbox`] writes every accepted order to `<dir>/order-<id>.json`.
//! * [`InMemoryOrders`] keeps accepted orders in memory.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use anyhow::Context;
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tracing::info;

use sourcing_common::models::order::{NewOrder, OrderId};
use sourcing_common::ordering::OrderGateway;

const FILE_PREFIX: &str = "order-";
const FILE_SUFFIX: &str = ".json";

pub struct JsonOutbox {
    dir: PathBuf,
    // Serializes id assignment and the write of the order file.
    lock: tokio::sync::Mutex<()>,
}

impl JsonOutbox {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: tokio::sync::Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn order_path(&self, id: OrderId) -> PathBuf {
        self.dir.join(format!("{FILE_PREFIX}{}{FILE_SUFFIX}", id.0))
    }

    async fn last_id(&self) -> anyhow::Result<u64> {
        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .with_context(|| format!("failed to list outbox {}", self.dir.display()))?;

        let mut last = 0;
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let id = name
                .to_str()
                .and_then(|name| name.strip_prefix(FILE_PREFIX))
                .and_then(|rest| rest.strip_suffix(FILE_SUFFIX))
                .and_then(|digits| digits.parse::<u64>().ok());
            if let Some(id) = id {
                last = last.max(id);
            }
        }
        Ok(last)
    }
}

#[async_trait]
impl OrderGateway for JsonOutbox {
    async fn create_order(&self, order: &NewOrder) -> anyhow::Result<OrderId> {
        let _guard = self.lock.lock().await;

        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("failed to create outbox {}", self.dir.display()))?;

        let id = OrderId(self.last_id().await? + 1);
        let path = self.order_path(id);
        let body = serde_json::to_string_pretty(order)?;
        write_new(&path, body.as_bytes())
            .await
            .with_context(|| format!("failed to write {}", path.display()))?;

        info!(order_id = %id, path = %path.display(), "order written to outbox");
        Ok(id)
    }
}

/// Writes `body` to a file that must not exist yet. An id taken by another writer fails here
/// instead of replacing that order.
async fn write_new(path: &Path, body: &[u8]) -> std::io::Result<()> {
    let mut file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(body).await?;
    file.flush().await
}

#[derive(Default)]
pub struct InMemoryOrders {
    orders: Mutex<Vec<NewOrder>>,
}

impl InMemoryOrders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accepted orders; the order at index `i` has id `i + 1`.
    pub fn orders(&self) -> Vec<NewOrder> {
        self.orders
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl OrderGateway for InMemoryOrders {
    async fn create_order(&self, order: &NewOrder) -> anyhow::Result<OrderId> {
        let mut orders = self
            .orders
            .lock()
            .map_err(|_| anyhow::anyhow!("in-memory order store is poisoned"))?;
        orders.push(order.clone());
        Ok(OrderId(orders.len() as u64))
    }
}
