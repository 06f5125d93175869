//! 基础设施层：配置、日志、存储

pub mod config;
pub mod database;
pub mod logger;
pub mod memory;
pub mod repository;

use std::sync::Arc;
use tracing::info;

use config::DatabaseConfig;
use database::DatabaseManager;
use memory::MemoryRepository;
use repository::{Repository, StoreError};

/// 根据连接串选择存储后端
pub async fn open_repository(config: &DatabaseConfig) -> Result<Arc<dyn Repository>, StoreError> {
    if config.is_memory() {
        info!("Using in-memory storage");
        return Ok(Arc::new(MemoryRepository::new()));
    }
    let manager = DatabaseManager::connect(config).await?;
    Ok(Arc::new(manager.into_repository()))
}
