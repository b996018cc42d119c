// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::config::settings::DatabaseSettings;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use std::time::Duration;
use tracing::info;

/// 连接的最长存活时间
const MAX_LIFETIME: Duration = Duration::from_secs(3600);

/// 创建预测/告警/建议记录使用的连接池
///
/// # 参数
///
/// * `settings` - `[database]` 配置
///
/// # 返回值
///
/// * `Ok(DatabaseConnection)` - 数据库连接
/// * `Err(DbErr)` - 连接过程中出现的错误
pub async fn create_pool(settings: &DatabaseSettings) -> Result<DatabaseConnection, DbErr> {
    let options = connect_options(settings);
    info!(
        "Connecting to {} (max {} connections)",
        if settings.is_in_memory_sqlite() {
            "in-memory sqlite"
        } else {
            "database"
        },
        options
            .get_max_connections()
            .map_or_else(|| "default".to_string(), |max| max.to_string())
    );
    Database::connect(options).await
}

/// 把配置转换为连接参数
///
/// 内存 SQLite 固定为单连接，迁移和后续查询才能看到同一个库；
/// 运行记录的事务也占用这一个连接
pub fn connect_options(settings: &DatabaseSettings) -> ConnectOptions {
    let mut options = ConnectOptions::new(settings.url.clone());

    let max_connections = if settings.is_in_memory_sqlite() {
        Some(1)
    } else {
        settings.max_connections
    };
    if let Some(max) = max_connections {
        options.max_connections(max);
    }
    if let Some(min) = settings.min_connections {
        options.min_connections(max_connections.map_or(min, |max| min.min(max)));
    }

    if let Some(secs) = settings.connect_timeout {
        options
            .connect_timeout(Duration::from_secs(secs))
            .acquire_timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = settings.idle_timeout {
        options.idle_timeout(Duration::from_secs(secs));
    }

    options.max_lifetime(MAX_LIFETIME).sqlx_logging(true);
    options
}
