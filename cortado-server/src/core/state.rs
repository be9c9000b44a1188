use dashmap::DashMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::{Config, Result};
use crate::ledgers::{EarningsLedger, InventoryLedger, LedgerStorage, VenueRegistry};
use crate::orders::{OrderStorage, OrdersManager};

/// 资源版本管理器
///
/// 使用 DashMap 实现无锁并发的版本号管理。
/// 每种资源类型维护独立的版本号，支持原子递增。
///
/// # 使用场景
///
/// 每次成功的变更操作递增对应资源的版本号，
/// 客户端轮询时通过版本号判断本地缓存是否过期。
#[derive(Debug)]
pub struct ResourceVersions {
    versions: DashMap<String, u64>,
}

impl ResourceVersions {
    /// 创建空的版本管理器
    pub fn new() -> Self {
        Self {
            versions: DashMap::new(),
        }
    }

    /// 递增指定资源的版本号并返回新值
    ///
    /// 如果资源不存在，从 0 开始递增（返回 1）
    pub fn increment(&self, resource: &str) -> u64 {
        let mut entry = self.versions.entry(resource.to_string()).or_insert(0);
        *entry += 1;
        *entry
    }

    /// 获取指定资源的当前版本号
    ///
    /// 如果资源不存在，返回 0
    pub fn get(&self, resource: &str) -> u64 {
        self.versions.get(resource).map(|v| *v).unwrap_or(0)
    }
}

impl Default for ResourceVersions {
    fn default() -> Self {
        Self::new()
    }
}

/// 服务器状态 - 持有所有引擎组件的共享引用
///
/// 使用 Arc 实现浅拷贝，克隆成本极低。
///
/// # 组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | order_storage | OrderStorage | 订单存储 (redb) |
/// | ledger_storage | LedgerStorage | 台账存储 (同一数据库) |
/// | orders | OrdersManager | 订单合并与条目生命周期 |
/// | venues | VenueRegistry | 场馆注册 |
/// | earnings | EarningsLedger | 收入折叠 |
/// | inventory | InventoryLedger | 库存流水 |
/// | resource_versions | Arc<ResourceVersions> | 资源版本管理 |
#[derive(Clone)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 订单存储
    pub order_storage: OrderStorage,
    /// 台账存储（与订单共享同一数据库文件）
    pub ledger_storage: LedgerStorage,
    /// 订单管理器
    pub orders: OrdersManager,
    /// 场馆注册表
    pub venues: VenueRegistry,
    /// 收入台账
    pub earnings: EarningsLedger,
    /// 库存台账
    pub inventory: InventoryLedger,
    /// 资源版本管理器
    pub resource_versions: Arc<ResourceVersions>,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 按顺序初始化：
    /// 1. 工作目录 (确保存在)
    /// 2. 数据库 (work_dir/engine.redb，订单和台账共用)
    /// 3. 各引擎组件
    pub fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir()?;

        let order_storage = OrderStorage::open(config.database_path())?;
        let ledger_storage = LedgerStorage::attach(order_storage.database())?;
        let tz = config.business_timezone;

        Ok(Self {
            config: config.clone(),
            orders: OrdersManager::new(order_storage.clone(), tz),
            venues: VenueRegistry::new(ledger_storage.clone()),
            earnings: EarningsLedger::new(order_storage.clone(), ledger_storage.clone(), tz),
            inventory: InventoryLedger::new(ledger_storage.clone()),
            order_storage,
            ledger_storage,
            resource_versions: Arc::new(ResourceVersions::new()),
        })
    }

    /// 基于内存数据库的状态（测试用）
    pub fn initialize_in_memory(config: &Config) -> Result<Self> {
        let order_storage = OrderStorage::open_in_memory()?;
        let ledger_storage = LedgerStorage::attach(order_storage.database())?;
        let tz = config.business_timezone;

        Ok(Self {
            config: config.clone(),
            orders: OrdersManager::new(order_storage.clone(), tz),
            venues: VenueRegistry::new(ledger_storage.clone()),
            earnings: EarningsLedger::new(order_storage.clone(), ledger_storage.clone(), tz),
            inventory: InventoryLedger::new(ledger_storage.clone()),
            order_storage,
            ledger_storage,
            resource_versions: Arc::new(ResourceVersions::new()),
        })
    }

    /// 获取工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// 变更成功后递增资源版本号
    pub fn bump_version(&self, resource: &str) -> u64 {
        self.resource_versions.increment(resource)
    }
}
