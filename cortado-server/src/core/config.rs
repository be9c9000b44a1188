use chrono_tz::Tz;
use std::path::PathBuf;

/// 服务器配置 - 订单引擎的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录（数据库文件所在） |
/// | HTTP_PORT | 8080 | HTTP 服务端口 |
/// | LOG_LEVEL | info | 日志级别 |
/// | LOG_DIR | (无) | 日志文件目录，缺省只输出到控制台 |
/// | BUSINESS_TIMEZONE | Asia/Kolkata | 业务时区（营业日与月份边界） |
/// | REPORT_MINUTE_OFFSET | 5 | 每月 1 号报表触发的分钟偏移 |
/// | ENVIRONMENT | development | 运行环境 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/cortado HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 日志级别 (EnvFilter 语法)
    pub log_level: String,
    /// 日志文件目录
    pub log_dir: Option<String>,
    /// 业务时区，决定营业日和月份边界
    pub business_timezone: Tz,
    /// 月度报表触发时刻：每月 1 号 00 点后的分钟数
    pub report_minute_offset: u32,
    /// 运行环境: development | staging | production
    pub environment: String,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        let business_timezone = match std::env::var("BUSINESS_TIMEZONE") {
            Ok(name) => name.parse().unwrap_or_else(|_| {
                tracing::warn!(timezone = %name, "Unknown BUSINESS_TIMEZONE, falling back to Asia/Kolkata");
                chrono_tz::Asia::Kolkata
            }),
            Err(_) => chrono_tz::Asia::Kolkata,
        };

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
            business_timezone,
            report_minute_offset: std::env::var("REPORT_MINUTE_OFFSET")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 数据库文件路径: work_dir/engine.redb
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.work_dir).join("engine.redb")
    }

    /// 确保工作目录存在
    pub fn ensure_work_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.work_dir)
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
