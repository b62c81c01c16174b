//! 应用运行配置加载。

use std::env;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub database_url: String,
    pub pool_min_connections: u32,
    pub pool_max_connections: u32,
    pub pool_acquire_timeout_seconds: u64,
    pub cors_origins: Vec<String>,
}

const DEFAULT_CORS_ORIGINS: &str = "http://localhost:5173,http://localhost:3000";

impl AppConfig {
    /// 从环境变量读取配置。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 通过任意键查找函数读取配置。
    ///
    /// # 参数
    /// - `lookup`：按键名返回取值，测试中可注入固定值
    ///
    /// # 返回
    /// - `Result<AppConfig, ConfigError>`：配置或缺失/非法值错误
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let http_addr = read_optional(&lookup, "COMPANY_HTTP_ADDR")
            .unwrap_or_else(|| "127.0.0.1:8000".to_string());
        let database_url = match read_optional(&lookup, "COMPANY_DATABASE_URL") {
            Some(url) => url,
            None => mysql_url_from_parts(&lookup)?,
        };
        let pool_min_connections = read_u32_with_default(&lookup, "COMPANY_DB_POOL_MIN", 1)?;
        let pool_max_connections = read_u32_with_default(&lookup, "COMPANY_DB_POOL_MAX", 10)?;
        if pool_max_connections == 0 || pool_max_connections < pool_min_connections {
            return Err(ConfigError::Invalid(
                "COMPANY_DB_POOL_MAX".to_string(),
                pool_max_connections.to_string(),
            ));
        }
        let pool_acquire_timeout_seconds =
            read_u64_with_default(&lookup, "COMPANY_DB_ACQUIRE_TIMEOUT_SECONDS", 30)?;
        let cors_origins = read_cors_origins(&lookup)?;

        Ok(Self {
            http_addr,
            database_url,
            pool_min_connections,
            pool_max_connections,
            pool_acquire_timeout_seconds,
            cors_origins,
        })
    }
}

/// 由单独的连接参数拼出 `mysql://` URL，用户名与密码做百分号编码。
fn mysql_url_from_parts<F>(lookup: &F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let host = read_required(lookup, "COMPANY_DB_HOST")?;
    let port = read_u16_with_default(lookup, "COMPANY_DB_PORT", 3306)?;
    let user = read_required(lookup, "COMPANY_DB_USER")?;
    let password = lookup("COMPANY_DB_PASSWORD").unwrap_or_default();
    let database = read_required(lookup, "COMPANY_DB_NAME")?;

    let credentials = if password.is_empty() {
        urlencoding::encode(&user).into_owned()
    } else {
        format!(
            "{}:{}",
            urlencoding::encode(&user),
            urlencoding::encode(&password)
        )
    };
    Ok(format!("mysql://{credentials}@{host}:{port}/{database}"))
}

/// 只接受明确的来源；允许携带凭证，因此拒绝 `*`。
fn read_cors_origins<F>(lookup: &F) -> Result<Vec<String>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = read_optional(lookup, "COMPANY_CORS_ORIGINS")
        .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string());
    let origins: Vec<String> = raw
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect();
    if origins.iter().any(|origin| origin == "*") {
        return Err(ConfigError::Invalid("COMPANY_CORS_ORIGINS".to_string(), raw));
    }
    Ok(origins)
}

fn read_required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    read_optional(lookup, key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}

fn read_optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

fn read_u16_with_default<F>(lookup: &F, key: &str, default: u16) -> Result<u16, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = read_optional(lookup, key) else {
        return Ok(default);
    };
    value
        .parse::<u16>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u32_with_default<F>(lookup: &F, key: &str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = read_optional(lookup, key) else {
        return Ok(default);
    };
    value
        .parse::<u32>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u64_with_default<F>(lookup: &F, key: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = read_optional(lookup, key) else {
        return Ok(default);
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}
