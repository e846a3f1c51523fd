//! Shared constants and invariants

pub const DEFAULT_BASE_URL: &str = "https://rekisteripalvelut.prh.fi:9193";
pub const DEFAULT_TIMEOUT_MS: u64 = 120_000;
pub const DEFAULT_DNS_CACHE_TTL_SECS: u64 = 300;
pub const KEEP_ALIVE_INTERVAL_SECS: u64 = 60;
pub const POOL_IDLE_TIMEOUT_SECS: u64 = 90;

// Auth endpoints
pub const AUTH_URL_PRODUCTION: &str = "https://auth.prh.fi/oxauth/restv1/token";
pub const AUTH_URL_TEST: &str = "https://auth.asi.prh.fi/oxauth/restv1/token";
/// Base urls containing this marker belong to the test environment.
pub const TEST_ENVIRONMENT_MARKER: &str = "asi";
pub const AUTH_GRANT_TYPE: &str = "password";
pub const AUTH_SCOPE: &str = "openid profile email group_membership";

// Registry endpoints
pub const FINANCIAL_PERIODS_PATH: &str = "/ttfs/1.0.0/financialPeriods";
pub const FINANCIAL_STATEMENTS_PATH: &str = "/ttfs/1.0.0/financialStatements";
