//! Route paths.

pub const GET_API_HEALTH: &str = "/api/health";

pub const POST_AUTH_LOGIN: &str = "/auth/login";
pub const POST_AUTH_REGISTER: &str = "/auth/register";
pub const POST_AUTH_REFRESH: &str = "/auth/refresh";
pub const POST_AUTH_LOGOUT: &str = "/auth/logout";
pub const GET_AUTH_ME: &str = "/auth/me";

pub const API_STAFF: &str = "/api/staff";
pub const API_STAFF_ID: &str = "/api/staff/{id}";
pub const API_INVENTORY: &str = "/api/inventory";
pub const API_INVENTORY_ID: &str = "/api/inventory/{id}";
