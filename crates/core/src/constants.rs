/// Message exposed to callers when a market data fetch fails
pub const MARKET_LOAD_ERROR_MESSAGE: &str = "Could not load market data";

/// Wire value of the carrier role
pub const ROLE_CARRIER: &str = "transportista";

/// Wire value of the provider (company) role
pub const ROLE_PROVIDER: &str = "empresa";

/// Wire value of the dual operator role
pub const ROLE_DUAL_OPERATOR: &str = "operador_dual";

/// Display name used when the user has no enterprise name
pub const DEFAULT_DISPLAY_NAME: &str = "CONEXA Logistics";

/// Avatar used when the user has no profile image
pub const DEFAULT_AVATAR_URL: &str = "https://placehold.co/100";

/// Route the logout flow lands on
pub const HOME_ROUTE: &str = "/";
