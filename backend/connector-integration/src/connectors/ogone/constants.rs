//! Constants for Ogone connector

// ===== ENDPOINTS =====
pub const BASE_URL: &str = "https://secure.ogone.com/ncol/";
pub const TEST_ENVIRONMENT: &str = "test";
pub const PRODUCTION_ENVIRONMENT: &str = "prod";
pub const STANDARD_ORDER_PAGE: &str = "orderstandard";
pub const DIRECT_QUERY_PAGE: &str = "querydirect";
pub const UTF8_PAGE_SUFFIX: &str = "_utf8";
pub const PAGE_EXTENSION: &str = ".asp";

// ===== REQUEST PARAMETERS =====
pub const PSPID: &str = "PSPID";
pub const ORDER_ID: &str = "ORDERID";
pub const AMOUNT: &str = "AMOUNT";
pub const CURRENCY: &str = "CURRENCY";
pub const LANGUAGE: &str = "LANGUAGE";
pub const SHA_SIGN: &str = "SHASIGN";

/// Extended data key a shop uses for the customer's locale.
pub const EXTENDED_DATA_LANG: &str = "lang";

// ===== RESPONSE ATTRIBUTES =====
pub const STATUS: &str = "STATUS";
pub const PAY_ID: &str = "PAYID";
pub const NC_ERROR: &str = "NCERROR";
pub const NC_ERROR_PLUS: &str = "NCERRORPLUS";
pub const RESPONSE_AMOUNT: &str = "AMOUNT";

/// `NCERROR` value of a response without error.
pub const NO_ERROR: &str = "0";
/// `NCERRORPLUS` placeholder the gateway sends when there is nothing to say.
pub const NO_ERROR_DESCRIPTION: &str = "!";

// ===== STATUS CODES =====
pub const INCOMPLETE_OR_INVALID: u16 = 0;
pub const APPROVED_STATUSES: [u16; 5] = [5, 9, 91, 92, 95];
pub const APPROVING_STATUSES: [u16; 7] = [41, 50, 51, 52, 55, 59, 99];
pub const DEPOSITED_STATUSES: [u16; 2] = [9, 95];
pub const DEPOSITING_STATUSES: [u16; 3] = [91, 92, 99];

/// Gateway amounts are expressed in major units with two decimals.
pub const AMOUNT_EXPONENT: u32 = 2;

