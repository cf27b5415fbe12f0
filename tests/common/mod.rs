pub mod mock_server;
pub mod test_context;

/// Open id bound to a merchant account when the mock server starts.
pub const BOUND_OPEN_ID: &str = "10001";

/// Group allow-listed in every new test context.
pub const ALLOWED_GROUP_ID: i64 = 123456;

/// Ticket accepted by the mock bind route.
pub const VALID_TICKET: &str = "valid-ticket";
