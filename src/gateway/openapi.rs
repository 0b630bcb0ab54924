//! OpenAPI documentation
//!
//! - OpenAPI JSON: `http://localhost:8080/api-docs/openapi.json`

use utoipa::OpenApi;

use crate::gateway::handlers::{HealthResponse, TransactionRequest};
use crate::gateway::types::{ErrorResponse, MessageResponse};
use crate::store::{Balance, HistoryEntry};

/// Main API documentation struct
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Timeledger API",
        version = "0.1.0",
        description = "Transactional money transfers over a bitemporal balance model: \
                       every past observation stays reproducible.",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development"),
    ),
    paths(
        crate::gateway::handlers::health_check,
        crate::gateway::handlers::create_transaction,
        crate::gateway::handlers::get_balance,
        crate::gateway::handlers::get_history,
    ),
    components(
        schemas(
            HealthResponse,
            TransactionRequest,
            MessageResponse,
            ErrorResponse,
            Balance,
            HistoryEntry,
        )
    ),
    tags(
        (name = "Transactions", description = "Transfer submission and history"),
        (name = "Balances", description = "Point-in-time balance queries"),
        (name = "System", description = "Health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_generates() {
        let spec = ApiDoc::openapi();
        assert_eq!(spec.info.title, "Timeledger API");
        assert_eq!(spec.info.version, "0.1.0");
    }

    #[test]
    fn test_openapi_json_serializable() {
        let spec = ApiDoc::openapi();
        let json = spec.to_json();
        assert!(json.is_ok());
        assert!(json.unwrap().contains("Timeledger API"));
    }

    #[test]
    fn test_endpoints_registered() {
        let spec = ApiDoc::openapi();
        let paths = spec.paths;
        assert!(paths.paths.contains_key("/health"));
        assert!(paths.paths.contains_key("/transactions"));
        assert!(paths.paths.contains_key("/balances/{user_id}"));
        assert!(paths.paths.contains_key("/transactions/{user_id}"));
    }
}
