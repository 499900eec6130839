//! Mapping core errors onto MCP error data.

use rmcp::ErrorData as McpError;
use tend_core::CareError;

/// Lookups of missing plants or tasks and bad input are the caller's fault;
/// everything else is reported as an internal error.
pub fn to_mcp_error(message: &str, error: &CareError) -> McpError {
    let text = format!("{message}: {error}");
    match error {
        CareError::PlantNotFound { .. }
        | CareError::TaskNotFound { .. }
        | CareError::TaskClosed { .. }
        | CareError::InvalidInput { .. }
        | CareError::Schedule(_) => McpError::invalid_params(text, None),
        _ => McpError::internal_error(text, None),
    }
}

#[cfg(test)]
mod tests {
    use rmcp::model::ErrorCode;

    use super::*;

    #[test]
    fn test_missing_task_is_invalid_params() {
        let error = to_mcp_error("Failed to show task", &CareError::TaskNotFound { id: 9 });
        assert_eq!(error.code, ErrorCode::INVALID_PARAMS);
        assert!(error.message.contains("Failed to show task"));
    }

    #[test]
    fn test_configuration_is_internal() {
        let error = to_mcp_error(
            "Failed",
            &CareError::Configuration {
                message: "broken".to_string(),
            },
        );
        assert_eq!(error.code, ErrorCode::INTERNAL_ERROR);
    }
}
