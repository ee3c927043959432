//! Statement execution with normalized responses.

use bp_graph::{CypherRunner, Params};
use tracing::debug;

use crate::response::{ApiError, ApiResult, QueryOk};

/// Run `statement` and normalize the outcome.
///
/// Rows come back as `QueryOk`; no rows is still success. Any failure, from a
/// malformed statement to a dropped connection, becomes [`ApiError::Internal`]
/// after its cause is logged.
pub async fn execute(runner: &dyn CypherRunner, statement: &str, params: &Params) -> ApiResult<QueryOk> {
    debug!(statement, params = params.len(), "Executing statement");

    match runner.run(statement, params).await {
        Ok(rows) => Ok(QueryOk::new(rows)),
        Err(err) => Err(ApiError::internal(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::INTERNAL_ERROR_MSG;
    use crate::testing::ScriptedRunner;
    use serde_json::json;

    #[tokio::test]
    async fn test_rows_are_returned() {
        let runner = ScriptedRunner::new().with_rows("RETURN timestamp()", vec![json!({"ts": 1})]);
        let ok = execute(&runner, "RETURN timestamp()", &Params::new()).await.unwrap();
        assert_eq!(ok.status().as_u16(), 200);
        assert_eq!(ok.msg, "OK");
        assert_eq!(ok.data.len(), 1);
    }

    #[tokio::test]
    async fn test_no_rows_is_success() {
        let runner = ScriptedRunner::new();
        let ok = execute(&runner, "MATCH (n:Nothing) RETURN n", &Params::new()).await.unwrap();
        assert_eq!(ok.status().as_u16(), 200);
        assert!(ok.data.is_empty());
    }

    #[tokio::test]
    async fn test_bad_syntax_is_internal_error() {
        let runner = ScriptedRunner::new();
        let err = execute(&runner, "not a cypher query", &Params::new()).await.unwrap_err();
        assert_eq!(err, ApiError::Internal);
        assert_eq!(err.body().msg, INTERNAL_ERROR_MSG);
    }

    #[tokio::test]
    async fn test_collaborator_fault_is_same_internal_error() {
        let runner = ScriptedRunner::failing("connection refused");
        let err = execute(&runner, "RETURN timestamp()", &Params::new()).await.unwrap_err();
        assert_eq!(err.status().as_u16(), 500);
        assert_eq!(err.body().msg, INTERNAL_ERROR_MSG);

        let syntax = execute(&ScriptedRunner::new(), "not a cypher query", &Params::new())
            .await
            .unwrap_err();
        assert_eq!(err.body(), syntax.body());
    }
}
