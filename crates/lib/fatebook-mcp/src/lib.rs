//! MCP server implementation for fatebook-mcp.
//!
//! This crate wires the Fatebook control plane into rmcp tool handlers and
//! renders every result as text an assistant can relay to the user.

mod helpers;
pub mod format;
pub mod server;
pub mod tools;

use fatebook_core::control::FatebookControlPlane;
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};

const SERVER_INSTRUCTIONS: &str = r"fatebook-mcp exposes your Fatebook predictions as MCP tools.

Workflow:
1. Call `list_predictions` to see your open predictions. Each entry carries an ID.
   Use the IDs internally for follow-up calls; do not show them to the user unless asked.
2. If the user describes a prediction in words, call `search_predictions` to find its ID.
3. Call `get_prediction_details` for the full forecast history of one prediction.
4. Call `update_prediction` with the ID and a probability between 0.0 and 1.0 to record a new forecast.
5. `list_predictions_filtered` supports resolved/public/search/tag/tournament filters.

Notes:
- Probabilities are fractions: 0.35 means 35%.
- Failed calls return an error result with a readable message; they are never retried.
- `help` lists the tools. `health` returns `ok`.";

/// MCP server wrapper around the Fatebook control plane and tool routers.
#[derive(Clone)]
pub struct FatebookMcp {
    tool_router: ToolRouter<Self>,
    control: FatebookControlPlane,
}

impl FatebookMcp {
    /// Creates a new server around a control plane.
    #[must_use]
    pub fn new(control: FatebookControlPlane) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_predictions()
            + Self::tool_router_context();
        Self {
            tool_router,
            control,
        }
    }

    pub(crate) const fn control(&self) -> &FatebookControlPlane {
        &self.control
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl FatebookMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    pub async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for FatebookMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
