use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::FatebookMcp;

/// Payload listing the MCP commands served by fatebook-mcp.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            commands: vec![
                "help - List MCP commands served by fatebook-mcp.".to_string(),
                "health - Returns 'ok'.".to_string(),
                "list_predictions - List your unresolved, non-public predictions with their IDs."
                    .to_string(),
                "list_predictions_filtered - List predictions with resolved/public/search/tag/tournament filters."
                    .to_string(),
                "search_predictions - Find predictions whose titles match a description."
                    .to_string(),
                "get_prediction_details - Show one prediction with its full forecast history."
                    .to_string(),
                "update_prediction - Record a new probability (0.0 to 1.0) with an optional comment."
                    .to_string(),
            ],
        }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl FatebookMcp {
    #[tool(description = "List the MCP commands served by fatebook-mcp.")]
    pub async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(HelpCommands::default())?]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_every_prediction_tool() {
        let help = HelpCommands::default();
        for tool in [
            "list_predictions ",
            "list_predictions_filtered",
            "search_predictions",
            "get_prediction_details",
            "update_prediction",
        ] {
            assert!(
                help.commands.iter().any(|command| command.starts_with(tool)),
                "missing {tool}"
            );
        }
    }
}
