use fatebook_core::control::ControlError;
use rmcp::model::{CallToolResult, Content};
use tracing::warn;

use crate::format;

pub(crate) fn text_result(text: String) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text)])
}

/// Reports a failed operation as an error tool result rather than a protocol fault.
pub(crate) fn tool_failure(tool: &'static str, err: &ControlError) -> CallToolResult {
    warn!(tool, error = %err, "tool call failed");
    CallToolResult::error(vec![Content::text(format::render_error(err))])
}
