use serde_json::{json, Value};

use crate::tool::{Arguments, CallContext, ToolError};

pub const NAME: &str = "echo";

pub fn input_schema() -> Value {
    json!({
        "type": "object",
        "additionalProperties": true
    })
}

pub async fn handle(_ctx: CallContext, args: Arguments) -> Result<Value, ToolError> {
    Ok(Value::Object(args))
}
