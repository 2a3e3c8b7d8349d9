pub mod request;
pub mod response;

pub use request::JsonRpcRequest;
pub use response::{
    ContentBlock, JsonRpcError, JsonRpcResponse, ToolCallResult, INTERNAL_ERROR, INVALID_PARAMS,
    METHOD_NOT_FOUND,
};
