//! Tool and codec traits.

use crate::context::ToolContext;
use crate::error::ToolError;
use futures::future::BoxFuture;

/// A typed tool operation.
///
/// The returned future is `'static`: implementations clone whatever they need
/// out of `self` and `ctx` before boxing.
///
/// ```ignore
/// struct Ping;
///
/// impl Tool for Ping {
///     type Input = PingInput;
///     type Output = PingOutput;
///     const NAME: &'static str = "ping";
///     const DESCRIPTION: &'static str = "Check that the API is reachable";
///
///     fn call(&self, input: PingInput, ctx: &ToolContext)
///         -> BoxFuture<'static, Result<PingOutput, ToolError>>
///     {
///         Box::pin(async move { Ok(PingOutput { echo: input.message }) })
///     }
/// }
/// ```
pub trait Tool: Send + Sync + 'static {
    /// Native input type.
    type Input: Send + 'static;

    /// Native output type.
    type Output: Send + 'static;

    /// Unique tool name used for dispatch.
    const NAME: &'static str;

    /// Description shown in the capability manifest.
    const DESCRIPTION: &'static str;

    /// Run the tool.
    fn call(
        &self,
        input: Self::Input,
        ctx: &ToolContext,
    ) -> BoxFuture<'static, Result<Self::Output, ToolError>>;
}

/// Converts between wire JSON types and a tool's native types.
///
/// Serde and schema bounds live here rather than on [`Tool`]. Use `()` when the
/// native types already serialize and describe themselves.
pub trait ToolCodec<T: Tool>: Send + Sync + 'static {
    /// Wire input: deserialized from call arguments, described in the manifest.
    type WireIn: serde::de::DeserializeOwned + schemars::JsonSchema + Send + 'static;

    /// Wire output: serialized into the result payload.
    type WireOut: serde::Serialize + Send + 'static;

    /// Wire input to native input.
    fn decode(wire: Self::WireIn) -> Result<T::Input, ToolError>;

    /// Native output to wire output.
    fn encode(native: T::Output) -> Result<Self::WireOut, ToolError>;
}

impl<T> ToolCodec<T> for ()
where
    T: Tool,
    T::Input: serde::de::DeserializeOwned + schemars::JsonSchema,
    T::Output: serde::Serialize,
{
    type WireIn = T::Input;
    type WireOut = T::Output;

    fn decode(wire: Self::WireIn) -> Result<T::Input, ToolError> {
        Ok(wire)
    }

    fn encode(native: T::Output) -> Result<Self::WireOut, ToolError> {
        Ok(native)
    }
}
