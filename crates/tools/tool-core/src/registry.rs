//! Tool registry: JSON dispatch and capability manifest.

use crate::context::ToolContext;
use crate::error::ToolError;
use crate::fmt::{TextFormat, TextOptions};
use crate::outcome::ToolOutcome;
use crate::schema::input_schema_for;
use crate::tool::{Tool, ToolCodec};
use futures::future::BoxFuture;
use schemars::Schema;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::sync::Arc;

/// JSON data plus its text rendering.
#[derive(Debug, Clone)]
pub struct FormattedResult {
    /// Serialized output.
    pub data: Value,
    /// Text rendering of the output.
    pub text: String,
}

/// One manifest entry: what a protocol layer needs to advertise a tool.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestEntry {
    /// Tool name.
    pub name: &'static str,
    /// Tool description.
    pub description: &'static str,
    /// JSON Schema of the arguments.
    #[serde(rename = "inputSchema")]
    pub input_schema: Schema,
}

/// Type-erased tool for dynamic dispatch.
pub trait ErasedTool: Send + Sync {
    /// Tool name.
    fn name(&self) -> &'static str;

    /// Tool description.
    fn description(&self) -> &'static str;

    /// Input JSON schema.
    fn input_schema(&self) -> Schema;

    /// Call with JSON arguments, returning JSON data and its text rendering.
    fn call_json_formatted(
        &self,
        args: Value,
        ctx: &ToolContext,
        text_opts: &TextOptions,
    ) -> BoxFuture<'static, Result<FormattedResult, ToolError>>;
}

/// Registry of tools keyed by name.
///
/// Names iterate in sorted order.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    map: BTreeMap<&'static str, Arc<dyn ErasedTool>>,
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.list_names())
            .finish()
    }
}

impl ToolRegistry {
    /// Create a new registry builder.
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// Tool names in sorted order.
    pub fn list_names(&self) -> Vec<&'static str> {
        self.map.keys().copied().collect()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ErasedTool>> {
        self.map.get(name)
    }

    /// Whether a tool is registered under `name`.
    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Registry containing only the named tools; unknown names are ignored.
    pub fn subset<'a>(&self, names: impl IntoIterator<Item = &'a str>) -> Self {
        let map = names
            .into_iter()
            .filter_map(|n| self.map.get_key_value(n))
            .map(|(k, v)| (*k, Arc::clone(v)))
            .collect();
        Self { map }
    }

    /// Dispatch with JSON arguments, returning only the JSON data.
    pub async fn dispatch_json(
        &self,
        name: &str,
        args: Value,
        ctx: &ToolContext,
    ) -> Result<Value, ToolError> {
        self.dispatch_json_formatted(name, args, ctx, &TextOptions::default())
            .await
            .map(|r| r.data)
    }

    /// Dispatch with JSON arguments, returning JSON data and text.
    pub async fn dispatch_json_formatted(
        &self,
        name: &str,
        args: Value,
        ctx: &ToolContext,
        text_opts: &TextOptions,
    ) -> Result<FormattedResult, ToolError> {
        let entry = self
            .map
            .get(name)
            .ok_or_else(|| ToolError::invalid_input(format!("Unknown tool: {name}")))?;
        entry.call_json_formatted(args, ctx, text_opts).await
    }

    /// Dispatch and fold the result into a [`ToolOutcome`].
    pub async fn dispatch(
        &self,
        name: &str,
        args: Value,
        ctx: &ToolContext,
        text_opts: &TextOptions,
    ) -> ToolOutcome {
        let result = self.dispatch_json_formatted(name, args, ctx, text_opts).await;
        if let Err(e) = &result {
            tracing::warn!(
                tool = name,
                request_id = ctx.request_id(),
                kind = e.kind(),
                error = %e,
                "tool call failed"
            );
        }
        result.into()
    }

    /// Capability manifest, sorted by tool name.
    pub fn manifest(&self) -> Vec<ManifestEntry> {
        self.map
            .values()
            .map(|t| ManifestEntry {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }
}

/// Builder for [`ToolRegistry`]. Later registrations replace earlier ones with the same name.
#[derive(Default)]
pub struct ToolRegistryBuilder {
    map: BTreeMap<&'static str, Arc<dyn ErasedTool>>,
}

impl ToolRegistryBuilder {
    /// Register a tool with its codec (`()` for the identity codec).
    #[must_use]
    pub fn register<T, C>(mut self, tool: T) -> Self
    where
        T: Tool + Clone,
        C: ToolCodec<T>,
        T::Output: TextFormat,
    {
        struct Impl<T, C> {
            tool: T,
            _codec: PhantomData<fn() -> C>,
        }

        impl<T, C> ErasedTool for Impl<T, C>
        where
            T: Tool + Clone,
            C: ToolCodec<T>,
            T::Output: TextFormat,
        {
            fn name(&self) -> &'static str {
                T::NAME
            }

            fn description(&self) -> &'static str {
                T::DESCRIPTION
            }

            fn input_schema(&self) -> Schema {
                input_schema_for::<C::WireIn>()
            }

            fn call_json_formatted(
                &self,
                args: Value,
                ctx: &ToolContext,
                text_opts: &TextOptions,
            ) -> BoxFuture<'static, Result<FormattedResult, ToolError>> {
                // Missing arguments mean "all defaults".
                let args = if args.is_null() {
                    Value::Object(serde_json::Map::new())
                } else {
                    args
                };
                let native_in = match serde_json::from_value::<C::WireIn>(args)
                    .map_err(|e| ToolError::invalid_input(e.to_string()))
                    .and_then(C::decode)
                {
                    Ok(v) => v,
                    Err(e) => return Box::pin(async move { Err(e) }),
                };

                tracing::debug!(tool = T::NAME, request_id = ctx.request_id(), "dispatching tool");
                let fut = self.tool.call(native_in, ctx);
                let text_opts = text_opts.clone();
                Box::pin(async move {
                    let out = fut.await?;
                    let text = out.fmt_text(&text_opts);
                    let data = serde_json::to_value(C::encode(out)?)
                        .map_err(|e| ToolError::internal(e.to_string()))?;
                    Ok(FormattedResult { data, text })
                })
            }
        }

        let erased: Arc<dyn ErasedTool> = Arc::new(Impl::<T, C> {
            tool,
            _codec: PhantomData,
        });
        self.map.insert(T::NAME, erased);
        self
    }

    /// Build the registry.
    pub fn finish(self) -> ToolRegistry {
        ToolRegistry { map: self.map }
    }
}
