/// Configuration options for code generation.
///
/// Use [`Default::default()`] or [`ConverterOptions::recommended()`] to get
/// sensible defaults, then modify individual fields as needed. Options are
/// only read during a conversion, so the same instance can drive any number
/// of calls.
///
/// # Example
///
/// ```rust
/// use json2csharp::ConverterOptions;
///
/// let mut options = ConverterOptions::default();
/// options.writer_variable_name = "jsonWriter".to_string();
/// options.emit_setup = false;
/// ```
#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// Identifier of the `Utf8JsonWriter` variable in the generated code.
    /// Default: `"writer"`.
    pub writer_variable_name: String,

    /// Emit the stream/writer construction lines before the body:
    ///
    /// ```csharp
    /// using var ms = new MemoryStream();
    /// using var writer = new Utf8JsonWriter(ms);
    /// ```
    ///
    /// Default: true.
    pub emit_setup: bool,

    /// Emit `writer.Flush();` after the body. Default: true.
    pub emit_flush: bool,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            writer_variable_name: "writer".to_string(),
            emit_setup: true,
            emit_flush: true,
        }
    }
}

impl ConverterOptions {
    /// Creates a new `ConverterOptions` with recommended settings.
    ///
    /// Currently identical to [`Default::default()`], but may include
    /// improved defaults in future versions without breaking compatibility.
    pub fn recommended() -> Self {
        Self::default()
    }
}
