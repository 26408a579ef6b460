//! # json2csharp
//!
//! Converts a JSON document into C# source code that reconstructs that
//! exact document through the streaming `System.Text.Json.Utf8JsonWriter`
//! API.
//!
//! Instead of serializing an object graph, the generated code emits the
//! document token by token: `WriteStartObject`, `WriteString`,
//! `WriteNumberValue` and friends, one statement per line. Numeric
//! literals keep the exact digits and exponent form of the input, object
//! members keep their source order (duplicate keys included), and string
//! content is escaped per C# string-literal rules.
//!
//! ## Command-Line Tool
//!
//! This crate includes the `json2csharp` CLI tool:
//!
//! ```sh
//! # Install
//! cargo install json2csharp
//!
//! # Convert a file
//! json2csharp input.json
//!
//! # Convert from stdin
//! echo '{"a":1}' | json2csharp
//! ```
//!
//! Run `json2csharp --help` for all options.
//!
//! ## Quick Start
//!
//! ```rust
//! use json2csharp::Converter;
//!
//! let input = r#"{"name":"Alice","scores":[95,87,92],"active":true}"#;
//!
//! let mut converter = Converter::new();
//! let code = converter.convert(input).unwrap();
//!
//! println!("{}", code);
//! ```
//!
//! ## Converting Rust Types
//!
//! Any type implementing [`serde::Serialize`] can be converted directly:
//!
//! ```rust
//! use json2csharp::Converter;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Player {
//!     name: String,
//!     scores: Vec<i32>,
//! }
//!
//! let player = Player {
//!     name: "Alice".into(),
//!     scores: vec![95, 87, 92],
//! };
//!
//! let mut converter = Converter::new();
//! let code = converter.convert_serialize(&player).unwrap();
//! ```
//!
//! ## Configuration
//!
//! Customize generation through [`ConverterOptions`]:
//!
//! ```rust
//! use json2csharp::Converter;
//!
//! let mut converter = Converter::new();
//! converter.options.writer_variable_name = "jsonWriter".to_string();
//! converter.options.emit_setup = false;
//! converter.options.emit_flush = false;
//!
//! let code = converter.convert(r#"[1,2,3]"#).unwrap();
//! ```
//!
//! ## Example Output
//!
//! For the input `{"a":1,"b":"x"}`, the generated code is:
//!
//! ```csharp
//! using var ms = new MemoryStream();
//! using var writer = new Utf8JsonWriter(ms);
//!
//! writer.WriteStartObject();
//! writer.WriteNumber("a", 1);
//! writer.WriteString("b", "x");
//! writer.WriteEndObject();
//!
//! writer.Flush();
//! ```

mod buffer;
mod converter;
mod error;
mod model;
mod options;
mod parser;
mod tokenizer;

pub use crate::converter::{cs_string_literal, Converter};
pub use crate::error::ParseError;
pub use crate::model::{InputPosition, JsonMember, JsonValue};
pub use crate::options::ConverterOptions;
pub use crate::parser::parse_document;
